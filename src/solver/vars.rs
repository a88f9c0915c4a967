//! Assignment variables.
//!
//! One integer variable per talk ranging over session indices, and one
//! per session ranging over chair identities. Pure declaration — domain
//! restriction is the constraint builder's job.

use z3::ast::Int;
use z3::Context;

use crate::models::Problem;

/// The decision variables of one scheduling instance.
pub struct AssignmentVars<'ctx> {
    /// `talk_sessions[i]` is the session index assigned to talk `i`.
    pub talk_sessions: Vec<Int<'ctx>>,
    /// `session_chairs[s]` is the chair identity of session `s+1`.
    /// Empty when the problem has no chair roster.
    pub session_chairs: Vec<Int<'ctx>>,
}

impl<'ctx> AssignmentVars<'ctx> {
    /// Declares fresh variables for every talk and (if a roster is
    /// configured) every session.
    pub fn declare(ctx: &'ctx Context, problem: &Problem) -> Self {
        let talk_sessions = (0..problem.talks.len())
            .map(|n| Int::new_const(ctx, format!("talk_{n}_in_session")))
            .collect();

        let session_chairs = if problem.chairs.is_empty() {
            Vec::new()
        } else {
            (0..problem.n_sessions())
                .map(|n| Int::new_const(ctx, format!("session_{n}_has_chair")))
                .collect()
        };

        Self {
            talk_sessions,
            session_chairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaySpan, Talk};
    use z3::Config;

    fn tiny_problem(chairs: Vec<String>) -> Problem {
        Problem {
            talks: vec![Talk::new("A"), Talk::new("B")],
            capacities: vec![1, 1],
            days: vec![DaySpan::new(1, 1, 2)],
            rules: vec![],
            chairs,
            chair_rules: vec![],
            topic_policy: Default::default(),
            weights: Default::default(),
            prior_session_count: None,
        }
    }

    #[test]
    fn test_declares_one_var_per_talk_and_session() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let problem = tiny_problem(vec!["X".into(), "Y".into()]);

        let vars = AssignmentVars::declare(&ctx, &problem);
        assert_eq!(vars.talk_sessions.len(), 2);
        assert_eq!(vars.session_chairs.len(), 2);
    }

    #[test]
    fn test_empty_roster_skips_chair_vars() {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let problem = tiny_problem(vec![]);

        let vars = AssignmentVars::declare(&ctx, &problem);
        assert!(vars.session_chairs.is_empty());
    }
}
