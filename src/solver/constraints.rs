//! Hard constraint construction.
//!
//! Translates the problem's rules into labeled boolean constraints over
//! the assignment variables. Every constraint carries a human-readable
//! label so that an unsatisfiable instance can be reported in terms of
//! the rules that conflict, not solver internals.
//!
//! Families emitted here:
//! - Domain validity for talk and chair variables
//! - Per-session at-most-K capacity (pseudo-boolean)
//! - Fixed-session and day pins
//! - Ordering between designated talks
//! - Disjoint-day pairing for same-speaker talks
//! - Chair uniqueness and the chair exclusion rules
//! - Hard per-topic grouping under [`TopicPolicy::Pinned`]

use z3::ast::{Ast, Bool, Int};
use z3::Context;

use crate::models::{ChairRule, Problem, TalkRule, TopicPolicy};
use crate::solver::vars::AssignmentVars;
use crate::solver::SolveError;
use crate::validation::{ValidationError, ValidationErrorKind};

/// A labeled hard constraint.
pub struct HardConstraint<'ctx> {
    /// Stable description used in infeasibility diagnostics.
    pub label: String,
    /// The constraint formula.
    pub formula: Bool<'ctx>,
}

impl<'ctx> HardConstraint<'ctx> {
    fn new(label: impl Into<String>, formula: Bool<'ctx>) -> Self {
        Self {
            label: label.into(),
            formula,
        }
    }
}

/// Builds the hard-constraint set for one instance.
pub struct ConstraintBuilder<'a, 'ctx> {
    ctx: &'ctx Context,
    problem: &'a Problem,
    vars: &'a AssignmentVars<'ctx>,
}

impl<'a, 'ctx> ConstraintBuilder<'a, 'ctx> {
    /// Creates a builder over the given variables.
    pub fn new(ctx: &'ctx Context, problem: &'a Problem, vars: &'a AssignmentVars<'ctx>) -> Self {
        Self { ctx, problem, vars }
    }

    /// Builds every hard constraint of the instance.
    ///
    /// Fails only on unresolvable rule references (unknown talk, chair,
    /// or day) — a configuration error, reported without touching the
    /// solver.
    pub fn build(&self) -> Result<Vec<HardConstraint<'ctx>>, SolveError> {
        let mut out = Vec::new();

        self.talk_domains(&mut out);
        self.capacities(&mut out);
        self.talk_rules(&mut out)?;
        self.chair_constraints(&mut out)?;

        if self.problem.topic_policy == TopicPolicy::Pinned {
            self.topic_pins(&mut out);
        }

        Ok(out)
    }

    /// Every talk's session variable lies in `[1, n_sessions]`.
    fn talk_domains(&self, out: &mut Vec<HardConstraint<'ctx>>) {
        let lo = Int::from_u64(self.ctx, 1);
        let hi = Int::from_u64(self.ctx, self.problem.n_sessions() as u64);

        for (talk, var) in self.problem.talks.iter().zip(&self.vars.talk_sessions) {
            out.push(HardConstraint::new(
                format!("talk-domain: '{}'", talk.title),
                Bool::and(self.ctx, &[&var.ge(&lo), &var.le(&hi)]),
            ));
        }
    }

    /// At most `capacity` of the talk variables equal each session index.
    fn capacities(&self, out: &mut Vec<HardConstraint<'ctx>>) {
        for session in self.problem.sessions() {
            let index = Int::from_u64(self.ctx, session.index as u64);
            let in_session: Vec<Bool<'ctx>> = self
                .vars
                .talk_sessions
                .iter()
                .map(|t| t._eq(&index))
                .collect();
            let weighted: Vec<(&Bool<'ctx>, i32)> = in_session.iter().map(|b| (b, 1)).collect();

            out.push(HardConstraint::new(
                format!("capacity: session {} <= {}", session.index, session.capacity),
                Bool::pb_le(self.ctx, &weighted, session.capacity as i32),
            ));
        }
    }

    fn talk_rules(&self, out: &mut Vec<HardConstraint<'ctx>>) -> Result<(), SolveError> {
        for rule in &self.problem.rules {
            match rule {
                TalkRule::FixedSession { talk, session } => {
                    let var = self.talk_var(talk)?;
                    let target = Int::from_u64(self.ctx, *session as u64);
                    out.push(HardConstraint::new(
                        format!("pin: '{talk}' in session {session}"),
                        var._eq(&target),
                    ));
                }
                TalkRule::OnDay { talk, day } => {
                    let var = self.talk_var(talk)?;
                    out.push(HardConstraint::new(
                        format!("day-pin: '{talk}' on day {day}"),
                        self.on_day(var, *day)?,
                    ));
                }
                TalkRule::Before { first, second } => {
                    let a = self.talk_var(first)?;
                    let b = self.talk_var(second)?;
                    out.push(HardConstraint::new(
                        format!("order: '{first}' before '{second}'"),
                        a.le(b),
                    ));
                }
                TalkRule::SeparateDays { first, second } => {
                    let a = self.talk_var(first)?;
                    let b = self.talk_var(second)?;
                    out.push(HardConstraint::new(
                        format!("separate-days: '{first}' / '{second}'"),
                        self.separate_days(a, b)?,
                    ));
                }
            }
        }
        Ok(())
    }

    /// Disjunction over every ordered pair of distinct days: the first
    /// talk on one day and the second on another.
    fn separate_days(
        &self,
        a: &Int<'ctx>,
        b: &Int<'ctx>,
    ) -> Result<Bool<'ctx>, SolveError> {
        let mut cases = Vec::new();
        for da in &self.problem.days {
            for db in &self.problem.days {
                if da.day != db.day {
                    cases.push(Bool::and(
                        self.ctx,
                        &[&self.on_day(a, da.day)?, &self.on_day(b, db.day)?],
                    ));
                }
            }
        }
        let refs: Vec<&Bool<'ctx>> = cases.iter().collect();
        Ok(Bool::or(self.ctx, &refs))
    }

    fn chair_constraints(&self, out: &mut Vec<HardConstraint<'ctx>>) -> Result<(), SolveError> {
        if self.vars.session_chairs.is_empty() {
            return Ok(());
        }

        let lo = Int::from_u64(self.ctx, 0);
        let hi = Int::from_u64(self.ctx, self.problem.chairs.len() as u64);
        for (n, var) in self.vars.session_chairs.iter().enumerate() {
            out.push(HardConstraint::new(
                format!("chair-domain: session {}", n + 1),
                Bool::and(self.ctx, &[&var.ge(&lo), &var.lt(&hi)]),
            ));
        }

        // No chair holds two sessions.
        for (id, name) in self.problem.chairs.iter().enumerate() {
            let identity = Int::from_u64(self.ctx, id as u64);
            let holds: Vec<Bool<'ctx>> = self
                .vars
                .session_chairs
                .iter()
                .map(|c| c._eq(&identity))
                .collect();
            let weighted: Vec<(&Bool<'ctx>, i32)> = holds.iter().map(|b| (b, 1)).collect();
            out.push(HardConstraint::new(
                format!("chair-unique: {name}"),
                Bool::pb_le(self.ctx, &weighted, 1),
            ));
        }

        for rule in &self.problem.chair_rules {
            match rule {
                ChairRule::TalkExclusion { talk, chair } => {
                    let var = self.talk_var(talk)?;
                    let id = self.chair_id(chair)?;
                    out.push(HardConstraint::new(
                        format!("chair-exclusion: {chair} with '{talk}'"),
                        self.talk_exclusion(var, id),
                    ));
                }
                ChairRule::SessionExclusion { chair, session } => {
                    let id = Int::from_u64(self.ctx, self.chair_id(chair)? as u64);
                    let var = self.chair_var(*session)?;
                    out.push(HardConstraint::new(
                        format!("chair-exclusion: {chair} not session {session}"),
                        var._eq(&id).not(),
                    ));
                }
                ChairRule::DayExclusion { chair, day } => {
                    let id = Int::from_u64(self.ctx, self.chair_id(chair)? as u64);
                    let span = self.day_span(*day)?;
                    // One inequality per forbidden session index.
                    for s in span.0..=span.1 {
                        let var = self.chair_var(s)?;
                        out.push(HardConstraint::new(
                            format!("chair-exclusion: {chair} not session {s} (day {day})"),
                            var._eq(&id).not(),
                        ));
                    }
                }
                ChairRule::PriorChair { .. } => {
                    // Soft preference, handled by the objective builder.
                }
            }
        }
        Ok(())
    }

    /// For every session: not (talk in this session and this session
    /// chaired by the excluded chair).
    fn talk_exclusion(&self, talk_var: &Int<'ctx>, chair: usize) -> Bool<'ctx> {
        let identity = Int::from_u64(self.ctx, chair as u64);
        let clauses: Vec<Bool<'ctx>> = self
            .vars
            .session_chairs
            .iter()
            .enumerate()
            .map(|(n, chair_var)| {
                let here = Int::from_u64(self.ctx, (n + 1) as u64);
                Bool::and(self.ctx, &[&talk_var._eq(&here), &chair_var._eq(&identity)]).not()
            })
            .collect();
        let refs: Vec<&Bool<'ctx>> = clauses.iter().collect();
        Bool::and(self.ctx, &refs)
    }

    /// One shared session variable per topic: every carrier equals it.
    fn topic_pins(&self, out: &mut Vec<HardConstraint<'ctx>>) {
        for (topic, talks) in self.problem.topic_groups() {
            if talks.len() < 2 {
                continue;
            }
            tracing::debug!(topic, talks = talks.len(), "pinning topic group");

            let shared = Int::new_const(self.ctx, format!("topic_{topic}"));
            let equalities: Vec<Bool<'ctx>> = talks
                .iter()
                .map(|&i| self.vars.talk_sessions[i]._eq(&shared))
                .collect();
            let refs: Vec<&Bool<'ctx>> = equalities.iter().collect();
            out.push(HardConstraint::new(
                format!("topic-pin: {topic}"),
                Bool::and(self.ctx, &refs),
            ));
        }
    }

    /// The session variable falls within the day's contiguous span.
    fn on_day(&self, var: &Int<'ctx>, day: u32) -> Result<Bool<'ctx>, SolveError> {
        let (first, last) = self.day_span(day)?;
        let lo = Int::from_u64(self.ctx, first as u64);
        let hi = Int::from_u64(self.ctx, last as u64);
        Ok(Bool::and(self.ctx, &[&var.ge(&lo), &var.le(&hi)]))
    }

    fn day_span(&self, day: u32) -> Result<(usize, usize), SolveError> {
        self.problem
            .day_span(day)
            .map(|s| (s.first, s.last))
            .ok_or_else(|| {
                SolveError::Config(vec![ValidationError::new(
                    ValidationErrorKind::UndefinedDay,
                    format!("Rule references undefined day {day}"),
                )])
            })
    }

    fn chair_var(&self, session: usize) -> Result<&Int<'ctx>, SolveError> {
        session
            .checked_sub(1)
            .and_then(|i| self.vars.session_chairs.get(i))
            .ok_or_else(|| {
                SolveError::Config(vec![ValidationError::new(
                    ValidationErrorKind::SessionOutOfRange,
                    format!(
                        "Rule references session {} outside 1..={}",
                        session,
                        self.problem.n_sessions()
                    ),
                )])
            })
    }

    fn talk_var(&self, title: &str) -> Result<&Int<'ctx>, SolveError> {
        self.problem
            .talk_index(title)
            .map(|i| &self.vars.talk_sessions[i])
            .ok_or_else(|| {
                SolveError::Config(vec![ValidationError::new(
                    ValidationErrorKind::UnknownTalk,
                    format!("Rule references unknown talk '{title}'"),
                )])
            })
    }

    fn chair_id(&self, name: &str) -> Result<usize, SolveError> {
        self.problem.chair_index(name).ok_or_else(|| {
            SolveError::Config(vec![ValidationError::new(
                ValidationErrorKind::UnknownChair,
                format!("Rule references unknown chair '{name}'"),
            )])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaySpan, Talk};
    use z3::Config;

    fn sample_problem() -> Problem {
        Problem {
            talks: vec![
                Talk::new("A").with_topic("ml"),
                Talk::new("B").with_topic("ml"),
                Talk::new("C"),
            ],
            capacities: vec![2, 2],
            days: vec![DaySpan::new(1, 1, 1), DaySpan::new(2, 2, 2)],
            rules: vec![TalkRule::on_day("A", 1), TalkRule::before("A", "B")],
            chairs: vec!["X".into(), "Y".into()],
            chair_rules: vec![
                ChairRule::talk_exclusion("A", "X"),
                ChairRule::day_exclusion("Y", 2),
            ],
            topic_policy: TopicPolicy::Soft,
            weights: Default::default(),
            prior_session_count: None,
        }
    }

    fn labels(problem: &Problem) -> Vec<String> {
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let vars = AssignmentVars::declare(&ctx, problem);
        ConstraintBuilder::new(&ctx, problem, &vars)
            .build()
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect()
    }

    #[test]
    fn test_emits_all_families() {
        let labels = labels(&sample_problem());

        assert!(labels.iter().any(|l| l.starts_with("talk-domain: 'A'")));
        assert!(labels.contains(&"capacity: session 1 <= 2".to_string()));
        assert!(labels.contains(&"day-pin: 'A' on day 1".to_string()));
        assert!(labels.contains(&"order: 'A' before 'B'".to_string()));
        assert!(labels.contains(&"chair-domain: session 1".to_string()));
        assert!(labels.contains(&"chair-unique: X".to_string()));
        assert!(labels.contains(&"chair-exclusion: X with 'A'".to_string()));
        assert!(labels.contains(&"chair-exclusion: Y not session 2 (day 2)".to_string()));
    }

    #[test]
    fn test_soft_policy_emits_no_topic_pins() {
        let labels = labels(&sample_problem());
        assert!(!labels.iter().any(|l| l.starts_with("topic-pin")));
    }

    #[test]
    fn test_pinned_policy_emits_topic_pins() {
        let mut p = sample_problem();
        p.topic_policy = TopicPolicy::Pinned;
        let labels = labels(&p);
        assert!(labels.contains(&"topic-pin: ml".to_string()));
    }

    #[test]
    fn test_empty_roster_skips_chair_family() {
        let mut p = sample_problem();
        p.chairs = vec![];
        p.chair_rules = vec![];
        let labels = labels(&p);
        assert!(!labels.iter().any(|l| l.starts_with("chair-")));
    }

    #[test]
    fn test_unknown_reference_is_config_error() {
        let p = sample_problem();
        let cfg = Config::new();
        let ctx = Context::new(&cfg);
        let vars = AssignmentVars::declare(&ctx, &p);

        let mut broken = p.clone();
        broken.rules.push(TalkRule::on_day("A", 9));
        let result = ConstraintBuilder::new(&ctx, &broken, &vars).build();
        assert!(matches!(result, Err(SolveError::Config(_))));
    }
}
