//! Objective construction and cost accounting.
//!
//! The solver minimizes one scalar combining three soft concerns:
//!
//! - movement away from the published schedule, scaled by the global
//!   stickiness factor so it acts as a fine-grained tie-breaker;
//! - splitting talks that share a topic tag (only under
//!   [`TopicPolicy::Soft`] — the pinned policy makes grouping hard);
//! - changing a session's previously published chair.
//!
//! All weights pass through one integer conversion so the solver works
//! in exact milli-units; the default weights keep topic affinity above
//! chair stickiness above movement. The plain evaluators at the bottom
//! recompute the same components from a decoded assignment, both for
//! per-schedule accounting and for brute-force checks in tests.

use z3::ast::{Ast, Bool, Int};
use z3::Context;

use crate::models::{ChairRule, Problem, TopicPolicy, Weight};
use crate::solver::vars::AssignmentVars;
use crate::solver::SolveError;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Integer units per weight unit in the minimized scalar.
pub const COST_SCALE: i64 = 1000;

/// Converts a weight to integer cost units.
fn units(weight: Weight) -> i64 {
    (weight * COST_SCALE as f64).round() as i64
}

/// Builds the minimized scalar for one instance.
pub struct ObjectiveBuilder<'a, 'ctx> {
    ctx: &'ctx Context,
    problem: &'a Problem,
    vars: &'a AssignmentVars<'ctx>,
}

impl<'a, 'ctx> ObjectiveBuilder<'a, 'ctx> {
    /// Creates a builder over the given variables.
    pub fn new(ctx: &'ctx Context, problem: &'a Problem, vars: &'a AssignmentVars<'ctx>) -> Self {
        Self { ctx, problem, vars }
    }

    /// Builds the combined cost term.
    pub fn build(&self) -> Result<Int<'ctx>, SolveError> {
        let mut terms = Vec::new();

        self.movement_terms(&mut terms);
        if self.problem.topic_policy == TopicPolicy::Soft {
            self.topic_terms(&mut terms);
        }
        self.chair_terms(&mut terms)?;

        if terms.is_empty() {
            return Ok(Int::from_i64(self.ctx, 0));
        }
        let refs: Vec<&Int<'ctx>> = terms.iter().collect();
        Ok(Int::add(self.ctx, &refs))
    }

    /// Indicator cost per talk with a published slot: pay the scaled
    /// stickiness when the resolved session differs from the prior one.
    fn movement_terms(&self, terms: &mut Vec<Int<'ctx>>) {
        let zero = Int::from_i64(self.ctx, 0);
        let factor = self.problem.weights.stickiness_factor;

        for (talk, var) in self.problem.talks.iter().zip(&self.vars.talk_sessions) {
            if let Some(prior) = talk.prior_session {
                let prior = Int::from_u64(self.ctx, prior as u64);
                let cost = Int::from_i64(self.ctx, units(talk.stickiness * factor));
                terms.push(var._eq(&prior).not().ite(&cost, &zero));
            }
        }
    }

    /// Indicator cost per unordered pair of talks sharing a topic tag:
    /// pay the topic affinity when they land in different sessions.
    fn topic_terms(&self, terms: &mut Vec<Int<'ctx>>) {
        let zero = Int::from_i64(self.ctx, 0);
        let split = Int::from_i64(self.ctx, units(self.problem.weights.topic_affinity));

        for (topic, talks) in self.problem.topic_groups() {
            if talks.len() < 2 {
                continue;
            }
            tracing::debug!(topic, talks = talks.len(), "clustering topic group");

            for (k, &i) in talks.iter().enumerate() {
                for &j in &talks[k + 1..] {
                    let same: Bool<'ctx> =
                        self.vars.talk_sessions[i]._eq(&self.vars.talk_sessions[j]);
                    terms.push(same.not().ite(&split, &zero));
                }
            }
        }
    }

    /// Indicator cost per previously published chair assignment: pay
    /// the chair stickiness when the session's chair changes.
    fn chair_terms(&self, terms: &mut Vec<Int<'ctx>>) -> Result<(), SolveError> {
        if self.vars.session_chairs.is_empty() {
            return Ok(());
        }
        let zero = Int::from_i64(self.ctx, 0);
        let change = Int::from_i64(self.ctx, units(self.problem.weights.chair_stickiness));

        for rule in &self.problem.chair_rules {
            if let ChairRule::PriorChair { session, chair } = rule {
                let id = self.problem.chair_index(chair).ok_or_else(|| {
                    SolveError::Config(vec![ValidationError::new(
                        ValidationErrorKind::UnknownChair,
                        format!("Rule references unknown chair '{chair}'"),
                    )])
                })?;
                let identity = Int::from_u64(self.ctx, id as u64);
                let var = session
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
                    })?;
                terms.push(var._eq(&identity).not().ite(&change, &zero));
            }
        }
        Ok(())
    }
}

/// Total weighted movement cost of an assignment: the sum of stickiness
/// over talks placed away from their published slot. Unscaled — the
/// global stickiness factor applies only inside the minimized scalar.
pub fn movement_cost(problem: &Problem, sessions: &[usize]) -> Weight {
    problem
        .talks
        .iter()
        .zip(sessions)
        .filter_map(|(talk, &session)| {
            talk.prior_session
                .filter(|&prior| prior != session)
                .map(|_| talk.stickiness)
        })
        .sum()
}

/// Clustering penalty of an assignment: topic affinity paid once per
/// topic per unordered pair of carriers placed in different sessions.
pub fn clustering_penalty(problem: &Problem, sessions: &[usize]) -> Weight {
    let mut split_pairs = 0usize;
    for (_, talks) in problem.topic_groups() {
        for (k, &i) in talks.iter().enumerate() {
            for &j in &talks[k + 1..] {
                if sessions[i] != sessions[j] {
                    split_pairs += 1;
                }
            }
        }
    }
    split_pairs as Weight * problem.weights.topic_affinity
}

/// Chair-change penalty of an assignment: chair stickiness paid per
/// session whose chair differs from the published mapping.
pub fn chair_penalty(problem: &Problem, chairs: &[usize]) -> Weight {
    if chairs.is_empty() {
        return 0.0;
    }
    let mut changes = 0usize;
    for rule in &problem.chair_rules {
        if let ChairRule::PriorChair { session, chair } = rule {
            if let Some(id) = problem.chair_index(chair) {
                if chairs.get(*session - 1) != Some(&id) {
                    changes += 1;
                }
            }
        }
    }
    changes as Weight * problem.weights.chair_stickiness
}
