//! SMT-based scheduling.
//!
//! Bridges the domain model to the Z3 optimizer. Builds assignment
//! variables, hard constraints, and the cost objective from a
//! [`Problem`], runs one whole-problem optimization, and decodes the
//! model into a [`Schedule`].
//!
//! Each invocation solves from scratch — there is no incremental mode.
//! When the hard constraints are unsatisfiable, the same constraint set
//! is re-checked with tracked assertions so the conflict can be reported
//! in terms of constraint labels.

mod constraints;
mod objective;
mod vars;

pub use constraints::{ConstraintBuilder, HardConstraint};
pub use objective::{chair_penalty, clustering_penalty, movement_cost, ObjectiveBuilder};
pub use vars::AssignmentVars;

use std::time::Instant;

use thiserror::Error;
use z3::ast::{Bool, Int};
use z3::{Config, Context, Model, Optimize, SatResult, Solver};

use crate::models::{Placement, Problem, Schedule, TopicPolicy};
use crate::validation::{self, ValidationError};

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced by a solve attempt.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The problem failed eager validation; the solver was never invoked.
    #[error("invalid configuration: {}", join_messages(.0))]
    Config(Vec<ValidationError>),

    /// No assignment satisfies every hard constraint. Carries the labels
    /// of an unsatisfiable constraint subset when the solver yields one
    /// (not guaranteed minimal).
    #[error("no feasible schedule; conflicting constraints: [{}]", .0.join(", "))]
    Infeasible(Vec<String>),

    /// The solver gave up without deciding satisfiability.
    #[error("solver could not decide satisfiability")]
    Unknown,

    /// The solver misbehaved (e.g. a model without values).
    #[error("solver failure: {0}")]
    Solver(String),
}

/// Solves a scheduling problem to optimality.
///
/// Validates the configuration, builds the constraint model, and asks
/// Z3 for an assignment minimizing the combined cost. Ties among
/// equal-cost optima are broken arbitrarily by the solver; only the
/// cost is deterministic across re-runs of identical input.
pub fn solve(problem: &Problem) -> Result<Schedule, SolveError> {
    if let Err(errors) = validation::validate(problem) {
        return Err(SolveError::Config(errors));
    }

    let cfg = Config::new();
    let ctx = Context::new(&cfg);
    let vars = AssignmentVars::declare(&ctx, problem);
    let hard = ConstraintBuilder::new(&ctx, problem, &vars).build()?;
    let objective = ObjectiveBuilder::new(&ctx, problem, &vars).build()?;

    tracing::debug!(
        talks = problem.talks.len(),
        sessions = problem.n_sessions(),
        chairs = problem.chairs.len(),
        constraints = hard.len(),
        "built scheduling model"
    );

    let optimizer = Optimize::new(&ctx);
    for constraint in &hard {
        optimizer.assert(&constraint.formula);
    }
    optimizer.minimize(&objective);

    let started = Instant::now();
    match optimizer.check(&[]) {
        SatResult::Sat => {
            let model = optimizer
                .get_model()
                .ok_or_else(|| SolveError::Solver("sat result without a model".into()))?;
            let schedule = decode(problem, &vars, &model)?;
            tracing::info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                movement_cost = schedule.movement_cost,
                soft_penalty = schedule.soft_penalty,
                "found optimal schedule"
            );
            Ok(schedule)
        }
        SatResult::Unsat => {
            tracing::debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "hard constraints unsatisfiable, extracting core"
            );
            Err(SolveError::Infeasible(conflicting_labels(&ctx, &hard)))
        }
        SatResult::Unknown => Err(SolveError::Unknown),
    }
}

/// Reads the assignment out of a model and accounts its costs.
fn decode(
    problem: &Problem,
    vars: &AssignmentVars<'_>,
    model: &Model<'_>,
) -> Result<Schedule, SolveError> {
    let mut sessions = Vec::with_capacity(problem.talks.len());
    for (talk, var) in problem.talks.iter().zip(&vars.talk_sessions) {
        let value = eval_int(model, var)
            .ok_or_else(|| SolveError::Solver(format!("no session for talk '{}'", talk.title)))?;
        sessions.push(value as usize);
    }

    let mut chairs = Vec::with_capacity(vars.session_chairs.len());
    for (n, var) in vars.session_chairs.iter().enumerate() {
        let value = eval_int(model, var)
            .ok_or_else(|| SolveError::Solver(format!("no chair for session {}", n + 1)))?;
        chairs.push(value as usize);
    }

    let placements: Vec<Placement> = problem
        .talks
        .iter()
        .zip(&sessions)
        .map(|(talk, &session)| Placement::of(talk, session))
        .collect();

    let movement = movement_cost(problem, &sessions);
    let mut soft = chair_penalty(problem, &chairs);
    if problem.topic_policy == TopicPolicy::Soft {
        soft += clustering_penalty(problem, &sessions);
    }

    Ok(Schedule {
        placements,
        chairs,
        movement_cost: movement,
        soft_penalty: soft,
    })
}

fn eval_int(model: &Model<'_>, var: &Int<'_>) -> Option<i64> {
    model.eval(var, true).and_then(|v| v.as_i64())
}

/// Re-checks the hard constraints with tracked assertions and maps the
/// unsat core back to constraint labels.
fn conflicting_labels<'ctx>(ctx: &'ctx Context, hard: &[HardConstraint<'ctx>]) -> Vec<String> {
    let solver = Solver::new(ctx);
    let tags: Vec<Bool<'ctx>> = (0..hard.len())
        .map(|i| Bool::new_const(ctx, format!("constraint_{i}")))
        .collect();
    for (constraint, tag) in hard.iter().zip(&tags) {
        solver.assert_and_track(&constraint.formula, tag);
    }

    match solver.check() {
        SatResult::Unsat => {
            let core = solver.get_unsat_core();
            hard.iter()
                .zip(&tags)
                .filter(|(_, tag)| core.contains(*tag))
                .map(|(constraint, _)| constraint.label.clone())
                .collect()
        }
        // The optimizer said unsat; disagreement here leaves us with no
        // core to report.
        _ => Vec::new(),
    }
}
