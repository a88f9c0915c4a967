//! Schedule (solution) model.
//!
//! A schedule is the solved assignment: every talk placed into a session,
//! every session given a chair (when a roster is configured), with the
//! cost components accounted separately. It only exists as the result of
//! a solve and is handed to the report renderer by value.

use serde::{Deserialize, Serialize};

use super::{Problem, Talk, Weight};

/// How a talk's resolved slot relates to the published schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// The talk had no published slot.
    New,
    /// The talk stays in its published slot.
    Kept,
    /// The talk was moved away from its published slot.
    Moved { from: usize },
}

/// One talk's resolved placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    /// Talk title.
    pub title: String,
    /// Resolved session index (1-based).
    pub session: usize,
    /// Relation to the published schedule.
    pub disposition: Disposition,
}

impl Placement {
    /// Builds the placement of a talk in a resolved session.
    pub fn of(talk: &Talk, session: usize) -> Self {
        let disposition = match talk.prior_session {
            None => Disposition::New,
            Some(prior) if prior == session => Disposition::Kept,
            Some(prior) => Disposition::Moved { from: prior },
        };
        Self {
            title: talk.title.clone(),
            session,
            disposition,
        }
    }
}

/// A complete solved schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// One placement per talk, in problem talk order.
    pub placements: Vec<Placement>,
    /// Chair identity per session (0-based roster index), in session
    /// order. Empty when the problem has no chair roster.
    pub chairs: Vec<usize>,
    /// Total weighted movement cost (sum of stickiness over moved talks).
    pub movement_cost: Weight,
    /// Accumulated soft-preference penalty (topic splits, chair changes).
    pub soft_penalty: Weight,
}

impl Schedule {
    /// Placements assigned to a session, in talk order.
    pub fn session_talks(&self, session: usize) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.session == session)
            .collect()
    }

    /// Number of talks assigned to a session.
    pub fn occupancy(&self, session: usize) -> usize {
        self.placements
            .iter()
            .filter(|p| p.session == session)
            .count()
    }

    /// Chair identity of a session, if chairs were assigned.
    pub fn chair_of(&self, session: usize) -> Option<usize> {
        self.chairs.get(session.checked_sub(1)?).copied()
    }

    /// Sessions whose occupancy exceeds capacity.
    ///
    /// Always empty for a schedule produced by the solver; a non-empty
    /// result indicates a constraint-encoding bug upstream.
    pub fn capacity_anomalies(&self, problem: &Problem) -> Vec<usize> {
        (1..=problem.n_sessions())
            .filter(|&s| self.occupancy(s) > problem.capacities[s - 1] as usize)
            .collect()
    }
}
