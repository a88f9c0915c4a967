//! Scheduling domain models.
//!
//! Core data types for conference-session scheduling problems and their
//! solutions: talks, sessions and the day partition, placement and chair
//! rules, the bundled problem configuration, and the solved schedule.
//!
//! Everything here is plain data — constraint encoding lives in
//! [`crate::solver`], input checking in [`crate::validation`].

mod problem;
mod rule;
mod schedule;
mod session;
mod talk;

pub use problem::{CostWeights, Problem, TopicPolicy};
pub use rule::{ChairRule, TalkRule};
pub use schedule::{Disposition, Placement, Schedule};
pub use session::{DaySpan, Session};
pub use talk::{Talk, Weight};
