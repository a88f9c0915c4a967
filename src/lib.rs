//! Conference-session scheduling.
//!
//! Assigns a fixed set of talks to a fixed set of sessions, and a chair
//! to each session, subject to hard constraints (capacity, day pinning,
//! ordering, chair exclusions) while minimizing movement away from a
//! previously published schedule and encouraging topical clustering.
//! The optimization is delegated to the Z3 SMT solver; this crate owns
//! the model, not the search.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Talk`, `Session`, `DaySpan`,
//!   `TalkRule`, `ChairRule`, `Problem`, `Schedule`
//! - **`validation`**: Eager input integrity checks (duplicate titles,
//!   day-partition coverage, dangling rule references)
//! - **`solver`**: Variable declaration, constraint and objective
//!   construction, and the Z3 optimization bridge
//! - **`report`**: Human-readable per-session schedule report
//!
//! # Workflow
//!
//! Build or load a [`models::Problem`], hand it to [`solver::solve`],
//! and render the resulting [`models::Schedule`] with
//! [`report::render`]. Infeasible rule sets are reported with the
//! labels of a conflicting constraint subset.

pub mod models;
pub mod report;
pub mod solver;
pub mod validation;
