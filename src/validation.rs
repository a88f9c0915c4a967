//! Input validation for scheduling problems.
//!
//! Checks structural integrity of a [`Problem`] before any solving.
//! Detects:
//! - Duplicate talk titles and chair names
//! - Non-positive or non-finite stickiness weights
//! - Prior-session values outside the previous schedule's range
//! - Day partitions that do not exactly cover the session range
//! - Rules referencing unknown talks, chairs, days, or sessions
//! - Chair rosters too small to chair every session
//!
//! All problems are collected and reported together; nothing here touches
//! the solver.

use crate::models::{ChairRule, Problem, TalkRule};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two talks or two chairs share an identifier.
    DuplicateId,
    /// A stickiness weight is zero, negative, or not finite.
    InvalidWeight,
    /// A prior session lies outside the previous schedule's range.
    PriorSessionOutOfRange,
    /// The day partition has gaps, overlaps, or repeated day numbers.
    InvalidDayPartition,
    /// A rule references a day the partition does not define.
    UndefinedDay,
    /// A rule references a talk title that does not exist.
    UnknownTalk,
    /// A rule references a chair name not on the roster.
    UnknownChair,
    /// A rule references a session index outside `1..=n_sessions`.
    SessionOutOfRange,
    /// The chair roster cannot cover every session injectively.
    InsufficientChairs,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a problem configuration.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    check_talks(problem, &mut errors);
    check_day_partition(problem, &mut errors);
    check_talk_rules(problem, &mut errors);
    check_chairs(problem, &mut errors);
    check_chair_rules(problem, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_talks(problem: &Problem, errors: &mut Vec<ValidationError>) {
    let mut titles = HashSet::new();
    let prior_range = problem.prior_sessions();

    for talk in &problem.talks {
        if !titles.insert(talk.title.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate talk title: {}", talk.title),
            ));
        }

        if !talk.stickiness.is_finite() || talk.stickiness <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeight,
                format!(
                    "Talk '{}' has non-positive stickiness {}",
                    talk.title, talk.stickiness
                ),
            ));
        }

        if let Some(prior) = talk.prior_session {
            if prior < 1 || prior > prior_range {
                errors.push(ValidationError::new(
                    ValidationErrorKind::PriorSessionOutOfRange,
                    format!(
                        "Talk '{}' has prior session {} outside 1..={}",
                        talk.title, prior, prior_range
                    ),
                ));
            }
        }
    }
}

/// The day spans must exactly partition `1..=n_sessions`: contiguous,
/// non-overlapping, starting at 1, with unique day numbers.
fn check_day_partition(problem: &Problem, errors: &mut Vec<ValidationError>) {
    let n = problem.n_sessions();

    let mut day_numbers = HashSet::new();
    for span in &problem.days {
        if !day_numbers.insert(span.day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDayPartition,
                format!("Day {} defined more than once", span.day),
            ));
        }
        if span.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDayPartition,
                format!(
                    "Day {} covers no sessions ({}..={})",
                    span.day, span.first, span.last
                ),
            ));
        }
    }

    let mut spans: Vec<_> = problem.days.iter().filter(|s| !s.is_empty()).collect();
    spans.sort_by_key(|s| s.first);

    let mut expected = 1;
    for span in spans {
        if span.first != expected {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDayPartition,
                format!(
                    "Day {} starts at session {} but session {} is uncovered or double-covered",
                    span.day, span.first, expected
                ),
            ));
            return;
        }
        expected = span.last + 1;
    }

    if expected != n + 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDayPartition,
            format!(
                "Day partition covers sessions 1..={} but there are {} sessions",
                expected - 1,
                n
            ),
        ));
    }
}

fn check_talk_rules(problem: &Problem, errors: &mut Vec<ValidationError>) {
    for rule in &problem.rules {
        match rule {
            TalkRule::FixedSession { talk, session } => {
                check_talk_ref(problem, talk, errors);
                check_session_ref(problem, *session, errors);
            }
            TalkRule::OnDay { talk, day } => {
                check_talk_ref(problem, talk, errors);
                check_day_ref(problem, *day, errors);
            }
            TalkRule::Before { first, second } | TalkRule::SeparateDays { first, second } => {
                check_talk_ref(problem, first, errors);
                check_talk_ref(problem, second, errors);
            }
        }
    }
}

fn check_chairs(problem: &Problem, errors: &mut Vec<ValidationError>) {
    let mut names = HashSet::new();
    for name in &problem.chairs {
        if !names.insert(name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate chair name: {name}"),
            ));
        }
    }

    if !problem.chairs.is_empty() && problem.chairs.len() < problem.n_sessions() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientChairs,
            format!(
                "{} chairs cannot cover {} sessions without double-booking",
                problem.chairs.len(),
                problem.n_sessions()
            ),
        ));
    }
}

fn check_chair_rules(problem: &Problem, errors: &mut Vec<ValidationError>) {
    for rule in &problem.chair_rules {
        match rule {
            ChairRule::TalkExclusion { talk, chair } => {
                check_talk_ref(problem, talk, errors);
                check_chair_ref(problem, chair, errors);
            }
            ChairRule::SessionExclusion { chair, session }
            | ChairRule::PriorChair { session, chair } => {
                check_chair_ref(problem, chair, errors);
                check_session_ref(problem, *session, errors);
            }
            ChairRule::DayExclusion { chair, day } => {
                check_chair_ref(problem, chair, errors);
                check_day_ref(problem, *day, errors);
            }
        }
    }
}

fn check_talk_ref(problem: &Problem, title: &str, errors: &mut Vec<ValidationError>) {
    if problem.talk_index(title).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownTalk,
            format!("Rule references unknown talk '{title}'"),
        ));
    }
}

fn check_chair_ref(problem: &Problem, name: &str, errors: &mut Vec<ValidationError>) {
    if problem.chair_index(name).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownChair,
            format!("Rule references unknown chair '{name}'"),
        ));
    }
}

fn check_session_ref(problem: &Problem, session: usize, errors: &mut Vec<ValidationError>) {
    if session < 1 || session > problem.n_sessions() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SessionOutOfRange,
            format!(
                "Rule references session {} outside 1..={}",
                session,
                problem.n_sessions()
            ),
        ));
    }
}

fn check_day_ref(problem: &Problem, day: u32, errors: &mut Vec<ValidationError>) {
    if problem.day_span(day).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::UndefinedDay,
            format!("Rule references undefined day {day}"),
        ));
    }
}
