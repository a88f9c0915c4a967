//! Talk model.
//!
//! A talk is the unit of scheduling: it must be placed into exactly one
//! session. Talks carry an optional slot from the previously published
//! schedule plus a stickiness weight that prices moving them away from it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Numeric weight used uniformly for every soft preference.
pub type Weight = f64;

fn default_stickiness() -> Weight {
    1.0
}

/// A talk to be assigned to a session.
///
/// The title doubles as the unique identifier — rule definitions reference
/// talks by title, so titles must be distinct across the problem.
///
/// Topic tags use an ordered set so that model construction iterates them
/// in a stable order across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Talk {
    /// Descriptive title, unique across the problem.
    pub title: String,
    /// Session index (1-based) in the previously published schedule.
    /// `None` for newly added talks with no prior slot.
    #[serde(default)]
    pub prior_session: Option<usize>,
    /// Cost of moving this talk away from `prior_session`. Lower values
    /// mark talks that the solver should prefer to move first.
    #[serde(default = "default_stickiness")]
    pub stickiness: Weight,
    /// Topic tags used for clustering preferences. May be empty.
    #[serde(default)]
    pub topics: BTreeSet<String>,
}

impl Talk {
    /// Creates a new talk with no prior slot and default stickiness.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prior_session: None,
            stickiness: default_stickiness(),
            topics: BTreeSet::new(),
        }
    }

    /// Sets the previously published session slot.
    pub fn with_prior_session(mut self, session: usize) -> Self {
        self.prior_session = Some(session);
        self
    }

    /// Sets the stickiness weight.
    pub fn with_stickiness(mut self, weight: Weight) -> Self {
        self.stickiness = weight;
        self
    }

    /// Adds a topic tag.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topics.insert(topic.into());
        self
    }

    /// Whether this talk shares at least one topic tag with another talk.
    pub fn shares_topic(&self, other: &Talk) -> bool {
        self.topics.iter().any(|t| other.topics.contains(t))
    }

    /// Whether this talk is new (had no slot in the published schedule).
    #[inline]
    pub fn is_new(&self) -> bool {
        self.prior_session.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_talk_builder() {
        let talk = Talk::new("Opening Keynote")
            .with_prior_session(1)
            .with_stickiness(0.1)
            .with_topic("core")
            .with_topic("community");

        assert_eq!(talk.title, "Opening Keynote");
        assert_eq!(talk.prior_session, Some(1));
        assert!((talk.stickiness - 0.1).abs() < 1e-12);
        assert_eq!(talk.topics.len(), 2);
        assert!(!talk.is_new());
    }

    #[test]
    fn test_talk_defaults() {
        let talk = Talk::new("New Submission");
        assert!(talk.is_new());
        assert!((talk.stickiness - 1.0).abs() < 1e-12);
        assert!(talk.topics.is_empty());
    }

    #[test]
    fn test_shares_topic() {
        let a = Talk::new("A").with_topic("ml").with_topic("infra");
        let b = Talk::new("B").with_topic("ml");
        let c = Talk::new("C").with_topic("bio");

        assert!(a.shares_topic(&b));
        assert!(!a.shares_topic(&c));
        assert!(!c.shares_topic(&Talk::new("D")));
    }

    #[test]
    fn test_talk_deserialize_defaults() {
        let talk: Talk = serde_json::from_str(r#"{"title": "T"}"#).unwrap();
        assert!(talk.is_new());
        assert!((talk.stickiness - 1.0).abs() < 1e-12);
        assert!(talk.topics.is_empty());
    }
}
