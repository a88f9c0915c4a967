//! Problem configuration.
//!
//! A `Problem` bundles everything the solver needs — talks, session
//! capacities, the day partition, scheduling rules, the chair roster and
//! chair rules, the topic policy, and cost weights — into one immutable
//! value constructed once from input data and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ChairRule, DaySpan, Session, Talk, TalkRule, Weight};

/// How topic tags influence the schedule.
///
/// The two strategies are mutually exclusive for a run: a topic is either
/// a hard grouping requirement or a soft clustering nudge, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicPolicy {
    /// Every talk carrying a given tag is forced into one shared session.
    Pinned,
    /// Co-location of talks sharing a tag is rewarded but not required.
    #[default]
    Soft,
}

/// Weights for the soft objective terms.
///
/// Defaults keep topic clustering at unit scale dominant over chair
/// stickiness, which in turn dominates movement cost, so movement acts as
/// a fine-grained tie-breaker that never overrides a structural
/// preference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    /// Global scale applied to per-talk movement costs.
    pub stickiness_factor: Weight,
    /// Cost of splitting a pair of talks that share a topic tag.
    pub topic_affinity: Weight,
    /// Cost of assigning a session a different chair than last time.
    pub chair_stickiness: Weight,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            stickiness_factor: 0.01,
            topic_affinity: 1.0,
            chair_stickiness: 0.1,
        }
    }
}

/// A complete scheduling problem instance.
///
/// Constructed once from structured input (see [`Problem::from_json`]) and
/// passed by reference through constraint building, objective building,
/// and solving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    /// Talks to place, in input order. Titles must be unique.
    pub talks: Vec<Talk>,
    /// Per-session capacity; the list length defines the session count.
    pub capacities: Vec<u32>,
    /// Day partition: contiguous spans covering every session index.
    pub days: Vec<DaySpan>,
    /// Hard talk-placement rules.
    #[serde(default)]
    pub rules: Vec<TalkRule>,
    /// Chair roster, in identity order. Empty disables chair assignment.
    #[serde(default)]
    pub chairs: Vec<String>,
    /// Chair restrictions and stickiness preferences.
    #[serde(default)]
    pub chair_rules: Vec<ChairRule>,
    /// Active topic strategy for this instance.
    #[serde(default)]
    pub topic_policy: TopicPolicy,
    /// Soft-term weights.
    #[serde(default)]
    pub weights: CostWeights,
    /// Session count of the previously published schedule, if it differed
    /// from the current one. Prior-session values are validated against it.
    #[serde(default)]
    pub prior_session_count: Option<usize>,
}

impl Problem {
    /// Parses a problem instance from JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Number of sessions (defined by the capacity list).
    #[inline]
    pub fn n_sessions(&self) -> usize {
        self.capacities.len()
    }

    /// Session count of the previously published schedule.
    pub fn prior_sessions(&self) -> usize {
        self.prior_session_count.unwrap_or_else(|| self.n_sessions())
    }

    /// The session at the given 1-based index, with its day resolved.
    pub fn session(&self, index: usize) -> Option<Session> {
        let capacity = *self.capacities.get(index.checked_sub(1)?)?;
        let day = self.day_of(index)?;
        Some(Session {
            index,
            capacity,
            day,
        })
    }

    /// Iterates all sessions in index order.
    pub fn sessions(&self) -> impl Iterator<Item = Session> + '_ {
        (1..=self.n_sessions()).filter_map(|i| self.session(i))
    }

    /// The span of session indices assigned to a day.
    pub fn day_span(&self, day: u32) -> Option<&DaySpan> {
        self.days.iter().find(|s| s.day == day)
    }

    /// The day a session index falls on.
    pub fn day_of(&self, session: usize) -> Option<u32> {
        self.days
            .iter()
            .find(|s| s.contains(session))
            .map(|s| s.day)
    }

    /// Position of a talk by title.
    pub fn talk_index(&self, title: &str) -> Option<usize> {
        self.talks.iter().position(|t| t.title == title)
    }

    /// Identity of a chair by roster name.
    pub fn chair_index(&self, name: &str) -> Option<usize> {
        self.chairs.iter().position(|c| c == name)
    }

    /// Groups talk indices by topic tag, in stable tag order.
    ///
    /// Only tags carried by at least two talks matter for clustering, but
    /// all tags are returned; callers filter as needed.
    pub fn topic_groups(&self) -> BTreeMap<&str, Vec<usize>> {
        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, talk) in self.talks.iter().enumerate() {
            for topic in &talk.topics {
                groups.entry(topic.as_str()).or_default().push(i);
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_problem() -> Problem {
        Problem {
            talks: vec![
                Talk::new("A").with_prior_session(1).with_topic("ml"),
                Talk::new("B").with_topic("ml").with_topic("bio"),
                Talk::new("C").with_topic("bio"),
            ],
            capacities: vec![2, 2, 1],
            days: vec![DaySpan::new(1, 1, 2), DaySpan::new(2, 3, 3)],
            rules: vec![],
            chairs: vec![],
            chair_rules: vec![],
            topic_policy: TopicPolicy::Soft,
            weights: CostWeights::default(),
            prior_session_count: None,
        }
    }

    #[test]
    fn test_session_lookup() {
        let p = sample_problem();
        assert_eq!(p.n_sessions(), 3);

        let s2 = p.session(2).unwrap();
        assert_eq!(s2.capacity, 2);
        assert_eq!(s2.day, 1);

        let s3 = p.session(3).unwrap();
        assert_eq!(s3.day, 2);

        assert!(p.session(0).is_none());
        assert!(p.session(4).is_none());
    }

    #[test]
    fn test_day_lookup() {
        let p = sample_problem();
        assert_eq!(p.day_of(1), Some(1));
        assert_eq!(p.day_of(3), Some(2));
        assert_eq!(p.day_of(4), None);
        assert_eq!(p.day_span(2).map(|s| s.first), Some(3));
        assert!(p.day_span(9).is_none());
    }

    #[test]
    fn test_index_lookups() {
        let p = sample_problem();
        assert_eq!(p.talk_index("B"), Some(1));
        assert_eq!(p.talk_index("missing"), None);
        assert_eq!(p.chair_index("anyone"), None);
    }

    #[test]
    fn test_topic_groups() {
        let p = sample_problem();
        let groups = p.topic_groups();
        assert_eq!(groups["ml"], vec![0, 1]);
        assert_eq!(groups["bio"], vec![1, 2]);
    }

    #[test]
    fn test_prior_sessions_default() {
        let mut p = sample_problem();
        assert_eq!(p.prior_sessions(), 3);
        p.prior_session_count = Some(5);
        assert_eq!(p.prior_sessions(), 5);
    }

    #[test]
    fn test_from_json_defaults() {
        let p = Problem::from_json(
            r#"{
                "talks": [{"title": "T1", "prior_session": 2}],
                "capacities": [1, 1],
                "days": [{"day": 1, "first": 1, "last": 2}]
            }"#,
        )
        .unwrap();

        assert_eq!(p.topic_policy, TopicPolicy::Soft);
        assert!((p.weights.stickiness_factor - 0.01).abs() < 1e-12);
        assert!(p.chairs.is_empty());
        assert_eq!(p.talks[0].prior_session, Some(2));
    }

    #[test]
    fn test_topic_policy_json() {
        let p = Problem::from_json(
            r#"{
                "talks": [],
                "capacities": [1],
                "days": [{"day": 1, "first": 1, "last": 1}],
                "topic_policy": "pinned"
            }"#,
        )
        .unwrap();
        assert_eq!(p.topic_policy, TopicPolicy::Pinned);
    }
}
