//! Scheduling rules.
//!
//! Rules are the hard requirements a valid schedule must satisfy beyond
//! domain validity and capacity: fixed-slot pins, day availability,
//! ordering between talks, same-speaker talks on disjoint days, and the
//! chair-assignment restrictions. Talks are referenced by title, chairs
//! by roster name; references are checked eagerly before solving.

use serde::{Deserialize, Serialize};

/// A hard constraint on talk placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TalkRule {
    /// The talk must be placed in exactly this session.
    FixedSession { talk: String, session: usize },

    /// The talk must be placed in a session on the given day.
    /// Used for speaker availability and timezone windows without
    /// naming a specific session.
    OnDay { talk: String, day: u32 },

    /// `first` must not be scheduled after `second`
    /// (resolved session of `first` <= resolved session of `second`).
    Before { first: String, second: String },

    /// The two talks must land on two different days.
    /// Typically both talks belong to the same speaker.
    SeparateDays { first: String, second: String },
}

impl TalkRule {
    /// Pins a talk to an exact session index.
    pub fn fixed(talk: impl Into<String>, session: usize) -> Self {
        Self::FixedSession {
            talk: talk.into(),
            session,
        }
    }

    /// Pins a talk to a day.
    pub fn on_day(talk: impl Into<String>, day: u32) -> Self {
        Self::OnDay {
            talk: talk.into(),
            day,
        }
    }

    /// Requires `first` to come no later than `second`.
    pub fn before(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::Before {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Requires the two talks to fall on different days.
    pub fn separate_days(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::SeparateDays {
            first: first.into(),
            second: second.into(),
        }
    }
}

/// A restriction or preference on chair assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChairRule {
    /// The chair may never chair the session containing the talk.
    TalkExclusion { talk: String, chair: String },

    /// The chair may never hold this specific session.
    SessionExclusion { chair: String, session: usize },

    /// The chair may not hold any session on the given day.
    DayExclusion { chair: String, day: u32 },

    /// Soft preference: this session was previously chaired by this
    /// chair, and the assignment should stay put when possible.
    PriorChair { session: usize, chair: String },
}

impl ChairRule {
    /// Bars a chair from the session containing a talk.
    pub fn talk_exclusion(talk: impl Into<String>, chair: impl Into<String>) -> Self {
        Self::TalkExclusion {
            talk: talk.into(),
            chair: chair.into(),
        }
    }

    /// Bars a chair from a specific session.
    pub fn session_exclusion(chair: impl Into<String>, session: usize) -> Self {
        Self::SessionExclusion {
            chair: chair.into(),
            session,
        }
    }

    /// Bars a chair from every session on a day.
    pub fn day_exclusion(chair: impl Into<String>, day: u32) -> Self {
        Self::DayExclusion {
            chair: chair.into(),
            day,
        }
    }

    /// Records the previously published chair of a session.
    pub fn prior_chair(session: usize, chair: impl Into<String>) -> Self {
        Self::PriorChair {
            session,
            chair: chair.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rule() {
        let r = TalkRule::fixed("Opening", 1);
        match r {
            TalkRule::FixedSession { talk, session } => {
                assert_eq!(talk, "Opening");
                assert_eq!(session, 1);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_on_day_rule() {
        let r = TalkRule::on_day("Remote Talk", 2);
        match r {
            TalkRule::OnDay { talk, day } => {
                assert_eq!(talk, "Remote Talk");
                assert_eq!(day, 2);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_before_rule() {
        let r = TalkRule::before("Overview", "Deep Dive");
        match r {
            TalkRule::Before { first, second } => {
                assert_eq!(first, "Overview");
                assert_eq!(second, "Deep Dive");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_separate_days_rule() {
        let r = TalkRule::separate_days("Talk A", "Talk B");
        assert_eq!(
            r,
            TalkRule::SeparateDays {
                first: "Talk A".into(),
                second: "Talk B".into(),
            }
        );
    }

    #[test]
    fn test_chair_rule_factories() {
        assert_eq!(
            ChairRule::talk_exclusion("T", "Alice"),
            ChairRule::TalkExclusion {
                talk: "T".into(),
                chair: "Alice".into(),
            }
        );
        assert_eq!(
            ChairRule::session_exclusion("Bob", 3),
            ChairRule::SessionExclusion {
                chair: "Bob".into(),
                session: 3,
            }
        );
        assert_eq!(
            ChairRule::day_exclusion("Bob", 2),
            ChairRule::DayExclusion {
                chair: "Bob".into(),
                day: 2,
            }
        );
        assert_eq!(
            ChairRule::prior_chair(1, "Carol"),
            ChairRule::PriorChair {
                session: 1,
                chair: "Carol".into(),
            }
        );
    }

    #[test]
    fn test_rule_json_round_trip() {
        let rules = vec![
            TalkRule::fixed("Opening", 1),
            TalkRule::separate_days("A", "B"),
        ];
        let json = serde_json::to_string(&rules).unwrap();
        assert!(json.contains("\"type\":\"fixed_session\""));
        assert!(json.contains("\"type\":\"separate_days\""));
        let back: Vec<TalkRule> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rules);
    }
}
