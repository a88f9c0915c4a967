//! Text report rendering.
//!
//! Pure formatter over a solved schedule: one block per session in index
//! order, listing the chair, each assigned talk annotated with how it
//! relates to the published schedule, and one `**SPARE SLOT**` line per
//! unused capacity unit.
//!
//! An over-capacity session is flagged with an `**ERROR**` line. That
//! situation is structurally unreachable when the constraint encoding is
//! correct — the marker is an executable invariant check, not a code
//! path a valid run can take.

use crate::models::{Disposition, Problem, Schedule};

/// Renders the session-ordered schedule report.
pub fn render(problem: &Problem, schedule: &Schedule) -> String {
    let mut out = String::new();

    for session in problem.sessions() {
        if session.index > 1 {
            out.push('\n');
        }

        match schedule
            .chair_of(session.index)
            .and_then(|id| problem.chairs.get(id))
        {
            Some(name) => out.push_str(&format!("Session {} - chair {}\n", session.index, name)),
            None => out.push_str(&format!("Session {}\n", session.index)),
        }

        let mut used = 0usize;
        for placement in schedule.session_talks(session.index) {
            match placement.disposition {
                Disposition::New => out.push_str("**NEW** "),
                Disposition::Moved { .. } => out.push_str("**MOVED** "),
                Disposition::Kept => {}
            }
            out.push_str(&placement.title);

            if let Some(talk) = problem
                .talk_index(&placement.title)
                .map(|i| &problem.talks[i])
            {
                if !talk.topics.is_empty() {
                    let tags: Vec<&str> = talk.topics.iter().map(String::as_str).collect();
                    out.push_str(&format!("   [{}]", tags.join(", ")));
                }
            }
            out.push('\n');
            used += 1;
        }

        for _ in used..session.capacity as usize {
            out.push_str("**SPARE SLOT**\n");
        }
        if used > session.capacity as usize {
            out.push_str("**ERROR** too many talks assigned to this session\n");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaySpan, Placement, Talk};

    fn sample_problem() -> Problem {
        Problem {
            talks: vec![
                Talk::new("Kept Talk").with_prior_session(1).with_topic("ml"),
                Talk::new("Moved Talk").with_prior_session(2),
                Talk::new("New Talk"),
            ],
            capacities: vec![2, 2],
            days: vec![DaySpan::new(1, 1, 2)],
            rules: vec![],
            chairs: vec!["Alice".into(), "Bob".into()],
            chair_rules: vec![],
            topic_policy: Default::default(),
            weights: Default::default(),
            prior_session_count: None,
        }
    }

    fn sample_schedule(p: &Problem) -> Schedule {
        Schedule {
            placements: vec![
                Placement::of(&p.talks[0], 1),
                Placement::of(&p.talks[1], 1),
                Placement::of(&p.talks[2], 2),
            ],
            chairs: vec![1, 0],
            movement_cost: 1.0,
            soft_penalty: 0.0,
        }
    }

    #[test]
    fn test_session_headers_with_chairs() {
        let p = sample_problem();
        let report = render(&p, &sample_schedule(&p));
        assert!(report.contains("Session 1 - chair Bob"));
        assert!(report.contains("Session 2 - chair Alice"));
    }

    #[test]
    fn test_headers_without_roster() {
        let mut p = sample_problem();
        p.chairs = vec![];
        let mut s = sample_schedule(&p);
        s.chairs = vec![];
        let report = render(&p, &s);
        assert!(report.contains("Session 1\n"));
        assert!(!report.contains("chair"));
    }

    #[test]
    fn test_dispositions_and_markers() {
        let p = sample_problem();
        let report = render(&p, &sample_schedule(&p));

        // Kept talks carry no marker; moved and new talks do.
        assert!(report.contains("\nKept Talk"));
        assert!(report.contains("**MOVED** Moved Talk"));
        assert!(report.contains("**NEW** New Talk"));
    }

    #[test]
    fn test_topics_listed() {
        let p = sample_problem();
        let report = render(&p, &sample_schedule(&p));
        assert!(report.contains("Kept Talk   [ml]"));
    }

    #[test]
    fn test_spare_slots() {
        let p = sample_problem();
        let report = render(&p, &sample_schedule(&p));
        // Session 1 is full; session 2 holds one of two slots.
        assert_eq!(report.matches("**SPARE SLOT**").count(), 1);
    }

    #[test]
    fn test_over_capacity_flagged() {
        let p = sample_problem();
        let mut s = sample_schedule(&p);
        // Force all three talks into session 1 (capacity 2).
        for placement in &mut s.placements {
            placement.session = 1;
        }
        let report = render(&p, &s);
        assert!(report.contains("**ERROR** too many talks assigned to this session"));
        assert_eq!(report.matches("**SPARE SLOT**").count(), 2);
    }
}
