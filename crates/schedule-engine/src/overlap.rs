//! Detect double-booked events.
//!
//! Two events overlap when `a.start < b.end && b.start < a.end` over their
//! `[start, end)` ranges. Adjacent events, where one ends exactly when the next
//! starts, are NOT overlaps. An event with any invalid endpoint overlaps nothing.

use chrono::NaiveDateTime;

use crate::event::Event;

/// Whether two events share any instant.
///
/// Symmetric in its arguments. An event overlaps itself only when its range
/// has a valid, non-zero length.
pub fn is_overlapping(a: &Event, b: &Event) -> bool {
    overlap_bounds(a, b).is_some()
}

/// Every event in `pool` that overlaps `candidate`, in pool order.
///
/// The candidate's own id is not filtered out. Callers editing an existing
/// event remove it from `pool` first if self-overlap is unwanted.
pub fn find_overlapping_events<'a>(candidate: &Event, pool: &'a [Event]) -> Vec<&'a Event> {
    pool.iter()
        .filter(|event| is_overlapping(candidate, event))
        .collect()
}

/// Length of the shared interval in whole minutes, `None` when the events do
/// not overlap.
pub fn overlap_minutes(a: &Event, b: &Event) -> Option<i64> {
    overlap_bounds(a, b).map(|(start, end)| (end - start).num_minutes())
}

/// The shared `[max(start), min(end))` interval of two overlapping events.
fn overlap_bounds(a: &Event, b: &Event) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (a_start, a_end) = a.date_range().bounds()?;
    let (b_start, b_end) = b.date_range().bounds()?;

    if a_start < b_end && b_start < a_end {
        Some((a_start.max(b_start), a_end.min(b_end)))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RepeatRule;
    use proptest::prelude::*;

    fn meeting(id: &str, start: &str, end: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("회의 {id}"),
            date: "2024-10-01".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            description: "팀 미팅".to_string(),
            location: "회의실 A".to_string(),
            category: "업무".to_string(),
            repeat: RepeatRule::none(),
            notification_time: 10,
        }
    }

    fn pool() -> Vec<Event> {
        vec![
            meeting("1", "09:00", "10:00"),
            meeting("2", "09:30", "10:30"),
            meeting("3", "10:00", "11:00"),
        ]
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    // ── is_overlapping tests ────────────────────────────────────────────

    #[test]
    fn test_partial_overlap() {
        assert!(is_overlapping(
            &meeting("1", "09:00", "10:00"),
            &meeting("2", "09:30", "10:30")
        ));
    }

    #[test]
    fn test_back_to_back_is_not_overlap() {
        let a = meeting("1", "09:00", "10:00");
        let b = meeting("2", "10:00", "11:00");
        assert!(!is_overlapping(&a, &b));
        assert!(!is_overlapping(&b, &a));
    }

    #[test]
    fn test_containment_is_overlap() {
        assert!(is_overlapping(
            &meeting("1", "09:00", "12:00"),
            &meeting("2", "10:00", "10:15")
        ));
    }

    #[test]
    fn test_different_days_do_not_overlap() {
        let a = meeting("1", "09:00", "10:00");
        let b = Event {
            date: "2024-10-02".to_string(),
            ..meeting("2", "09:00", "10:00")
        };
        assert!(!is_overlapping(&a, &b));
    }

    #[test]
    fn test_self_overlap_for_nonzero_range() {
        let a = meeting("1", "09:00", "10:00");
        assert!(is_overlapping(&a, &a));
    }

    #[test]
    fn test_zero_length_event_overlaps_nothing_at_its_edge() {
        let a = meeting("1", "09:00", "09:00");
        assert!(!is_overlapping(&a, &a));
    }

    #[test]
    fn test_invalid_start_never_overlaps() {
        let broken = meeting("1", "99:00", "10:00");
        let whole_day = meeting("2", "00:00", "23:59");
        assert!(!is_overlapping(&broken, &whole_day));
        assert!(!is_overlapping(&whole_day, &broken));
    }

    #[test]
    fn test_invalid_date_never_overlaps() {
        let broken = Event {
            date: "2024-13-01".to_string(),
            ..meeting("1", "09:00", "10:00")
        };
        assert!(!is_overlapping(&broken, &broken));
    }

    // ── find_overlapping_events tests ───────────────────────────────────

    #[test]
    fn test_finds_all_overlapping_in_pool_order() {
        let events = pool();
        let candidate = meeting("4", "09:45", "10:45");
        let found = find_overlapping_events(&candidate, &events);
        assert_eq!(ids(&found), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_returns_empty_when_nothing_overlaps() {
        let events = pool();
        let candidate = meeting("4", "11:00", "12:00");
        assert!(find_overlapping_events(&candidate, &events).is_empty());
    }

    #[test]
    fn test_does_not_exclude_candidate_id() {
        let events = pool();
        let found = find_overlapping_events(&events[0], &events);
        assert_eq!(ids(&found), vec!["1", "2"]);
    }

    #[test]
    fn test_empty_pool() {
        let candidate = meeting("4", "09:00", "10:00");
        assert!(find_overlapping_events(&candidate, &[]).is_empty());
    }

    // ── overlap_minutes tests ───────────────────────────────────────────

    #[test]
    fn test_overlap_minutes() {
        let a = meeting("1", "09:00", "10:00");
        let b = meeting("2", "09:30", "10:30");
        assert_eq!(overlap_minutes(&a, &b), Some(30));
        assert_eq!(overlap_minutes(&a, &meeting("3", "10:00", "11:00")), None);
    }

    // ── properties ──────────────────────────────────────────────────────

    fn clock() -> impl Strategy<Value = String> {
        (0u32..24, 0u32..60).prop_map(|(h, m)| format!("{h:02}:{m:02}"))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            a_start in clock(), a_end in clock(), b_start in clock(), b_end in clock()
        ) {
            let a = meeting("a", &a_start, &a_end);
            let b = meeting("b", &b_start, &b_end);
            prop_assert_eq!(is_overlapping(&a, &b), is_overlapping(&b, &a));
        }

        #[test]
        fn prop_self_overlap_iff_positive_length(start in clock(), end in clock()) {
            let a = meeting("a", &start, &end);
            prop_assert_eq!(is_overlapping(&a, &a), start < end);
        }

        #[test]
        fn prop_back_to_back_never_overlaps(a in clock(), b in clock(), c in clock()) {
            let first = meeting("1", &a, &b);
            let second = meeting("2", &b, &c);
            prop_assert!(!is_overlapping(&first, &second));
        }
    }
}
