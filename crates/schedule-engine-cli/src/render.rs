use schedule_engine::{Event, RepeatType};

/// `2024-07-01 09:00-10:00  회의  (id)` with location and repeat when set.
pub fn event_line(event: &Event) -> String {
    let mut line = format!(
        "{} {}-{}  {}",
        event.date, event.start_time, event.end_time, event.title
    );
    if !event.location.is_empty() {
        line.push_str(&format!(" @ {}", event.location));
    }
    if event.repeat.kind != RepeatType::None {
        line.push_str(&format!(
            " [{:?} x{}]",
            event.repeat.kind, event.repeat.interval
        ));
    }
    line.push_str(&format!("  ({})", event.id));
    line
}

pub fn event_list(events: &[&Event]) -> String {
    if events.is_empty() {
        return "검색 결과가 없습니다.".to_string();
    }
    events
        .iter()
        .map(|e| event_line(e))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedule_engine::RepeatRule;

    #[test]
    fn test_event_line() {
        let event = Event {
            id: "1".into(),
            title: "팀 회의".into(),
            date: "2024-07-01".into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            location: "회의실 A".into(),
            repeat: RepeatRule::new(RepeatType::Weekly, 1),
            ..Default::default()
        };
        assert_eq!(
            event_line(&event),
            "2024-07-01 09:00-10:00  팀 회의 @ 회의실 A [Weekly x1]  (1)"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(event_list(&[]), "검색 결과가 없습니다.");
    }
}
