//! The calendar event record.
//!
//! Field names serialize in camelCase so that stored events keep the
//! `{ id, title, date, startTime, endTime, ..., repeat: { type, interval },
//! notificationTime }` shape shared with the rest of the calendar.

use serde::{Deserialize, Serialize};

use crate::datetime::{convert_event_to_date_range, DateRange};

/// How an event repeats. Carried as metadata only: the engine never expands
/// a rule into additional occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl std::str::FromStr for RepeatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(RepeatType::None),
            "daily" => Ok(RepeatType::Daily),
            "weekly" => Ok(RepeatType::Weekly),
            "monthly" => Ok(RepeatType::Monthly),
            "yearly" => Ok(RepeatType::Yearly),
            other => Err(format!("unknown repeat type '{other}'")),
        }
    }
}

/// A repeat rule. `interval` is 0 when `kind` is [`RepeatType::None`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RepeatRule {
    #[serde(rename = "type")]
    pub kind: RepeatType,
    pub interval: u32,
}

impl RepeatRule {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(kind: RepeatType, interval: u32) -> Self {
        match kind {
            RepeatType::None => Self::none(),
            _ => Self { kind, interval },
        }
    }
}

/// One scheduled occurrence.
///
/// `date` is `YYYY-MM-DD`; `start_time` and `end_time` are 24-hour `HH:MM`.
/// They are kept as the strings the user entered: parsing happens on demand
/// through [`crate::datetime::parse_date_time`], which maps malformed values to
/// an invalid timestamp instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub repeat: RepeatRule,
    /// Minutes before `start_time` at which the reminder fires.
    pub notification_time: u32,
}

impl Event {
    /// The `[start, end)` range of this event.
    pub fn date_range(&self) -> DateRange {
        convert_event_to_date_range(self)
    }

    /// Case-insensitive substring match against title, description and location.
    /// An empty term matches every event.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        [&self.title, &self.description, &self.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub(crate) fn from_draft(id: String, draft: EventDraft) -> Self {
        Event {
            id,
            title: draft.title,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
            location: draft.location,
            category: draft.category,
            repeat: draft.repeat,
            notification_time: draft.notification_time,
        }
    }
}

/// An event as entered in a form, before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub repeat: RepeatRule,
    pub notification_time: u32,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            date: event.date.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            category: event.category.clone(),
            repeat: event.repeat.clone(),
            notification_time: event.notification_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event {
            id: "1".to_string(),
            title: "기존 회의".to_string(),
            date: "2024-10-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            description: "기존 팀 미팅".to_string(),
            location: "회의실 B".to_string(),
            category: "업무".to_string(),
            repeat: RepeatRule::none(),
            notification_time: 10,
        }
    }

    #[test]
    fn test_serializes_camel_case_with_repeat_type() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:00");
        assert_eq!(json["notificationTime"], 10);
        assert_eq!(json["repeat"]["type"], "none");
        assert_eq!(json["repeat"]["interval"], 0);
    }

    #[test]
    fn test_deserializes_stored_shape() {
        let raw = r#"{
            "id": "2",
            "title": "주간 회의",
            "date": "2024-07-01",
            "startTime": "10:00",
            "endTime": "11:00",
            "description": "",
            "location": "",
            "category": "업무",
            "repeat": { "type": "weekly", "interval": 1 },
            "notificationTime": 30
        }"#;
        let event: Event = serde_json::from_str(raw).unwrap();
        assert_eq!(event.repeat, RepeatRule::new(RepeatType::Weekly, 1));
        assert_eq!(event.notification_time, 30);
    }

    #[test]
    fn test_repeat_rule_none_forces_zero_interval() {
        assert_eq!(RepeatRule::new(RepeatType::None, 5).interval, 0);
    }

    #[test]
    fn test_repeat_type_from_str() {
        assert_eq!("Monthly".parse::<RepeatType>(), Ok(RepeatType::Monthly));
        assert!("hourly".parse::<RepeatType>().is_err());
    }

    #[test]
    fn test_matches_search_fields() {
        let event = sample();
        assert!(event.matches_search(""));
        assert!(event.matches_search("회의실"));
        assert!(event.matches_search("팀 미팅"));
        assert!(!event.matches_search("업무"), "category is not searched");
    }

    #[test]
    fn test_matches_search_ignores_case() {
        let event = Event {
            title: "Event 3".to_string(),
            ..Default::default()
        };
        assert!(event.matches_search("EVENT"));
        assert!(event.matches_search("event 3"));
    }

    #[test]
    fn test_draft_round_trip_keeps_fields() {
        let event = sample();
        let draft = EventDraft::from(&event);
        assert_eq!(Event::from_draft("1".to_string(), draft), event);
    }
}
