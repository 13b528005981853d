//! Validating a form before it is saved.
//!
//! [`prepare_submission`] is the add-or-update workflow: it checks required
//! fields and the start/end order, builds the [`Event`], and runs overlap
//! detection against the session's other events. It acts as the caller of
//! [`find_overlapping_events`], so it is where an edited event is excluded
//! from its own conflict check.

use serde::Serialize;

use crate::datetime::parse_clock_time;
use crate::event::{Event, EventDraft};
use crate::notice::Notice;
use crate::overlap::find_overlapping_events;

pub const MISSING_FIELDS: &str = "필수 정보를 모두 입력해주세요.";
pub const CHECK_TIMES: &str = "시간 설정을 확인해주세요.";
pub const START_AFTER_END: &str = "시작 시간은 종료 시간보다 빨라야 합니다.";
pub const END_BEFORE_START: &str = "종료 시간은 시작 시간보다 늦어야 합니다.";

/// Per-field messages for an inverted start/end pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeErrors {
    pub start: Option<&'static str>,
    pub end: Option<&'static str>,
}

impl TimeErrors {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Messages for a start time that is not strictly before the end time. Empty
/// when either side is blank or unparseable: that is reported elsewhere.
pub fn time_error_messages(start: &str, end: &str) -> TimeErrors {
    match (parse_clock_time(start), parse_clock_time(end)) {
        (Some(s), Some(e)) if s >= e => TimeErrors {
            start: Some(START_AFTER_END),
            end: Some(END_BEFORE_START),
        },
        _ => TimeErrors::default(),
    }
}

/// What to do with a submitted form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The form cannot be saved; show the notice.
    Rejected(Notice),
    /// The event overlaps others. Save only after the user confirms.
    Conflicts {
        event: Event,
        overlapping: Vec<Event>,
    },
    /// Safe to save.
    Ready(Event),
}

/// Validate `draft` and check it against `events`.
///
/// When `editing` is `Some`, the result keeps the edited event's id and that id
/// is left out of the overlap pool. New events get an empty id for the store to
/// fill in.
pub fn prepare_submission(
    draft: EventDraft,
    events: &[Event],
    editing: Option<&Event>,
) -> Submission {
    let required = [&draft.title, &draft.date, &draft.start_time, &draft.end_time];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Submission::Rejected(Notice::error(MISSING_FIELDS));
    }

    if !time_error_messages(&draft.start_time, &draft.end_time).is_empty() {
        return Submission::Rejected(Notice::error(CHECK_TIMES));
    }

    let id = editing.map(|e| e.id.clone()).unwrap_or_default();
    let event = Event::from_draft(id, draft);

    let pool: Vec<Event> = match editing {
        Some(edited) => events
            .iter()
            .filter(|e| e.id != edited.id)
            .cloned()
            .collect(),
        None => events.to_vec(),
    };
    let overlapping: Vec<Event> = find_overlapping_events(&event, &pool)
        .into_iter()
        .cloned()
        .collect();

    if overlapping.is_empty() {
        Submission::Ready(event)
    } else {
        tracing::debug!(
            title = %event.title,
            conflicts = overlapping.len(),
            "submission overlaps existing events"
        );
        Submission::Conflicts { event, overlapping }
    }
}
