//! Reminder selection and de-duplication.
//!
//! An event is *upcoming* while `now` lies in its notification window
//! `[start - notification_time, start]`, closed at both ends. The
//! [`NotificationScheduler`] turns upcoming events into visible
//! [`NotificationRecord`]s at most once per event per session: the suppression
//! set of notified ids only ever grows, and dismissing a visible record does
//! not shrink it.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::event::Event;

/// A reminder shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRecord {
    pub id: String,
    pub message: String,
}

/// Events whose notification window contains `now` and whose id is not in
/// `notified`, in input order. Events with an invalid start never qualify.
pub fn get_upcoming_events<'a>(
    events: &'a [Event],
    now: NaiveDateTime,
    notified: &HashSet<String>,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| !notified.contains(&event.id))
        .filter(|event| is_in_notification_window(event, now))
        .collect()
}

/// `0 <= start - now <= notification_time` minutes, at millisecond precision.
fn is_in_notification_window(event: &Event, now: NaiveDateTime) -> bool {
    let Some(start) = event.date_range().start.valid() else {
        return false;
    };
    let until_start_ms = (start - now).num_milliseconds();
    let window_ms = i64::from(event.notification_time) * 60_000;
    (0..=window_ms).contains(&until_start_ms)
}

/// The reminder text, e.g. `"10분 후 이벤트 1 일정이 시작됩니다."`.
pub fn create_notification_message(event: &Event) -> String {
    format!(
        "{}분 후 {} 일정이 시작됩니다.",
        event.notification_time, event.title
    )
}

// ── NotificationScheduler ───────────────────────────────────────────────────

/// Visible reminders plus the set of ids that have already fired.
#[derive(Debug, Clone, Default)]
pub struct NotificationScheduler {
    notifications: Vec<NotificationRecord>,
    notified: HashSet<String>,
}

impl NotificationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reminders currently shown, oldest first.
    pub fn notifications(&self) -> &[NotificationRecord] {
        &self.notifications
    }

    /// Whether a reminder has already fired for `id` this session.
    pub fn is_notified(&self, id: &str) -> bool {
        self.notified.contains(id)
    }

    pub fn notified_ids(&self) -> &HashSet<String> {
        &self.notified
    }

    /// Run one polling step at `now`.
    ///
    /// Appends one record per newly upcoming event, in the order the events
    /// appear in `events`, marks those ids as notified, and returns the new
    /// records. Calling again with the same or a later `now` never re-emits
    /// an id.
    pub fn tick(&mut self, events: &[Event], now: NaiveDateTime) -> Vec<NotificationRecord> {
        let fresh: Vec<NotificationRecord> = get_upcoming_events(events, now, &self.notified)
            .into_iter()
            .map(|event| NotificationRecord {
                id: event.id.clone(),
                message: create_notification_message(event),
            })
            .collect();

        for record in &fresh {
            self.notified.insert(record.id.clone());
            tracing::info!(event_id = %record.id, message = %record.message, "reminder fired");
        }
        self.notifications.extend(fresh.iter().cloned());
        tracing::debug!(
            %now,
            fired = fresh.len(),
            visible = self.notifications.len(),
            "notification tick"
        );
        fresh
    }

    /// Dismiss the visible record at `index`. The id stays suppressed.
    /// Returns `None` when `index` is out of range.
    pub fn remove_notification(&mut self, index: usize) -> Option<NotificationRecord> {
        if index < self.notifications.len() {
            Some(self.notifications.remove(index))
        } else {
            None
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
