//! # schedule-engine
//!
//! Deterministic scheduling core for a calendar session.
//!
//! Parses the string-shaped dates and times events are stored with, detects
//! overlaps, filters events into week and month views, and fires reminders
//! shortly before events start. The pure functions take the current time as
//! an argument; only [`poller`] and [`clock`] touch the system clock.
//!
//! ## Modules
//!
//! - [`event`] — The event record and its form-state draft
//! - [`datetime`] — Date and time strings → comparable timestamps
//! - [`overlap`] — Overlap detection between events
//! - [`view`] — Week/month filtering and calendar layout
//! - [`search`] — Reactive search term + view state
//! - [`notification`] — Upcoming-event detection and the reminder scheduler
//! - [`poller`] — Recurring reminder tick on a tokio task
//! - [`clock`] — Injectable time source
//! - [`store`] — Event persistence (memory and JSON file)
//! - [`operations`] — Fetch/save/delete with user-facing notices
//! - [`submission`] — Form validation and overlap confirmation
//! - [`config`] — TOML configuration
//! - [`error`] — Error types

pub mod clock;
pub mod config;
pub mod datetime;
pub mod error;
pub mod event;
pub mod notice;
pub mod notification;
pub mod operations;
pub mod overlap;
pub mod poller;
pub mod search;
pub mod store;
pub mod submission;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use datetime::{convert_event_to_date_range, parse_date_time, DateRange, Timestamp};
pub use error::{EngineError, Result};
pub use event::{Event, EventDraft, RepeatRule, RepeatType};
pub use notice::{Notice, NoticeStatus};
pub use notification::{
    create_notification_message, get_upcoming_events, NotificationRecord, NotificationScheduler,
};
pub use operations::{EventOperations, SaveMode};
pub use overlap::{find_overlapping_events, is_overlapping, overlap_minutes};
pub use poller::NotificationPoller;
pub use search::SearchState;
pub use store::{EventStore, JsonFileEventStore, MemoryEventStore};
pub use submission::{prepare_submission, time_error_messages, Submission, TimeErrors};
pub use view::{
    get_filtered_events, get_filtered_events_with_options, CalendarView, Direction, ViewOptions,
    WeekStartDay,
};
