//! The operations layer between a calendar session and its event store.
//!
//! [`EventOperations`] keeps the session's current event list in step with an
//! [`EventStore`]. Every mutation is followed by a fresh `list()`, so `events()`
//! always reflects what the store holds. Failures do not propagate: each call
//! logs the error and returns an error [`Notice`] for the user.

use crate::event::Event;
use crate::notice::Notice;
use crate::store::EventStore;

pub const FETCH_OK: &str = "일정 로딩 완료!";
pub const FETCH_FAILED: &str = "이벤트 로딩 실패";
pub const CREATED: &str = "일정이 추가되었습니다.";
pub const UPDATED: &str = "일정이 수정되었습니다.";
pub const SAVE_FAILED: &str = "일정 저장 실패";
pub const DELETED: &str = "일정이 삭제되었습니다.";
pub const DELETE_FAILED: &str = "일정 삭제 실패";

/// Whether [`EventOperations::save_event`] adds a new event or replaces an
/// existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

pub struct EventOperations<S> {
    store: S,
    events: Vec<Event>,
}

impl<S: EventStore> EventOperations<S> {
    /// Wrap a store without loading it; call [`fetch_events`](Self::fetch_events)
    /// to populate.
    pub fn new(store: S) -> Self {
        EventOperations {
            store,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reload the event list from the store. On failure the previous list is kept.
    pub fn fetch_events(&mut self) -> Notice {
        match self.store.list() {
            Ok(events) => {
                tracing::debug!(count = events.len(), "events fetched");
                self.events = events;
                Notice::info(FETCH_OK).with_duration(1000)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch events");
                Notice::error(FETCH_FAILED)
            }
        }
    }

    /// Create or update `event`, then reload.
    pub fn save_event(&mut self, event: Event, mode: SaveMode) -> Notice {
        let result = match mode {
            SaveMode::Create => self.store.create(event),
            SaveMode::Update => self.store.update(event),
        };
        match result {
            Ok(saved) => {
                tracing::info!(event_id = %saved.id, ?mode, "event saved");
                self.refresh();
                Notice::success(match mode {
                    SaveMode::Create => CREATED,
                    SaveMode::Update => UPDATED,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, ?mode, "failed to save event");
                Notice::error(SAVE_FAILED)
            }
        }
    }

    /// Delete the event with `id`, then reload.
    pub fn delete_event(&mut self, id: &str) -> Notice {
        match self.store.delete(id) {
            Ok(()) => {
                tracing::info!(event_id = %id, "event deleted");
                self.refresh();
                Notice::info(DELETED)
            }
            Err(e) => {
                tracing::error!(error = %e, event_id = %id, "failed to delete event");
                Notice::error(DELETE_FAILED)
            }
        }
    }

    fn refresh(&mut self) {
        match self.store.list() {
            Ok(events) => self.events = events,
            Err(e) => tracing::warn!(error = %e, "failed to reload events after change"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EngineError, Result};
    use crate::event::RepeatRule;
    use crate::notice::NoticeStatus;
    use crate::store::MemoryEventStore;

    fn existing() -> Event {
        Event {
            id: "1".to_string(),
            title: "기존 회의".to_string(),
            date: "2024-10-15".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            description: "기존 팀 미팅".to_string(),
            location: "회의실 B".to_string(),
            category: "업무".to_string(),
            repeat: RepeatRule::none(),
            notification_time: 10,
        }
    }

    fn loaded() -> EventOperations<MemoryEventStore> {
        let mut ops = EventOperations::new(MemoryEventStore::with_events(vec![existing()]));
        ops.fetch_events();
        ops
    }

    /// A store whose every call fails, standing in for an unreachable backend.
    struct FailingStore;

    impl EventStore for FailingStore {
        fn list(&self) -> Result<Vec<Event>> {
            Err(EngineError::Store("Failed to fetch".to_string()))
        }
        fn create(&mut self, _event: Event) -> Result<Event> {
            Err(EngineError::Store("network error".to_string()))
        }
        fn update(&mut self, _event: Event) -> Result<Event> {
            Err(EngineError::Store("network error".to_string()))
        }
        fn delete(&mut self, _id: &str) -> Result<()> {
            Err(EngineError::Store("network error".to_string()))
        }
    }

    #[test]
    fn test_fetch_loads_stored_events() {
        let mut ops = EventOperations::new(MemoryEventStore::with_events(vec![existing()]));
        let notice = ops.fetch_events();
        assert_eq!(ops.events(), &[existing()]);
        assert_eq!(notice.title, FETCH_OK);
        assert_eq!(notice.status, NoticeStatus::Info);
        assert_eq!(notice.duration_ms, 1000);
    }

    #[test]
    fn test_create_adds_event() {
        let mut ops = loaded();
        let new_event = Event {
            id: "2".to_string(),
            title: "새로운 회의".to_string(),
            date: "2024-10-16".to_string(),
            start_time: "13:00".to_string(),
            end_time: "14:00".to_string(),
            location: "회의실 A".to_string(),
            ..existing()
        };
        let notice = ops.save_event(new_event.clone(), SaveMode::Create);
        assert_eq!(notice, Notice::success(CREATED));
        assert!(ops.events().contains(&new_event));
    }

    #[test]
    fn test_update_changes_title_and_end_time() {
        let mut ops = loaded();
        let updated = Event {
            title: "업데이트된 이벤트".to_string(),
            end_time: "12:00".to_string(),
            ..existing()
        };
        let notice = ops.save_event(updated, SaveMode::Update);
        assert_eq!(notice.title, UPDATED);

        let stored = ops.events().iter().find(|e| e.id == "1").unwrap();
        assert_eq!(stored.title, "업데이트된 이벤트");
        assert_eq!(stored.end_time, "12:00");
    }

    #[test]
    fn test_delete_removes_event() {
        let mut ops = loaded();
        let notice = ops.delete_event("1");
        assert_eq!(notice.title, DELETED);
        assert!(!ops.events().contains(&existing()));
    }

    #[test]
    fn test_fetch_failure_reports_error() {
        let mut ops = EventOperations::new(FailingStore);
        let notice = ops.fetch_events();
        assert_eq!(notice.title, FETCH_FAILED);
        assert!(notice.is_error());
    }

    #[test]
    fn test_updating_missing_event_reports_save_failure() {
        let mut ops = loaded();
        let ghost = Event {
            id: "999".to_string(),
            title: "존재하지 않는 이벤트".to_string(),
            ..existing()
        };
        let notice = ops.save_event(ghost, SaveMode::Update);
        assert_eq!(notice, Notice::error(SAVE_FAILED));
        assert_eq!(notice.duration_ms, 3000);
        assert!(notice.closable);
        assert_eq!(ops.events(), &[existing()]);
    }

    #[test]
    fn test_delete_failure_reports_error() {
        let mut ops = EventOperations::new(FailingStore);
        let notice = ops.delete_event("1");
        assert_eq!(notice, Notice::error(DELETE_FAILED));
    }
}
