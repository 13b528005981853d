//! Event persistence.
//!
//! [`EventStore`] is the list/create/update/delete contract the operations
//! layer talks to. Two implementations ship with the engine:
//!
//! - [`MemoryEventStore`] keeps events in process.
//! - [`JsonFileEventStore`] keeps them as a JSON array in one file, rewritten
//!   through a temp file and a rename on every change.
//!
//! Both assign a fresh UUID v4 id when asked to create an event with an empty id.

use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::event::Event;

pub trait EventStore {
    /// All stored events in insertion order.
    fn list(&self) -> Result<Vec<Event>>;

    /// Store a new event and return it with its final id.
    fn create(&mut self, event: Event) -> Result<Event>;

    /// Replace the stored event with the same id.
    ///
    /// # Errors
    ///
    /// [`EngineError::EventNotFound`] if no event has that id.
    fn update(&mut self, event: Event) -> Result<Event>;

    /// Remove the event with `id`.
    ///
    /// # Errors
    ///
    /// [`EngineError::EventNotFound`] if no event has that id.
    fn delete(&mut self, id: &str) -> Result<()>;
}

fn assign_id(mut event: Event) -> Event {
    if event.id.is_empty() {
        event.id = uuid::Uuid::new_v4().to_string();
    }
    event
}

fn insert(events: &mut Vec<Event>, event: Event) -> Result<Event> {
    let event = assign_id(event);
    if events.iter().any(|e| e.id == event.id) {
        return Err(EngineError::Store(format!(
            "event '{}' already exists",
            event.id
        )));
    }
    events.push(event.clone());
    Ok(event)
}

fn replace(events: &mut [Event], event: Event) -> Result<Event> {
    let slot = events
        .iter_mut()
        .find(|e| e.id == event.id)
        .ok_or_else(|| EngineError::EventNotFound(event.id.clone()))?;
    *slot = event.clone();
    Ok(event)
}

fn remove(events: &mut Vec<Event>, id: &str) -> Result<()> {
    let before = events.len();
    events.retain(|e| e.id != id);
    if events.len() == before {
        return Err(EngineError::EventNotFound(id.to_string()));
    }
    Ok(())
}

// ── MemoryEventStore ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Vec<Event>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        MemoryEventStore { events }
    }
}

impl EventStore for MemoryEventStore {
    fn list(&self) -> Result<Vec<Event>> {
        Ok(self.events.clone())
    }

    fn create(&mut self, event: Event) -> Result<Event> {
        insert(&mut self.events, event)
    }

    fn update(&mut self, event: Event) -> Result<Event> {
        replace(&mut self.events, event)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        remove(&mut self.events, id)
    }
}

// ── JsonFileEventStore ──────────────────────────────────────────────────────

/// Events stored as a pretty-printed JSON array. A missing file reads as an
/// empty list; the parent directory is created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileEventStore {
    path: PathBuf,
}

impl JsonFileEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileEventStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Event>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            EngineError::Serialization(format!("'{}': {}", self.path.display(), e))
        })
    }

    fn write(&self, events: &[Event]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(events)
            .map_err(|e| EngineError::Serialization(e.to_string()))?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn modify<T>(&self, change: impl FnOnce(&mut Vec<Event>) -> Result<T>) -> Result<T> {
        let mut events = self.read()?;
        let out = change(&mut events)?;
        self.write(&events)?;
        Ok(out)
    }
}

impl EventStore for JsonFileEventStore {
    fn list(&self) -> Result<Vec<Event>> {
        self.read()
    }

    fn create(&mut self, event: Event) -> Result<Event> {
        self.modify(|events| insert(events, event))
    }

    fn update(&mut self, event: Event) -> Result<Event> {
        self.modify(|events| replace(events, event))
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.modify(|events| remove(events, id))
    }
}
