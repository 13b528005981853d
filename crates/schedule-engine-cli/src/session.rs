use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use schedule_engine::{EngineConfig, EventOperations, JsonFileEventStore};

/// One CLI invocation: the config, and the event list loaded from the store.
pub struct Session {
    pub config: EngineConfig,
    pub ops: EventOperations<JsonFileEventStore>,
    pub json: bool,
}

impl Session {
    pub fn open(config: EngineConfig, store_path: PathBuf, json: bool) -> Result<Self> {
        tracing::debug!(store = %store_path.display(), "opening event store");
        let mut ops = EventOperations::new(JsonFileEventStore::new(store_path));
        let notice = ops.fetch_events();
        if notice.is_error() {
            bail!("{notice}: {}", ops.store().path().display());
        }
        Ok(Session { config, ops, json })
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}
