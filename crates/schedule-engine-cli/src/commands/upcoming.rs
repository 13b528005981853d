use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use schedule_engine::NotificationScheduler;

use crate::session::Session;

/// One scheduler tick against the stored events. Each invocation is a fresh
/// session, so nothing is suppressed from earlier runs.
pub fn run(session: &Session, now: Option<NaiveDateTime>) -> Result<()> {
    let now = now.unwrap_or_else(|| Local::now().naive_local());
    let mut scheduler = NotificationScheduler::new();
    let fired = scheduler.tick(session.ops.events(), now);

    if session.json {
        println!("{}", serde_json::to_string_pretty(&fired)?);
    } else if fired.is_empty() {
        println!("예정된 알림이 없습니다.");
    } else {
        for record in &fired {
            println!("{}", record.message);
        }
    }
    Ok(())
}
