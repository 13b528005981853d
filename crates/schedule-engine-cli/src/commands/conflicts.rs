use anyhow::Result;
use chrono::NaiveDate;
use schedule_engine::{find_overlapping_events, Event};

use crate::render;
use crate::session::Session;

pub fn run(
    session: &Session,
    date: NaiveDate,
    start: &str,
    end: &str,
    exclude: Option<&str>,
) -> Result<()> {
    let candidate = Event {
        date: date.format("%Y-%m-%d").to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        ..Default::default()
    };
    let pool: Vec<Event> = session
        .ops
        .events()
        .iter()
        .filter(|e| Some(e.id.as_str()) != exclude)
        .cloned()
        .collect();
    let overlapping = find_overlapping_events(&candidate, &pool);

    if session.json {
        println!("{}", serde_json::to_string_pretty(&overlapping)?);
    } else if overlapping.is_empty() {
        println!("겹치는 일정이 없습니다.");
    } else {
        println!("{}", render::event_list(&overlapping));
    }
    Ok(())
}
