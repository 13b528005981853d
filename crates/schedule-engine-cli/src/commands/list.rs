use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use schedule_engine::view::{events_for_day, format_month, format_week, month_grid};
use schedule_engine::{get_filtered_events_with_options, CalendarView};

use crate::render;
use crate::session::Session;

pub fn run(
    session: &Session,
    view: CalendarView,
    date: Option<NaiveDate>,
    search: &str,
) -> Result<()> {
    let anchor = date.unwrap_or_else(Session::today);
    let options = session.config.view_options();
    let events =
        get_filtered_events_with_options(session.ops.events(), search, anchor, view, &options);

    if session.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let heading = match view {
        CalendarView::Week => format_week(anchor, options.week_start),
        CalendarView::Month => format_month(anchor),
    };
    println!("{heading}");
    println!("{}", render::event_list(&events));
    Ok(())
}

pub fn calendar(session: &Session, date: Option<NaiveDate>) -> Result<()> {
    let anchor = date.unwrap_or_else(Session::today);
    let week_start = session.config.view.week_start;
    let events = session.ops.events();
    let grid = month_grid(anchor, week_start);

    if session.json {
        let weeks: Vec<Vec<serde_json::Value>> = grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(day) => serde_json::json!({
                            "date": day.format("%Y-%m-%d").to_string(),
                            "events": events_for_day(events, *day)
                                .iter()
                                .map(|e| e.id.as_str())
                                .collect::<Vec<_>>(),
                        }),
                        None => serde_json::Value::Null,
                    })
                    .collect()
            })
            .collect();
        let body = serde_json::json!({ "title": format_month(anchor), "weeks": weeks });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{}", format_month(anchor));
    let labels = match week_start {
        schedule_engine::WeekStartDay::Sunday => ["일", "월", "화", "수", "목", "금", "토"],
        schedule_engine::WeekStartDay::Monday => ["월", "화", "수", "목", "금", "토", "일"],
    };
    println!("{}", labels.map(|l| format!("{l:>5}")).join(""));
    for row in &grid {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                Some(day) => match events_for_day(events, *day).len() {
                    0 => format!("{:>6}", day.day()),
                    n => format!("{:>4}+{n}", day.day()),
                },
                None => " ".repeat(6),
            })
            .collect();
        println!("{line}");
    }
    Ok(())
}
