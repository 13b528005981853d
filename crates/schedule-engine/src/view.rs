//! Calendar views: which events are visible for an anchor date.
//!
//! A view is a week or a month around an anchor date. [`get_filtered_events`]
//! keeps the events whose own `date` falls inside that period and whose text
//! matches the search term. Both predicates preserve the input order.
//!
//! The helpers below it drive calendar navigation and headings: the seven
//! dates of a week, the month grid, stepping to the previous or next period,
//! and the `"YYYY년 M월 N주"` / `"YYYY년 M월"` labels.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::datetime::parse_date;
use crate::event::Event;

// ── View configuration ──────────────────────────────────────────────────────

/// The period a calendar view spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Week,
    #[default]
    Month,
}

impl std::str::FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(CalendarView::Week),
            "month" => Ok(CalendarView::Month),
            other => Err(format!("unknown view '{other}' (expected 'week' or 'month')")),
        }
    }
}

impl std::fmt::Display for CalendarView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarView::Week => f.write_str("week"),
            CalendarView::Month => f.write_str("month"),
        }
    }
}

/// Which day begins a week for the week view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// Sunday-to-Saturday weeks.
    #[default]
    Sunday,
    /// ISO 8601 Monday-to-Sunday weeks.
    Monday,
}

/// Options for [`get_filtered_events_with_options`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    pub week_start: WeekStartDay,
}

/// Direction for [`navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

// ── Filtering ───────────────────────────────────────────────────────────────

/// Events visible in `view` around `anchor` that match `search_term`, using
/// Sunday-start weeks. See [`get_filtered_events_with_options`].
pub fn get_filtered_events<'a>(
    events: &'a [Event],
    search_term: &str,
    anchor: NaiveDate,
    view: CalendarView,
) -> Vec<&'a Event> {
    get_filtered_events_with_options(events, search_term, anchor, view, &ViewOptions::default())
}

/// Events visible in `view` around `anchor` that match `search_term`.
///
/// - **Range**: for [`CalendarView::Week`] the event's date lies in the week
///   containing `anchor`; for [`CalendarView::Month`] it shares year and month
///   with `anchor`. Events whose date does not parse are never in range.
/// - **Search**: case-insensitive substring of title, description or
///   location; an empty term matches everything.
///
/// The result is a subsequence of `events` in their original order.
pub fn get_filtered_events_with_options<'a>(
    events: &'a [Event],
    search_term: &str,
    anchor: NaiveDate,
    view: CalendarView,
    options: &ViewOptions,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| event.matches_search(search_term))
        .filter(|event| {
            parse_date(&event.date)
                .is_some_and(|date| is_in_view(date, anchor, view, options.week_start))
        })
        .collect()
}

/// Whether `date` belongs to the `view` period containing `anchor`.
pub fn is_in_view(
    date: NaiveDate,
    anchor: NaiveDate,
    view: CalendarView,
    week_start: WeekStartDay,
) -> bool {
    match view {
        CalendarView::Week => {
            let first = week_start_date(anchor, week_start);
            date >= first && date < first + Duration::days(7)
        }
        CalendarView::Month => date.year() == anchor.year() && date.month() == anchor.month(),
    }
}

/// Events whose date is exactly `date`, in input order.
pub fn events_for_day<'a>(events: &'a [Event], date: NaiveDate) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| parse_date(&event.date) == Some(date))
        .collect()
}

// ── Calendar helpers ────────────────────────────────────────────────────────

fn week_start_date(anchor: NaiveDate, week_start: WeekStartDay) -> NaiveDate {
    anchor - Duration::days(days_from_week_start(anchor.weekday(), week_start))
}

/// The seven dates of the week containing `anchor`.
pub fn week_dates(anchor: NaiveDate, week_start: WeekStartDay) -> [NaiveDate; 7] {
    let first = week_start_date(anchor, week_start);
    std::array::from_fn(|i| first + Duration::days(i as i64))
}

/// Number of days in a month; 0 for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// The month containing `anchor` as rows of seven cells. Cells before the 1st
/// and after the last day are `None`.
pub fn month_grid(anchor: NaiveDate, week_start: WeekStartDay) -> Vec<[Option<NaiveDate>; 7]> {
    let total_days = days_in_month(anchor.year(), anchor.month());
    let Some(first) = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1) else {
        return Vec::new();
    };
    let lead = days_from_week_start(first.weekday(), week_start);

    let mut rows = Vec::new();
    let mut row = [None; 7];
    let mut col = lead as usize;
    for offset in 0..total_days {
        row[col] = Some(first + Duration::days(offset as i64));
        col += 1;
        if col == 7 {
            rows.push(row);
            row = [None; 7];
            col = 0;
        }
    }
    if col > 0 {
        rows.push(row);
    }
    rows
}

/// Step the anchor one period backwards or forwards. Month steps land on the
/// same day number, clamped to the last day of a shorter month.
pub fn navigate(anchor: NaiveDate, view: CalendarView, direction: Direction) -> NaiveDate {
    let stepped = match (view, direction) {
        (CalendarView::Week, Direction::Previous) => anchor.checked_sub_signed(Duration::days(7)),
        (CalendarView::Week, Direction::Next) => anchor.checked_add_signed(Duration::days(7)),
        (CalendarView::Month, Direction::Previous) => anchor.checked_sub_months(Months::new(1)),
        (CalendarView::Month, Direction::Next) => anchor.checked_add_months(Months::new(1)),
    };
    stepped.unwrap_or(anchor)
}

/// Week heading such as `"2024년 7월 1주"`.
///
/// A week belongs to the month that holds its Thursday, and is numbered by
/// how many Thursdays of that month precede or equal it.
pub fn format_week(anchor: NaiveDate, week_start: WeekStartDay) -> String {
    let thursday = week_dates(anchor, week_start)
        .into_iter()
        .find(|d| d.weekday() == Weekday::Thu)
        .unwrap_or(anchor);
    let week_number = (thursday.day() - 1) / 7 + 1;
    format!(
        "{}년 {}월 {}주",
        thursday.year(),
        thursday.month(),
        week_number
    )
}

/// Month heading such as `"2024년 7월"`.
pub fn format_month(anchor: NaiveDate) -> String {
    format!("{}년 {}월", anchor.year(), anchor.month())
}

// ── Tests ───────────────────────────────────────────────────────────────────
