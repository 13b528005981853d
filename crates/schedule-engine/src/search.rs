//! Live search state over a calendar view.
//!
//! [`SearchState`] owns the inputs of [`get_filtered_events_with_options`]
//! (events, anchor date, view, search term) and the derived visible list.
//! Every setter recomputes the derived list before returning, so a reader
//! never observes results computed from superseded inputs.

use chrono::NaiveDate;

use crate::event::Event;
use crate::view::{
    get_filtered_events_with_options, navigate, CalendarView, Direction, ViewOptions,
};

#[derive(Debug, Clone)]
pub struct SearchState {
    events: Vec<Event>,
    anchor: NaiveDate,
    view: CalendarView,
    options: ViewOptions,
    search_term: String,
    filtered: Vec<Event>,
}

impl SearchState {
    pub fn new(events: Vec<Event>, anchor: NaiveDate, view: CalendarView) -> Self {
        Self::with_options(events, anchor, view, ViewOptions::default())
    }

    pub fn with_options(
        events: Vec<Event>,
        anchor: NaiveDate,
        view: CalendarView,
        options: ViewOptions,
    ) -> Self {
        let mut state = SearchState {
            events,
            anchor,
            view,
            options,
            search_term: String::new(),
            filtered: Vec::new(),
        };
        state.recompute();
        state
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events visible for the current inputs.
    pub fn filtered_events(&self) -> &[Event] {
        &self.filtered
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.recompute();
    }

    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.recompute();
    }

    pub fn set_anchor(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
        self.recompute();
    }

    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
        self.recompute();
    }

    /// Move the anchor one week or month, depending on the current view.
    pub fn navigate(&mut self, direction: Direction) {
        self.set_anchor(navigate(self.anchor, self.view, direction));
    }

    fn recompute(&mut self) {
        self.filtered = get_filtered_events_with_options(
            &self.events,
            &self.search_term,
            self.anchor,
            self.view,
            &self.options,
        )
        .into_iter()
        .cloned()
        .collect();
        tracing::trace!(
            term = %self.search_term,
            view = %self.view,
            visible = self.filtered.len(),
            "recomputed filtered events"
        );
    }
}
