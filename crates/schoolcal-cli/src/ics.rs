//! Map extracted events onto iCalendar components.

use chrono::Days;
use icalendar::{Calendar, Component, Event, EventLike};
use schoolcal_core::CalendarEvent;

/// Build a named calendar holding `events` in the given order.
///
/// All-day events get date-valued bounds with an exclusive `DTEND`; timed
/// events use floating local date-times.
pub fn to_calendar(title: &str, events: &[CalendarEvent]) -> Calendar {
    let mut calendar = Calendar::new();
    calendar.name(title);
    for event in events {
        calendar.push(to_event(event));
    }
    calendar.done()
}

fn to_event(source: &CalendarEvent) -> Event {
    let mut event = Event::new();
    event.uid(&source.uid).summary(&source.summary);
    if !source.description.is_empty() {
        event.description(&source.description);
    }

    if source.all_day {
        let start = source.start.date();
        let last = source.end.map_or(start, |end| end.date());
        let end = last.checked_add_days(Days::new(1)).unwrap_or(last);
        event.starts(start).ends(end);
    } else {
        event.starts(source.start);
        if let Some(end) = source.end {
            event.ends(end);
        }
    }

    event.done()
}
