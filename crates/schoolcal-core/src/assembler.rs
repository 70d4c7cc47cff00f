//! Final ordering of extracted events.

use crate::event::CalendarEvent;

/// Collects the events of one or more documents and orders them by start.
#[derive(Debug, Clone, Default)]
pub struct EventAssembler {
    events: Vec<CalendarEvent>,
}

impl EventAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, events: impl IntoIterator<Item = CalendarEvent>) {
        self.events.extend(events);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events sorted by start. Ties keep the order they were pushed in.
    pub fn finish(mut self) -> Vec<CalendarEvent> {
        self.events.sort_by_key(|event| event.start);
        self.events
    }
}

/// Sort a single list of events by start, stably.
pub fn assemble(events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    let mut assembler = EventAssembler::new();
    assembler.push(events);
    assembler.finish()
}
