//! # schoolcal-core
//!
//! Turns the loosely tagged text extracted from school calendar documents into
//! an ordered list of calendar events ready for iCalendar export.
//!
//! Two document layouts are understood:
//!
//! - **Block calendars**: a grid of month blocks, each holding date-range lines
//!   such as `9/4-9/6 Orientation` plus footnote-style endnotes (`*NH: No School` annotates subjects marked `NH*`).
//! - **Chronological lists**: a flat run of dated anchors (`October 5 2020 Mon`),
//!   each followed by one or more bulleted sub-events with embedded clock times.
//!
//! ## Quick start
//!
//! ```rust
//! use schoolcal_core::{extract, ExtractConfig, Layout};
//!
//! let text = "<p>2020-2021 School Year</p>\n<p>SEPTEMBER</p>\n<p>9/7 Labor Day</p>";
//! let events = extract(text, Layout::Block, &ExtractConfig::default()).unwrap();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].summary, "Labor Day");
//! assert!(events[0].all_day);
//! ```
//!
//! ## Modules
//!
//! - [`fragment`] — tagged text → paragraph fragments in reading order
//! - [`grammar`] — named line-shape rules and the block-calendar line classifier
//! - [`resolver`] — month/day tokens + school year → merged date ranges
//! - [`block`] — block-calendar state machine
//! - [`chronological`] — chronological-list state machine and clock-time extraction
//! - [`assembler`] — chronological ordering across documents
//! - [`event`] — the `CalendarEvent` record and stable identifiers
//! - [`config`] — tunable markers and patterns
//! - [`error`] — Error types

pub mod assembler;
pub mod block;
pub mod chronological;
pub mod config;
pub mod error;
pub mod event;
pub mod fragment;
pub mod grammar;
pub mod resolver;

use serde::{Deserialize, Serialize};

pub use assembler::{assemble, EventAssembler};
pub use block::{BlockCalendarParser, EndnoteTable};
pub use chronological::{ChronologicalListParser, ScheduleEntry};
pub use config::ExtractConfig;
pub use error::ExtractError;
pub use event::CalendarEvent;
pub use fragment::{fragments, Fragments};
pub use grammar::{classify, BlockGrammar, LineKind};
pub use resolver::{DateRange, SchoolYear};

/// The source document layout, selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Month blocks of date-range lines with endnotes.
    Block,
    /// Dated anchors followed by bulleted sub-events.
    List,
}

/// Extract the events of one document, sorted by start.
///
/// # Errors
/// Returns `ExtractError::MissingSchoolYear` when a block calendar lists dated
/// events before any `YYYY-YYYY` header, and `ExtractError::InvalidPattern` when
/// a configured matching rule does not compile.
pub fn extract(
    text: &str,
    layout: Layout,
    config: &ExtractConfig,
) -> error::Result<Vec<CalendarEvent>> {
    let events = match layout {
        Layout::Block => BlockCalendarParser::new(config)?.parse(text)?,
        Layout::List => ChronologicalListParser::new(config)?.parse(text),
    };
    Ok(assemble(events))
}
