//! Block-calendar parsing.
//!
//! A block calendar is a grid of month blocks. Each block opens with a month
//! name, lists events as date-range lines (`9/4-9/6: Orientation`), and declares
//! endnotes (`*NH: No School Holiday`) whose markers (`NH*`) annotate event subjects.
//! One fragment often carries several events plus the block's mini-calendar
//! legend, so each dated fragment is decomposed with a cursor until no date
//! token remains.

use tracing::{debug, trace};
use uuid::Uuid;

use crate::config::{ExtractConfig, FragmentConfig};
use crate::error::{ExtractError, Result};
use crate::event::CalendarEvent;
use crate::fragment::{fragments, Fragments};
use crate::grammar::{BlockGrammar, LineKind};
use crate::resolver::{resolve_ranges, SchoolYear};

/// Endnotes of one month block, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndnoteTable {
    notes: Vec<(String, String)>,
}

impl EndnoteTable {
    /// Add a note. Redeclaring a marker replaces its text but keeps its place.
    pub fn insert(&mut self, marker: impl Into<String>, text: impl Into<String>) {
        let marker = marker.into();
        let text = text.into();
        match self.notes.iter_mut().find(|(m, _)| *m == marker) {
            Some(entry) => entry.1 = text,
            None => self.notes.push((marker, text)),
        }
    }

    /// Text of the first marker, in table order, that occurs in `subject`.
    pub fn lookup(&self, subject: &str) -> Option<&str> {
        self.notes
            .iter()
            .find(|(marker, _)| subject.contains(marker.as_str()))
            .map(|(_, text)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Seeking,
    InMonthBlock,
}

/// State machine turning block-calendar fragments into all-day events.
#[derive(Debug, Clone)]
pub struct BlockCalendarParser {
    grammar: BlockGrammar,
    fragments: FragmentConfig,
    namespace: Uuid,
}

impl BlockCalendarParser {
    /// # Errors
    /// Returns `ExtractError::InvalidPattern` if a configured rule does not compile.
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            grammar: BlockGrammar::new(&config.block)?,
            fragments: config.fragments.clone(),
            namespace: config.uid_namespace.0,
        })
    }

    /// Extract every event of the document, in document order.
    ///
    /// # Errors
    /// Returns `ExtractError::MissingSchoolYear` if a month block lists dated
    /// events before any school-year header.
    pub fn parse(&self, text: &str) -> Result<Vec<CalendarEvent>> {
        let mut cursor = fragments(text, &self.fragments);
        let mut state = State::Seeking;
        let mut school_year: Option<SchoolYear> = None;
        let mut endnotes = EndnoteTable::default();
        let mut events = Vec::new();

        while let Some(line) = cursor.next() {
            match self.grammar.classify(line) {
                LineKind::EndOfCalendar => {
                    debug!("end of calendar");
                    state = State::Seeking;
                }
                LineKind::SchoolYearHeader(year) => {
                    debug!(start = year.start_year, end = year.end_year, "school year");
                    school_year = Some(year);
                    state = State::Seeking;
                }
                LineKind::MonthBlockHeader(month) => {
                    endnotes = self.collect_endnotes(cursor.clone());
                    debug!(month, endnotes = endnotes.len(), "month block");
                    state = State::InMonthBlock;
                }
                LineKind::DateRangeEvent if state == State::InMonthBlock => {
                    let year = school_year.ok_or_else(|| ExtractError::MissingSchoolYear {
                        fragment: line.to_string(),
                    })?;
                    let line = self.strip_term_end_dates(line);
                    events.extend(self.extract_line(line, &year, &endnotes));
                }
                _ => {}
            }
        }

        Ok(events)
    }

    /// Scan ahead to the next month header or end of calendar, gathering the
    /// endnotes declared in between.
    pub fn collect_endnotes(&self, ahead: Fragments<'_>) -> EndnoteTable {
        let mut table = EndnoteTable::default();
        for line in ahead {
            if self.grammar.month_header(line).is_some() || self.grammar.is_end_of_calendar(line) {
                break;
            }
            if let Some((marker, text)) = self.grammar.endnote(line) {
                table.insert(marker, text);
            }
        }
        table
    }

    /// Marking-term end dates are metadata, not events.
    pub fn strip_term_end_dates<'a>(&self, line: &'a str) -> &'a str {
        match self.grammar.term_end_start(line) {
            Some(idx) => &line[..idx],
            None => line,
        }
    }

    /// Decompose one fragment into its events.
    ///
    /// Each pass takes a run of adjacent dates, then the subject up to the next
    /// date or legend. An event whose dates do not resolve is dropped; the pass
    /// continues with the rest of the fragment.
    pub fn extract_line(
        &self,
        line: &str,
        school_year: &SchoolYear,
        endnotes: &EndnoteTable,
    ) -> Vec<CalendarEvent> {
        let mut events = Vec::new();
        let mut rest = line;

        while let Some(first) = self.grammar.first_date(rest) {
            let event = rest[first..].trim();
            let (dates, body) = event.split_at(self.grammar.date_prefix_len(event));
            let subject_end = self.grammar.subject_end(body);
            let subject = clean_subject(&body[..subject_end]);
            rest = body[subject_end..].trim();

            let ranges = match resolve_ranges(dates, school_year) {
                Ok(ranges) => ranges,
                Err(err) => {
                    debug!(%err, subject, "dropping event");
                    continue;
                }
            };

            let description = endnotes.lookup(subject).unwrap_or_default();
            for range in ranges {
                trace!(start = %range.start, end = %range.end, subject, "event");
                events.push(CalendarEvent::for_range(
                    range,
                    subject,
                    description,
                    &self.namespace,
                ));
            }
        }

        events
    }
}

/// Trim whitespace and the separator left before the next event on the line.
fn clean_subject(raw: &str) -> &str {
    raw.trim().trim_end_matches([',', ';']).trim_end()
}
