//! Chronological-list parsing.
//!
//! A chronological list is a flat run of date anchors such as
//! `October 5, 2020            Mon`. The first fragment after an anchor is the
//! subject of its event; following fragments are details, except that a
//! bulleted fragment starts a sibling event on the same date. Clock times found
//! anywhere in an event's text decide whether it is timed or all-day.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::config::{ExtractConfig, FragmentConfig};
use crate::error::Result;
use crate::event::CalendarEvent;
use crate::fragment::fragments;
use crate::grammar::{compile, ANCHOR_DATE_FORMATS, CLOCK_TIME_PATTERN, WEEKDAY_ABBREVIATIONS};

/// One event under a date anchor, before time extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub anchor_date: NaiveDate,
    pub subject: String,
    pub details: String,
}

impl ScheduleEntry {
    fn new(anchor_date: NaiveDate, subject: &str) -> Self {
        Self {
            anchor_date,
            subject: subject.to_string(),
            details: String::new(),
        }
    }
}

/// State machine turning chronological-list fragments into events.
#[derive(Debug, Clone)]
pub struct ChronologicalListParser {
    fragments: FragmentConfig,
    anchor: Regex,
    clock_time: Regex,
    bullet_markers: Vec<String>,
    default_duration: Duration,
    namespace: Uuid,
}

impl ChronologicalListParser {
    /// # Errors
    /// Returns `ExtractError::InvalidPattern` if the built-in rules fail to compile.
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let anchor = format!(r"^(.+?)\s+(?:{})$", WEEKDAY_ABBREVIATIONS.join("|"));
        Ok(Self {
            fragments: config.fragments.clone(),
            anchor: compile("anchor", &anchor)?,
            clock_time: compile("clock_time", CLOCK_TIME_PATTERN)?,
            bullet_markers: config.list.bullet_markers.clone(),
            default_duration: Duration::minutes(i64::from(config.list.default_duration_minutes)),
            namespace: config.uid_namespace.0,
        })
    }

    /// Extract every event of the document, in document order.
    pub fn parse(&self, text: &str) -> Vec<CalendarEvent> {
        self.entries(text)
            .iter()
            .map(|entry| self.to_event(entry))
            .collect()
    }

    /// Group fragments into schedule entries.
    pub fn entries(&self, text: &str) -> Vec<ScheduleEntry> {
        let mut entries: Vec<ScheduleEntry> = Vec::new();

        for line in fragments(text, &self.fragments) {
            if let Some(date) = self.anchor_date(line) {
                trace!(%date, "anchor");
                entries.push(ScheduleEntry::new(date, ""));
                continue;
            }

            // Anything before the first anchor is page furniture.
            let Some(current) = entries.last_mut() else {
                continue;
            };

            if current.subject.is_empty() {
                current.subject = self.strip_bullet(line).unwrap_or(line).to_string();
            } else if let Some(subject) = self.strip_bullet(line) {
                let sibling = ScheduleEntry::new(current.anchor_date, subject);
                entries.push(sibling);
            } else {
                current.details.push_str(line);
            }
        }

        debug!(entries = entries.len(), "chronological list");
        entries
    }

    /// Date of an anchor fragment: a parseable date followed by a weekday.
    pub fn anchor_date(&self, line: &str) -> Option<NaiveDate> {
        let caps = self.anchor.captures(line.trim())?;
        let date = caps.get(1)?.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
        ANCHOR_DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&date, format).ok())
    }

    /// Bullet-stripped text when `line` opens with a bullet marker.
    pub fn strip_bullet<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.bullet_markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .find_map(|marker| line.strip_prefix(marker.as_str()))
            .map(str::trim)
    }

    /// Clock times in `text` on `date`, sorted. Tokens that are not real times
    /// (`25:00`, `13:00pm`) are skipped.
    pub fn clock_times(&self, date: NaiveDate, text: &str) -> Vec<NaiveDateTime> {
        let mut times: Vec<NaiveDateTime> = self
            .clock_time
            .captures_iter(text)
            .filter_map(|caps| {
                let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
                let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
                let meridiem = caps.get(3).map(|m| m.as_str().replace('.', "").to_lowercase());
                let hour = match meridiem.as_deref() {
                    Some(_) if hour == 0 || hour > 12 => return None,
                    Some("pm") => hour % 12 + 12,
                    Some(_) => hour % 12,
                    None => hour,
                };
                NaiveTime::from_hms_opt(hour, minute, 0).map(|time| date.and_time(time))
            })
            .collect();
        times.sort();
        times
    }

    /// Build the final event: all-day without times, the default duration after
    /// a lone time, otherwise from the earliest to the second-earliest time. A
    /// lone time whose default end falls past the last representable date
    /// ends where it starts.
    pub fn to_event(&self, entry: &ScheduleEntry) -> CalendarEvent {
        let mut times = self.clock_times(entry.anchor_date, &entry.subject);
        times.extend(self.clock_times(entry.anchor_date, &entry.details));
        times.sort();

        match times.as_slice() {
            [] => CalendarEvent::for_date(
                entry.anchor_date,
                &entry.subject,
                &entry.details,
                &self.namespace,
            ),
            [start] => CalendarEvent::timed(
                *start,
                start
                    .checked_add_signed(self.default_duration)
                    .unwrap_or(*start),
                &entry.subject,
                &entry.details,
                &self.namespace,
            ),
            [start, end, ..] => {
                CalendarEvent::timed(*start, *end, &entry.subject, &entry.details, &self.namespace)
            }
        }
    }
}
