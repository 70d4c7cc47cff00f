//! The format-independent event record handed to calendar serializers.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resolver::DateRange;

/// One extracted calendar event.
///
/// Times are floating local times; all-day events start at midnight. `end` is
/// `None` only for all-day events that name no end date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub all_day: bool,
    pub summary: String,
    pub description: String,
    pub uid: String,
}

impl CalendarEvent {
    /// All-day event covering an inclusive date range.
    pub fn for_range(range: DateRange, summary: &str, description: &str, namespace: &Uuid) -> Self {
        let start = range.start.and_time(NaiveTime::MIN);
        Self {
            start,
            end: Some(range.end.and_time(NaiveTime::MIN)),
            all_day: true,
            uid: stable_uid(namespace, start, summary),
            summary: summary.to_string(),
            description: description.to_string(),
        }
    }

    /// All-day event on a single date with no explicit end.
    pub fn for_date(date: NaiveDate, summary: &str, description: &str, namespace: &Uuid) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self {
            start,
            end: None,
            all_day: true,
            uid: stable_uid(namespace, start, summary),
            summary: summary.to_string(),
            description: description.to_string(),
        }
    }

    /// Event with clock times.
    pub fn timed(
        start: NaiveDateTime,
        end: NaiveDateTime,
        summary: &str,
        description: &str,
        namespace: &Uuid,
    ) -> Self {
        Self {
            start,
            end: Some(end),
            all_day: false,
            uid: stable_uid(namespace, start, summary),
            summary: summary.to_string(),
            description: description.to_string(),
        }
    }
}

/// Deterministic identifier from the start instant, its weekday, and the summary.
pub fn stable_uid(namespace: &Uuid, start: NaiveDateTime, summary: &str) -> String {
    let name = format!(
        "{}|{}|{}",
        start.format("%Y-%m-%dT%H:%M"),
        start.weekday(),
        summary
    );
    Uuid::new_v5(namespace, name.as_bytes()).to_string()
}
