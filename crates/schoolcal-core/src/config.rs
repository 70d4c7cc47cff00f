//! Tunable markers and matching rules.
//!
//! Every field has a default matching the layouts produced by common
//! PDF-to-HTML converters, so `ExtractConfig::default()` works out of the box.
//! A partial JSON document overrides only the fields it names.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::grammar;

/// Namespace for stable event identifiers (16 ASCII bytes).
pub const DEFAULT_UID_NAMESPACE: Uuid = Uuid::from_bytes(*b"schoolcal_events");

/// Top-level extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractConfig {
    pub fragments: FragmentConfig,
    pub block: BlockConfig,
    pub list: ListConfig,
    pub uid_namespace: UidNamespace,
}

impl ExtractConfig {
    /// Parse a (possibly partial) JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Paragraph delimiters wrapping usable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentConfig {
    pub paragraph_open: String,
    pub paragraph_close: String,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            paragraph_open: "<p>".to_string(),
            paragraph_close: "</p>".to_string(),
        }
    }
}

/// Line-shape rules for block calendars, as regular-expression source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    pub school_year: String,
    pub date_token: String,
    pub end_of_calendar: String,
    pub term_end_title: String,
    pub term_end_label: String,
    pub legend_trailer: String,
    pub endnote: String,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            school_year: grammar::SCHOOL_YEAR_PATTERN.to_string(),
            date_token: grammar::DATE_TOKEN_PATTERN.to_string(),
            end_of_calendar: grammar::END_OF_CALENDAR_PATTERN.to_string(),
            term_end_title: grammar::TERM_END_TITLE_PATTERN.to_string(),
            term_end_label: grammar::TERM_END_LABEL_PATTERN.to_string(),
            legend_trailer: grammar::LEGEND_TRAILER_PATTERN.to_string(),
            endnote: grammar::ENDNOTE_PATTERN.to_string(),
        }
    }
}

/// Settings for chronological lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Prefixes that start a new sub-event under the current date anchor.
    pub bullet_markers: Vec<String>,
    /// Length of an event that names a single clock time.
    pub default_duration_minutes: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            bullet_markers: vec!["&bull;".to_string(), "\u{2022}".to_string()],
            default_duration_minutes: 60,
        }
    }
}

/// Wrapper so the namespace defaults to [`DEFAULT_UID_NAMESPACE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UidNamespace(pub Uuid);

impl Default for UidNamespace {
    fn default() -> Self {
        Self(DEFAULT_UID_NAMESPACE)
    }
}
