//! Line-shape rules for block calendars and chronological lists.
//!
//! Source documents carry no explicit grammar, so structure is recovered by
//! matching the shape of each fragment. The rules live here as named constants
//! (the defaults of [`crate::config::BlockConfig`]) so format quirks stay in one
//! auditable place, and are compiled once into a [`BlockGrammar`] owned by
//! each parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::BlockConfig;
use crate::error::{ExtractError, Result};
use crate::resolver::SchoolYear;

/// `2020-2021` at the start of a fragment opens a new school year.
pub const SCHOOL_YEAR_PATTERN: &str = r"^([0-9]{4})-([0-9]{4})";

/// A bare `month/day` token.
pub const DATE_TOKEN_PATTERN: &str = r"\d{1,2}/\d{1,2}";

/// The legend below the last month block ends the calendar proper.
pub const END_OF_CALENDAR_PATTERN: &str = r"^\s*Color Key:";

/// Title of the marking-term summary that shares lines with month events.
pub const TERM_END_TITLE_PATTERN: &str = r" MARKING TERM END DATES:";

/// Individual marking-term labels (`Term 2: 1/29`).
pub const TERM_END_LABEL_PATTERN: &str = r" Term [1-4]: ";

/// Mini-calendar footer: weekday initials, or a run of day numbers at the end.
pub const LEGEND_TRAILER_PATTERN: &str = r"( S M T W Th F S)|( [0-9]{1,2})*$";

/// Endnote declaration: `*NH: No School Holiday` declares the marker `NH*`,
/// written after the subject it annotates (`Thanksgiving NH*`).
pub const ENDNOTE_PATTERN: &str = r"\*([^:]+): ";

/// Separator between adjacent dates of one event (`9/4-9/6`, `9/4, 9/8`);
/// only counts when a date token follows immediately.
const DATE_SEPARATOR_PATTERN: &str = r"^(\s*[,-]\s*)";

/// Optional colon closing a run of dates (`11/25-11/27: Thanksgiving`).
const TRAILING_COLON_PATTERN: &str = r"^\s*:";

const LEADING_WORD_PATTERN: &str = r"^\s*(\w+)";

/// Full month names; headers may use them lowercase, capitalized or all caps.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Weekday abbreviations closing a chronological-list date anchor.
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Date strings accepted in a chronological-list anchor, tried in order.
pub const ANCHOR_DATE_FORMATS: [&str; 6] = [
    "%B %d %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%m/%d/%Y",
    "%Y-%m-%d",
];

/// Clock time with an optional meridiem (`10:00am`, `3:30 p.m.`, `14:15`).
pub const CLOCK_TIME_PATTERN: &str = r"(?i)(\d{1,2}):(\d{2}) *(am|pm|a\.m\.|p\.m\.)?";

/// Shape of one block-calendar fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    SchoolYearHeader(SchoolYear),
    /// Carries the 1-based month number.
    MonthBlockHeader(u32),
    EndOfCalendar,
    EndnoteLine { marker: String, text: String },
    DateRangeEvent,
    PlainText,
}

/// Compiled block-calendar rules.
#[derive(Debug, Clone)]
pub struct BlockGrammar {
    school_year: Regex,
    date: Regex,
    next_date: Regex,
    trailing_colon: Regex,
    end_of_calendar: Regex,
    term_end_title: Regex,
    term_end_label: Regex,
    legend_trailer: Regex,
    endnote: Regex,
    leading_word: Regex,
}

pub(crate) fn compile(name: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ExtractError::InvalidPattern { name, source })
}

impl BlockGrammar {
    /// Compile every rule in `config`.
    ///
    /// # Errors
    /// Returns `ExtractError::InvalidPattern` naming the first rule that fails.
    pub fn new(config: &BlockConfig) -> Result<Self> {
        Ok(Self {
            school_year: compile("school_year", &config.school_year)?,
            date: compile("date_token", &config.date_token)?,
            next_date: compile(
                "date_token",
                &format!("{DATE_SEPARATOR_PATTERN}(?:{})", config.date_token),
            )?,
            trailing_colon: compile("trailing_colon", TRAILING_COLON_PATTERN)?,
            end_of_calendar: compile("end_of_calendar", &config.end_of_calendar)?,
            term_end_title: compile("term_end_title", &config.term_end_title)?,
            term_end_label: compile("term_end_label", &config.term_end_label)?,
            legend_trailer: compile("legend_trailer", &config.legend_trailer)?,
            endnote: compile("endnote", &config.endnote)?,
            leading_word: compile("leading_word", LEADING_WORD_PATTERN)?,
        })
    }

    /// Classify one fragment. Earlier shapes win: a month header that happens to
    /// contain a date is still a header.
    pub fn classify(&self, line: &str) -> LineKind {
        if self.is_end_of_calendar(line) {
            return LineKind::EndOfCalendar;
        }
        if let Some(school_year) = self.school_year(line) {
            return LineKind::SchoolYearHeader(school_year);
        }
        if let Some(month) = self.month_header(line) {
            return LineKind::MonthBlockHeader(month);
        }
        if self.has_date(line) {
            return LineKind::DateRangeEvent;
        }
        match self.endnote(line) {
            Some((marker, text)) => LineKind::EndnoteLine { marker, text },
            None => LineKind::PlainText,
        }
    }

    pub fn is_end_of_calendar(&self, line: &str) -> bool {
        self.end_of_calendar.is_match(line)
    }

    pub fn school_year(&self, line: &str) -> Option<SchoolYear> {
        let caps = self.school_year.captures(line)?;
        let start_year = caps.get(1)?.as_str().parse().ok()?;
        let end_year = caps.get(2)?.as_str().parse().ok()?;
        Some(SchoolYear::new(start_year, end_year))
    }

    /// Month number when the fragment's leading word is a full month name.
    pub fn month_header(&self, line: &str) -> Option<u32> {
        let word = self.leading_word.captures(line)?.get(1)?.as_str();
        month_number(word)
    }

    /// `(marker, annotation)` when the fragment declares an endnote. The marker
    /// is the declared name followed by the trailing asterisk.
    pub fn endnote(&self, line: &str) -> Option<(String, String)> {
        let caps = self.endnote.captures(line)?;
        let whole = caps.get(0)?;
        let marker = format!("{}*", caps.get(1)?.as_str().trim());
        Some((marker, line[whole.end()..].trim().to_string()))
    }

    pub fn has_date(&self, text: &str) -> bool {
        self.date.is_match(text)
    }

    /// Byte offset of the first date token in `text`.
    pub fn first_date(&self, text: &str) -> Option<usize> {
        self.date.find(text).map(|m| m.start())
    }

    /// Offset where marking-term metadata starts, if the fragment has any.
    pub fn term_end_start(&self, line: &str) -> Option<usize> {
        self.term_end_title
            .find(line)
            .or_else(|| self.term_end_label.find(line))
            .map(|m| m.start())
    }

    /// Length of the run of adjacent dates that opens `event`, including a
    /// closing colon. `event` must start at a date token.
    pub fn date_prefix_len(&self, event: &str) -> usize {
        let mut next = 0;
        while let Some(date) = self.date.find(&event[next..]) {
            next += date.end();
            if let Some(sep) = self.next_date.captures(&event[next..]).and_then(|c| c.get(1)) {
                next += sep.end();
                continue;
            }
            if let Some(colon) = self.trailing_colon.find(&event[next..]) {
                next += colon.end();
            }
            break;
        }
        next
    }

    /// Where the subject of an event body ends: at the next date token, else
    /// at a trailing legend, else at the end.
    pub fn subject_end(&self, body: &str) -> usize {
        if let Some(idx) = self.first_date(body) {
            return idx;
        }
        self.legend_trailer
            .find(body)
            .map_or(body.len(), |m| m.start())
    }
}

impl Default for BlockGrammar {
    fn default() -> Self {
        Self::new(&BlockConfig::default()).expect("built-in block patterns are valid")
    }
}

static DEFAULT_GRAMMAR: LazyLock<BlockGrammar> = LazyLock::new(BlockGrammar::default);

/// Classify a fragment with the built-in block-calendar rules.
pub fn classify(line: &str) -> LineKind {
    DEFAULT_GRAMMAR.classify(line)
}

/// 1-based month for `january`, `January` or `JANUARY`; mixed case is rejected.
pub fn month_number(word: &str) -> Option<u32> {
    MONTH_NAMES.iter().zip(1u32..).find_map(|(name, number)| {
        let capitalized = format!("{}{}", name[..1].to_uppercase(), &name[1..]);
        let matches = word == *name || word == capitalized || word == name.to_uppercase();
        matches.then_some(number)
    })
}
