//! Error types for calendar extraction.

use thiserror::Error;

/// Errors that can occur while extracting events from a document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A dated event line appeared in a month block before any school-year
    /// header, so its year cannot be resolved.
    #[error("No school-year header before event line: {fragment:?}")]
    MissingSchoolYear { fragment: String },

    /// A token shaped like `M/D` that is not a real calendar date.
    #[error("Invalid date token {token:?}: {reason}")]
    InvalidDate { token: String, reason: String },

    /// A configured matching rule failed to compile.
    #[error("Invalid pattern for {name}: {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The configuration document was not valid JSON for `ExtractConfig`.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience alias used throughout schoolcal-core.
pub type Result<T> = std::result::Result<T, ExtractError>;
