//! Error types for the review harvester.
//!
//! All fallible operations return `Result<T, HarvestError>`. Errors are fatal
//! to a run: nothing is retried or recovered locally.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Invalid Steam app id.
    #[error("Invalid app id: '{0}'. Expected a numeric Steam app id (e.g., 440)")]
    InvalidAppId(String),

    /// Unknown review language.
    #[error("Unknown language: '{0}'. Use a Steam language name, its short code, or 'all'")]
    InvalidLanguage(String),

    /// Page size outside the API's accepted range.
    #[error("Invalid page size: {0}. Expected a value between 1 and 100")]
    InvalidPageSize(u32),

    /// Batch count must be at least 1.
    #[error("Invalid batch count: {0}. Expected a value of at least 1")]
    InvalidBatchCount(u32),

    /// Day range must be a positive number of days.
    #[error("Invalid day range: {0}. Expected a positive number of days")]
    InvalidDayRange(u32),

    /// Day range combined with a filter that does not support it.
    #[error("day_range only applies to the 'all' filter, but the filter is '{filter}'")]
    DayRangeNotApplicable { filter: String },

    /// Translation requested without a credential.
    #[error("A DeepL API key must be provided when translation is requested")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to fetch a review page.
    #[error("Failed to fetch review page for app {app_id}: {source}")]
    PageDownload {
        app_id: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not a well-formed review page envelope.
    #[error("Failed to decode review page: {message}")]
    Decode { message: String },

    /// Translation service call failed.
    #[error("Translation failed: {message}")]
    Translation { message: String },

    /// Nothing to write; an empty export indicates a misconfigured query.
    #[error("No reviews retrieved; refusing to write an empty export")]
    EmptyExport,

    /// CSV serialization error.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
