//! Core data types for the harvester.
//!
//! These types mirror the review API's wire shapes (`Page`, `RawReview`) and
//! the CSV output shape (`OutputRow`), plus the immutable per-run
//! `RetrievalConfig`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_SIZE;

/// Sort/filter mode for review retrieval.
///
/// `Recent` and `Updated` are cursor-driven and exhaustively paginated;
/// `All` is helpfulness-sorted over a sliding window and bounded to one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReviewFilter {
    /// Sorted by creation time.
    Recent,

    /// Sorted by last update time.
    Updated,

    /// Sorted by helpfulness, with sliding windows based on day range.
    All,
}

impl ReviewFilter {
    /// Get the query parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Updated => "updated",
            Self::All => "all",
        }
    }

    /// Whether this filter paginates by following the returned cursor.
    #[must_use]
    pub fn follows_cursor(&self) -> bool {
        matches!(self, Self::Recent | Self::Updated)
    }
}

/// Which recommendation kinds to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReviewType {
    /// All reviews.
    All,

    /// Only positive reviews.
    Positive,

    /// Only negative reviews.
    Negative,
}

impl ReviewType {
    /// Get the query parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

/// Filter by how the reviewer obtained the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum PurchaseType {
    /// All reviews.
    All,

    /// Reviews by users who did not pay for the app on Steam.
    NonSteamPurchase,

    /// Reviews by users who paid for the app on Steam.
    Steam,
}

impl PurchaseType {
    /// Get the query parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::NonSteamPurchase => "non_steam_purchase",
            Self::Steam => "steam",
        }
    }
}

/// Immutable parameters for one export run.
///
/// Constructed once from validated CLI input and passed by reference into the
/// pagination engine; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Numeric Steam app id (e.g., "440").
    pub app_id: String,

    /// Sort/filter mode.
    pub filter: ReviewFilter,

    /// Normalized Steam language name, or "all".
    pub language: String,

    /// Look-back window in days for helpful reviews. Only valid with
    /// [`ReviewFilter::All`].
    pub day_range: Option<u32>,

    /// Which recommendation kinds to include.
    pub review_type: ReviewType,

    /// Filter by how the app was obtained.
    pub purchase_type: PurchaseType,

    /// Reviews per page (1-100).
    pub num_per_page: u32,

    /// Requested number of batches. Only meaningful with cursor-driven
    /// filters, and never terminates the retrieval loop early.
    pub batches: Option<u32>,
}

impl RetrievalConfig {
    /// Create a config with the API's default parameters for an app.
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            filter: ReviewFilter::All,
            language: "all".to_string(),
            day_range: None,
            review_type: ReviewType::All,
            purchase_type: PurchaseType::Steam,
            num_per_page: DEFAULT_PAGE_SIZE,
            batches: None,
        }
    }
}

/// Summary block of one API response page.
#[derive(Debug, Clone, Deserialize)]
pub struct QuerySummary {
    /// Number of reviews reported for this page. Mandatory; a missing field
    /// is a decode error at the fetcher boundary.
    pub num_reviews: u32,
}

/// One decoded review page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Page summary with the reported review count.
    pub query_summary: QuerySummary,

    /// Reviews in API delivery order.
    #[serde(default)]
    pub reviews: Vec<RawReview>,

    /// Opaque continuation token. Empty or absent signals end of data.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl Page {
    /// Reported review count for this page.
    #[must_use]
    pub fn num_reviews(&self) -> u32 {
        self.query_summary.num_reviews
    }
}

/// Reviewer details attached to a raw review.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewAuthor {
    /// Minutes played at the time the review was written.
    pub playtime_at_review: u64,
}

/// One review as returned by the API.
///
/// All fields are mandatory so that missing-field errors surface when the
/// page is decoded, not later during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReview {
    /// Reviewer details.
    pub author: ReviewAuthor,

    /// Steam language name the review was written in.
    pub language: String,

    /// Free-text review body.
    pub review: String,

    /// Creation time as epoch seconds.
    pub timestamp_created: i64,

    /// Whether the reviewer recommends the app.
    pub voted_up: bool,

    /// Weighted helpfulness score in [0, 1].
    pub weighted_vote_score: f64,
}

/// One row of the CSV export.
///
/// Field order defines the CSV column order; field names define the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    /// Playtime at review in hours (minutes / 60, no rounding).
    pub playtime: f64,

    /// Steam language name.
    pub language: String,

    /// Review body, possibly translated.
    pub body: String,

    /// Human-readable creation time in the local timezone.
    pub time_created: String,

    /// Whether the reviewer recommends the app.
    pub recommend: bool,

    /// Weighted helpfulness score in [0, 1].
    pub weighted_vote_score: f64,
}
