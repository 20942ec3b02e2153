//! Steam Review Harvester - Download app reviews and export them to CSV.
//!
//! This crate retrieves user reviews for a Steam application from the public
//! review API, normalizes the records, optionally translates non-English
//! review text via DeepL, and writes the result as a CSV file.
//!
//! # Example
//!
//! ```
//! use steam_review_harvester::config;
//!
//! // Validate an app id before building a request
//! assert!(config::validate_app_id("440").is_ok());
//! assert!(config::validate_app_id("not-an-id").is_err());
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Constants, validation, and the query URL builder
//! - [`types`]: Core data types (RetrievalConfig, Page, RawReview, OutputRow)
//! - [`language`]: Steam language-code normalization
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client construction
//! - [`fetch`]: Single-page fetching and envelope decoding
//! - [`pagination`]: The cursor-walking retrieval engine
//! - [`normalize`]: Raw review to output row conversion
//! - [`translate`]: DeepL translation adapter
//! - [`output`]: CSV sink
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main export pipeline

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod harvester;
pub mod http;
pub mod language;
pub mod normalize;
pub mod output;
pub mod pagination;
pub mod translate;
pub mod types;

// Re-export main functions
pub use harvester::harvest_reviews;
pub use pagination::retrieve_all;

// Re-export commonly used items
pub use config::{validate_app_id, validate_config};
pub use error::{HarvestError, Result};
pub use types::{OutputRow, Page, RawReview, RetrievalConfig, ReviewFilter};
