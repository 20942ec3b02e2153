//! Main export pipeline tying retrieval, normalization, and translation
//! together.

use crate::config::validate_config;
use crate::error::Result;
use crate::http::create_client;
use crate::normalize::normalize_reviews;
use crate::pagination::retrieve_all;
use crate::translate::{translate_rows, Translator};
use crate::types::{OutputRow, RetrievalConfig};

/// Retrieve, normalize, and optionally translate reviews for one run.
///
/// # Arguments
/// * `base_url` - Review API base URL (production: [`crate::config::STEAM_STORE_URL`])
/// * `config` - Retrieval parameters; validated before any request is made
/// * `translator` - When given, non-English bodies are rewritten to English
///
/// # Returns
/// Output rows in API delivery order, ready for the CSV sink.
pub fn harvest_reviews(
    base_url: &str,
    config: &RetrievalConfig,
    translator: Option<&Translator>,
) -> Result<Vec<OutputRow>> {
    // Validate inputs before making HTTP requests
    validate_config(config)?;

    let client = create_client()?;
    let raw = retrieve_all(&client, base_url, config)?;
    tracing::info!(reviews = raw.len(), "Retrieval complete");

    let mut rows = normalize_reviews(raw)?;

    if let Some(translator) = translator {
        let translated = translate_rows(translator, &mut rows)?;
        tracing::info!(translated, "Translation complete");
    }

    Ok(rows)
}
