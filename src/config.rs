//! Configuration constants, validation functions, and the query URL builder.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvestError, Result};
use crate::language::validate_language;
use crate::types::{RetrievalConfig, ReviewFilter};

/// Base URL for the Steam store, which hosts the public review endpoint.
pub const STEAM_STORE_URL: &str = "https://store.steampowered.com";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Sentinel cursor value marking the start of results.
pub const CURSOR_START: &str = "*";

/// Smallest page size the review API accepts.
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest page size the review API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// App id pattern: one or more digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static APP_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Validate a Steam app id.
///
/// # Examples
/// ```
/// use steam_review_harvester::config::validate_app_id;
///
/// assert!(validate_app_id("440").is_ok());
/// assert!(validate_app_id("not-an-id").is_err());
/// ```
pub fn validate_app_id(app_id: &str) -> Result<()> {
    if APP_ID_PATTERN.is_match(app_id) {
        Ok(())
    } else {
        Err(HarvestError::InvalidAppId(app_id.to_string()))
    }
}

/// Validate a requested page size against the API's accepted range.
pub fn validate_page_size(num_per_page: u32) -> Result<()> {
    if (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&num_per_page) {
        Ok(())
    } else {
        Err(HarvestError::InvalidPageSize(num_per_page))
    }
}

/// Validate a full retrieval configuration.
///
/// Checks the app id, language, page size, and the mode-specific parameter
/// rules: `day_range` is rejected outside the `all` filter, and `batches`
/// must be at least 1 when given.
pub fn validate_config(config: &RetrievalConfig) -> Result<()> {
    validate_app_id(&config.app_id)?;
    validate_language(&config.language)?;
    validate_page_size(config.num_per_page)?;

    if let Some(day_range) = config.day_range {
        if day_range == 0 {
            return Err(HarvestError::InvalidDayRange(day_range));
        }
        if config.filter != ReviewFilter::All {
            return Err(HarvestError::DayRangeNotApplicable {
                filter: config.filter.as_str().to_string(),
            });
        }
    }

    if let Some(batches) = config.batches {
        if batches == 0 {
            return Err(HarvestError::InvalidBatchCount(batches));
        }
    }

    Ok(())
}

/// Build the review query URL for a configuration, without the cursor.
///
/// The pagination engine appends the percent-encoded `cursor` parameter per
/// request.
///
/// # Panics
/// Debug builds panic if the app id doesn't match the expected format.
#[must_use]
pub fn reviews_url(base_url: &str, config: &RetrievalConfig) -> String {
    debug_assert!(
        APP_ID_PATTERN.is_match(&config.app_id),
        "app_id should be validated before calling reviews_url"
    );

    let mut url = format!(
        "{}/appreviews/{}?json=1&filter={}&language={}",
        base_url.trim_end_matches('/'),
        config.app_id,
        config.filter.as_str(),
        config.language
    );

    // Plain integer, meaningful only under the 'all' filter
    if let Some(day_range) = config.day_range {
        url.push_str(&format!("&day_range={day_range}"));
    }

    url.push_str(&format!(
        "&review_type={}&purchase_type={}&num_per_page={}",
        config.review_type.as_str(),
        config.purchase_type.as_str(),
        config.num_per_page
    ));

    url
}
