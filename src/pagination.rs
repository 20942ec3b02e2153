//! Pagination engine: walks the review API until exhaustion.
//!
//! Two retrieval plans exist, selected by the configured filter:
//!
//! - **Bounded** (`all`): exactly one request. The helpfulness-sorted filter
//!   returns a sliding window rather than an exhaustive list, so following
//!   its cursor would never terminate over the full result set.
//! - **Following cursor** (`recent`/`updated`): repeated requests, each
//!   carrying the percent-encoded cursor returned by the previous page,
//!   until the API reports zero reviews or stops advancing the cursor.
//!
//! Output order equals API delivery order across pages; nothing is
//! reordered, deduplicated, or filtered here.

use reqwest::blocking::Client;

use crate::config::{reviews_url, CURSOR_START};
use crate::error::{HarvestError, Result};
use crate::fetch::fetch_page;
use crate::types::{Page, RawReview, RetrievalConfig, ReviewFilter};

/// Retrieval plan selected from the configured filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    /// One request; the single page is the entire result.
    Bounded,

    /// Follow the returned cursor until the API signals exhaustion.
    FollowingCursor,
}

impl Plan {
    fn for_filter(filter: ReviewFilter) -> Self {
        if filter.follows_cursor() {
            Self::FollowingCursor
        } else {
            Self::Bounded
        }
    }
}

/// Outcome of evaluating the termination predicate for one fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    /// Fetch again with this cursor.
    Continue(String),

    /// The walk is complete.
    Finished,
}

/// Evaluate the termination predicate for one page.
///
/// A cursor that is empty, absent, or identical to the one just used counts
/// as a non-advancing response and terminates the walk even when the page
/// reports a non-zero review count.
fn advance(plan: Plan, page: &Page, previous_cursor: &str) -> Step {
    if plan == Plan::Bounded {
        return Step::Finished;
    }

    if page.num_reviews() == 0 {
        return Step::Finished;
    }

    match page.cursor.as_deref() {
        Some(next) if !next.is_empty() && next != previous_cursor => {
            Step::Continue(next.to_string())
        }
        _ => Step::Finished,
    }
}

/// Retrieve the complete, order-preserving review sequence for a
/// configuration.
///
/// Issues one blocking request per page and accumulates raw reviews in API
/// delivery order. The running total is logged after each page as a progress
/// signal.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `base_url` - Review API base URL (production: [`crate::config::STEAM_STORE_URL`])
/// * `config` - Validated retrieval parameters
///
/// # Returns
/// All retrieved reviews, in the order the API delivered them.
pub fn retrieve_all(
    client: &Client,
    base_url: &str,
    config: &RetrievalConfig,
) -> Result<Vec<RawReview>> {
    let query_url = reviews_url(base_url, config);
    let plan = Plan::for_filter(config.filter);
    let mut cursor = CURSOR_START.to_string();
    let mut reviews: Vec<RawReview> = Vec::new();
    let mut page_count: usize = 0;

    loop {
        // The cursor is opaque and may contain reserved URL characters;
        // encode it once per request.
        let url = format!("{query_url}&cursor={}", urlencoding::encode(&cursor));
        tracing::debug!(%url, "Requesting review page");

        let page = fetch_page(client, &url).map_err(|e| match e {
            HarvestError::Http(source) => HarvestError::PageDownload {
                app_id: config.app_id.clone(),
                source,
            },
            other => other,
        })?;
        page_count += 1;

        let step = advance(plan, &page, &cursor);

        // The bounded plan keeps whatever its single page returned; the
        // cursor plan only appends pages that reported reviews.
        if plan == Plan::Bounded || page.num_reviews() > 0 {
            reviews.extend(page.reviews);
        }

        tracing::info!(
            page = page_count,
            total_reviews = reviews.len(),
            "Retrieved review page"
        );

        match step {
            Step::Continue(next) => cursor = next,
            Step::Finished => break,
        }
    }

    Ok(reviews)
}
