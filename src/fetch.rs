//! Page fetcher: one network call, one decoded page.

use reqwest::blocking::Client;

use crate::error::{HarvestError, Result};
use crate::types::Page;

/// Decode a review page envelope from a response body.
///
/// Fails with [`HarvestError::Decode`] if the body is not well-formed JSON or
/// lacks a mandatory field such as `query_summary.num_reviews`.
pub fn decode_page(body: &[u8]) -> Result<Page> {
    serde_json::from_slice(body).map_err(|e| HarvestError::Decode {
        message: e.to_string(),
    })
}

/// Perform exactly one GET request for a fully assembled review URL and
/// decode the response into a [`Page`].
///
/// Network failures and non-success statuses surface as
/// [`HarvestError::Http`]; malformed bodies as [`HarvestError::Decode`].
/// No retry is performed.
pub fn fetch_page(client: &Client, url: &str) -> Result<Page> {
    let response = client.get(url).send()?;
    let response = response.error_for_status()?;
    let body = response.bytes()?;
    decode_page(&body)
}
