//! Record normalizer: raw API reviews to CSV output rows.

use chrono::{DateTime, Local};

use crate::error::{HarvestError, Result};
use crate::types::{OutputRow, RawReview};

/// Minutes per hour, for playtime conversion.
const MINUTES_PER_HOUR: f64 = 60.0;

/// Convert one raw review to its output row.
///
/// Playtime becomes hours (minutes / 60, no rounding) and the creation
/// timestamp becomes a human-readable local time.
pub fn to_output_row(raw: RawReview) -> Result<OutputRow> {
    #[allow(clippy::cast_precision_loss)]
    let playtime = raw.author.playtime_at_review as f64 / MINUTES_PER_HOUR;
    let time_created = format_timestamp(raw.timestamp_created)?;

    Ok(OutputRow {
        playtime,
        language: raw.language,
        body: raw.review,
        time_created,
        recommend: raw.voted_up,
        weighted_vote_score: raw.weighted_vote_score,
    })
}

/// Convert retrieved reviews to output rows, preserving order.
pub fn normalize_reviews(raw: Vec<RawReview>) -> Result<Vec<OutputRow>> {
    raw.into_iter().map(to_output_row).collect()
}

/// Format epoch seconds as a local-timezone timestamp string.
fn format_timestamp(secs: i64) -> Result<String> {
    let utc = DateTime::from_timestamp(secs, 0).ok_or_else(|| HarvestError::Decode {
        message: format!("timestamp_created out of range: {secs}"),
    })?;
    Ok(utc
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string())
}
