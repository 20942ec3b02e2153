//! DeepL translation adapter.
//!
//! Rewrites non-English review bodies to English, one sequential call per
//! row. Translation is all-or-nothing: any failed call aborts the run, since
//! a requested translation must not silently fall back to the original text.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{HarvestError, Result};
use crate::http::create_client;
use crate::language::ENGLISH;
use crate::types::OutputRow;

/// DeepL API endpoint for paid-tier keys.
pub const DEEPL_API_URL: &str = "https://api.deepl.com/v2/translate";

/// DeepL API endpoint for free-tier keys.
pub const DEEPL_FREE_API_URL: &str = "https://api-free.deepl.com/v2/translate";

/// Target language for all translations.
const TARGET_LANG: &str = "EN-GB";

/// Select the DeepL endpoint for an API key.
///
/// Free-tier keys end in `:fx` and use a separate host.
#[must_use]
pub fn endpoint_for_key(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        DEEPL_FREE_API_URL
    } else {
        DEEPL_API_URL
    }
}

/// Response envelope of the DeepL translate endpoint.
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Blocking DeepL client bound to one API key.
pub struct Translator {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl Translator {
    /// Create a translator for an API key.
    ///
    /// The endpoint is selected from the key's tier suffix. Fails with
    /// [`HarvestError::MissingApiKey`] for a blank key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(HarvestError::MissingApiKey);
        }
        let endpoint = endpoint_for_key(&api_key).to_string();
        Ok(Self {
            client: create_client()?,
            api_key,
            endpoint,
        })
    }

    /// Override the endpoint. Used by tests to point at a mock server.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Translate one text to English.
    pub fn translate(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[("text", text), ("target_lang", TARGET_LANG)])
            .send()
            .map_err(|e| HarvestError::Translation {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Translation {
                message: format!("DeepL returned HTTP {status}"),
            });
        }

        let body = response.bytes().map_err(|e| HarvestError::Translation {
            message: e.to_string(),
        })?;
        let decoded: TranslateResponse =
            serde_json::from_slice(&body).map_err(|e| HarvestError::Translation {
                message: format!("Malformed DeepL response: {e}"),
            })?;

        decoded
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| HarvestError::Translation {
                message: "DeepL response contained no translations".to_string(),
            })
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Translate the bodies of all non-English rows in place.
///
/// English rows are left untouched. Calls are strictly sequential, and the
/// first failure aborts.
///
/// # Returns
/// The number of rows translated.
pub fn translate_rows(translator: &Translator, rows: &mut [OutputRow]) -> Result<usize> {
    let pending = rows.iter().filter(|r| r.language != ENGLISH).count();
    let total_chars: usize = rows
        .iter()
        .filter(|r| r.language != ENGLISH)
        .map(|r| r.body.chars().count())
        .sum();
    tracing::info!(
        reviews = pending,
        characters = total_chars,
        "Translating non-English reviews"
    );

    let mut translated = 0usize;
    for row in rows.iter_mut().filter(|r| r.language != ENGLISH) {
        row.body = translator.translate(&row.body)?;
        translated += 1;
        tracing::debug!(translated, pending, "Translated review");
    }

    Ok(translated)
}
