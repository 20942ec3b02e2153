//! Steam language-code normalization.
//!
//! The review API expects Steam's own language names ("schinese", "koreana",
//! ...), while users commonly know the short API codes ("zh-CN", "ko", ...).
//! This module maps short codes to Steam names and validates either form.
//!
//! See <https://partner.steamgames.com/doc/store/localization/languages>.

use crate::error::{HarvestError, Result};

/// Steam language name used for English reviews, which skip translation.
pub const ENGLISH: &str = "english";

/// Wildcard accepted by the review API to request all languages.
pub const ALL_LANGUAGES: &str = "all";

/// Short API code to Steam language name, in Steam's documented order.
/// "ukranian" is Steam's own spelling.
const LANGUAGES: &[(&str, &str)] = &[
    ("ar", "arabic"),
    ("bg", "bulgarian"),
    ("zh-CN", "schinese"),
    ("zh-TW", "tchinese"),
    ("cs", "czech"),
    ("da", "danish"),
    ("nl", "dutch"),
    ("en", "english"),
    ("fi", "finnish"),
    ("fr", "french"),
    ("de", "german"),
    ("el", "greek"),
    ("hu", "hungarian"),
    ("it", "italian"),
    ("ja", "japanese"),
    ("ko", "koreana"),
    ("no", "norwegian"),
    ("pl", "polish"),
    ("pt", "portuguese"),
    ("pt-BR", "brazilian"),
    ("ro", "romanian"),
    ("ru", "russian"),
    ("es", "spanish"),
    ("es-419", "latam"),
    ("sv", "swedish"),
    ("th", "thai"),
    ("tr", "turkish"),
    ("uk", "ukranian"),
    ("vn", "vietnamese"),
];

/// Normalize a language argument to the form the review API expects.
///
/// Accepts a short API code (mapped to the Steam name), a Steam name
/// (passed through), or "all".
///
/// # Examples
/// ```
/// use steam_review_harvester::language::normalize_language;
///
/// assert_eq!(normalize_language("zh-CN").unwrap(), "schinese");
/// assert_eq!(normalize_language("german").unwrap(), "german");
/// assert_eq!(normalize_language("all").unwrap(), "all");
/// assert!(normalize_language("klingon").is_err());
/// ```
pub fn normalize_language(input: &str) -> Result<String> {
    if input == ALL_LANGUAGES {
        return Ok(ALL_LANGUAGES.to_string());
    }

    if let Some((_, name)) = LANGUAGES.iter().find(|(code, _)| *code == input) {
        return Ok((*name).to_string());
    }

    if LANGUAGES.iter().any(|(_, name)| *name == input) {
        return Ok(input.to_string());
    }

    Err(HarvestError::InvalidLanguage(input.to_string()))
}

/// Validate that a language value is acceptable to the review API.
pub fn validate_language(language: &str) -> Result<()> {
    if language == ALL_LANGUAGES || LANGUAGES.iter().any(|(_, name)| *name == language) {
        Ok(())
    } else {
        Err(HarvestError::InvalidLanguage(language.to_string()))
    }
}
