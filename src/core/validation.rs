//! Link validation for user input
//!
//! Maps a pasted link onto one of the supported platforms before a job is
//! created. Only http/https links with a host on the whitelist pass.

use thiserror::Error;
use url::Url;

use crate::core::messages;
use crate::download::job::Platform;

/// Validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Not a parseable http/https URL with a host
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Well-formed URL on a host no strategy handles
    #[error("Unsupported domain: {0}")]
    UnsupportedDomain(String),
}

impl ValidationError {
    /// Text shown to the user for this rejection.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::InvalidUrl(_) => messages::INVALID_URL_MESSAGE,
            ValidationError::UnsupportedDomain(_) => messages::UNSUPPORTED_DOMAIN_MESSAGE,
        }
    }
}

/// Known hosts, after `www.` / `m.` are stripped.
const DOMAINS: &[(&str, Platform)] = &[
    ("youtube.com", Platform::YouTube),
    ("youtu.be", Platform::YouTube),
    ("twitter.com", Platform::Twitter),
    ("x.com", Platform::Twitter),
    ("instagram.com", Platform::Instagram),
];

/// Validates a link and resolves the platform it belongs to.
///
/// # Examples
/// ```
/// use fetchbot::core::validation::validate_url;
/// use fetchbot::download::job::Platform;
///
/// assert_eq!(validate_url("https://youtu.be/dQw4w9WgXcQ").unwrap(), Platform::YouTube);
/// assert_eq!(validate_url("https://www.instagram.com/reel/abc/").unwrap(), Platform::Instagram);
/// assert!(validate_url("https://example.com/video").is_err());
/// assert!(validate_url("not a url").is_err());
/// ```
pub fn validate_url(text: &str) -> Result<Platform, ValidationError> {
    let text = text.trim();
    let parsed = Url::parse(text).map_err(|_| ValidationError::InvalidUrl(text.to_string()))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::InvalidUrl(format!(
            "{} (invalid scheme: {})",
            text,
            parsed.scheme()
        )));
    }

    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ValidationError::InvalidUrl(format!("{} (no host)", text)))?
        .to_ascii_lowercase();

    let bare = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(&host);

    DOMAINS
        .iter()
        .find(|(domain, _)| *domain == bare)
        .map(|(_, platform)| *platform)
        .ok_or_else(|| ValidationError::UnsupportedDomain(host.clone()))
}
