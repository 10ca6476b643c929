//! URL shape validation for incoming shorten requests.
//!
//! Only absolute `http`/`https` URLs with a dotted host and a short
//! top-level label are accepted. The check is purely lexical; nothing is
//! resolved or fetched.

use regex::Regex;
use std::sync::LazyLock;

/// Compiled pattern for accepted URLs.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b(?:[-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
    )
    .expect("URL pattern is valid")
});

/// Errors that can occur while validating a URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Data to be shortened did not match expectations of a URL.")]
    Malformed,
}

/// Validates a URL and returns it without surrounding whitespace.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input and
/// [`UrlValidationError::Malformed`] if the URL does not match the accepted
/// shape.
pub fn validate_url(input: &str) -> Result<&str, UrlValidationError> {
    let url = input.trim();

    if url.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if !URL_REGEX.is_match(url) {
        return Err(UrlValidationError::Malformed);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert_eq!(validate_url("http://example.com").unwrap(), "http://example.com");
        assert!(validate_url("https://example.com").is_ok());
    }

    #[test]
    fn test_accepts_www_path_and_query() {
        assert!(validate_url("https://www.example.com/path/to?x=1&y=2#frag").is_ok());
        assert!(validate_url("http://sub.domain.co.uk/a_b-c~d").is_ok());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(
            validate_url("  https://example.com/page\n").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(validate_url("   "), Err(UrlValidationError::Empty)));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(UrlValidationError::Malformed)
        ));
        assert!(validate_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_rejects_missing_scheme_or_tld() {
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("http://localhost").is_err());
        assert!(validate_url("not-a-url").is_err());
    }

    #[test]
    fn test_rejects_spaces_inside_url() {
        assert!(validate_url("https://example.com/a b").is_err());
    }

    #[test]
    fn test_error_message_matches_response_text() {
        assert_eq!(
            UrlValidationError::Malformed.to_string(),
            "Data to be shortened did not match expectations of a URL."
        );
    }
}
