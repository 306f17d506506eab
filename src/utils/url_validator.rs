//! Target URL validation.
//!
//! Only absolute HTTP(S) URLs with a host are accepted as shortening targets.
//! The validated URL is returned trimmed but otherwise byte-for-byte as given, so
//! a redirect points at exactly what the client submitted. Input that could not
//! travel in a `Location` header (non-ASCII or control characters) is returned
//! in its percent-encoded serialized form instead.

use url::Url;

/// Errors that can occur during target URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a target URL and returns it trimmed.
///
/// # Rules
///
/// 1. **Format**: must parse as an absolute URL
/// 2. **Protocol**: only `http` and `https`
/// 3. **Host**: must be present and non-empty
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Errors
///
/// Returns [`UrlValidationError`] describing the first rule violated.
///
/// # Examples
///
/// ```
/// use urlchemy::utils::url_validator::validate_target_url;
///
/// assert_eq!(
///     validate_target_url("  https://example.com/a?b=c ").unwrap(),
///     "https://example.com/a?b=c"
/// );
/// assert!(validate_target_url("not a url").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    if trimmed.bytes().all(|b| b.is_ascii_graphic()) {
        Ok(trimmed.to_string())
    } else {
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_simple_https() {
        assert_eq!(
            validate_target_url("https://example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_accepts_http_with_port_query_and_fragment() {
        let url = "http://example.com:8080/path?q=rust&lang=en#section";
        assert_eq!(validate_target_url(url).unwrap(), url);
    }

    #[test]
    fn test_preserves_case_and_path() {
        let url = "https://EXAMPLE.com/Some/Path";
        assert_eq!(validate_target_url(url).unwrap(), url);
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_target_url("\t https://example.com/x \n").unwrap(),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_target_url("   "), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_rejects_plain_text() {
        let result = validate_target_url("not a url");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_relative_url() {
        let result = validate_target_url("/just/a/path");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        let result = validate_target_url("example.com/page");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_rejects_javascript_scheme() {
        assert_eq!(
            validate_target_url("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_rejects_ftp_and_file() {
        assert_eq!(
            validate_target_url("ftp://example.com/file"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
        assert_eq!(
            validate_target_url("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_non_ascii_is_percent_encoded() {
        assert_eq!(
            validate_target_url("https://example.com/caf\u{e9} menu").unwrap(),
            "https://example.com/caf%C3%A9%20menu"
        );
    }

    #[test]
    fn test_error_message_mentions_protocol() {
        let err = validate_target_url("data:text/plain,hi").unwrap_err();
        assert!(err.to_string().contains("HTTP and HTTPS"));
    }
}
