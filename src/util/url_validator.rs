use thiserror::Error;
use url::Url;

/// Errors that can occur while validating a cover location for the system
/// opener.
#[derive(Error, Debug, PartialEq)]
pub enum UrlValidationError {
    /// The string could not be parsed as a URL.
    #[error("Invalid cover URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported cover scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host to fetch from.
    #[error("Cover URL has no host")]
    MissingHost,
}

/// Validates a cover URL before it is handed to `open::that()`.
///
/// Only `http` and `https` URLs with a non-empty host pass. Parsing goes
/// through [`Url::parse`], so whitespace or control characters in the host
/// are rejected rather than forwarded to the launcher.
///
/// # Examples
///
/// ```
/// use albumshelf::util::validate_url_for_open;
///
/// let url = validate_url_for_open("https://example.com/covers/12.jpg").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(validate_url_for_open("https://").is_err());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// True when the cover location should be treated as a URL rather than a
/// local path.
pub fn looks_like_url(location: &str) -> bool {
    location.contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_url_for_open("https://example.com/cover.jpg").is_ok());
        assert!(validate_url_for_open("http://covers.example.org/12.png").is_ok());
    }

    #[test]
    fn test_invalid_schemes() {
        assert!(matches!(
            validate_url_for_open("file:///etc/passwd"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(validate_url_for_open("ftp://example.com/cover.jpg").is_err());
        assert!(validate_url_for_open("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_empty_host_rejected() {
        assert!(validate_url_for_open("https://").is_err());
        assert!(validate_url_for_open("http:///cover.jpg").is_err());
    }

    #[test]
    fn test_whitespace_in_host_rejected() {
        assert!(validate_url_for_open("http://exa mple .com/x y").is_err());
    }

    #[test]
    fn test_path_spaces_are_encoded() {
        let url = validate_url_for_open("https://example.com/my cover.jpg").unwrap();
        assert_eq!(url.path(), "/my%20cover.jpg");
    }

    #[test]
    fn test_looks_like_url() {
        assert!(looks_like_url("https://example.com/a.jpg"));
        assert!(looks_like_url("ftp://example.com"));
        assert!(!looks_like_url("img/asterix-01.jpg"));
    }
}
