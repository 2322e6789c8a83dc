//! Local URL checks performed before anything leaves the process.
//!
//! The fingerprinting service canonicalizes authoritatively; the preview here
//! follows the same rules so the canonical form can be shown while the
//! fingerprint request is in flight.

use url::Url;

use crate::error::{CoreError, Result};

/// Rejects empty or whitespace-only input.
pub fn require_url(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyUrl);
    }
    Ok(trimmed)
}

/// Best-effort canonical form of `raw`, or `None` when it has no host.
///
/// Forces `https`, lower-cases the host, drops a leading `www.`, ports 80
/// and 443, trailing slashes, the query and the fragment.
pub fn canonical_preview(raw: &str) -> Option<String> {
    let parsed = parse_lenient(raw.trim())?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let port = match parsed.port() {
        Some(80) | Some(443) | None => String::new(),
        Some(other) => format!(":{}", other),
    };
    let path = parsed.path().trim_end_matches('/');

    Some(format!("https://{}{}{}", host, port, path))
}

fn parse_lenient(input: &str) -> Option<Url> {
    if input.is_empty() {
        return None;
    }
    match Url::parse(input) {
        Ok(url) if url.has_host() => Some(url),
        _ if !input.contains("://") => Url::parse(&format!("http://{}", input))
            .ok()
            .filter(Url::has_host),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_url() {
        assert!(matches!(require_url(""), Err(CoreError::EmptyUrl)));
        assert!(matches!(require_url("   \t"), Err(CoreError::EmptyUrl)));
        assert_eq!(require_url(" https://a.example ").unwrap(), "https://a.example");
    }

    #[test]
    fn test_canonical_preview_normalizes() {
        assert_eq!(
            canonical_preview("HTTP://WWW.Example.com:443/Login/?utm=123").as_deref(),
            Some("https://example.com/Login")
        );
        assert_eq!(
            canonical_preview("https://example.com/").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            canonical_preview("http://shop.example.org:80/cart#top").as_deref(),
            Some("https://shop.example.org/cart")
        );
    }

    #[test]
    fn test_canonical_preview_without_scheme() {
        assert_eq!(
            canonical_preview("paypal-secure-login.tk/verify/").as_deref(),
            Some("https://paypal-secure-login.tk/verify")
        );
        assert_eq!(
            canonical_preview("example.com:8080/a/").as_deref(),
            Some("https://example.com:8080/a")
        );
    }

    #[test]
    fn test_canonical_preview_rejects_hostless_input() {
        assert_eq!(canonical_preview(""), None);
        assert_eq!(canonical_preview("http://"), None);
        assert_eq!(canonical_preview("https://exa mple.com"), None);
    }
}
