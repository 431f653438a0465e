//! "Learn more" link sanitizing.

use url::Url;

/// Parse a product link, accepting only absolute `http`/`https` URLs.
///
/// Surrounding whitespace is ignored. Anything else (relative paths,
/// `javascript:` and other schemes, unparsable text) is treated as absent.
pub fn safe_link(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let url = Url::parse(trimmed).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert_eq!(
            safe_link("  https://www.xpel.com/ ").map(|u| u.to_string()),
            Some("https://www.xpel.com/".to_string())
        );
        assert_eq!(
            safe_link("http://example.com").map(|u| u.to_string()),
            Some("http://example.com/".to_string())
        );
    }

    #[test]
    fn rejects_unsafe_or_malformed_links() {
        assert!(safe_link("").is_none());
        assert!(safe_link("   ").is_none());
        assert!(safe_link("javascript:alert(1)").is_none());
        assert!(safe_link("ftp://files.example.com/x").is_none());
        assert!(safe_link("/relative/path").is_none());
        assert!(safe_link("not a url").is_none());
    }
}
