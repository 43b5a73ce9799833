//! URL validation and resolution.

use url::Url;

/// Check that `candidate` parses as an absolute URL with both a scheme and a host.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Canonical form of an absolute URL, as produced by [`resolve`].
///
/// Returns `None` when `candidate` is not a valid absolute URL.
pub fn normalize(candidate: &str) -> Option<String> {
    if !is_valid_url(candidate) {
        return None;
    }
    Url::parse(candidate).ok().map(String::from)
}

/// Resolve `reference` against `base` using standard relative-URL resolution.
///
/// Returns `None` when the base is not a URL or the join fails.
pub fn resolve(base: &str, reference: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(reference).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://127.0.0.1:8080/app.js"));
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url("/relative/path.js"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("file:///etc/passwd"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("HTTP://127.0.0.1:8080/./a.js"),
            Some("http://127.0.0.1:8080/a.js".to_string())
        );
        assert_eq!(normalize("https://X.test"), Some("https://x.test/".to_string()));
        assert_eq!(
            normalize("https://x.test/static/../a.js"),
            resolve("https://x.test/static/app.js", "/a.js")
        );
        assert_eq!(normalize("not-a-url"), None);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve("https://x.test/static/app.js", "/api/v1/users"),
            Some("https://x.test/api/v1/users".to_string())
        );
        assert_eq!(
            resolve("https://x.test/static/app.js", "chunk.js"),
            Some("https://x.test/static/chunk.js".to_string())
        );
        assert_eq!(
            resolve("https://x.test/static/app.js", "../lib/vendor.js"),
            Some("https://x.test/lib/vendor.js".to_string())
        );
        assert_eq!(
            resolve("https://x.test/", "https://cdn.test/lib.js"),
            Some("https://cdn.test/lib.js".to_string())
        );
        assert_eq!(resolve("not a base", "/a.js"), None);
    }
}
