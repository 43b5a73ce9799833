//! Regex patterns for endpoint paths and JS/JSON references in script content.

use crate::parser::validate::{is_valid_url, resolve};
use regex::Regex;
use std::collections::BTreeSet;
use tracing::trace;

/// Extractor applying fixed, ordered pattern lists to JavaScript content.
///
/// Patterns are independent; overlapping matches are collapsed by the returned sets.
#[derive(Clone)]
pub struct PatternExtractor {
    /// Patterns capturing quoted absolute paths.
    endpoint_patterns: Vec<Regex>,
    /// Patterns capturing quoted `.js`/`.json` references.
    reference_patterns: Vec<Regex>,
}

impl PatternExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        let endpoint_patterns = vec![
            // Generic quoted path: "/api/users"
            Regex::new(r#"["'](/[a-zA-Z0-9_/-]+)["']"#).unwrap(),
            // Object property: url: "/api/users"
            Regex::new(r#"url:\s*["'](/[a-zA-Z0-9_/-]+)["']"#).unwrap(),
            // fetch("/api/users"
            Regex::new(r#"fetch\(["'](/[a-zA-Z0-9_/-]+)["']"#).unwrap(),
            // axios.get("/api/users"
            Regex::new(r#"axios\.[a-z]+\(["'](/[a-zA-Z0-9_/-]+)["']"#).unwrap(),
        ];

        let reference_patterns = vec![
            Regex::new(r#"["']([a-zA-Z0-9_/.-]+\.js)["']"#).unwrap(),
            Regex::new(r#"["']([a-zA-Z0-9_/.-]+\.json)["']"#).unwrap(),
            Regex::new(r#"src=["']([a-zA-Z0-9_/.-]+\.js)["']"#).unwrap(),
        ];

        Self {
            endpoint_patterns,
            reference_patterns,
        }
    }

    /// Extract endpoint-like paths, resolved against `base_url`.
    pub fn extract_endpoints(&self, content: &str, base_url: &str) -> BTreeSet<String> {
        let mut endpoints = BTreeSet::new();

        for pattern in &self.endpoint_patterns {
            for caps in pattern.captures_iter(content) {
                let Some(path) = caps.get(1) else { continue };
                let path = path.as_str().trim_matches(|c| c == '\'' || c == '"');
                if let Some(full_url) = resolve(base_url, path) {
                    endpoints.insert(full_url);
                }
            }
        }

        endpoints
    }

    /// Extract candidate JS/JSON references, resolved against `base_url`.
    ///
    /// Only syntactically valid absolute URLs are returned; liveness is checked by the caller.
    pub fn js_reference_candidates(&self, content: &str, base_url: &str) -> BTreeSet<String> {
        let mut candidates = BTreeSet::new();

        for pattern in &self.reference_patterns {
            for caps in pattern.captures_iter(content) {
                let Some(reference) = caps.get(1) else { continue };
                match resolve(base_url, reference.as_str()) {
                    Some(full_url) if is_valid_url(&full_url) => {
                        candidates.insert(full_url);
                    }
                    _ => trace!("Skipping unresolvable reference: {}", reference.as_str()),
                }
            }
        }

        candidates
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fetch_endpoint_resolution() {
        let extractor = PatternExtractor::new();
        let content = r#"fetch("/api/v1/users").then(r => r.json());"#;

        let endpoints = extractor.extract_endpoints(content, "https://x.test/app.js");
        assert_eq!(endpoints, set(&["https://x.test/api/v1/users"]));
    }

    #[test]
    fn test_endpoint_patterns() {
        let extractor = PatternExtractor::new();
        let content = r#"
            const cfg = { url: '/api/ping', method: "GET" };
            axios.post("/api/login", body);
            const p = '/static/img';
            const notPath = "relative/path";
        "#;

        let endpoints = extractor.extract_endpoints(content, "https://x.test/js/app.js");
        assert_eq!(
            endpoints,
            set(&[
                "https://x.test/api/login",
                "https://x.test/api/ping",
                "https://x.test/static/img",
            ])
        );
    }

    #[test]
    fn test_endpoints_keep_base_host() {
        let extractor = PatternExtractor::new();
        let endpoints = extractor.extract_endpoints(r#""/graphql""#, "https://cdn.test/bundle.js");
        assert_eq!(endpoints, set(&["https://cdn.test/graphql"]));
    }

    #[test]
    fn test_js_reference_candidates() {
        let extractor = PatternExtractor::new();
        let content = r#"
            import("./chunk-abc.js");
            loadScript("/vendor/lib.js");
            fetch("config/settings.json");
            el.innerHTML = '<script src="widget.js"></script>';
            var css = "theme.css";
        "#;

        let candidates = extractor.js_reference_candidates(content, "https://x.test/static/app.js");
        assert_eq!(
            candidates,
            set(&[
                "https://x.test/static/chunk-abc.js",
                "https://x.test/static/config/settings.json",
                "https://x.test/static/widget.js",
                "https://x.test/vendor/lib.js",
            ])
        );
    }

    #[test]
    fn test_no_matches() {
        let extractor = PatternExtractor::new();
        assert!(extractor.extract_endpoints("var x = 1;", "https://x.test/a.js").is_empty());
        assert!(extractor
            .js_reference_candidates("var x = 1;", "https://x.test/a.js")
            .is_empty());
    }
}
