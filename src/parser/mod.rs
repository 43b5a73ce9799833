//! Textual extraction from HTML and JavaScript.
//!
//! This module handles:
//! - URL validation and relative resolution
//! - Endpoint-path and JS/JSON reference patterns in script content
//! - `<script src>` scanning of seed pages

pub mod html;
pub mod patterns;
pub mod validate;

pub use html::extract_script_sources;
pub use patterns::PatternExtractor;
pub use validate::{is_valid_url, normalize, resolve};

/// File suffixes accepted as JavaScript/JSON resources.
pub const JS_SUFFIXES: &[&str] = &[".js", ".json"];

/// Check whether a resolved URL names a JavaScript or JSON resource.
pub fn has_js_suffix(url: &str) -> bool {
    JS_SUFFIXES.iter().any(|suffix| url.ends_with(suffix))
}
