//! `<script src>` scanning for seed pages.

use crate::parser::validate::resolve;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use tracing::trace;

/// Extract every `<script src>` value from `html`, resolved against `page_url`.
///
/// No suffix or liveness filtering happens here.
pub fn extract_script_sources(html: &str, page_url: &str) -> BTreeSet<String> {
    let mut sources = BTreeSet::new();

    let document = Html::parse_document(html);
    let script_selector = Selector::parse("script[src]").unwrap();

    for element in document.select(&script_selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        match resolve(page_url, src.trim()) {
            Some(absolute) => {
                sources.insert(absolute);
            }
            None => trace!("Unresolvable script src: {}", src),
        }
    }

    sources
}
