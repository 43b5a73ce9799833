//! Network side of discovery.
//!
//! This module handles:
//! - Fetching pages and JavaScript content
//! - Liveness probing of candidate resource URLs

pub mod fetcher;
pub mod liveness;

pub use fetcher::HttpFetcher;
pub use liveness::LivenessProber;
