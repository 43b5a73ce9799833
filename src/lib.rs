//! jsxtract - JavaScript resource and API endpoint discovery.
//!
//! This library crawls a page or a set of JavaScript files and:
//! - Collects live JS/JSON resources referenced directly or transitively
//! - Extracts endpoint-like path literals embedded in that JavaScript
//! - Iterates until no new resources are discovered
//!
//! # Example
//!
//! ```no_run
//! use jsxtract::{Config, DiscoveryEngine};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut engine = DiscoveryEngine::new(&Config::default()).unwrap();
//!     engine.process_domain("https://example.com").await;
//!     let results = engine.results();
//!     println!("Found {} endpoints", results.endpoints.len());
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod engine;
pub mod notify;
pub mod parser;
pub mod types;

pub use config::{Config, Input};
pub use engine::DiscoveryEngine;
pub use types::{
    DiscoveryResults, EngineState, FetchResponse, HttpConfig, Method, Result, SeedKind,
    XtractError,
};
