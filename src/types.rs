//! Core types and errors for JavaScript resource discovery.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during discovery.
#[derive(Error, Debug)]
pub enum XtractError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{url} is unreachable: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("{url} returned status {status}")]
    NonSuccessStatus { url: String, status: u16 },

    #[error("File '{}' not found", .0.display())]
    MissingInputFile(PathBuf),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XtractError>;

impl XtractError {
    /// Short reason used in "Filtered out" diagnostics.
    pub fn filter_reason(&self) -> String {
        match self {
            XtractError::NonSuccessStatus { status, .. } => format!("Status: {}", status),
            XtractError::Unreachable { .. } => "Inaccessible".to_string(),
            XtractError::InvalidUrl(_) => "Invalid URL".to_string(),
            other => other.to_string(),
        }
    }
}

/// HTTP method used by the fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

/// A response received from the server, whatever its status.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL that was requested.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Body text (GET only).
    pub body: Option<String>,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Configuration for HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Timeout for content GETs.
    pub timeout_secs: u64,
    /// Timeout for HEAD liveness probes.
    pub probe_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: crate::config::CONTENT_TIMEOUT_SECS,
            probe_timeout_secs: crate::config::PROBE_TIMEOUT_SECS,
            user_agent: crate::config::USER_AGENT.to_string(),
        }
    }
}

/// What a seed URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedKind {
    /// An HTML page whose `<script src>` tags seed the run.
    Page,
    /// A JavaScript/JSON resource ingested directly.
    Script,
}

/// Lifecycle of a discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created, no seed given yet.
    Idle,
    Seeding,
    Iterating,
    Converged,
}

/// Final, sorted snapshot of a discovery run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResults {
    /// Discovered JavaScript/JSON resources.
    pub js_files: Vec<String>,
    /// Endpoint-like paths resolved against the file they were found in.
    pub endpoints: Vec<String>,
    /// Number of files fetched and scanned.
    pub processed: usize,
    /// Number of rounds run across all seeds.
    pub rounds: usize,
}
