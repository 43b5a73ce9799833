//! Configuration handling for the extractor.

use crate::types::{HttpConfig, Result, XtractError};
use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};

/// Browser-like identification sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Timeout for page and JavaScript content fetches.
pub const CONTENT_TIMEOUT_SECS: u64 = 10;

/// Timeout for HEAD liveness probes.
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Extract JS files and endpoints from websites or JS files.
#[derive(Parser, Debug, Clone)]
#[command(name = "jsxtract")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("input")
        .args(["domain", "file", "javascript", "javascripts"])
        .multiple(false)
))]
pub struct Config {
    /// Single domain to process (e.g., https://example.com)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Text file containing list of domains to process
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Single JavaScript file URL to process
    #[arg(short, long)]
    pub javascript: Option<String>,

    /// Text file containing list of JavaScript file URLs to process
    #[arg(short = 'J', long)]
    pub javascripts: Option<PathBuf>,

    /// Output file to save endpoints
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output file to save JS files
    #[arg(short = 'O', long)]
    pub js_output: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: only print results
    #[arg(short, long)]
    pub quiet: bool,

    /// Number of JS files fetched concurrently within a round
    #[arg(short, long, default_value = "1", env = "JSXTRACT_PARALLEL")]
    pub parallel: usize,
}

/// The input mode selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Domain(String),
    DomainList(PathBuf),
    Script(String),
    ScriptList(PathBuf),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: None,
            file: None,
            javascript: None,
            javascripts: None,
            output: None,
            js_output: None,
            json: false,
            verbose: false,
            quiet: false,
            parallel: 1,
        }
    }
}

impl Config {
    /// Get HTTP configuration. Timeouts and user agent are fixed.
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::default()
    }

    /// The requested input, if any was supplied.
    pub fn input(&self) -> Option<Input> {
        if let Some(ref domain) = self.domain {
            Some(Input::Domain(domain.clone()))
        } else if let Some(ref file) = self.file {
            Some(Input::DomainList(file.clone()))
        } else if let Some(ref js) = self.javascript {
            Some(Input::Script(js.clone()))
        } else {
            self.javascripts.clone().map(Input::ScriptList)
        }
    }
}

/// Load a newline-delimited URL list, skipping blank lines.
pub fn load_url_list(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(XtractError::MissingInputFile(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
