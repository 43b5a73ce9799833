//! Discovery engine driving seeding and the fixed-point iteration over JS resources.

use crate::config::{load_url_list, Config, Input};
use crate::discovery::{HttpFetcher, LivenessProber};
use crate::notify::ConsoleOutput;
use crate::parser::{
    extract_script_sources, has_js_suffix, is_valid_url, normalize, PatternExtractor,
};
use crate::types::{DiscoveryResults, EngineState, Result, SeedKind};
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Engine owning the discovery state of one run.
///
/// Three sets accumulate across every seed given to the same engine:
/// - `js_files`: known JavaScript/JSON resources
/// - `processed`: resources already fetched (or attempted) and scanned
/// - `endpoints`: endpoint-like URLs found in scanned content
///
/// A URL enters `processed` exactly once, before its fetch starts, so no resource is
/// fetched twice even when several files reference it.
pub struct DiscoveryEngine {
    fetcher: HttpFetcher,
    prober: LivenessProber,
    extractor: PatternExtractor,
    console: ConsoleOutput,
    parallel: usize,
    js_files: BTreeSet<String>,
    processed: BTreeSet<String>,
    endpoints: BTreeSet<String>,
    state: EngineState,
    rounds: usize,
}

/// Result of fetching and scanning a single JS resource.
enum FileOutcome {
    Scanned {
        endpoints: BTreeSet<String>,
        references: BTreeSet<String>,
    },
    /// Fetch failed or returned a non-200 status.
    Dropped { url: String },
}

impl DiscoveryEngine {
    /// Create a new engine with empty state.
    pub fn new(config: &Config) -> Result<Self> {
        let parallel = config.parallel.max(1);
        let fetcher = HttpFetcher::new(config.http_config())?;
        let prober = LivenessProber::new(fetcher.clone(), parallel);

        Ok(Self {
            fetcher,
            prober,
            extractor: PatternExtractor::new(),
            console: ConsoleOutput::new(config.verbose, config.json, config.quiet),
            parallel,
            js_files: BTreeSet::new(),
            processed: BTreeSet::new(),
            endpoints: BTreeSet::new(),
            state: EngineState::Idle,
            rounds: 0,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Process the input selected on the command line.
    ///
    /// Only a missing or unreadable list file is reported as an error; every per-URL
    /// failure is logged and skipped.
    pub async fn process_input(&mut self, input: &Input) -> Result<()> {
        match input {
            Input::Domain(url) => self.process_domain(url).await,
            Input::DomainList(path) => self.process_domain_list(path).await?,
            Input::Script(url) => self.process_script(url).await,
            Input::ScriptList(path) => self.process_script_list(path).await?,
        }
        Ok(())
    }

    /// Seed from an HTML page and iterate to a fixed point.
    pub async fn process_domain(&mut self, url: &str) {
        if !is_valid_url(url) {
            info!("Invalid URL: {}", url);
            return;
        }

        self.console.print_scan_start(url, SeedKind::Page);
        self.state = EngineState::Seeding;

        let seeds = self.seed_from_page(url).await;
        self.console
            .print_progress(&format!("Page references {} live JS files", seeds.len()));
        self.js_files.extend(seeds);

        self.run_to_fixed_point().await;
    }

    /// Process every domain listed in a file, sharing this engine's state.
    pub async fn process_domain_list(&mut self, path: &Path) -> Result<()> {
        let urls = load_url_list(path)?;
        self.console
            .print_info(&format!("Processing {} domains from {}", urls.len(), path.display()));

        for url in urls {
            self.process_domain(&url).await;
        }

        Ok(())
    }

    /// Ingest a single JS resource and scan it once.
    ///
    /// References found in it are recorded but not processed further.
    pub async fn process_script(&mut self, url: &str) {
        let Some(url) = normalize(url) else {
            info!("Invalid URL: {}", url);
            return;
        };

        self.console.print_scan_start(&url, SeedKind::Script);
        self.state = EngineState::Seeding;

        if self.prober.is_live(&url).await {
            self.js_files.insert(url.clone());
            self.state = EngineState::Iterating;
            self.run_round(vec![url]).await;
        }

        self.state = EngineState::Converged;
    }

    /// Ingest every JS resource listed in a file and iterate to a fixed point.
    pub async fn process_script_list(&mut self, path: &Path) -> Result<()> {
        let urls = load_url_list(path)?;
        self.console
            .print_info(&format!("Processing {} JS files from {}", urls.len(), path.display()));
        self.state = EngineState::Seeding;

        // Same form as resolved references; invalid lines pass through to be reported
        let urls = urls.into_iter().map(|url| normalize(&url).unwrap_or(url));
        let seeds = self.prober.filter_live(urls).await;
        self.js_files.extend(seeds);

        self.run_to_fixed_point().await;
        Ok(())
    }

    /// Fetch a page and return its live `<script src>` resources.
    ///
    /// An unreachable page yields an empty set.
    pub async fn seed_from_page(&self, url: &str) -> BTreeSet<String> {
        let html = match self.fetcher.get(url).await {
            Ok(response) if (200..300).contains(&response.status) => {
                response.body.unwrap_or_default()
            }
            Ok(response) => {
                warn!("Error fetching HTML from {}: status {}", url, response.status);
                return BTreeSet::new();
            }
            Err(e) => {
                warn!("Error fetching HTML from {}: {}", url, e);
                return BTreeSet::new();
            }
        };

        let candidates: Vec<String> = extract_script_sources(&html, url)
            .into_iter()
            .filter(|src| has_js_suffix(src) && is_valid_url(src))
            .collect();
        debug!("{} script candidates on {}", candidates.len(), url);

        self.prober.filter_live(candidates).await
    }

    /// Extract live JS/JSON references from `content`, resolved against `base_url`.
    pub async fn extract_js_references(&self, content: &str, base_url: &str) -> BTreeSet<String> {
        let candidates = self.extractor.js_reference_candidates(content, base_url);
        self.prober.filter_live(candidates).await
    }

    /// Known resources not yet processed, in sorted order.
    pub fn frontier(&self) -> Vec<String> {
        self.js_files.difference(&self.processed).cloned().collect()
    }

    /// Run rounds until no unprocessed resource remains.
    pub async fn run_to_fixed_point(&mut self) {
        self.state = EngineState::Iterating;

        loop {
            let frontier = self.frontier();
            if frontier.is_empty() {
                break;
            }

            self.run_round(frontier).await;
            info!("Found {} new JS files to process", self.frontier().len());
        }

        self.state = EngineState::Converged;
    }

    /// Process a snapshot of the frontier.
    ///
    /// Resources discovered during the round wait for the next one. Outcomes are merged
    /// in snapshot order, so the result does not depend on `parallel`.
    async fn run_round(&mut self, frontier: Vec<String>) {
        self.rounds += 1;

        let mut batch = Vec::with_capacity(frontier.len());
        for url in frontier {
            // Marked before the fetch so each URL is fetched at most once
            if self.processed.insert(url.clone()) {
                batch.push(url);
            }
        }

        if batch.is_empty() {
            return;
        }

        let pb = self
            .console
            .create_progress_bar(batch.len() as u64, &format!("Round {}", self.rounds));

        let fetcher = &self.fetcher;
        let prober = &self.prober;
        let extractor = &self.extractor;

        let outcomes: Vec<FileOutcome> = stream::iter(batch)
            .map(|url| scan_js_file(fetcher, prober, extractor, url))
            .buffered(self.parallel)
            .inspect(|_| {
                if let Some(ref pb) = pb {
                    pb.inc(1);
                }
            })
            .collect()
            .await;

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        for outcome in outcomes {
            match outcome {
                FileOutcome::Scanned {
                    endpoints,
                    references,
                } => {
                    self.endpoints.extend(endpoints);
                    self.js_files.extend(references);
                }
                FileOutcome::Dropped { url } => {
                    // Stays in `processed`, so it is never retried
                    self.js_files.remove(&url);
                }
            }
        }
    }

    /// Sorted snapshot of the accumulated sets.
    pub fn results(&self) -> DiscoveryResults {
        DiscoveryResults {
            js_files: self.js_files.iter().cloned().collect(),
            endpoints: self.endpoints.iter().cloned().collect(),
            processed: self.processed.len(),
            rounds: self.rounds,
        }
    }
}

/// Fetch one JS resource and extract its endpoints and live references.
async fn scan_js_file(
    fetcher: &HttpFetcher,
    prober: &LivenessProber,
    extractor: &PatternExtractor,
    url: String,
) -> FileOutcome {
    let content = match fetcher.get(&url).await {
        Ok(response) if response.is_ok() => response.body.unwrap_or_default(),
        Ok(response) => {
            info!("Filtered out {} (Status: {})", url, response.status);
            return FileOutcome::Dropped { url };
        }
        Err(e) => {
            warn!("Error processing JS file {}: {}", url, e);
            return FileOutcome::Dropped { url };
        }
    };

    let endpoints = extractor.extract_endpoints(&content, &url);
    let references = prober
        .filter_live(extractor.js_reference_candidates(&content, &url))
        .await;

    debug!(
        "{}: {} endpoints, {} live references",
        url,
        endpoints.len(),
        references.len()
    );

    FileOutcome::Scanned {
        endpoints,
        references,
    }
}
