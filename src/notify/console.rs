//! Colored console output for discovery runs.

use crate::types::{DiscoveryResults, SeedKind};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Console output handler with colors and formatting.
pub struct ConsoleOutput {
    verbose: bool,
    json_mode: bool,
    quiet: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(verbose: bool, json_mode: bool, quiet: bool) -> Self {
        Self {
            verbose,
            json_mode,
            quiet,
        }
    }

    fn silent(&self) -> bool {
        self.json_mode || self.quiet
    }

    /// Print seed start message.
    pub fn print_scan_start(&self, target: &str, kind: SeedKind) {
        if self.silent() {
            return;
        }

        let label = match kind {
            SeedKind::Page => "Processing domain:",
            SeedKind::Script => "Processing JS file:",
        };
        println!("{} {} {}", "[*]".bright_blue(), label, target.bright_white());
    }

    /// Print progress (only in verbose mode).
    pub fn print_progress(&self, message: &str) {
        if self.silent() || !self.verbose {
            return;
        }

        println!("{} {}", "[.]".dimmed(), message.dimmed());
    }

    /// Print info message.
    pub fn print_info(&self, message: &str) {
        if self.silent() {
            return;
        }

        println!("{} {}", "[*]".bright_blue(), message);
    }

    /// Print run summary.
    pub fn print_summary(&self, results: &DiscoveryResults) {
        if self.silent() {
            return;
        }

        println!();
        println!("{}", "=== Discovery Summary ===".bright_cyan());
        println!("  JS files:   {}", results.js_files.len());
        println!("  Endpoints:  {}", results.endpoints.len());
        println!("  Processed:  {}", results.processed);
        println!("  Rounds:     {}", results.rounds);
        println!();
    }

    /// Create a progress bar.
    pub fn create_progress_bar(&self, total: u64, message: &str) -> Option<ProgressBar> {
        if self.silent() {
            return None;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(message.to_string());
        Some(pb)
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}
