//! Output for discovery runs.
//!
//! This module handles:
//! - Colored console progress and summaries
//! - Writing result sets to files or standard output

pub mod console;
pub mod report;

pub use console::ConsoleOutput;
pub use report::ResultReporter;
