//! Result reporting to files or standard output.

use crate::types::{DiscoveryResults, Result};
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub const JS_FILES_HEADER: &str = "Found JavaScript/JSON Files:";
pub const ENDPOINTS_HEADER: &str = "Found Endpoints:";

/// Writes the two result sets, each to a file when a path is given and to stdout otherwise.
pub struct ResultReporter {
    json: bool,
}

impl ResultReporter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Report both sets. Write failures are logged and do not stop the other sink.
    pub fn report(
        &self,
        results: &DiscoveryResults,
        js_output: Option<&Path>,
        endpoint_output: Option<&Path>,
    ) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(results)?);
        }

        self.emit("JavaScript files", JS_FILES_HEADER, &results.js_files, js_output);
        self.emit("Endpoints", ENDPOINTS_HEADER, &results.endpoints, endpoint_output);
        Ok(())
    }

    fn emit(&self, label: &str, header: &str, items: &[String], destination: Option<&Path>) {
        match destination {
            Some(path) => match write_list(path, items) {
                Ok(()) => info!("{} saved to {}", label, path.display()),
                Err(e) => error!("Error saving {} to {}: {}", label, path.display(), e),
            },
            None if !self.json => print!("{}", render_console(header, items)),
            None => {}
        }
    }
}

/// Render a console listing: the header, then one `- <url>` line per item.
pub fn render_console(header: &str, items: &[String]) -> String {
    let mut out = format!("{}\n", header);
    for item in items {
        out.push_str("- ");
        out.push_str(item);
        out.push('\n');
    }
    out
}

/// Write one URL per line with no marker.
pub fn write_list(path: &Path, items: &[String]) -> Result<()> {
    let mut content = items.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}
