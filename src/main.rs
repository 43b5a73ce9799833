//! jsxtract - JavaScript resource and API endpoint discovery.
//!
//! CLI entry point.

use clap::{CommandFactory, Parser};
use jsxtract::notify::{ConsoleOutput, ResultReporter};
use jsxtract::{Config, DiscoveryEngine, Input, XtractError};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("jsxtract=debug,info")
    } else if config.quiet || config.json {
        EnvFilter::new("jsxtract=warn")
    } else {
        EnvFilter::new("jsxtract=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(input) = config.input() else {
        let _ = Config::command().print_help();
        return ExitCode::SUCCESS;
    };

    match run(input, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

async fn run(input: Input, config: &Config) -> Result<(), ExitCode> {
    let mut engine = match DiscoveryEngine::new(config) {
        Ok(e) => e,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    if !config.json && !config.quiet {
        print_banner();
    }

    if let Err(e) = engine.process_input(&input).await {
        // A missing or unreadable list skips that input; the run itself still succeeds
        match e {
            XtractError::MissingInputFile(_) => error!("Error: {}", e),
            _ => error!("Error reading input: {}", e),
        }
        return Ok(());
    }

    let results = engine.results();

    ConsoleOutput::new(config.verbose, config.json, config.quiet).print_summary(&results);

    let reporter = ResultReporter::new(config.json);
    if let Err(e) = reporter.report(
        &results,
        config.js_output.as_deref(),
        config.output.as_deref(),
    ) {
        error!("Failed to report results: {}", e);
        return Err(ExitCode::FAILURE);
    }

    Ok(())
}

fn print_banner() {
    println!();
    println!("\x1b[36m╔══════════════════════════════════════════════════════════════╗\x1b[0m");
    println!("\x1b[36m║                    JSXTRACT v0.1.0                           ║\x1b[0m");
    println!("\x1b[36m║       JavaScript Resource & Endpoint Discovery               ║\x1b[0m");
    println!("\x1b[36m╚══════════════════════════════════════════════════════════════╝\x1b[0m");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn quiet_config() -> Config {
        Config {
            quiet: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unreadable_list_is_not_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, b'\n', 0x80]).unwrap();

        let input = Input::ScriptList(file.path().to_path_buf());
        assert!(run(input, &quiet_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_list_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = Input::DomainList(dir.path().join("domains.txt"));
        assert!(run(input, &quiet_config()).await.is_ok());
    }
}
