//! Route table inspector.
//!
//! Loads a TOML route table, matches one request against it and prints what
//! the router would do, as JSON.
//!
//! ```text
//! autobind-router --config routes.toml --method GET "/index.php?r=video/view/42"
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use axum::http;
use clap::Parser;
use serde::Serialize;

use autobind_router::config::{load_config, ConfigError, ObservabilityConfig, RouterConfig};
use autobind_router::dispatch::{ControllerDispatcher, ControllerRegistry, ResolvedTarget};
use autobind_router::observability::logging::init_logging;
use autobind_router::routing::{Matcher, RegexMatcher};

#[derive(Parser)]
#[command(name = "autobind-router")]
#[command(about = "Match a request against a route table", long_about = None)]
struct Cli {
    /// Route table (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Request method.
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Request URI, optionally with a query string.
    uri: String,
}

#[derive(Serialize)]
struct MatchReport<'a> {
    method: &'a str,
    url: &'a str,
    effective_path: String,
    placeholders: Vec<&'a str>,
    captured: &'a [String],
    target: Option<ResolvedTarget>,
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!(error = %e, "route check failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads the route table and installs logging at its level.
///
/// Logging falls back to the default level when the table cannot be loaded,
/// so the failure is still reported.
fn load_and_init_logging(path: &Path) -> Result<RouterConfig, ConfigError> {
    match load_config(path) {
        Ok(config) => {
            init_logging(&config.observability.log_level);
            tracing::info!(
                path = %path.display(),
                routes = config.routes.len(),
                url_format = %config.matcher.url_format,
                "Route table loaded"
            );
            Ok(config)
        }
        Err(e) => {
            init_logging(&ObservabilityConfig::default().log_level);
            Err(e)
        }
    }
}

fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_and_init_logging(&cli.config)?;

    let routes = config.route_collection::<()>()?;
    let matcher = RegexMatcher::from_config(routes, &config.matcher)?;
    let dispatcher = ControllerDispatcher::from_config(ControllerRegistry::new(), &config.dispatcher);

    let request = http::Request::builder()
        .method(cli.method.as_str())
        .uri(cli.uri.as_str())
        .body(())?;

    let effective_path = matcher.effective_path(&request);
    let Some(matched) = matcher.match_request(&request) else {
        tracing::info!(method = %cli.method, path = %effective_path, "No route matched");
        println!("null");
        return Ok(false);
    };

    let report = MatchReport {
        method: matched.route().method().as_str(),
        url: matched.route().url(),
        effective_path,
        placeholders: matched.placeholders().iter().map(|p| p.name.as_str()).collect(),
        captured: matched.captured_values(),
        target: dispatcher.resolve(&matched),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(true)
}
