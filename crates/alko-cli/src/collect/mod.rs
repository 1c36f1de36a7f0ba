//! Collection command handlers for the CLI.
//!
//! Each pipeline fetches through [`AlkotekaClient`], normalizes with
//! `alko_scraper` and streams records into a [`crate::sink::JsonArraySink`].
//! Per-unit failures are logged and counted in [`runner::RunTally`].

mod categories;
mod cities;
mod products;
mod runner;

use std::path::{Path, PathBuf};

use alko_scraper::AlkotekaClient;

pub(crate) use categories::run_collect_categories;
pub(crate) use cities::run_collect_cities;
pub(crate) use products::run_collect_products;

/// Builds the API client from config.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot be
/// constructed.
pub(super) fn build_client(config: &alko_core::AppConfig) -> anyhow::Result<AlkotekaClient> {
    AlkotekaClient::new(
        &config.api_base_url,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build API client: {e}"))
}

/// `output` if given, otherwise `file_name` inside the configured output
/// directory.
fn output_path(config: &alko_core::AppConfig, output: Option<&Path>, file_name: &str) -> PathBuf {
    output.map_or_else(|| config.output_dir.join(file_name), Path::to_path_buf)
}

/// Concurrency limit for per-item requests; never zero.
fn max_concurrent(config: &alko_core::AppConfig) -> usize {
    config.scraper_max_concurrent_requests.max(1)
}
