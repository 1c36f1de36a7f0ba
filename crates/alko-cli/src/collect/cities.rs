use std::path::Path;

use alko_scraper::normalize_city;

use crate::sink::JsonArraySink;

use super::build_client;

/// Walks the city listing and writes every city to the cities file.
///
/// The default destination is the configured cities path, which is where
/// the category pipeline reads from.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the listing fails with a
/// non-recoverable error, or the output cannot be written.
pub(crate) async fn run_collect_cities(
    config: &alko_core::AppConfig,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let path = output.unwrap_or(&config.cities_path);

    let cities = client
        .fetch_all_cities(config.scraper_inter_request_delay_ms)
        .await?;
    tracing::info!(count = cities.len(), "fetched city listing");

    let mut sink = JsonArraySink::create(path)?;
    for city in cities {
        sink.emit(&normalize_city(city))?;
    }
    let written = sink.finish()?;

    tracing::info!(written, path = %path.display(), "city collection complete");
    println!("cities: {written} written to {}", path.display());
    Ok(())
}
