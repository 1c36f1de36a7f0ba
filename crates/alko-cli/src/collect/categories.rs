use std::path::Path;

use alko_scraper::normalize_category;
use futures::stream::{self, StreamExt};

use crate::sink::JsonArraySink;

use super::runner::{RunTally, UnitStats};
use super::{build_client, max_concurrent, output_path};

/// Lists the categories of every city in the cities file.
///
/// The cities file is read before anything is written, so a missing file
/// aborts with guidance and leaves no output behind. Cities are fetched
/// concurrently; a city whose request fails is logged and skipped.
///
/// # Errors
///
/// Returns an error if the cities file is missing or invalid, the output
/// cannot be written, or every city failed.
pub(crate) async fn run_collect_categories(
    config: &alko_core::AppConfig,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let cities = alko_core::load_cities(&config.cities_path)?;
    tracing::info!(count = cities.len(), path = %config.cities_path.display(), "loaded cities");

    let client = build_client(config)?;
    let path = output_path(config, output, "categories.json");
    let mut sink = JsonArraySink::create(&path)?;
    let mut tally = RunTally::new(cities.len());

    let client = &client;
    let mut listings = stream::iter(cities)
        .map(|city| async move {
            let result = client.fetch_categories(&city.uuid).await;
            (city, result)
        })
        .buffer_unordered(max_concurrent(config));

    while let Some((city, result)) = listings.next().await {
        let list = match result {
            Ok(list) => list,
            Err(e) => {
                tally.unit_failed(&city.uuid, &anyhow::Error::new(e));
                continue;
            }
        };

        let mut stats = UnitStats::default();
        for category in list.results {
            sink.emit(&normalize_category(category))?;
            stats.written += 1;
        }
        tracing::info!(
            city = %city.uuid,
            name = city.name.as_deref().unwrap_or(""),
            categories = stats.written,
            "fetched city categories"
        );
        tally.unit_succeeded(stats);
    }

    let written = sink.finish()?;
    tally.finish("cities")?;
    tracing::info!(written, path = %path.display(), "category collection complete");
    println!("categories: {written} written to {}", path.display());
    Ok(())
}
