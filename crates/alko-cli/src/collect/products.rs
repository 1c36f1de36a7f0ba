use std::io::Write;
use std::path::Path;
use std::time::Duration;

use alko_core::{CategoriesFile, CategoryTarget, ExportRecord};
use alko_scraper::{
    normalize_product, parse_product_detail, AlkotekaClient, ProductContext, ScraperError,
};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use crate::sink::JsonArraySink;

use super::runner::{RunTally, UnitStats};
use super::{build_client, max_concurrent, output_path};

/// Collects and normalizes every product of the target categories.
///
/// Targets come from `category_urls` when given, otherwise from the
/// categories file (or its built-in default). With `dry_run` the resolved
/// slugs are printed and nothing is fetched.
///
/// # Errors
///
/// Returns an error if the targets are invalid, the output cannot be
/// written, or every category failed.
pub(crate) async fn run_collect_products(
    config: &alko_core::AppConfig,
    category_urls: &[String],
    output: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let targets = resolve_targets(&config.categories_path, category_urls)?;

    if dry_run {
        let slugs: Vec<&str> = targets.iter().map(CategoryTarget::slug).collect();
        println!(
            "dry-run: would collect products for {} categories: {slugs:?}",
            slugs.len()
        );
        return Ok(());
    }

    let client = build_client(config)?;
    let city_uuid = config.city_uuid.to_string();
    let path = output_path(config, output, "products.json");
    let mut sink = JsonArraySink::create(&path)?;
    let mut tally = RunTally::new(targets.len());

    for (i, target) in targets.iter().enumerate() {
        if i > 0 && config.scraper_inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.scraper_inter_request_delay_ms)).await;
        }

        match collect_category(&client, config, &city_uuid, target, &mut sink).await {
            Ok(stats) => {
                tracing::info!(
                    category = %target.slug(),
                    written = stats.written,
                    skipped = stats.skipped,
                    failed = stats.failed,
                    "category collection complete"
                );
                tally.unit_succeeded(stats);
            }
            Err(e) => tally.unit_failed(target.slug(), &e),
        }
    }

    let written = sink.finish()?;
    let totals = tally.finish("categories")?;
    tracing::info!(
        written,
        skipped = totals.skipped,
        failed = totals.failed,
        path = %path.display(),
        "product collection complete"
    );
    println!(
        "products: {written} written, {} skipped, {} failed -> {}",
        totals.skipped,
        totals.failed,
        path.display()
    );
    Ok(())
}

/// Category targets from the command line, or from the categories file when
/// none were given.
fn resolve_targets(
    categories_path: &Path,
    category_urls: &[String],
) -> anyhow::Result<Vec<CategoryTarget>> {
    if category_urls.is_empty() {
        let file = alko_core::load_categories_or_default(categories_path)?;
        return Ok(file.categories);
    }

    let file = CategoriesFile {
        categories: category_urls.iter().map(CategoryTarget::new).collect(),
    };
    alko_core::validate_categories(&file)?;
    Ok(file.categories)
}

/// Fetches one category's listing, then every product detail in it.
///
/// Only a failed listing fails the category. Individual products that fail
/// to fetch or normalize are logged and counted.
async fn collect_category<W: Write>(
    client: &AlkotekaClient,
    config: &alko_core::AppConfig,
    city_uuid: &str,
    target: &CategoryTarget,
    sink: &mut JsonArraySink<W>,
) -> anyhow::Result<UnitStats> {
    let category_slug = target.slug();
    let summaries = client
        .fetch_category_products(city_uuid, category_slug)
        .await?;

    let mut stats = UnitStats::default();
    let mut pending = Vec::with_capacity(summaries.len());
    for summary in summaries {
        match summary.slug.filter(|s| !s.is_empty()) {
            Some(slug) => pending.push((slug, summary.product_url.unwrap_or_default())),
            None => {
                tracing::debug!(uuid = ?summary.uuid, "listed product has no slug, skipping");
                stats.skipped += 1;
            }
        }
    }

    let mut details = stream::iter(pending)
        .map(|(product_slug, product_url)| async move {
            let result = client.fetch_product_detail(city_uuid, &product_slug).await;
            (product_slug, product_url, result)
        })
        .buffer_unordered(max_concurrent(config));

    while let Some((product_slug, product_url, result)) = details.next().await {
        let body = match result {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(product = %product_slug, error = %e, "failed to fetch product");
                stats.failed += 1;
                continue;
            }
        };

        let context = ProductContext {
            category_url: target.url.clone(),
            category_slug: category_slug.to_owned(),
            product_url,
        };
        match normalize_detail(&body, &product_slug, &context, Utc::now()) {
            Ok(Some(record)) => {
                sink.emit(&record)?;
                stats.written += 1;
            }
            Ok(None) => {
                tracing::warn!(product = %product_slug, "product detail unsuccessful or empty");
                stats.skipped += 1;
            }
            Err(e) => {
                tracing::error!(
                    product = %product_slug,
                    error = %e,
                    payload = %body,
                    "failed to normalize product"
                );
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

/// Parses a detail payload and normalizes it.
///
/// `Ok(None)` means the API answered without a product.
fn normalize_detail(
    body: &serde_json::Value,
    product_slug: &str,
    context: &ProductContext,
    captured_at: DateTime<Utc>,
) -> Result<Option<ExportRecord>, ScraperError> {
    parse_product_detail(body, product_slug)?
        .map(|product| normalize_product(&product, context, captured_at))
        .transpose()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn context() -> ProductContext {
        ProductContext {
            category_url: "https://alkoteka.com/catalog/slaboalkogolnye-napitki-2".to_string(),
            category_slug: "slaboalkogolnye-napitki-2".to_string(),
            product_url: "https://alkoteka.com/product/pivo-1/zhigulevskoe".to_string(),
        }
    }

    fn captured_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn normalize_detail_produces_record() {
        let body = json!({
            "success": true,
            "results": {"uuid": "p-1", "name": "Пиво Жигулевское", "price": 80}
        });
        let record = normalize_detail(&body, "zhigulevskoe", &context(), captured_at())
            .unwrap()
            .unwrap();
        assert_eq!(record.rpc, "p-1");
        assert_eq!(
            record.url,
            "https://alkoteka.com/product/pivo-1/zhigulevskoe"
        );
        assert_eq!(record.timestamp, captured_at().timestamp());
    }

    #[test]
    fn normalize_detail_unsuccessful_is_none() {
        let body = json!({"success": false, "results": null});
        assert!(normalize_detail(&body, "zhigulevskoe", &context(), captured_at())
            .unwrap()
            .is_none());
    }

    #[test]
    fn normalize_detail_without_uuid_is_error() {
        let body = json!({"success": true, "results": {"name": "Пиво"}});
        let err = normalize_detail(&body, "zhigulevskoe", &context(), captured_at()).unwrap_err();
        assert!(matches!(err, ScraperError::Normalization { .. }));
    }

    #[test]
    fn normalize_detail_malformed_is_error() {
        let body = json!({"success": true, "results": {"uuid": "p-1", "filter_labels": 5}});
        let err = normalize_detail(&body, "zhigulevskoe", &context(), captured_at()).unwrap_err();
        assert!(matches!(err, ScraperError::Deserialize { .. }));
    }

    #[test]
    fn resolve_targets_prefers_command_line() {
        let dir = tempfile::tempdir().expect("temp dir");
        let urls = vec!["https://alkoteka.com/catalog/skidki".to_string()];
        let targets = resolve_targets(&dir.path().join("absent.yaml"), &urls).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].slug(), "skidki");
    }

    #[test]
    fn resolve_targets_falls_back_to_default_list() {
        let dir = tempfile::tempdir().expect("temp dir");
        let targets = resolve_targets(&dir.path().join("absent.yaml"), &[]).unwrap();
        assert_eq!(targets.len(), alko_core::DEFAULT_CATEGORY_URLS.len());
    }

    #[test]
    fn resolve_targets_rejects_duplicate_slugs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let urls = vec![
            "https://alkoteka.com/catalog/skidki".to_string(),
            "https://alkoteka.com/catalog/skidki/".to_string(),
        ];
        let result = resolve_targets(&dir.path().join("absent.yaml"), &urls);
        assert!(result.is_err());
    }
}
