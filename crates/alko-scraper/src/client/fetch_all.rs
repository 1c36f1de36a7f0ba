//! Multi-request listing loops for `AlkotekaClient`.

use std::time::Duration;

use crate::error::ScraperError;
use crate::pagination::{listing_page_size, next_city_page, FIRST_PAGE, MAX_PAGES};
use crate::types::{CityItem, ProductSummary};

use super::AlkotekaClient;

impl AlkotekaClient {
    /// Fetches every city by walking the listing from page 1 until
    /// `meta.has_more_pages` is false.
    ///
    /// `inter_request_delay_ms` is slept between page requests (not before
    /// the first). A page whose body does not parse ends pagination: it is
    /// logged and the cities collected so far are returned.
    ///
    /// # Errors
    ///
    /// Propagates any other error from [`Self::fetch_city_page`].
    /// Returns [`ScraperError::PaginationLimit`] if the listing runs past
    /// [`MAX_PAGES`].
    pub async fn fetch_all_cities(
        &self,
        inter_request_delay_ms: u64,
    ) -> Result<Vec<CityItem>, ScraperError> {
        let mut cities: Vec<CityItem> = Vec::new();
        let mut page = FIRST_PAGE;

        loop {
            if page > MAX_PAGES {
                return Err(ScraperError::PaginationLimit {
                    endpoint: "city".to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            if page != FIRST_PAGE && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let response = match self.fetch_city_page(page).await {
                Ok(response) => response,
                Err(e @ ScraperError::Deserialize { .. }) => {
                    tracing::error!(page, error = %e, "invalid city page, stopping pagination");
                    break;
                }
                Err(e) => return Err(e),
            };

            tracing::debug!(page, count = response.results.len(), "fetched city page");
            cities.extend(response.results);

            match next_city_page(page, response.meta.has_more_pages) {
                Some(next) => page = next,
                None => break,
            }
        }

        Ok(cities)
    }

    /// Fetches every product summary in a root category.
    ///
    /// The first request reads `meta.total`; the second asks for exactly
    /// that many items in one page. An empty category returns an empty list
    /// without the second request.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_product_listing`].
    pub async fn fetch_category_products(
        &self,
        city_uuid: &str,
        category_slug: &str,
    ) -> Result<Vec<ProductSummary>, ScraperError> {
        let first = self
            .fetch_product_listing(city_uuid, category_slug, None)
            .await?;

        let Some(per_page) = listing_page_size(first.meta.total) else {
            tracing::warn!(category = %category_slug, "category has no products");
            return Ok(Vec::new());
        };

        let listing = self
            .fetch_product_listing(city_uuid, category_slug, Some(per_page))
            .await?;
        tracing::info!(
            category = %category_slug,
            total = first.meta.total,
            received = listing.results.len(),
            "fetched product list"
        );
        Ok(listing.results)
    }
}
