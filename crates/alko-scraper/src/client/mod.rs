//! HTTP client for the alkoteka storefront `web-api/v1`.

mod fetch_all;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{CategoryList, CityPage, ProductList};

/// Retry-After assumed when a 429 response omits the header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client for the alkoteka JSON API.
///
/// Maps 429, 404 and other non-2xx responses to typed errors. Transient
/// errors (429, 5xx, network failures) are retried with exponential backoff
/// up to `max_retries` additional attempts.
pub struct AlkotekaClient {
    pub(super) client: Client,
    /// API root, e.g. `https://alkoteka.com/web-api/v1`.
    pub(super) base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    pub(super) max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub(super) backoff_base_secs: u64,
}

impl AlkotekaClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `base_url` is not an absolute
    ///   http(s) URL.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let invalid = |reason: String| ScraperError::InvalidUrl {
            url: base_url.to_owned(),
            reason,
        };
        let base_url =
            Url::parse(base_url.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid("expected an absolute http(s) URL".to_owned()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches one page of the city listing (`page` is 1-based).
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`ScraperError::Deserialize`]: response body is not the expected JSON (not retried).
    pub async fn fetch_city_page(&self, page: u32) -> Result<CityPage, ScraperError> {
        let url = self.endpoint_url(&["city"], &[("page", &page.to_string())])?;
        self.get_json(url, &format!("city page {page}")).await
    }

    /// Fetches the category list for one city.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_city_page`].
    pub async fn fetch_categories(&self, city_uuid: &str) -> Result<CategoryList, ScraperError> {
        let url = self.endpoint_url(&["category"], &[("city_uuid", city_uuid)])?;
        self.get_json(url, &format!("categories for city {city_uuid}"))
            .await
    }

    /// Fetches the product listing of a root category. Without `per_page`
    /// the API returns its default page, which is enough to read the total.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_city_page`].
    pub async fn fetch_product_listing(
        &self,
        city_uuid: &str,
        category_slug: &str,
        per_page: Option<u32>,
    ) -> Result<ProductList, ScraperError> {
        let per_page = per_page.map(|n| n.to_string());
        let mut query = vec![
            ("city_uuid", city_uuid),
            ("root_category_slug", category_slug),
        ];
        if let Some(per_page) = per_page.as_deref() {
            query.push(("per_page", per_page));
        }
        let url = self.endpoint_url(&["product"], &query)?;
        self.get_json(url, &format!("product list for {category_slug}"))
            .await
    }

    /// Fetches a product detail payload as raw JSON.
    ///
    /// The payload stays untyped so that a product which fails to parse can
    /// be logged verbatim; see [`crate::parse::parse_product_detail`].
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_city_page`].
    pub async fn fetch_product_detail(
        &self,
        city_uuid: &str,
        product_slug: &str,
    ) -> Result<serde_json::Value, ScraperError> {
        let url = self.endpoint_url(&["product", product_slug], &[("city_uuid", city_uuid)])?;
        self.get_json(url, &format!("product {product_slug}")).await
    }

    /// GETs `url` with retry and deserializes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

                    return Err(ScraperError::RateLimited {
                        domain: url.host_str().unwrap_or_default().to_owned(),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }

    /// Builds `{base_url}/{segments...}?{query}`. Segments are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the base URL cannot take path
    /// segments.
    fn endpoint_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ScraperError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ScraperError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
