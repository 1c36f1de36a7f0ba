//! Page arithmetic for the alkoteka listing endpoints.
//!
//! The two listings page differently:
//!
//! - `GET /city?page=N` is 1-based and reports `meta.has_more_pages`; the
//!   collector walks forward until the flag is false.
//! - `GET /product?root_category_slug=...` reports `meta.total` and accepts
//!   `per_page`, so a category is fetched in two requests: one to learn the
//!   total and one with `per_page=total`.

/// First page of the city listing.
pub const FIRST_PAGE: u32 = 1;

/// Maximum number of city pages to fetch before returning an error.
/// Guards against a listing that never clears `has_more_pages`.
pub const MAX_PAGES: u32 = 500;

/// Number of the page after `current`, or `None` when the listing says there
/// are no more pages.
#[must_use]
pub fn next_city_page(current: u32, has_more_pages: bool) -> Option<u32> {
    if has_more_pages {
        current.checked_add(1)
    } else {
        None
    }
}

/// `per_page` value that returns a whole category in one request, or `None`
/// for an empty category. Totals beyond `u32` are clamped.
#[must_use]
pub fn listing_page_size(total: u64) -> Option<u32> {
    if total == 0 {
        None
    } else {
        Some(u32::try_from(total).unwrap_or(u32::MAX))
    }
}
