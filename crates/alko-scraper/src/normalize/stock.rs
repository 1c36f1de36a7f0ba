use alko_core::Stock;

use crate::types::RawProduct;
use crate::vocab::OUT_OF_STOCK_PHRASES;

/// Stock status and count.
///
/// A product with a zero count and no stores is never in stock, whatever
/// the `available` flag says.
pub fn build_stock(product: &RawProduct) -> Stock {
    let count = product.quantity_total.unwrap_or(0);
    let store_count = product.stores().len();

    let mut in_stock = count > 0 || product.available || store_count > 0;

    let flagged_unavailable = [&product.warning, &product.availability_title]
        .into_iter()
        .flatten()
        .any(|text| mentions_unavailable(text));
    if flagged_unavailable {
        in_stock = false;
    }

    if count == 0 && store_count == 0 {
        in_stock = false;
    }

    Stock { in_stock, count }
}

fn mentions_unavailable(text: &str) -> bool {
    let lower = text.to_lowercase();
    OUT_OF_STOCK_PHRASES
        .iter()
        .any(|phrase| lower.contains(phrase))
}
