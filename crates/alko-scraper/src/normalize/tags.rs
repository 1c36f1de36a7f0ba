use std::collections::BTreeSet;

use crate::types::{RawProduct, Scalar};
use crate::vocab::{DISCOUNT_FILTER, TAG_DISCOUNT, TAG_NEW, TAG_ONLINE_PRICE, TAG_RECOMMENDED};

/// Marketing tags from promotion labels and product flags. Empty titles are
/// dropped; duplicates collapse.
pub fn build_tags(product: &RawProduct) -> BTreeSet<String> {
    let mut tags: BTreeSet<String> = product
        .action_labels
        .iter()
        .map(|label| label.title.as_str())
        .chain(product.new.then_some(TAG_NEW))
        .chain(product.recomended.then_some(TAG_RECOMMENDED))
        .chain(product.has_online_price.then_some(TAG_ONLINE_PRICE))
        .chain(
            product
                .labels_with_code(DISCOUNT_FILTER)
                .map(|label| label.title.as_str()),
        )
        .chain(product.price_details.iter().map(|d| d.title.as_str()))
        .filter(|title| !title.trim().is_empty())
        .map(str::to_owned)
        .collect();

    let price = product.price.as_ref().and_then(Scalar::as_f64);
    let previous = product.prev_price.as_ref().and_then(Scalar::as_f64);
    if let (Some(price), Some(previous)) = (price, previous) {
        if previous > price && price > 0.0 {
            tags.insert(TAG_DISCOUNT.to_owned());
        }
    }

    tags
}
