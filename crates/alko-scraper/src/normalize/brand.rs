use crate::types::RawProduct;

type BrandResolver = fn(&RawProduct) -> Option<String>;

/// Brand sources in priority order; the first non-empty answer wins.
const BRAND_RESOLVERS: &[BrandResolver] = &[brand_block, manufacturer_block, brand_filter_label];

/// Brand name, or an empty string when no source names one.
pub fn resolve_brand(product: &RawProduct) -> String {
    BRAND_RESOLVERS
        .iter()
        .find_map(|resolve| resolve(product))
        .unwrap_or_default()
}

fn brand_block(product: &RawProduct) -> Option<String> {
    first_enabled_block_value(product, "brend")
}

fn manufacturer_block(product: &RawProduct) -> Option<String> {
    first_enabled_block_value(product, "proizvoditel")
}

/// First enabled value of the first `code` block that has one.
fn first_enabled_block_value(product: &RawProduct, code: &str) -> Option<String> {
    product
        .blocks_with_code(code)
        .filter_map(|block| block.enabled_values().next())
        .map(|value| value.name.trim())
        .find(|name| !name.is_empty())
        .map(str::to_owned)
}

fn brand_filter_label(product: &RawProduct) -> Option<String> {
    product
        .labels_with_code("brend")
        .next()
        .map(|label| label.title.trim())
        .filter(|title| !title.is_empty())
        .map(str::to_owned)
}
