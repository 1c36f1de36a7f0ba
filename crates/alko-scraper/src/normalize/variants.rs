use std::collections::BTreeSet;

use crate::types::RawProduct;

/// Number of purchasable variants, at least 1.
///
/// Volume blocks spanning a range imply at least two variants; distinct
/// fixed volumes and distinct colors each count as one.
pub fn count_variants(product: &RawProduct) -> u32 {
    let mut variants = 1u32;
    let mut volumes = BTreeSet::new();

    for block in product.blocks_with_code("obem") {
        let Some(min) = &block.min else { continue };
        match &block.max {
            Some(max) if max != min => variants = variants.max(2),
            _ => {
                volumes.insert(min.to_string());
            }
        }
    }
    if volumes.len() > 1 {
        variants = saturating_u32(volumes.len());
    }

    let colors: BTreeSet<&str> = product
        .labels_with_code("cvet")
        .map(|label| label.title.trim())
        .filter(|title| !title.is_empty())
        .collect();
    if colors.len() > 1 {
        variants = variants.max(saturating_u32(colors.len()));
    }

    variants
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
