//! Display title construction.
//!
//! The storefront name often omits the volume, weight or color that tells
//! variants apart. At most one such descriptor is appended, chosen by the
//! product's class: food leads with weight, drinks with volume.

use crate::parse::{collapse_whitespace, first_number_token, has_digit, unit_tokens};
use crate::types::RawProduct;
use crate::vocab::{
    COLOR_INDICATORS, DRINK_KEYWORDS, FOOD_KEYWORDS, VOLUME_SUFFIX, VOLUME_UNITS, WEIGHT_UNITS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Descriptor {
    Volume,
    Weight,
    Color,
}

impl Descriptor {
    fn filter_code(self) -> &'static str {
        match self {
            Descriptor::Volume => "obem",
            Descriptor::Weight => "ves",
            Descriptor::Color => "cvet",
        }
    }

    /// Whether `base` already states this descriptor's `value`.
    fn is_stated(self, base: &str, value: &str) -> bool {
        let base_lower = base.to_lowercase();
        match self {
            Descriptor::Volume => measure_stated(base, &base_lower, value, VOLUME_UNITS),
            Descriptor::Weight => measure_stated(base, &base_lower, value, WEIGHT_UNITS),
            Descriptor::Color => color_stated(&base_lower, value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProductClass {
    Food,
    Drink,
    Other,
}

impl ProductClass {
    fn of(product: &RawProduct) -> Self {
        let (name, parent) = product.category_names();
        let (name, parent) = (name.to_lowercase(), parent.to_lowercase());
        let matches = |keywords: &[&str]| {
            keywords
                .iter()
                .any(|k| name.contains(k) || parent.contains(k))
        };

        if matches(FOOD_KEYWORDS) {
            ProductClass::Food
        } else if matches(DRINK_KEYWORDS) {
            ProductClass::Drink
        } else {
            ProductClass::Other
        }
    }

    fn priority(self) -> [Descriptor; 3] {
        match self {
            ProductClass::Food | ProductClass::Other => {
                [Descriptor::Weight, Descriptor::Volume, Descriptor::Color]
            }
            ProductClass::Drink => [Descriptor::Volume, Descriptor::Color, Descriptor::Weight],
        }
    }
}

type DescriptorSource = fn(&RawProduct, Descriptor) -> Option<String>;

/// Where descriptor values come from, in priority order.
const DESCRIPTOR_SOURCES: &[DescriptorSource] = &[from_filter_labels, from_description_blocks];

/// Product name with the first missing descriptor appended as `", {value}"`.
///
/// Returns an empty string when the product has no name.
pub fn build_title(product: &RawProduct) -> String {
    let base = product.name.trim();
    if base.is_empty() {
        return String::new();
    }

    let missing = ProductClass::of(product)
        .priority()
        .into_iter()
        .find_map(|descriptor| {
            let value = descriptor_value(product, descriptor)?;
            (!descriptor.is_stated(base, &value)).then_some(value)
        });

    match missing {
        Some(value) => format!("{base}, {value}"),
        None => base.to_owned(),
    }
}

fn descriptor_value(product: &RawProduct, descriptor: Descriptor) -> Option<String> {
    DESCRIPTOR_SOURCES
        .iter()
        .find_map(|source| source(product, descriptor))
}

/// The last non-empty label for the descriptor's filter code. A bare
/// numeric volume gets the liter suffix.
fn from_filter_labels(product: &RawProduct, descriptor: Descriptor) -> Option<String> {
    let title = product
        .labels_with_code(descriptor.filter_code())
        .filter(|label| !label.title.is_empty())
        .last()?
        .title
        .clone();

    if descriptor == Descriptor::Volume
        && has_digit(&title)
        && !title.to_lowercase().contains('л')
    {
        return Some(format!("{title}{VOLUME_SUFFIX}"));
    }
    Some(title)
}

/// Volume and weight from typed description blocks; blocks never carry color.
fn from_description_blocks(product: &RawProduct, descriptor: Descriptor) -> Option<String> {
    if descriptor == Descriptor::Color {
        return None;
    }

    product
        .blocks_with_code(descriptor.filter_code())
        .find_map(|block| {
            if block.is_range() {
                let min = block.min.as_ref()?;
                Some(collapse_whitespace(&format!("{min} {}", block.unit)))
            } else if block.is_select() && descriptor == Descriptor::Weight {
                block
                    .enabled_values()
                    .map(|value| value.name.as_str())
                    .find(|name| has_digit(name))
                    .map(str::to_owned)
            } else {
                None
            }
        })
}

/// A volume or weight counts as stated when its number occurs in the name,
/// a unit word stands alone in the name, or the whole value occurs in it.
/// A value without a number is never stated.
fn measure_stated(base: &str, base_lower: &str, value: &str, units: &[&str]) -> bool {
    let Some(number) = first_number_token(value) else {
        return false;
    };
    base.contains(number)
        || unit_tokens(base).any(|token| units.contains(&token.as_str()))
        || base_lower.contains(&value.to_lowercase())
}

fn color_stated(base_lower: &str, color: &str) -> bool {
    let color = color.to_lowercase();
    if base_lower.contains(&color) {
        return true;
    }
    COLOR_INDICATORS.iter().any(|(canonical, stems)| {
        canonical.contains(color.as_str()) && stems.iter().any(|stem| base_lower.contains(stem))
    })
}

#[cfg(test)]
#[path = "title_test.rs"]
mod tests;
