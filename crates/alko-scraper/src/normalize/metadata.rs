//! Flattening of product attributes into the export `metadata` map.
//!
//! Sections are applied in a fixed order and later sections overwrite
//! earlier keys: filter labels override the scalar attributes, the product's
//! own category overrides the requested category slug. Blank values never
//! reach the map (see [`Metadata::insert`]).

use alko_core::{MetaValue, Metadata};

use crate::parse::{clean_html_text, discount_percent, format_float, leading_integer};
use crate::types::{Category, DescriptionBlock, FilterLabel, GastronomicGroup, RawProduct};
use crate::vocab::{
    filter_display_name, gastronomic_display_name, DEFAULT_STORE_QUANTITY, DESCRIPTION_BLOCK_TITLE,
    YES,
};

const DESCRIPTION_KEY: &str = "__description";

/// Builds the metadata map for `product` found under `category_url`.
pub fn build_metadata(product: &RawProduct, category_url: &str, category_slug: &str) -> Metadata {
    let mut metadata = Metadata::new();

    metadata.insert(DESCRIPTION_KEY, description(product));
    add_scalar_attributes(&mut metadata, product, category_url, category_slug);
    add_filter_labels(&mut metadata, &product.filter_labels);
    if let Some(category) = &product.category {
        add_category(&mut metadata, category);
    }
    add_description_blocks(&mut metadata, &product.description_blocks);
    add_promotions(&mut metadata, product);
    add_store_totals(&mut metadata, product);
    add_gastronomics(&mut metadata, product);

    metadata
}

/// Subtitle followed by the cleaned text of the first non-empty
/// description text block.
fn description(product: &RawProduct) -> String {
    let body = product
        .text_blocks
        .iter()
        .find(|block| block.title == DESCRIPTION_BLOCK_TITLE && !block.content.is_empty())
        .map(|block| clean_html_text(&block.content));

    [product.subname.clone().filter(|s| !s.is_empty()), body]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_owned()
}

fn flag(value: bool) -> Option<&'static str> {
    value.then_some(YES)
}

fn add_scalar_attributes(
    metadata: &mut Metadata,
    product: &RawProduct,
    category_url: &str,
    category_slug: &str,
) {
    metadata.insert_opt("Артикул", product.vendor_code.as_ref());
    metadata.insert("Код товара", product.uuid.as_str());
    metadata.insert_opt("Страна", product.country_name.as_deref());
    metadata.insert_opt("Код страны", product.country_code.as_deref());
    metadata.insert_opt("Доступное количество", product.quantity_total);
    metadata.insert("Категория URL", category_url);
    metadata.insert("Категория slug", category_slug);
    metadata.insert_opt("Новинка", flag(product.new));
    metadata.insert_opt("Рекомендуемое", flag(product.recomended));
    metadata.insert_opt("Енограмма", flag(product.enogram));
    metadata.insert_opt("Аксиома", flag(product.axioma));
    metadata.insert_opt("Подарочная упаковка", flag(product.gift_package));
    metadata.insert_opt("Цена оффлайн", product.offline_price.as_ref());
    metadata.insert_opt("Избранное", flag(product.favorite));
    metadata.insert_opt("Количество в наличии", product.quantity.as_ref());
    metadata.insert_opt("Предупреждение", product.warning.as_deref());
    metadata.insert_opt("Статус", product.status.as_deref());
    metadata.insert_opt("Заголовок наличия", product.availability_title.as_deref());
}

fn add_filter_labels(metadata: &mut Metadata, labels: &[FilterLabel]) {
    for label in labels {
        if label.filter.is_empty() || label.title.is_empty() {
            continue;
        }
        let key = filter_display_name(&label.filter);

        let range_values = label
            .values
            .as_ref()
            .filter(|values| label.kind == "range" && !values.is_empty());
        if let Some(values) = range_values {
            if let Some((min, max)) = values.bounds() {
                let value = if min == max {
                    min.to_string()
                } else {
                    format!("{min} - {max}")
                };
                metadata.insert(key, value);
            }
            continue;
        }

        let lower = label.title.to_lowercase();
        if lower != "да" && lower != "нет" {
            metadata.insert(key, label.title.as_str());
        }
    }
}

fn add_category(metadata: &mut Metadata, category: &Category) {
    metadata.insert("Категория товара", category.name.as_str());
    metadata.insert("Категория UUID", category.uuid.as_str());
    metadata.insert("Категория slug", category.slug.as_str());
    metadata.insert_opt("Цвет фона категории", category.background_color.as_deref());

    if let Some(parent) = &category.parent {
        metadata.insert("Родительская категория", parent.name.as_str());
        metadata.insert("Родительская категория UUID", parent.uuid.as_str());
        metadata.insert("Родительская категория slug", parent.slug.as_str());
    }
}

fn add_description_blocks(metadata: &mut Metadata, blocks: &[DescriptionBlock]) {
    for block in blocks {
        if block.code.is_empty() || block.title.is_empty() {
            continue;
        }
        if let Some(value) = block_value(block) {
            metadata.insert(block.title.as_str(), value);
        }
    }
}

/// Rendered value of a description block, if it has one.
///
/// Blocks that list values render them (`select`) or need both bounds
/// (`range`); blocks without values only render a `range` from `min`.
fn block_value(block: &DescriptionBlock) -> Option<String> {
    let unit = &block.unit;
    if !block.values.is_empty() {
        if block.is_select() {
            let names: Vec<&str> = block.enabled_values().map(|v| v.name.as_str()).collect();
            return (!names.is_empty()).then(|| names.join(", "));
        }
        if block.is_range() {
            let (min, max) = (block.min.as_ref()?, block.max.as_ref()?);
            return Some(if min == max {
                format!("{min}{unit}")
            } else {
                format!("{min} - {max}{unit}")
            });
        }
        return None;
    }

    if !block.is_range() {
        return None;
    }
    let min = block.min.as_ref()?;
    Some(match &block.max {
        Some(max) if max != min => format!("{min} - {max}{unit}"),
        _ => format!("{min}{unit}"),
    })
}

/// Action labels and price details.
fn add_promotions(metadata: &mut Metadata, product: &RawProduct) {
    let actions: Vec<&str> = product
        .action_labels
        .iter()
        .map(|label| label.title.as_str())
        .filter(|title| !title.is_empty())
        .collect();
    if !actions.is_empty() {
        metadata.insert("Акции", actions.join(", "));
    }

    let details: Vec<String> = product
        .price_details
        .iter()
        .filter_map(|detail| {
            if !detail.title.is_empty() {
                return Some(detail.title.clone());
            }
            let (previous, current) = (detail.prev_price.as_ref()?, detail.price.as_ref()?);
            let (prev_value, cur_value) = (previous.as_f64()?, current.as_f64()?);
            if prev_value == 0.0 || cur_value == 0.0 {
                return None;
            }
            let pct = format_float(discount_percent(prev_value, cur_value));
            Some(format!("Скидка {pct}% (было {previous}, стало {current})"))
        })
        .collect();
    if !details.is_empty() {
        metadata.insert("Детали цен", details.join("; "));
    }
}

fn add_store_totals(metadata: &mut Metadata, product: &RawProduct) {
    let stores = product.stores();
    if stores.is_empty() {
        return;
    }
    metadata.insert("Количество магазинов", stores.len());

    let total: i64 = stores
        .iter()
        .filter_map(|store| {
            let quantity = store
                .quantity
                .as_ref()
                .map_or_else(|| DEFAULT_STORE_QUANTITY.to_owned(), ToString::to_string);
            leading_integer(&quantity)
        })
        .sum();
    if total > 0 {
        metadata.insert("Количество во всех магазинах", total);
    }
}

fn add_gastronomics(metadata: &mut Metadata, product: &RawProduct) {
    for (group, items) in &product.gastronomics {
        let GastronomicGroup::Items(items) = items else {
            continue;
        };
        let titles: Vec<&str> = items
            .iter()
            .map(|item| item.title.as_str())
            .filter(|title| !title.is_empty())
            .collect();
        if titles.is_empty() {
            continue;
        }
        let key = format!(
            "Гастрономические сочетания ({})",
            gastronomic_display_name(group)
        );
        metadata.insert(key, MetaValue::Text(titles.join(", ")));
    }
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
