//! Normalization from raw alkoteka payloads to the export records in
//! [`alko_core`].
//!
//! Each part of an [`ExportRecord`] has its own resolver; this module wires
//! them together. String and number helpers live in [`crate::parse`].

mod brand;
mod metadata;
mod price;
mod stock;
mod tags;
mod title;
mod variants;

use alko_core::{Assets, CategoryRecord, CityRecord, ExportRecord};
use chrono::{DateTime, Utc};

use crate::error::ScraperError;
use crate::types::{CategoryItem, CityItem, RawProduct};

pub use brand::resolve_brand;
pub use metadata::build_metadata;
pub use price::build_price;
pub use stock::build_stock;
pub use tags::build_tags;
pub use title::build_title;
pub use variants::count_variants;

/// Where a product was found; not part of the detail payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductContext {
    /// Catalog URL the product was listed under.
    pub category_url: String,
    pub category_slug: String,
    /// Storefront URL from the product listing.
    pub product_url: String,
}

/// Normalizes a product detail payload into an [`ExportRecord`].
///
/// Output depends only on the inputs; `captured_at` becomes the record
/// timestamp.
///
/// # Errors
///
/// Returns [`ScraperError::Normalization`] if the product has no UUID.
pub fn normalize_product(
    product: &RawProduct,
    context: &ProductContext,
    captured_at: DateTime<Utc>,
) -> Result<ExportRecord, ScraperError> {
    if product.uuid.trim().is_empty() {
        return Err(ScraperError::Normalization {
            product_id: context.product_url.clone(),
            reason: "product has no uuid".into(),
        });
    }

    let (category, parent) = product.category_names();

    Ok(ExportRecord {
        timestamp: captured_at.timestamp(),
        rpc: product.uuid.clone(),
        url: context.product_url.clone(),
        title: build_title(product),
        marketing_tags: build_tags(product),
        brand: resolve_brand(product),
        section: [parent.to_owned(), category.to_owned()],
        price_data: build_price(product),
        stock: build_stock(product),
        assets: build_assets(product),
        metadata: build_metadata(product, &context.category_url, &context.category_slug),
        variants: count_variants(product),
    })
}

/// The product image as the main and only image; no 360 views or video.
pub fn build_assets(product: &RawProduct) -> Assets {
    let main_image = product.image_url.clone().unwrap_or_default();
    let set_images = if main_image.is_empty() {
        Vec::new()
    } else {
        vec![main_image.clone()]
    };
    Assets {
        main_image,
        set_images,
        ..Assets::default()
    }
}

#[must_use]
pub fn normalize_city(city: CityItem) -> CityRecord {
    CityRecord {
        uuid: city.uuid,
        name: city.name,
        slug: city.slug,
    }
}

#[must_use]
pub fn normalize_category(category: CategoryItem) -> CategoryRecord {
    CategoryRecord {
        name: category.name,
        slug: category.slug,
    }
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
            product_url: "https://alkoteka.com/product/pivo-1/zhigulevskoe_12345".to_string(),
        }
    }

    fn beer() -> RawProduct {
        serde_json::from_value(json!({
            "uuid": "0f1e2d3c-0000-11ee-8000-00155d026416",
            "name": "Пиво Жигулевское",
            "price": 80,
            "prev_price": 100,
            "quantity_total": 12,
            "image_url": "https://web.alkoteka.com/resize/350_500/product/zhigulevskoe.png",
            "new": true,
            "category": {
                "uuid": "c-1",
                "name": "Светлое пиво",
                "slug": "svetloe-pivo",
                "parent": {"uuid": "c-0", "name": "Пиво", "slug": "pivo"}
            },
            "filter_labels": [{"filter": "obem", "title": "0.5"}],
            "description_blocks": [
                {"code": "brend", "title": "Бренд", "type": "select",
                 "values": [{"name": "Жигули", "enabled": true}]}
            ],
            "availability": {"stores": [{"quantity": "12 шт"}]}
        }))
        .unwrap()
    }

    #[test]
    fn normalize_product_assembles_record() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = normalize_product(&beer(), &context(), at).unwrap();

        assert_eq!(record.timestamp, at.timestamp());
        assert_eq!(record.rpc, "0f1e2d3c-0000-11ee-8000-00155d026416");
        assert_eq!(record.url, context().product_url);
        assert_eq!(record.title, "Пиво Жигулевское, 0.5 Л");
        assert!(record.marketing_tags.contains("Новинка"));
        assert!(record.marketing_tags.contains("Скидка"));
        assert_eq!(record.brand, "Жигули");
        assert_eq!(
            record.section,
            ["Пиво".to_string(), "Светлое пиво".to_string()]
        );
        assert_eq!(record.price_data.sale_tag, "Скидка 20.0%");
        assert!(record.stock.in_stock);
        assert_eq!(record.stock.count, 12);
        assert_eq!(
            record.assets.set_images,
            vec![record.assets.main_image.clone()]
        );
        assert!(record.assets.view360.is_empty());
        assert!(record.assets.video.is_empty());
        assert_eq!(record.metadata.text("Бренд"), Some("Жигули"));
        assert_eq!(record.variants, 1);
    }

    #[test]
    fn normalize_product_is_idempotent_apart_from_timestamp() {
        let product = beer();
        let first = normalize_product(&product, &context(), Utc::now()).unwrap();
        let mut second = normalize_product(&product, &context(), Utc::now()).unwrap();
        second.timestamp = first.timestamp;
        assert_eq!(first, second);
    }

    #[test]
    fn normalize_product_rejects_missing_uuid() {
        let product: RawProduct = serde_json::from_value(json!({"name": "Пиво"})).unwrap();
        let err = normalize_product(&product, &context(), Utc::now()).unwrap_err();
        assert!(matches!(err, ScraperError::Normalization { .. }));
    }

    #[test]
    fn minimal_product_gets_defaults() {
        let product: RawProduct = serde_json::from_value(json!({"uuid": "p-1"})).unwrap();
        let record = normalize_product(&product, &context(), Utc::now()).unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.brand, "");
        assert_eq!(record.section, [String::new(), String::new()]);
        assert!(record.price_data.current.abs() < f64::EPSILON);
        assert!(!record.stock.in_stock);
        assert_eq!(record.assets, Assets::default());
        assert_eq!(record.variants, 1);
    }

    #[test]
    fn normalize_city_copies_fields() {
        let city = CityItem {
            uuid: "4a70f9e0-46ae-11e7-83ff-00155d026416".to_string(),
            name: "Краснодар".to_string(),
            slug: "krasnodar".to_string(),
        };
        let record = normalize_city(city);
        assert_eq!(record.name, "Краснодар");
        assert_eq!(record.slug, "krasnodar");
    }

    #[test]
    fn normalize_category_copies_fields() {
        let record = normalize_category(CategoryItem {
            name: "Пиво".to_string(),
            slug: "pivo".to_string(),
        });
        assert_eq!(
            record,
            CategoryRecord {
                name: "Пиво".to_string(),
                slug: "pivo".to_string()
            }
        );
    }
}
