use alko_core::PriceData;

use crate::parse::{discount_percent, format_float};
use crate::types::{RawProduct, Scalar};

/// Current price, original price and sale tag.
///
/// Missing or negative prices read as 0. The original price falls back to
/// the current one, and the sale tag is set only when a previous
/// price is present and above a positive current price.
pub fn build_price(product: &RawProduct) -> PriceData {
    let current = product
        .price
        .as_ref()
        .and_then(Scalar::as_f64)
        .unwrap_or(0.0)
        .max(0.0);
    let previous = product
        .prev_price
        .as_ref()
        .and_then(Scalar::as_f64)
        .map(|p| p.max(0.0));
    let original = previous.unwrap_or(current);

    let sale_tag = match previous {
        Some(previous) if previous > current && current > 0.0 => {
            let percent = discount_percent(previous, current);
            format!("Скидка {}%", format_float(percent))
        }
        _ => String::new(),
    };

    PriceData {
        current,
        original,
        sale_tag,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(value: serde_json::Value) -> RawProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn discounted_price_has_sale_tag() {
        let price = build_price(&product(json!({"price": 80, "prev_price": 100})));
        assert!((price.current - 80.0).abs() < f64::EPSILON);
        assert!((price.original - 100.0).abs() < f64::EPSILON);
        assert_eq!(price.sale_tag, "Скидка 20.0%");
    }

    #[test]
    fn fractional_discount_keeps_one_decimal() {
        let price = build_price(&product(json!({"price": 200, "prev_price": 300})));
        assert_eq!(price.sale_tag, "Скидка 33.3%");
    }

    #[test]
    fn missing_prev_price_uses_current_as_original() {
        let price = build_price(&product(json!({"price": 149.9})));
        assert!((price.original - 149.9).abs() < f64::EPSILON);
        assert!(price.sale_tag.is_empty());
    }

    #[test]
    fn higher_current_price_is_not_a_sale() {
        let price = build_price(&product(json!({"price": 120, "prev_price": 100})));
        assert!((price.original - 100.0).abs() < f64::EPSILON);
        assert!(price.sale_tag.is_empty());
    }

    #[test]
    fn zero_current_price_is_not_a_sale() {
        let price = build_price(&product(json!({"price": 0, "prev_price": 100})));
        assert!(price.sale_tag.is_empty());
    }

    #[test]
    fn missing_price_reads_as_zero() {
        let price = build_price(&product(json!({"price": null})));
        assert!(price.current.abs() < f64::EPSILON);
        assert!(price.original.abs() < f64::EPSILON);
    }

    #[test]
    fn negative_price_is_clamped() {
        let price = build_price(&product(json!({"price": -5})));
        assert!(price.current.abs() < f64::EPSILON);
    }

    #[test]
    fn negative_prev_price_is_clamped() {
        let price = build_price(&product(json!({"price": 50, "prev_price": -10})));
        assert!(price.original.abs() < f64::EPSILON);
        assert!(price.sale_tag.is_empty());
    }

    #[test]
    fn non_numeric_prev_price_falls_back_to_current() {
        let price = build_price(&product(json!({"price": 50, "prev_price": "NaN"})));
        assert!((price.original - 50.0).abs() < f64::EPSILON);
        let value = serde_json::to_value(&price).unwrap();
        assert_eq!(value["original"], json!(50.0));
    }

    #[test]
    fn half_tenth_discount_rounds_to_even() {
        let price = build_price(&product(json!({"price": 15, "prev_price": 16})));
        assert_eq!(price.sale_tag, "Скидка 6.2%");
    }
}
