//! Low-level string and number helpers shared by the normalizers.
//!
//! Patterns are compiled once; see [`crate::normalize`] for how these compose
//! into full product normalization.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::ScraperError;
use crate::types::{ProductDetailEnvelope, RawProduct};

static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[.,]?\d*").expect("valid regex"));

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Unwraps a product detail response.
///
/// Returns `Ok(None)` when the API reports `success: false` or an empty
/// `results` payload. `context_id` identifies the product in errors.
///
/// # Errors
///
/// Returns [`ScraperError::Deserialize`] when the envelope or the product
/// itself does not have the expected shape.
pub fn parse_product_detail(
    body: &serde_json::Value,
    context_id: &str,
) -> Result<Option<RawProduct>, ScraperError> {
    let context = || format!("product {context_id}");
    let envelope =
        ProductDetailEnvelope::deserialize(body).map_err(|source| ScraperError::Deserialize {
            context: context(),
            source,
        })?;

    if !envelope.success {
        return Ok(None);
    }
    let Some(results) = envelope.results.filter(|r| !is_empty_value(r)) else {
        return Ok(None);
    };

    RawProduct::deserialize(&results)
        .map(Some)
        .map_err(|source| ScraperError::Deserialize {
            context: context(),
            source,
        })
}

fn is_empty_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(o) => o.is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// The first number-like token (`"0.5"`, `"0,75"`, `"100"`) in `text`.
#[must_use]
pub(crate) fn first_number_token(text: &str) -> Option<&str> {
    NUMBER_TOKEN.find(text).map(|m| m.as_str())
}

/// The first run of ASCII digits in `text`, parsed.
///
/// Store quantities arrive as display strings such as `"12 шт"`.
#[must_use]
pub(crate) fn leading_integer(text: &str) -> Option<i64> {
    LEADING_INTEGER
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

#[must_use]
pub(crate) fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Collapses runs of whitespace to single spaces and trims the ends.
#[must_use]
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips HTML tags and flattens line breaks into single spaces.
#[must_use]
pub(crate) fn clean_html_text(html: &str) -> String {
    collapse_whitespace(&HTML_TAG.replace_all(html, ""))
}

/// Lowercased word tokens of `text` with any leading number removed, so that
/// `"100г"` yields `"г"` and `"0.75 л"` yields `"л"`.
pub(crate) fn unit_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|token| {
            token
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
}

/// Rounds to one decimal place, halves to even (`6.25` becomes `6.2`).
#[must_use]
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Formats a float the way prices and percentages are shown: integral values
/// keep one decimal (`20.0`), others print their shortest form (`12.5`).
#[must_use]
pub(crate) fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Discount of `current` relative to `original`, in percent, one decimal.
#[must_use]
pub(crate) fn discount_percent(original: f64, current: f64) -> f64 {
    round1((1.0 - current / original) * 100.0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn first_number_token_accepts_decimal_separators() {
        assert_eq!(first_number_token("0,75 л"), Some("0,75"));
        assert_eq!(first_number_token("объем 0.5"), Some("0.5"));
        assert_eq!(first_number_token("Белое"), None);
    }

    #[test]
    fn leading_integer_reads_display_quantity() {
        assert_eq!(leading_integer("12 шт"), Some(12));
        assert_eq!(leading_integer("шт"), None);
    }

    #[test]
    fn clean_html_text_strips_tags_and_newlines() {
        let html = "<p>Светлое\r\nпиво</p>  <b>мягкий</b> вкус";
        assert_eq!(clean_html_text(html), "Светлое пиво мягкий вкус");
    }

    #[test]
    fn clean_html_text_joins_adjacent_tags() {
        assert_eq!(clean_html_text("<b>Крепкое</b><i>пиво</i>"), "Крепкоепиво");
    }

    #[test]
    fn unit_tokens_strip_leading_numbers() {
        let tokens: Vec<String> = unit_tokens("Чипсы 100г, Вино 0.75 Л").collect();
        assert_eq!(tokens, vec!["чипсы", "г", "вино", "л"]);
    }

    #[test]
    fn unit_tokens_do_not_split_words() {
        let tokens: Vec<String> = unit_tokens("Пиво Жигулевское").collect();
        assert!(!tokens.iter().any(|t| t == "л"));
    }

    #[test]
    fn format_float_keeps_one_decimal_for_integral_values() {
        assert_eq!(format_float(20.0), "20.0");
        assert_eq!(format_float(12.5), "12.5");
        assert_eq!(format_float(33.3), "33.3");
    }

    #[test]
    fn discount_percent_rounds_to_one_decimal() {
        assert!((discount_percent(100.0, 80.0) - 20.0).abs() < f64::EPSILON);
        assert!((discount_percent(300.0, 200.0) - 33.3).abs() < 1e-9);
    }

    #[test]
    fn round1_sends_halves_to_even() {
        assert!((round1(6.25) - 6.2).abs() < 1e-9);
        assert!((round1(6.75) - 6.8).abs() < 1e-9);
    }

    #[test]
    fn parse_product_detail_unwraps_results() {
        let body = json!({"success": true, "results": {"uuid": "p-1", "name": "Пиво"}});
        let product = parse_product_detail(&body, "pivo").unwrap().unwrap();
        assert_eq!(product.uuid, "p-1");
        assert_eq!(product.name, "Пиво");
    }

    #[test]
    fn parse_product_detail_unsuccessful_is_none() {
        let body = json!({"success": false, "results": {"uuid": "p-1"}});
        assert!(parse_product_detail(&body, "pivo").unwrap().is_none());
    }

    #[test]
    fn parse_product_detail_empty_results_is_none() {
        for results in [json!(null), json!({}), json!([])] {
            let body = json!({"success": true, "results": results});
            assert!(parse_product_detail(&body, "pivo").unwrap().is_none());
        }
    }

    #[test]
    fn parse_product_detail_null_success_is_none() {
        let body = json!({"success": null, "results": {"uuid": "p-1"}});
        assert!(parse_product_detail(&body, "pivo").unwrap().is_none());
    }

    #[test]
    fn parse_product_detail_reports_malformed_product() {
        let body = json!({"success": true, "results": {"uuid": "p-1", "filter_labels": "oops"}});
        let err = parse_product_detail(&body, "pivo").unwrap_err();
        assert!(matches!(
            err,
            ScraperError::Deserialize { ref context, .. } if context == "product pivo"
        ));
    }
}
