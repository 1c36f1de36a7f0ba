use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A city from the storefront's city listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    pub uuid: String,
    pub name: String,
    pub slug: String,
}

/// A catalog category as listed for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub slug: String,
}

/// A product normalized into the flat export schema.
///
/// Field names on the wire match the downstream export format, hence the
/// `RPC` rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Capture time, unix seconds.
    pub timestamp: i64,
    /// Storefront product UUID.
    #[serde(rename = "RPC")]
    pub rpc: String,
    pub url: String,
    pub title: String,
    /// Deduplicated; serialized in sorted order.
    pub marketing_tags: BTreeSet<String>,
    /// Empty when neither brand nor manufacturer is known.
    pub brand: String,
    /// `[parent category name, category name]`.
    pub section: [String; 2],
    pub price_data: PriceData,
    pub stock: Stock,
    pub assets: Assets,
    pub metadata: Metadata,
    /// Number of purchasable variants, always at least 1.
    pub variants: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    pub current: f64,
    pub original: f64,
    /// `"Скидка N%"` when the product is discounted, otherwise empty.
    pub sale_tag: String,
}

impl PriceData {
    /// Returns `true` when the original price is above a positive current price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.original > self.current && self.current > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub in_stock: bool,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assets {
    pub main_image: String,
    pub set_images: Vec<String>,
    pub view360: Vec<String>,
    pub video: Vec<String>,
}

/// A metadata value: free text or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Number(serde_json::Number),
    Text(String),
}

impl MetaValue {
    /// Values that carry no information and are never stored.
    fn is_blank(&self) -> bool {
        match self {
            MetaValue::Text(s) => s.is_empty() || s == NEGATIVE_FLAG,
            MetaValue::Number(_) => false,
        }
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_owned())
    }
}

impl From<serde_json::Number> for MetaValue {
    fn from(value: serde_json::Number) -> Self {
        MetaValue::Number(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Number(value.into())
    }
}

impl From<usize> for MetaValue {
    fn from(value: usize) -> Self {
        MetaValue::Number(value.into())
    }
}

/// How a false boolean flag reads in the source data. Never stored.
const NEGATIVE_FLAG: &str = "Нет";

/// Flattened product attributes keyed by display name.
///
/// Insertion drops empty strings and the negative flag `"Нет"`, so a
/// serialized `Metadata` only carries meaningful values. Later inserts for
/// the same key overwrite earlier ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetaValue>);

impl Metadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key` unless the value is blank.
    ///
    /// Returns `true` when the value was stored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> bool {
        let value = value.into();
        if value.is_blank() {
            return false;
        }
        self.0.insert(key.into(), value);
        true
    }

    /// Stores `value` if present; see [`Metadata::insert`].
    pub fn insert_opt<V: Into<MetaValue>>(&mut self, key: &str, value: Option<V>) -> bool {
        value.is_some_and(|v| self.insert(key, v))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Text value under `key`, if the key holds text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(MetaValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.0.iter()
    }
}
