//! Response types for the alkoteka `web-api/v1` endpoints.
//!
//! ## Observed shape
//!
//! ### Envelopes
//! Listing endpoints return `{"results": [...], "meta": {...}}`. The city
//! listing paginates with `meta.has_more_pages`; the product listing reports
//! `meta.total` and honours `per_page`. The product detail endpoint returns
//! `{"success": true, "results": {...}}`.
//!
//! ### Nulls
//! Almost every product field may be `null` instead of omitted, including
//! lists (`filter_labels`, `price_details`). Lists, strings and flags use
//! [`null_as_default`] so that `null`, absent and empty all read the same.
//!
//! ### Mixed scalars
//! `min`/`max` on description blocks, `vendor_code`, `offline_price` and
//! per-store `quantity` arrive as numbers on some products and strings on
//! others. They are modelled as [`Scalar`], which renders numbers exactly as
//! the API sent them (`0.5`, `1`, `1.0`).

use std::collections::BTreeMap;
use std::fmt;

use alko_core::MetaValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserializes `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so that a missing key behaves the same.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes `null` and `[]` as `T::default()`.
///
/// The API sends an empty list in place of an empty object for some map
/// fields (`gastronomics`, `availability`).
pub(crate) fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(T::default()),
        serde_json::Value::Array(items) if items.is_empty() => Ok(T::default()),
        value => T::deserialize(value).map_err(serde::de::Error::custom),
    }
}

/// A JSON scalar whose type varies between products.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Finite numeric value; numeric strings such as `"0.5"` are accepted too,
/// but `"NaN"` and `"inf"` are not.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse::<f64>().ok(),
            Scalar::Bool(_) => None,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Numbers compare by value, so `1` equals `1.0`.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => a.as_f64() == b.as_f64(),
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(true) => f.write_str("True"),
            Scalar::Bool(false) => f.write_str("False"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&Scalar> for MetaValue {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::Number(n) => MetaValue::Number(n.clone()),
            other => MetaValue::Text(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// One page of `GET /city?page=N`.
#[derive(Debug, Deserialize)]
pub struct CityPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CityItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: CityPageMeta,
}

#[derive(Debug, Default, Deserialize)]
pub struct CityPageMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_more_pages: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

/// `GET /category?city_uuid=...`.
#[derive(Debug, Deserialize)]
pub struct CategoryList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CategoryItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

/// `GET /product?city_uuid=...&root_category_slug=...[&per_page=N]`.
#[derive(Debug, Deserialize)]
pub struct ProductList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ProductSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: ProductListMeta,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductListMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
}

/// A product as it appears in a category listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductSummary {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Detail endpoint key; products without one cannot be fetched.
    #[serde(default)]
    pub slug: Option<String>,
    /// Canonical storefront URL; only the listing carries it.
    #[serde(default)]
    pub product_url: Option<String>,
}

/// Envelope of `GET /product/{slug}?city_uuid=...`.
///
/// `results` stays untyped here so that a product failing to parse can be
/// logged verbatim.
#[derive(Debug, Deserialize)]
pub struct ProductDetailEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub results: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Product detail
// ---------------------------------------------------------------------------

/// A product from the detail endpoint. Read-only input to normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub subname: Option<String>,
    #[serde(default)]
    pub vendor_code: Option<Scalar>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub price: Option<Scalar>,
    #[serde(default)]
    pub prev_price: Option<Scalar>,
    #[serde(default)]
    pub offline_price: Option<Scalar>,

    #[serde(default)]
    pub quantity_total: Option<i64>,
    #[serde(default)]
    pub quantity: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available: bool,
    #[serde(default, deserialize_with = "empty_as_default")]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub availability_title: Option<String>,
    #[serde(default)]
    pub warning: Option<String>,
    /// `"active"` when the key is absent; an explicit `null` stays `None`.
    #[serde(default = "status_when_absent")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub new: bool,
    /// Spelled this way by the API.
    #[serde(default, deserialize_with = "null_as_default")]
    pub recomended: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_online_price: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enogram: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub axioma: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gift_package: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favorite: bool,

    #[serde(default, deserialize_with = "empty_as_default")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filter_labels: Vec<FilterLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description_blocks: Vec<DescriptionBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text_blocks: Vec<TextBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_labels: Vec<ActionLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_details: Vec<PriceDetail>,
    /// Pairing group name (`"poultry"`, `"cheese"`, ...) to recommended items.
    #[serde(default, deserialize_with = "empty_as_default")]
    pub gastronomics: BTreeMap<String, GastronomicGroup>,
}

impl RawProduct {
    /// Category name and parent category name, each empty when absent.
    #[must_use]
    pub fn category_names(&self) -> (&str, &str) {
        let Some(category) = &self.category else {
            return ("", "");
        };
        let parent = category.parent.as_deref().map_or("", |p| p.name.as_str());
        (category.name.as_str(), parent)
    }

    /// Stores listed under `availability`.
    #[must_use]
    pub fn stores(&self) -> &[Store] {
        self.availability
            .as_ref()
            .map_or(&[], |a| a.stores.as_slice())
    }

    pub fn labels_with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a FilterLabel> {
        self.filter_labels.iter().filter(move |l| l.filter == code)
    }

    pub fn blocks_with_code<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a DescriptionBlock> {
        self.description_blocks
            .iter()
            .filter(move |b| b.code == code)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "empty_as_default")]
    pub parent: Option<Box<Category>>,
}

/// A facet attached to a product, keyed by filter code (`obem`, `cvet`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterLabel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub filter: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub values: Option<LabelValues>,
}

/// `values` of a filter label: `{min, max}` for range facets, a list or
/// anything else for the rest.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelValues {
    List(Vec<serde_json::Value>),
    Range(RangeValues),
    Other(serde_json::Value),
}

impl LabelValues {
    /// The `(min, max)` pair when both bounds are present.
    #[must_use]
    pub fn bounds(&self) -> Option<(&Scalar, &Scalar)> {
        match self {
            LabelValues::Range(RangeValues {
                min: Some(min),
                max: Some(max),
            }) => Some((min, max)),
            _ => None,
        }
    }

    /// `true` for `{}`, `[]`, `""` and bound-less ranges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            LabelValues::List(items) => items.is_empty(),
            LabelValues::Range(r) => r.min.is_none() && r.max.is_none(),
            LabelValues::Other(serde_json::Value::String(s)) => s.is_empty(),
            LabelValues::Other(serde_json::Value::Bool(b)) => !b,
            LabelValues::Other(serde_json::Value::Null) => true,
            LabelValues::Other(_) => false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RangeValues {
    #[serde(default)]
    pub min: Option<Scalar>,
    #[serde(default)]
    pub max: Option<Scalar>,
}

/// A typed product attribute (`select` or `range`) with an optional unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptionBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default)]
    pub min: Option<Scalar>,
    #[serde(default)]
    pub max: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<BlockValue>,
}

impl DescriptionBlock {
    #[must_use]
    pub fn is_range(&self) -> bool {
        self.kind == "range"
    }

    #[must_use]
    pub fn is_select(&self) -> bool {
        self.kind == "select"
    }

    pub fn enabled_values(&self) -> impl Iterator<Item = &BlockValue> {
        self.values.iter().filter(|v| v.is_enabled())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// An absent flag means enabled; an explicit `null` means disabled.
    #[serde(default = "enabled_when_absent", deserialize_with = "null_as_default")]
    pub enabled: bool,
}

impl BlockValue {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

fn enabled_when_absent() -> bool {
    true
}

#[allow(clippy::unnecessary_wraps)]
fn status_when_absent() -> Option<String> {
    Some("active".to_owned())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionLabel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// A promotion applied to the price, either titled or given as a price pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub price: Option<serde_json::Number>,
    #[serde(default)]
    pub prev_price: Option<serde_json::Number>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Availability {
    #[serde(default, deserialize_with = "null_as_default")]
    pub stores: Vec<Store>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Store {
    /// Display quantity such as `"5 шт"`.
    #[serde(default)]
    pub quantity: Option<Scalar>,
}

/// Items of one gastronomic pairing group. Anything other than a list of
/// items is kept as [`GastronomicGroup::Other`] and ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GastronomicGroup {
    Items(Vec<GastronomicItem>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GastronomicItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}
