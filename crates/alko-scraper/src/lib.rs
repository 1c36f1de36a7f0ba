pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod parse;
pub mod types;
pub mod vocab;

mod rate_limit;

pub use client::AlkotekaClient;
pub use error::ScraperError;
pub use normalize::{normalize_category, normalize_city, normalize_product, ProductContext};
pub use parse::parse_product_detail;
pub use types::{CategoryItem, CityItem, ProductSummary, RawProduct};
