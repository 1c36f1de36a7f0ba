pub mod app_config;
pub mod categories;
pub mod cities;
pub mod config;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use categories::{
    load_categories, load_categories_or_default, validate_categories, CategoriesFile,
    CategoryTarget, DEFAULT_CATEGORY_URLS,
};
pub use cities::{load_cities, CityRef};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_API_BASE_URL, DEFAULT_CITY_UUID,
};
pub use records::{
    Assets, CategoryRecord, CityRecord, ExportRecord, MetaValue, Metadata, PriceData, Stock,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[source] serde_yaml::Error),

    #[error("failed to parse cities file {path}: {source}")]
    CitiesFileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cities file {path} not found; run `alko-cli cities` first to collect city identifiers")]
    CitiesFileMissing { path: String },

    #[error("config validation failed: {0}")]
    Validation(String),
}
