use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Krasnodar, the city the catalog export is priced for unless overridden.
pub const DEFAULT_CITY_UUID: &str = "4a70f9e0-46ae-11e7-83ff-00155d026416";

pub const DEFAULT_API_BASE_URL: &str = "https://alkoteka.com/web-api/v1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// config pointed at the production API.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("ALKO_ENV", "development"))?;
    let log_level = or_default("ALKO_LOG_LEVEL", "info");

    let api_base_url = or_default("ALKO_API_BASE_URL", DEFAULT_API_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(invalid(
            "ALKO_API_BASE_URL",
            format!("expected an http(s) URL, got \"{api_base_url}\""),
        ));
    }

    let city_uuid = or_default("ALKO_CITY_UUID", DEFAULT_CITY_UUID)
        .parse::<uuid::Uuid>()
        .map_err(|e| invalid("ALKO_CITY_UUID", e.to_string()))?;

    let cities_path = PathBuf::from(or_default("ALKO_CITIES_PATH", "./cities_uuid.json"));
    let categories_path = PathBuf::from(or_default(
        "ALKO_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));
    let output_dir = PathBuf::from(or_default("ALKO_OUTPUT_DIR", "./output"));

    let scraper_request_timeout_secs = parse_u64("ALKO_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default("ALKO_SCRAPER_USER_AGENT", "alko/0.1 (catalog-export)");
    let scraper_max_concurrent_requests = parse_usize("ALKO_SCRAPER_MAX_CONCURRENT_REQUESTS", "4")?;
    let scraper_inter_request_delay_ms = parse_u64("ALKO_SCRAPER_INTER_REQUEST_DELAY_MS", "250")?;
    let scraper_max_retries = parse_u32("ALKO_SCRAPER_MAX_RETRIES", "3")?;
    let scraper_retry_backoff_base_secs = parse_u64("ALKO_SCRAPER_RETRY_BACKOFF_BASE_SECS", "5")?;

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        city_uuid,
        cities_path,
        categories_path,
        output_dir,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_concurrent_requests,
        scraper_inter_request_delay_ms,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ALKO_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
