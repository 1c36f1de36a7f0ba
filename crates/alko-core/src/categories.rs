use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Catalog sections crawled when no categories file is present.
pub const DEFAULT_CATEGORY_URLS: &[&str] = &["https://alkoteka.com/catalog/krepkiy-alkogol"];

/// A storefront catalog section whose products the product pipeline exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTarget {
    /// Public catalog URL, e.g. `"https://alkoteka.com/catalog/produkty-1"`.
    pub url: String,
}

impl CategoryTarget {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The root category slug the API filters on: the last path segment of
    /// the catalog URL (`".../catalog/produkty-1"` → `"produkty-1"`).
    #[must_use]
    pub fn slug(&self) -> &str {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("")
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryTarget>,
}

impl CategoriesFile {
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            categories: DEFAULT_CATEGORY_URLS
                .iter()
                .map(|url| CategoryTarget::new(*url))
                .collect(),
        }
    }
}

/// Load and validate the category list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let categories_file: CategoriesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CategoriesFileParse)?;

    validate_categories(&categories_file)?;

    Ok(categories_file)
}

/// Like [`load_categories`], but falls back to [`CategoriesFile::defaults`]
/// when `path` does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_categories_or_default(path: &Path) -> Result<CategoriesFile, ConfigError> {
    if path.exists() {
        load_categories(path)
    } else {
        Ok(CategoriesFile::defaults())
    }
}

/// Checks that the list is non-empty and every slug is present and unique.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] describing the first problem found.
pub fn validate_categories(categories_file: &CategoriesFile) -> Result<(), ConfigError> {
    if categories_file.categories.is_empty() {
        return Err(ConfigError::Validation(
            "categories file lists no categories".to_string(),
        ));
    }

    let mut seen_slugs = HashSet::new();

    for category in &categories_file.categories {
        let slug = category.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category url '{}' has an empty slug",
                category.url
            )));
        }

        if !seen_slugs.insert(slug.to_string()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category slug: '{slug}' (from url '{}')",
                category.url
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
