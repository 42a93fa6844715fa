use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::classify::classifier::TagClassifier;
use crate::classify::keywords::{default_language_patterns, default_license_patterns};
use crate::normalize::{NormalizeOptions, DEFAULT_TITLE};
use crate::query::sort::SortMode;

/// Root configuration structure, deserialized from `.awesome-index/config.toml`.
///
/// Every section and field is optional; omitted values take the built-in
/// defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub classifier: ClassifierConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Title used when the source has no `#` heading or `title` field.
    pub default_title: String,
    /// Description language precedence for structured sources.
    pub description_languages: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let options = NormalizeOptions::default();
        CatalogConfig {
            default_title: options.default_title,
            description_languages: options.description_languages,
        }
    }
}

/// Keyword tables, as regex fragments matched case-insensitively.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub licenses: Vec<String>,
    pub languages: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            licenses: default_license_patterns(),
            languages: default_language_patterns(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Used when `--sort` is not given.
    pub default_sort: SortMode,
}

impl Config {
    /// Compile the keyword tables. Invalid patterns are an error.
    pub fn classifier(&self) -> Result<TagClassifier> {
        TagClassifier::new(&self.classifier.licenses, &self.classifier.languages)
            .context("invalid [classifier] configuration")
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        let default_title = if self.catalog.default_title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            self.catalog.default_title.clone()
        };
        NormalizeOptions {
            default_title,
            description_languages: self.catalog.description_languages.clone(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<base_dir>/.awesome-index/config.toml`
/// 3. `~/.config/awesome-index/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".awesome-index").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("awesome-index")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
