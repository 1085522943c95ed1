use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub selectors: SelectorConfig,
    pub cache: CacheConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    pub user_agent: String,
    /// Sent as the `From` header; left out of the request when empty.
    pub contact: String,
    pub timeout_secs: u64,
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// CSS selectors locating the FAQ structure on the page.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    pub category_heading: String,
    pub accordion_container: String,
    pub accordion_item: String,
    pub item_title: String,
    pub item_content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub sheet_name: String,
    pub file_prefix: String,
}

/// Layers built-in defaults, the optional settings file and `APP_*`
/// environment variables (`APP_SOURCE__URL`, `APP_CACHE__PATH`, ...).
pub fn load_config(settings_path: &Path) -> Result<AppConfig, ConfigError> {
    let settings = with_defaults(Config::builder())?
        .add_source(
            File::new(&settings_path.to_string_lossy(), FileFormat::Toml).required(false),
        )
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<AppConfig>()
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .set_default("source.url", "https://bospop.nl/faq/")?
        .set_default("source.user_agent", "BospopFAQBot/1.0")?
        .set_default("source.contact", "")?
        .set_default("source.timeout_secs", 10_u64)?
        .set_default("selectors.category_heading", "h2.elementor-heading-title")?
        .set_default(
            "selectors.accordion_container",
            "div.jupiterx-advanced-accordion-wrapper",
        )?
        .set_default(
            "selectors.accordion_item",
            "div.jupiterx-single-advanced-accordion-wrapper",
        )?
        .set_default("selectors.item_title", "span.jx-ac-title")?
        .set_default("selectors.item_content", "div.jupiterx-ac-content-is-editor")?
        .set_default("cache.path", "data/faq_cache.json")?
        .set_default("export.sheet_name", "FAQ")?
        .set_default("export.file_prefix", "bospop_faq")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_apply_without_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("missing.toml")).unwrap();

        assert_eq!(config.source.url, "https://bospop.nl/faq/");
        assert_eq!(config.source.timeout(), Duration::from_secs(10));
        assert_eq!(config.selectors.item_title, "span.jx-ac-title");
        assert_eq!(config.cache.path, "data/faq_cache.json");
        assert_eq!(config.export.sheet_name, "FAQ");
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Settings.toml");
        fs::write(
            &path,
            "[source]\ncontact = \"faq@example.org\"\ntimeout_secs = 3\n\n[cache]\npath = \"cache/faq.json\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.source.contact, "faq@example.org");
        assert_eq!(config.source.timeout_secs, 3);
        assert_eq!(config.cache.path, "cache/faq.json");
        assert_eq!(config.source.user_agent, "BospopFAQBot/1.0");
    }
}
