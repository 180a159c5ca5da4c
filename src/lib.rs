//! spacetraveling: a blog front-end over a headless CMS
//!
//! Fetches paginated post listings from a Prismic repository, renders them
//! with localized dates, and grows the list one page at a time through the
//! opaque `next_page` cursor the API hands out.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod listing;
pub mod server;
pub mod templates;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Translations for the configured language
    pub i18n: i18n::I18n,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let mut i18n = i18n::I18n::new(&config.language);
        if let Err(e) = i18n.load_languages(base_dir.join(&config.i18n_dir)) {
            tracing::warn!("Failed to load language overrides: {}", e);
        }

        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            i18n,
            base_dir,
            public_dir,
        }
    }

    /// Date formatter for the configured language, pattern and timezone
    pub fn date_formatter(&self) -> helpers::DateFormatter {
        helpers::DateFormatter::new(&self.i18n, &self.config.date_format, self.config.tz())
    }

    /// Client for the configured content API
    pub fn content_source(&self) -> Result<Arc<dyn cms::ContentSource>> {
        Ok(Arc::new(cms::PrismicClient::new(&self.config.cms)?))
    }

    /// Generate the static home page
    pub async fn generate(&self) -> anyhow::Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}
