//! Initialize a new blog directory

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# spacetraveling configuration

# Site
title: spacetraveling
language: pt-BR
timezone: UTC

# URL
root: /
post_dir: post

# Directory
public_dir: public
i18n_dir: languages

# Date format (date-fns tokens: dd MMM yyyy -> 01 mar 2021)
date_format: dd MMM yyyy

# Content source (PRISMIC_API_ENDPOINT / PRISMIC_ACCESS_TOKEN override these)
cms:
  endpoint: https://your-repository.cdn.prismic.io/api/v2
  access_token:
  document_type: posts
  page_size: 1
"#;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("{:?} already exists", config_path);
    }

    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("languages"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;
    tracing::debug!("Wrote {:?}", config_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("blog");

        init_site(&target).unwrap();

        let config = SiteConfig::load(target.join("_config.yml")).unwrap();
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.cms.page_size, 1);
        assert!(config.cms.access_token.is_none());
        assert!(target.join("languages").is_dir());

        assert!(init_site(&target).is_err());
    }
}
