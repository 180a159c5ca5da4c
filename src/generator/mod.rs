//! Generator module - writes the home page into the public directory

use std::fs;

use crate::content::PostPagination;
use crate::error::Result;
use crate::listing::PostListState;
use crate::templates::{IndexView, TemplateRenderer};
use crate::Blog;

/// File holding the build-time first page
pub const POSTS_JSON: &str = "posts.json";

/// Static page generator using Tera templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Write `index.html` for the listing and the raw first page as `posts.json`
    pub fn generate(&self, initial: &PostPagination, state: &PostListState) -> Result<()> {
        // Ensure public directory exists
        fs::create_dir_all(&self.blog.public_dir)?;

        let view = IndexView::new(&self.blog.config, &self.blog.i18n, state);
        let html = self.renderer.render_index(&view)?;
        let index_path = self.blog.public_dir.join("index.html");
        fs::write(&index_path, html)?;
        tracing::debug!("Wrote {:?}", index_path);

        let json_path = self.blog.public_dir.join(POSTS_JSON);
        fs::write(&json_path, serde_json::to_string_pretty(initial)?)?;
        tracing::debug!("Wrote {:?}", json_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::testing::post;
    use crate::config::SiteConfig;

    #[test]
    fn test_generate_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());

        let initial = PostPagination {
            next_page: Some("/api?page=2".to_string()),
            results: vec![post("a", "2021-03-01", "T1")],
        };
        let display = PostPagination {
            next_page: initial.next_page.clone(),
            results: vec![post("a", "01 mar 2021", "T1")],
        };

        Generator::new(&blog)
            .unwrap()
            .generate(&initial, &PostListState::new(display))
            .unwrap();

        let html = fs::read_to_string(dir.path().join("public/index.html")).unwrap();
        assert!(html.contains("01 mar 2021"));
        assert!(html.contains("Carregar mais posts"));

        let json = fs::read_to_string(dir.path().join("public").join(POSTS_JSON)).unwrap();
        let saved: PostPagination = serde_json::from_str(&json).unwrap();
        assert_eq!(saved, initial);
    }
}
