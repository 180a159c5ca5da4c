//! Generate the static home page

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cms::ContentSource;
use crate::generator::Generator;
use crate::listing::{fetch_initial, PostListPage};
use crate::Blog;

/// Query the content API and write the home page
pub async fn run(blog: &Blog) -> Result<()> {
    let source = blog.content_source()?;
    run_with_source(blog, source).await
}

/// Same as `run`, against any content source
pub async fn run_with_source(blog: &Blog, source: Arc<dyn ContentSource>) -> Result<()> {
    let start = std::time::Instant::now();

    let initial = fetch_initial(source.as_ref(), &blog.config)
        .await
        .context("Failed to fetch the first page of posts")?;
    tracing::info!(
        "Fetched {} posts (more pages: {})",
        initial.results.len(),
        initial.next_page.is_some()
    );

    let page = PostListPage::new(source, blog.date_formatter(), &initial)?;

    let generator = Generator::new(blog)?;
    generator.generate(&initial, page.state())?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::testing::{post, MemorySource};
    use crate::config::SiteConfig;
    use crate::content::PostsPage;
    use std::fs;

    #[tokio::test]
    async fn test_generate_from_source() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());
        let source = Arc::new(MemorySource::new(PostsPage {
            next_page: None,
            page: 1,
            results: vec![post("a", "2021-03-01", "T1")],
        }));

        run_with_source(&blog, source).await.unwrap();

        let html = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(html.contains("<strong>T1</strong>"));
        assert!(html.contains("01 mar 2021"));
        assert!(!html.contains("Carregar mais posts"));
    }

    #[tokio::test]
    async fn test_generate_fails_on_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path().to_path_buf(), SiteConfig::default());
        let source = Arc::new(MemorySource::new(PostsPage {
            next_page: None,
            page: 1,
            results: vec![post("a", "not a date", "T1")],
        }));

        assert!(run_with_source(&blog, source).await.is_err());
        assert!(!blog.public_dir.join("index.html").exists());
    }
}
