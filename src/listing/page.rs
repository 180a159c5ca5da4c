//! The post listing page and its "load more" driver

use std::sync::Arc;

use super::state::{Applied, PostListState, Transition};
use crate::cms::ContentSource;
use crate::config::SiteConfig;
use crate::content::{format_posts, Post, PostPagination, PostsPage};
use crate::error::Result;
use crate::helpers::DateFormatter;

/// Result of a `load_more` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No cursor left; nothing was fetched
    NoMorePages,
    /// `count` posts were appended
    Appended { count: usize },
    /// The response arrived after a newer load and was dropped
    Stale,
}

/// A listing that grows one page at a time
pub struct PostListPage {
    source: Arc<dyn ContentSource>,
    formatter: DateFormatter,
    state: PostListState,
}

/// Fetch the build-time first page
pub async fn fetch_initial(
    source: &dyn ContentSource,
    config: &SiteConfig,
) -> Result<PostPagination> {
    let page = source
        .query_by_type(&config.cms.document_type, config.cms.page_size)
        .await?;
    Ok(page.into())
}

/// Fetch the page behind `cursor` with its dates formatted for display
pub async fn fetch_formatted(
    source: &dyn ContentSource,
    formatter: &DateFormatter,
    cursor: &str,
) -> Result<PostsPage> {
    let page = source.fetch_page(cursor).await?;
    Ok(PostsPage {
        results: format_posts(&page.results, formatter)?,
        ..page
    })
}

impl PostListPage {
    /// Build the page from an initial batch, formatting its dates
    pub fn new(
        source: Arc<dyn ContentSource>,
        formatter: DateFormatter,
        initial: &PostPagination,
    ) -> Result<Self> {
        let display = PostPagination {
            next_page: initial.next_page.clone(),
            results: format_posts(&initial.results, &formatter)?,
        };

        Ok(Self {
            source,
            formatter,
            state: PostListState::new(display),
        })
    }

    /// Query the content source for the first page and build the listing
    pub async fn load(
        source: Arc<dyn ContentSource>,
        formatter: DateFormatter,
        config: &SiteConfig,
    ) -> Result<Self> {
        let initial = fetch_initial(source.as_ref(), config).await?;
        tracing::info!(
            "Loaded {} posts (more pages: {})",
            initial.results.len(),
            initial.next_page.is_some()
        );
        Self::new(source, formatter, &initial)
    }

    pub fn state(&self) -> &PostListState {
        &self.state
    }

    pub fn posts(&self) -> &[Post] {
        self.state.posts()
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    /// Fetch the next page and append it
    ///
    /// A no-op without a cursor. On error the state is left as it was.
    pub async fn load_more(&mut self) -> Result<LoadOutcome> {
        let Some((generation, cursor)) = self.state.begin_load() else {
            tracing::debug!("No next page, skipping load");
            return Ok(LoadOutcome::NoMorePages);
        };

        let page = fetch_formatted(self.source.as_ref(), &self.formatter, &cursor).await?;
        Ok(self.complete(generation, page))
    }

    /// Apply a page fetched for load `generation`
    pub fn complete(&mut self, generation: u64, page: PostsPage) -> LoadOutcome {
        let count = page.results.len();
        let exhausted = page.next_page.is_none();

        match self.state.apply(Transition::AppendPage { generation, page }) {
            Applied::Stale => LoadOutcome::Stale,
            Applied::Applied => {
                if exhausted {
                    self.state.apply(Transition::Exhausted);
                }
                tracing::debug!(
                    "Appended {} posts, now showing {} (page {})",
                    count,
                    self.state.posts().len(),
                    self.state.current_page()
                );
                LoadOutcome::Appended { count }
            }
        }
    }

    /// Start a load without awaiting it; pair with `complete`
    pub fn begin_load(&mut self) -> Option<(u64, String)> {
        self.state.begin_load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::testing::{post, MemorySource};
    use crate::i18n::I18n;

    fn formatter() -> DateFormatter {
        DateFormatter::new(&I18n::new("pt-BR"), "dd MMM yyyy", chrono_tz::UTC)
    }

    fn first_page(next: Option<&str>) -> PostsPage {
        PostsPage {
            next_page: next.map(str::to_string),
            page: 1,
            results: vec![post("a", "2021-03-01", "T1")],
        }
    }

    fn second_page() -> PostsPage {
        PostsPage {
            next_page: None,
            page: 2,
            results: vec![post("b", "2021-04-19T19:25:28+0000", "T2")],
        }
    }

    async fn listing(source: Arc<MemorySource>) -> PostListPage {
        PostListPage::load(source, formatter(), &SiteConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_initial_render_formats_dates() {
        let source = Arc::new(MemorySource::new(first_page(Some("/api?page=2"))));
        let page = listing(source).await;

        assert_eq!(page.posts().len(), 1);
        assert_eq!(page.posts()[0].data.title, "T1");
        assert_eq!(
            page.posts()[0].first_publication_date.as_deref(),
            Some("01 mar 2021")
        );
        assert!(page.has_more());
    }

    #[tokio::test]
    async fn test_load_more_appends_and_hides_control() {
        let source = Arc::new(
            MemorySource::new(first_page(Some("/api?page=2"))).with_page("/api?page=2", second_page()),
        );
        let mut page = listing(source.clone()).await;

        let outcome = page.load_more().await.unwrap();
        assert_eq!(outcome, LoadOutcome::Appended { count: 1 });

        let uids: Vec<_> = page.posts().iter().filter_map(|p| p.uid.as_deref()).collect();
        assert_eq!(uids, vec!["a", "b"]);
        assert_eq!(
            page.posts()[1].first_publication_date.as_deref(),
            Some("19 abr 2021")
        );
        assert_eq!(page.state().current_page(), 2);
        assert!(!page.has_more());

        assert_eq!(page.load_more().await.unwrap(), LoadOutcome::NoMorePages);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_single_page_never_fetches() {
        let source = Arc::new(MemorySource::new(first_page(None)));
        let mut page = listing(source.clone()).await;

        assert!(!page.has_more());
        assert_eq!(page.load_more().await.unwrap(), LoadOutcome::NoMorePages);
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_state() {
        let source = Arc::new(MemorySource::new(first_page(Some("/api?page=2"))));
        let mut page = listing(source.clone()).await;
        let before = page.state().clone();

        assert!(page.load_more().await.is_err());
        assert_eq!(page.posts(), before.posts());
        assert_eq!(page.state().next_page(), Some("/api?page=2"));
        assert!(page.has_more());
    }

    #[tokio::test]
    async fn test_invalid_date_fails_before_append() {
        let mut bad = second_page();
        bad.results[0].first_publication_date = Some("yesterday".to_string());
        let source = Arc::new(
            MemorySource::new(first_page(Some("/api?page=2"))).with_page("/api?page=2", bad),
        );
        let mut page = listing(source).await;

        assert!(page.load_more().await.is_err());
        assert_eq!(page.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_loads_apply_once() {
        let source = Arc::new(
            MemorySource::new(first_page(Some("/api?page=2"))).with_page("/api?page=2", second_page()),
        );
        let mut page = listing(source.clone()).await;

        let (first, cursor) = page.begin_load().unwrap();
        let (second, _) = page.begin_load().unwrap();
        let fetched = fetch_formatted(source.as_ref(), &formatter(), &cursor)
            .await
            .unwrap();

        assert_eq!(
            page.complete(second, fetched.clone()),
            LoadOutcome::Appended { count: 1 }
        );
        assert_eq!(page.complete(first, fetched), LoadOutcome::Stale);
        assert_eq!(page.posts().len(), 2);
    }
}
