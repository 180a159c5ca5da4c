//! Display state of the post listing

use crate::content::{Post, PostPagination, PostsPage};

/// The only ways the listing state changes
#[derive(Debug, Clone)]
pub enum Transition {
    /// First page, dates already formatted
    Init(PostPagination),
    /// A fetched page, dates already formatted, tagged with the load that asked for it
    AppendPage { generation: u64, page: PostsPage },
    /// No further pages; drops the cursor and invalidates loads in flight
    Exhausted,
}

/// What `apply` did with a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// Response to a load superseded by a newer one; nothing changed
    Stale,
}

/// Posts on screen, the cursor to the next page, and the page index
///
/// The post sequence is append-only and keeps insertion order. No
/// de-duplication is done across pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListState {
    posts: Vec<Post>,
    next_page: Option<String>,
    current_page: u32,
    generation: u64,
}

impl PostListState {
    pub fn new(initial: PostPagination) -> Self {
        let mut state = Self::default();
        state.apply(Transition::Init(initial));
        state
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Whether the "load more" control is shown
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Start a load: returns the generation ticket and the cursor to fetch
    ///
    /// `None` once the cursor is gone; no request should be issued then.
    pub fn begin_load(&mut self) -> Option<(u64, String)> {
        let cursor = self.next_page.clone()?;
        self.generation += 1;
        Some((self.generation, cursor))
    }

    pub fn apply(&mut self, transition: Transition) -> Applied {
        match transition {
            Transition::Init(initial) => {
                self.posts = initial.results;
                self.next_page = initial.next_page;
                self.current_page = 1;
                // bump so loads started before a re-init come back stale
                self.generation += 1;
            }
            Transition::AppendPage { generation, page } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Dropping page {} from load {} (latest is {})",
                        page.page,
                        generation,
                        self.generation
                    );
                    return Applied::Stale;
                }
                self.posts.extend(page.results);
                self.next_page = page.next_page;
                self.current_page = page.page;
            }
            Transition::Exhausted => {
                self.next_page = None;
                self.generation += 1;
            }
        }
        Applied::Applied
    }
}
