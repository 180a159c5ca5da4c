//! Content source module - where posts come from
//!
//! The listing only ever needs two things from the headless CMS: the first
//! page of documents of a type, and whatever page an opaque cursor points to.

mod prismic;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::content::PostsPage;
use crate::error::Result;

pub use prismic::PrismicClient;

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Query the first page of documents of `document_type`
    async fn query_by_type(&self, document_type: &str, page_size: u32) -> Result<PostsPage>;

    /// Fetch the page an opaque `next_page` cursor points to
    async fn fetch_page(&self, cursor: &str) -> Result<PostsPage>;

    /// Returns true if `cursor` may be followed on behalf of a client
    fn is_trusted_cursor(&self, _cursor: &str) -> bool {
        true
    }
}
