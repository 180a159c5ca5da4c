//! Post and pagination models

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::helpers::DateFormatter;

/// A blog post as handed to the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Document uid, used for the `/post/{uid}` route
    #[serde(default)]
    pub uid: Option<String>,

    /// Publication timestamp, or the formatted date on a display copy
    #[serde(default)]
    pub first_publication_date: Option<String>,

    pub data: PostData,
}

/// Post text fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl Post {
    /// Display copy with the timestamp replaced by the localized date
    ///
    /// The original timestamp is not kept. A post without a date stays
    /// without one.
    pub fn formatted(&self, formatter: &DateFormatter) -> Result<Post> {
        let first_publication_date = match &self.first_publication_date {
            Some(raw) => Some(formatter.format_str(raw)?),
            None => None,
        };

        Ok(Post {
            uid: self.uid.clone(),
            first_publication_date,
            data: self.data.clone(),
        })
    }
}

/// Format every post of a batch, preserving order
pub fn format_posts(posts: &[Post], formatter: &DateFormatter) -> Result<Vec<Post>> {
    posts.iter().map(|p| p.formatted(formatter)).collect()
}

/// The initial page handed to the listing at build time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPagination {
    /// Opaque continuation URL; `None` when there are no further pages
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub results: Vec<Post>,
}

/// A page as returned by the pagination endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Post>,
}

fn first_page() -> u32 {
    1
}

impl From<PostsPage> for PostPagination {
    fn from(page: PostsPage) -> Self {
        Self {
            next_page: page.next_page,
            results: page.results,
        }
    }
}
