//! In-memory content source for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::ContentSource;
use crate::content::{Post, PostData, PostsPage};
use crate::error::{Error, Result};

pub fn post(uid: &str, date: &str, title: &str) -> Post {
    Post {
        uid: Some(uid.to_string()),
        first_publication_date: Some(date.to_string()),
        data: PostData {
            title: title.to_string(),
            subtitle: format!("{} subtitle", title),
            author: format!("{} author", title),
        },
    }
}

/// Serves a fixed first page and a map of cursor -> page
#[derive(Default)]
pub struct MemorySource {
    pub first: PostsPage,
    pub pages: Mutex<HashMap<String, PostsPage>>,
    pub fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(first: PostsPage) -> Self {
        Self {
            first,
            ..Self::default()
        }
    }

    pub fn with_page(self, cursor: &str, page: PostsPage) -> Self {
        if let Ok(mut pages) = self.pages.lock() {
            pages.insert(cursor.to_string(), page);
        }
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn query_by_type(&self, _document_type: &str, _page_size: u32) -> Result<PostsPage> {
        Ok(self.first.clone())
    }

    async fn fetch_page(&self, cursor: &str) -> Result<PostsPage> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let pages = self.pages.lock().unwrap();
        pages.get(cursor).cloned().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no page for {}", cursor),
            ))
        })
    }

    fn is_trusted_cursor(&self, cursor: &str) -> bool {
        cursor.starts_with('/')
    }
}
