//! Content module - posts and pagination payloads

mod post;

pub use post::{format_posts, Post, PostData, PostPagination, PostsPage};
