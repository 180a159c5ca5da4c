//! Built-in home page templates using Tera template engine
//!
//! Templates are embedded directly in the binary.

use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::Result;
use crate::helpers::{post_url, url_for};
use crate::i18n::I18n;
use crate::listing::PostListState;

/// Template renderer with the embedded home page
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("home/layout.html")),
            ("index.html", include_str!("home/index.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("home/partials/header.html"),
            ),
            (
                "partials/post_items.html",
                include_str!("home/partials/post_items.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the full home page
    pub fn render_index(&self, view: &IndexView) -> Result<String> {
        self.render("index.html", &Context::from_serialize(view)?)
    }

    /// Render only the post entries, for appending to a rendered page
    pub fn render_items(&self, posts: &[PostView]) -> Result<String> {
        let mut context = Context::new();
        context.insert("posts", posts);
        self.render("partials/post_items.html", &context)
    }
}

/// One entry of the post list, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub href: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
}

impl PostView {
    /// Expects a display copy (date already formatted)
    pub fn from_post(config: &SiteConfig, post: &Post) -> Self {
        Self {
            href: post_url(config, post.uid.as_deref()),
            title: post.data.title.clone(),
            subtitle: post.data.subtitle.clone(),
            author: post.data.author.clone(),
            date: post.first_publication_date.clone().unwrap_or_default(),
        }
    }

    pub fn from_posts(config: &SiteConfig, posts: &[Post]) -> Vec<Self> {
        posts.iter().map(|p| Self::from_post(config, p)).collect()
    }
}

/// Context of the home page
#[derive(Debug, Clone, Serialize)]
pub struct IndexView {
    pub lang: String,
    pub version: String,
    pub site_title: String,
    pub page_title: String,
    pub home_link: String,
    pub root: String,
    pub no_posts: String,
    pub load_more: String,
    pub api_url: String,
    pub next_page: Option<String>,
    pub posts: Vec<PostView>,
}

impl IndexView {
    pub fn new(config: &SiteConfig, i18n: &I18n, state: &PostListState) -> Self {
        Self {
            lang: i18n.language().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            site_title: config.title.clone(),
            page_title: i18n.get("page_title"),
            home_link: i18n.get("home_link"),
            root: url_for(config, ""),
            no_posts: i18n.get("no_posts"),
            load_more: i18n.get("load_more"),
            api_url: url_for(config, "api/posts"),
            next_page: state.next_page().map(str::to_string),
            posts: PostView::from_posts(config, state.posts()),
        }
    }
}
