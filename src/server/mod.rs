//! Local server: static files plus the "load more" endpoint

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cms::ContentSource;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{url_for, DateFormatter};
use crate::listing::fetch_formatted;
use crate::templates::{PostView, TemplateRenderer};
use crate::Blog;

/// Server state
pub struct ServerState {
    public_dir: PathBuf,
    config: SiteConfig,
    source: Arc<dyn ContentSource>,
    formatter: DateFormatter,
    renderer: TemplateRenderer,
}

impl ServerState {
    pub fn new(blog: &Blog, source: Arc<dyn ContentSource>) -> crate::Result<Self> {
        Ok(Self {
            public_dir: blog.public_dir.clone(),
            config: blog.config.clone(),
            source,
            formatter: blog.date_formatter(),
            renderer: TemplateRenderer::new()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MoreQuery {
    cursor: Option<String>,
}

/// Next page as the page script consumes it
#[derive(Debug, Serialize, Deserialize)]
pub struct MoreResponse {
    pub next_page: Option<String>,
    pub page: u32,
    pub results: Vec<Post>,
    /// Rendered entries to append to the list
    pub html: String,
}

/// Build the router for a prepared state
pub fn router(state: Arc<ServerState>) -> Router {
    let static_files =
        ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    // same path the generated page posts to, under the site root
    let api_path = url_for(&state.config, "api/posts");

    Router::new()
        .route(&api_path, get(more_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(blog, blog.content_source()?)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Follow a cursor for the page script and hand back the formatted page
async fn more_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<MoreQuery>,
) -> Response {
    let Some(cursor) = query.cursor.filter(|c| !c.trim().is_empty()) else {
        return (StatusCode::BAD_REQUEST, "missing cursor").into_response();
    };

    if !state.source.is_trusted_cursor(&cursor) {
        tracing::warn!("Rejected cursor outside the content API: {}", cursor);
        return (StatusCode::BAD_REQUEST, "untrusted cursor").into_response();
    }

    let page = match fetch_formatted(state.source.as_ref(), &state.formatter, &cursor).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", cursor, e);
            return (StatusCode::BAD_GATEWAY, "content source unavailable").into_response();
        }
    };

    let html = match state
        .renderer
        .render_items(&PostView::from_posts(&state.config, &page.results))
    {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Failed to render posts: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "render failed").into_response();
        }
    };

    tracing::debug!("Served page {} ({} posts)", page.page, page.results.len());

    Json(MoreResponse {
        next_page: page.next_page,
        page: page.page,
        results: page.results,
        html,
    })
    .into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
