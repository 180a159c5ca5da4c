//! Prismic REST API v2 client

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::ContentSource;
use crate::config::{CmsConfig, ENDPOINT_ENV};
use crate::content::{Post, PostData, PostsPage};
use crate::error::{Error, Result};

/// API root document, only the refs matter here
#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// One page of `documents/search`
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default)]
    next_page: Option<String>,
    #[serde(default)]
    results: Vec<Document>,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    first_publication_date: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
}

impl Document {
    /// Keep only the fields the listing shows
    fn into_post(self) -> Post {
        Post {
            uid: self.uid,
            first_publication_date: self.first_publication_date,
            data: PostData {
                title: text_field(&self.data, "title"),
                subtitle: text_field(&self.data, "subtitle"),
                author: text_field(&self.data, "author"),
            },
        }
    }
}

impl From<SearchResponse> for PostsPage {
    fn from(response: SearchResponse) -> Self {
        Self {
            next_page: response.next_page,
            page: response.page,
            results: response
                .results
                .into_iter()
                .map(Document::into_post)
                .collect(),
        }
    }
}

/// Read a key text field, or flatten a rich text field to plain text
fn text_field(data: &serde_json::Value, key: &str) -> String {
    match data.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(blocks)) => blocks
            .iter()
            .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

/// HTTP client for a Prismic repository
#[derive(Debug, Clone)]
pub struct PrismicClient {
    http: reqwest::Client,
    endpoint: Url,
    access_token: Option<String>,
}

impl PrismicClient {
    pub fn new(config: &CmsConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(Error::Config(format!(
                "cms.endpoint is not set (configure it in _config.yml or {})",
                ENDPOINT_ENV
            )));
        }

        let endpoint = Url::parse(config.endpoint.trim()).map_err(|e| {
            Error::Config(format!("invalid cms.endpoint {:?}: {}", config.endpoint, e))
        })?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("spacetraveling/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            access_token: config.access_token.clone(),
        })
    }

    /// Look up the master ref the search must be pinned to
    async fn master_ref(&self) -> Result<String> {
        let mut url = self.endpoint.clone();
        if let Some(token) = &self.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }

        tracing::debug!("Fetching API info from {}", self.endpoint);
        let info: ApiInfo = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| Error::MissingMasterRef(self.endpoint.to_string()))
    }

    fn search_url(&self, reference: &str, document_type: &str, page_size: u32) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("invalid cms.endpoint {}", self.endpoint)))?
            .pop_if_empty()
            .push("documents")
            .push("search");

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("ref", reference)
                .append_pair("q", &format!("[[at(document.type,\"{}\")]]", document_type))
                .append_pair("pageSize", &page_size.to_string());
            if let Some(token) = &self.access_token {
                query.append_pair("access_token", token);
            }
        }

        Ok(url)
    }

    /// Resolve a cursor against the endpoint and check it stays on the API host
    fn resolve_cursor(&self, cursor: &str) -> Result<Url> {
        let url = match Url::parse(cursor) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .endpoint
                .join(cursor)
                .map_err(|_| Error::UntrustedCursor(cursor.to_string()))?,
            Err(_) => return Err(Error::UntrustedCursor(cursor.to_string())),
        };

        let same_origin = url.scheme() == self.endpoint.scheme()
            && url.host_str() == self.endpoint.host_str()
            && url.port_or_known_default() == self.endpoint.port_or_known_default();

        if same_origin {
            Ok(url)
        } else {
            Err(Error::UntrustedCursor(cursor.to_string()))
        }
    }

    async fn search(&self, url: Url) -> Result<PostsPage> {
        let response: SearchResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(
            "Received page {} with {} documents (more: {})",
            response.page,
            response.results.len(),
            response.next_page.is_some()
        );

        Ok(response.into())
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query_by_type(&self, document_type: &str, page_size: u32) -> Result<PostsPage> {
        let reference = self.master_ref().await?;
        let url = self.search_url(&reference, document_type, page_size)?;
        tracing::info!(
            "Querying {:?} documents from {} ({} per page)",
            document_type,
            self.endpoint,
            page_size
        );
        self.search(url).await
    }

    async fn fetch_page(&self, cursor: &str) -> Result<PostsPage> {
        let url = self.resolve_cursor(cursor)?;
        tracing::debug!("Following cursor {}", url);
        self.search(url).await
    }

    fn is_trusted_cursor(&self, cursor: &str) -> bool {
        self.resolve_cursor(cursor).is_ok()
    }
}
