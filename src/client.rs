//! HTTP search client for the Algolia Hacker News API.
//!
//! One GET per submitted search term, no retries, no pagination. The wire
//! shape is validated here so malformed data surfaces as
//! [`HnSearchError::MalformedResponse`] instead of leaking into rendering.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::error::{HnSearchError, Result};
use crate::story::Story;

/// Default search endpoint.
pub const API_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search";

/// Search client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL; the search term is attached as the `query` parameter.
    pub endpoint: String,
    /// Per-request timeout. A dead server becomes a fetch failure instead
    /// of a forever-loading UI.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: API_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Blocking search client. Cheap to clone the config, expensive to build
/// (connection pool), so the app shares one instance across worker threads.
#[derive(Debug)]
pub struct SearchClient {
    http: reqwest::blocking::Client,
    endpoint: Url,
}

impl SearchClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| HnSearchError::InvalidEndpoint(config.endpoint.clone(), e))?;
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("hnsearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HnSearchError::Http(config.endpoint.clone(), e))?;
        Ok(Self { http, endpoint })
    }

    /// The URL a given search term resolves to. Recomputed only on explicit
    /// submit, never per keystroke.
    pub fn request_url(&self, term: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("query", term);
        url
    }

    /// Issue a single GET for `term` and parse the result list.
    pub fn search(&self, term: &str) -> Result<Vec<Story>> {
        let url = self.request_url(term);
        tracing::debug!(%url, "issuing search request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|e| HnSearchError::Http(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HnSearchError::Status(status));
        }

        let body = response
            .text()
            .map_err(|e| HnSearchError::Http(url.to_string(), e))?;
        let stories = parse_search_response(&body)?;
        tracing::debug!(hits = stories.len(), "search request completed");
        Ok(stories)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<RawHit>,
}

/// Wire shape of one hit. Everything is optional on the wire; conversion
/// into [`Story`] decides what is actually required.
#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "objectID")]
    object_id: Option<String>,
    title: Option<String>,
    url: Option<String>,
    author: Option<String>,
    num_comments: Option<u64>,
    points: Option<i64>,
    created_at: Option<DateTime<Utc>>,
}

impl RawHit {
    fn into_story(self) -> Result<Story> {
        // The id is the identity of the record; a hit without one is not a
        // story we can ever remove or deduplicate.
        let object_id = self
            .object_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| HnSearchError::MalformedResponse("hit is missing its objectID".into()))?;

        Ok(Story {
            object_id,
            title: self.title.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            num_comments: self.num_comments.unwrap_or(0),
            points: self.points.unwrap_or(0),
            created_at: self.created_at,
        })
    }
}

/// Parse an API response body into the typed story list.
pub fn parse_search_response(body: &str) -> Result<Vec<Story>> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| HnSearchError::MalformedResponse(e.to_string()))?;
    response
        .hits
        .into_iter()
        .map(RawHit::into_story)
        .collect()
}
