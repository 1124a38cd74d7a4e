//! Search client for the YouTube Data API.
//!
//! One call per analysis run: a hashtag query for a title's shorts,
//! duration-filtered, sampling at most one page of results. An empty
//! item list is a valid response (the "no videos found" terminal state),
//! distinct from a transport or API error.

use serde::Deserialize;

use shortscout_core::signal::{CandidatePosting, SEARCH_PAGE_SIZE};
use shortscout_core::title::KIND_DRAMA;
use shortscout_core::types::Timestamp;

/// Default base URL of the search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Errors from the video search layer.
#[derive(Debug, thiserror::Error)]
pub enum VideoSearchError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The platform returned a non-2xx status code.
    #[error("Video search API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Search result for one title query.
#[derive(Debug, Clone)]
pub struct VideoSearchResponse {
    /// Platform-reported total result count; may exceed the sampled page.
    pub total_count: u64,
    /// Sampled postings, at most [`SEARCH_PAGE_SIZE`].
    pub postings: Vec<CandidatePosting>,
}

/// Build the hashtag search query for a title.
///
/// Hashtag queries match how shorts creators actually tag uploads, which
/// keeps the result set on-topic compared to a free-text title search.
pub fn shorts_query(kind: &str, name: &str) -> String {
    let prefix = if kind == KIND_DRAMA { "드라마" } else { "영화" };
    format!("#{prefix} #{name} shorts")
}

/// HTTP client for the video-platform search API.
pub struct VideoSearchApi {
    client: reqwest::Client,
    search_url: String,
    api_key: String,
}

impl VideoSearchApi {
    /// Create a client against the default endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_url(DEFAULT_SEARCH_URL.to_string(), api_key)
    }

    /// Create a client against a custom endpoint (used by tests and
    /// proxies).
    pub fn with_url(search_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            search_url,
            api_key,
        }
    }

    /// Search shorts for a query, sampling one page.
    pub async fn search_shorts(
        &self,
        query: &str,
    ) -> Result<VideoSearchResponse, VideoSearchError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("videoDuration", "short"),
                ("maxResults", &SEARCH_PAGE_SIZE.to_string()),
                ("key", &self.api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VideoSearchError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let raw: RawSearchResponse = response.json().await?;
        Ok(convert_response(raw))
    }
}

/* --------------------------------------------------------------------------
Wire types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(rename = "pageInfo")]
    page_info: Option<RawPageInfo>,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawPageInfo {
    #[serde(rename = "totalResults")]
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    snippet: RawSnippet,
}

#[derive(Debug, Deserialize)]
struct RawSnippet {
    #[serde(rename = "channelId")]
    channel_id: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(rename = "publishedAt")]
    published_at: Timestamp,
}

/// Map the wire response into engine input. The platform sometimes omits
/// `pageInfo`; the sampled count is the floor for the total then.
fn convert_response(raw: RawSearchResponse) -> VideoSearchResponse {
    let sampled = raw.items.len() as u64;
    let total_count = raw
        .page_info
        .map(|p| p.total_results)
        .unwrap_or(sampled)
        .max(sampled);

    let postings = raw
        .items
        .into_iter()
        .map(|item| CandidatePosting {
            channel_id: item.snippet.channel_id,
            channel_name: item.snippet.channel_title,
            published_at: item.snippet.published_at,
        })
        .collect();

    VideoSearchResponse {
        total_count,
        postings,
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
