//! Metadata client for the TMDB API.
//!
//! Supplies display names, release dates, ratings, posters, and genres
//! when a title is added to the catalog. Movies and dramas hit different
//! endpoints with differently-named fields; both map to [`TitleMetadata`].

use chrono::{NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use shortscout_core::title::{KIND_DRAMA, KIND_MOVIE};
use shortscout_core::types::Timestamp;

/// Default TMDB API base URL.
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

/// Default poster image base URL (w500 renditions).
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Errors from the metadata layer.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// TMDB returned a non-2xx status code.
    #[error("Metadata API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// One metadata search hit, normalized across movies and dramas.
#[derive(Debug, Clone)]
pub struct TitleMetadata {
    pub provider_id: i64,
    pub kind: String,
    pub name: String,
    pub release_date: Option<Timestamp>,
    /// 0-10 vote average.
    pub rating: f64,
    pub poster_path: Option<String>,
    pub genre_ids: Vec<i64>,
    pub overview: String,
}

impl TitleMetadata {
    /// Full poster URL, if a poster exists.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
    }
}

/// HTTP client for the TMDB API.
pub struct TmdbApi {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl TmdbApi {
    /// Create a client against the default endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_url(DEFAULT_API_URL.to_string(), api_key)
    }

    /// Create a client against a custom endpoint (used by tests and
    /// proxies).
    pub fn with_url(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    /// Search movie metadata by name (Korean locale).
    pub async fn search_movies(&self, query: &str) -> Result<Vec<TitleMetadata>, MetadataError> {
        let raw: RawSearchPage<RawMovie> = self.get_search("movie", query).await?;
        Ok(raw.results.into_iter().map(RawMovie::into_metadata).collect())
    }

    /// Search drama (TV) metadata by name (Korean locale).
    pub async fn search_dramas(&self, query: &str) -> Result<Vec<TitleMetadata>, MetadataError> {
        let raw: RawSearchPage<RawTv> = self.get_search("tv", query).await?;
        Ok(raw.results.into_iter().map(RawTv::into_metadata).collect())
    }

    async fn get_search<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<RawSearchPage<T>, MetadataError> {
        let response = self
            .client
            .get(format!("{}/search/{endpoint}", self.api_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", "ko-KR"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Parse TMDB's `YYYY-MM-DD` release date, tolerating the empty strings
/// the API returns for unreleased or obscure entries.
pub fn parse_release_date(raw: &str) -> Option<Timestamp> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

/* --------------------------------------------------------------------------
Wire types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
struct RawSearchPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RawMovie {
    id: i64,
    title: String,
    #[serde(default)]
    release_date: String,
    #[serde(default)]
    vote_average: f64,
    poster_path: Option<String>,
    #[serde(default)]
    genre_ids: Vec<i64>,
    #[serde(default)]
    overview: String,
}

impl RawMovie {
    fn into_metadata(self) -> TitleMetadata {
        TitleMetadata {
            provider_id: self.id,
            kind: KIND_MOVIE.to_string(),
            name: self.title,
            release_date: parse_release_date(&self.release_date),
            rating: self.vote_average,
            poster_path: self.poster_path,
            genre_ids: self.genre_ids,
            overview: self.overview,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTv {
    id: i64,
    name: String,
    #[serde(default)]
    first_air_date: String,
    #[serde(default)]
    vote_average: f64,
    poster_path: Option<String>,
    #[serde(default)]
    genre_ids: Vec<i64>,
    #[serde(default)]
    overview: String,
}

impl RawTv {
    fn into_metadata(self) -> TitleMetadata {
        TitleMetadata {
            provider_id: self.id,
            kind: KIND_DRAMA.to_string(),
            name: self.name,
            release_date: parse_release_date(&self.first_air_date),
            rating: self.vote_average,
            poster_path: self.poster_path,
            genre_ids: self.genre_ids,
            overview: self.overview,
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn release_date_parsing() {
        let parsed = parse_release_date("2003-11-21").unwrap();
        assert_eq!(parsed.year(), 2003);
        assert_eq!(parsed.month(), 11);
        assert!(parse_release_date("").is_none());
        assert!(parse_release_date("not-a-date").is_none());
    }

    #[test]
    fn movie_hit_maps_to_metadata() {
        let raw: RawMovie = serde_json::from_str(
            r#"{
                "id": 670,
                "title": "올드보이",
                "release_date": "2003-11-21",
                "vote_average": 8.3,
                "poster_path": "/abc.jpg",
                "genre_ids": [18, 53],
                "overview": "15년의 감금"
            }"#,
        )
        .unwrap();
        let meta = raw.into_metadata();
        assert_eq!(meta.kind, KIND_MOVIE);
        assert_eq!(meta.name, "올드보이");
        assert!(meta.release_date.is_some());
        assert_eq!(meta.poster_url().as_deref(), Some("https://image.tmdb.org/t/p/w500/abc.jpg"));
    }

    #[test]
    fn tv_hit_tolerates_missing_fields() {
        let raw: RawTv = serde_json::from_str(r#"{ "id": 93405, "name": "미생" }"#).unwrap();
        let meta = raw.into_metadata();
        assert_eq!(meta.kind, KIND_DRAMA);
        assert!(meta.release_date.is_none());
        assert_eq!(meta.rating, 0.0);
        assert!(meta.genre_ids.is_empty());
    }
}
