//! OMDb API client.
//!
//! Every request carries the API key as a query parameter. Failures come
//! back as HTTP 200 with `"Response": "False"` and a human readable `Error`
//! string, so errors are classified from the body rather than the status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{CatalogItem, ContentKind, ItemDetails, Rating, SearchPage, NOT_AVAILABLE};
use super::{CatalogClient, CatalogError};

/// Default OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// OMDb API key (required).
    #[serde(default)]
    pub api_key: String,
    /// Base URL (default: https://www.omdbapi.com/).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Search every content kind instead of movies only.
    #[serde(default)]
    pub dual_mode: bool,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            timeout_secs: default_timeout(),
            dual_mode: false,
        }
    }
}

fn default_timeout() -> u64 {
    10
}

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    dual_mode: bool,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: OmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.trim().is_empty() {
            return Err(CatalogError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            dual_mode: config.dual_mode,
        })
    }

    /// Issue one GET and decode the body, classifying `"Response": "False"`.
    async fn request<T: DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let envelope: OmdbEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(CatalogError::Parse(format!(
                    "Unexpected response body: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(CatalogError::Upstream {
                    status: Some(status.as_u16()),
                    message: body,
                });
            }
        };

        if !envelope.is_success() {
            return Err(classify_error(status, envelope.error.unwrap_or_default()));
        }
        if !status.is_success() {
            return Err(CatalogError::Upstream {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            CatalogError::Parse(format!("Failed to parse catalog response: {}", e))
        })
    }
}

#[async_trait]
impl CatalogClient for OmdbClient {
    async fn search_by_term(&self, term: &str, page: u32) -> Result<SearchPage, CatalogError> {
        let term = term.trim();
        let page = page.max(1);

        debug!(
            "OMDb search: term='{}', page={}, dual_mode={}",
            term, page, self.dual_mode
        );

        let mut params = vec![("s", term.to_string()), ("page", page.to_string())];
        if !self.dual_mode {
            params.push(("type", "movie".to_string()));
        }

        let result: OmdbSearchResponse = self.request(&params).await?;

        let items: Vec<CatalogItem> = result.search.into_iter().map(|r| r.into()).collect();
        let total_count = result
            .total_results
            .as_deref()
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(items.len() as u32);

        Ok(SearchPage { items, total_count })
    }

    async fn fetch_by_id(&self, id: &str) -> Result<CatalogItem, CatalogError> {
        let id = id.trim();

        debug!("OMDb get title: id={}", id);

        let params = [("i", id.to_string()), ("plot", "full".to_string())];
        let details: OmdbTitleDetails = self.request(&params).await?;

        Ok(details.into())
    }
}

/// Map a provider error string onto the error taxonomy.
fn classify_error(status: StatusCode, message: String) -> CatalogError {
    let lowered = message.trim().to_lowercase();
    if lowered.contains("not found")
        || lowered.starts_with("incorrect imdb id")
        || lowered.starts_with("error getting data")
    {
        CatalogError::NotFound(message)
    } else if lowered.starts_with("too many results") {
        CatalogError::TooManyResults(message)
    } else {
        CatalogError::Upstream {
            status: (!status.is_success()).then(|| status.as_u16()),
            message,
        }
    }
}

/// `"N/A"` and blank strings become `None`.
fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != NOT_AVAILABLE
    })
}

// ============================================================================
// OMDb API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct OmdbEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbEnvelope {
    fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchHit>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchHit {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbTitleDetails {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Rated")]
    rated: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Writer")]
    writer: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Awards")]
    awards: Option<String>,
    #[serde(rename = "Metascore")]
    metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
    #[serde(rename = "BoxOffice")]
    box_office: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
}

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

// ============================================================================
// Conversions
// ============================================================================

fn kind_or_movie(kind: Option<String>) -> ContentKind {
    kind.filter(|k| !k.trim().is_empty())
        .map(ContentKind::from)
        .unwrap_or(ContentKind::Movie)
}

impl From<OmdbSearchHit> for CatalogItem {
    fn from(r: OmdbSearchHit) -> Self {
        Self {
            id: r.imdb_id,
            title: r.title,
            year: r.year,
            poster_url: r.poster.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            kind: kind_or_movie(r.kind),
            details: None, // Not available in search results
        }
    }
}

impl From<OmdbTitleDetails> for CatalogItem {
    fn from(d: OmdbTitleDetails) -> Self {
        let details = ItemDetails {
            rated: available(d.rated),
            released: available(d.released),
            runtime: available(d.runtime),
            genre: available(d.genre),
            director: available(d.director),
            writer: available(d.writer),
            actors: available(d.actors),
            plot: available(d.plot),
            language: available(d.language),
            country: available(d.country),
            awards: available(d.awards),
            metascore: available(d.metascore),
            imdb_rating: available(d.imdb_rating),
            imdb_votes: available(d.imdb_votes),
            box_office: available(d.box_office),
            ratings: d
                .ratings
                .into_iter()
                .map(|r| Rating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
        };

        Self {
            id: d.imdb_id,
            title: d.title,
            year: d.year,
            poster_url: d.poster.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            kind: kind_or_movie(d.kind),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard, dual_mode: bool) -> OmdbClient {
        OmdbClient::new(OmdbConfig {
            api_key: "test-key".to_string(),
            base_url: Some(server.url()),
            timeout_secs: 5,
            dual_mode,
        })
        .unwrap()
    }

    const INCEPTION_SEARCH: &str = r#"{
        "Search": [
            {"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie", "Poster": "https://img.example/inception.jpg"}
        ],
        "totalResults": "1",
        "Response": "True"
    }"#;

    const GUARDIANS_DETAIL: &str = r#"{
        "Title": "Guardians of the Galaxy Vol. 2",
        "Year": "2017",
        "Rated": "PG-13",
        "Released": "05 May 2017",
        "Runtime": "136 min",
        "Genre": "Action, Adventure, Comedy",
        "Director": "James Gunn",
        "Writer": "James Gunn, Dan Abnett, Andy Lanning",
        "Actors": "Chris Pratt, Zoe Saldana, Dave Bautista",
        "Plot": "The Guardians struggle to keep together as a team while dealing with their personal family issues.",
        "Language": "English",
        "Country": "United States",
        "Awards": "Nominated for 1 Oscar",
        "Poster": "https://img.example/gotg2.jpg",
        "Ratings": [
            {"Source": "Internet Movie Database", "Value": "7.6/10"},
            {"Source": "Rotten Tomatoes", "Value": "85%"}
        ],
        "Metascore": "67",
        "imdbRating": "7.6",
        "imdbVotes": "772,000",
        "imdbID": "tt3896198",
        "Type": "movie",
        "BoxOffice": "N/A",
        "Response": "True"
    }"#;

    #[tokio::test]
    async fn test_unreachable_catalog_is_retryable_transport_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = OmdbClient::new(OmdbConfig {
            api_key: "test-key".to_string(),
            base_url: Some(format!("http://127.0.0.1:{}/", port)),
            timeout_secs: 2,
            dual_mode: false,
        })
        .unwrap();

        let err = client.search_by_term("Inception", 1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)), "got {:?}", err);

        let failure = crate::search::SearchFailure::from_catalog(&err, "Inception");
        assert_eq!(failure.kind, crate::search::FailureKind::Transport);
        assert!(failure.kind.is_retryable());
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = OmdbClient::new(OmdbConfig::default());
        assert!(matches!(result, Err(CatalogError::NotConfigured(_))));
    }

    #[tokio::test]
    async fn test_search_by_term_basic_mode_filters_movies() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apikey".into(), "test-key".into()),
                Matcher::UrlEncoded("s".into(), "Inception".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("type".into(), "movie".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(INCEPTION_SEARCH)
            .create_async()
            .await;

        let client = client_for(&server, false);
        let page = client.search_by_term("  Inception ", 1).await.unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "tt1375666");
        assert_eq!(page.items[0].kind, ContentKind::Movie);
        assert!(page.items[0].details.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_by_term_dual_mode_omits_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::Regex(r"^apikey=test-key&s=Inception&page=2$".into()))
            .with_status(200)
            .with_body(INCEPTION_SEARCH)
            .create_async()
            .await;

        let client = client_for(&server, true);
        let page = client.search_by_term("Inception", 2).await.unwrap();

        assert_eq!(page.items.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
            .create_async()
            .await;

        let client = client_for(&server, false);
        let result = client.search_by_term("xyzxyzxyz-nomatch", 1).await;

        match result {
            Err(CatalogError::NotFound(msg)) => assert_eq!(msg, "Movie not found!"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_too_many_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Too many results."}"#)
            .create_async()
            .await;

        let client = client_for(&server, false);
        let result = client.search_by_term("the", 1).await;
        assert!(matches!(result, Err(CatalogError::TooManyResults(_))));
    }

    #[tokio::test]
    async fn test_invalid_key_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"Response":"False","Error":"Invalid API key!"}"#)
            .create_async()
            .await;

        let client = client_for(&server, false);
        let result = client.search_by_term("Inception", 1).await;

        match result {
            Err(CatalogError::Upstream { status, message }) => {
                assert_eq!(status, Some(401));
                assert_eq!(message, "Invalid API key!");
            }
            other => panic!("Expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let client = client_for(&server, false);
        let result = client.search_by_term("Inception", 1).await;
        assert!(matches!(
            result,
            Err(CatalogError::Upstream {
                status: Some(503),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_bad_total_results_falls_back_to_item_count() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"Search":[
                    {"Title":"A","Year":"2001","imdbID":"tt0000001","Type":"movie","Poster":"N/A"},
                    {"Title":"B","Year":"2002","imdbID":"tt0000002","Type":"movie","Poster":"N/A"}
                ],"totalResults":"lots","Response":"True"}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server, false);
        let page = client.search_by_term("abc", 1).await.unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items[0].poster(), None);
    }

    #[tokio::test]
    async fn test_fetch_by_id_requests_full_plot() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("i".into(), "tt3896198".into()),
                Matcher::UrlEncoded("plot".into(), "full".into()),
            ]))
            .with_status(200)
            .with_body(GUARDIANS_DETAIL)
            .create_async()
            .await;

        let client = client_for(&server, false);
        let item = client.fetch_by_id("tt3896198").await.unwrap();

        assert_eq!(item.id, "tt3896198");
        let details = item.details.expect("details populated");
        assert_eq!(details.director.as_deref(), Some("James Gunn"));
        assert!(details.plot.is_some());
        assert_eq!(details.ratings.len(), 2);
        assert_eq!(details.box_office, None); // "N/A" dropped
        assert_eq!(
            details.cast(),
            vec!["Chris Pratt", "Zoe Saldana", "Dave Bautista"]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_by_id_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#)
            .create_async()
            .await;

        let client = client_for(&server, false);
        let result = client.fetch_by_id("tt0000000").await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_classify_error() {
        assert!(matches!(
            classify_error(StatusCode::OK, "Series not found!".to_string()),
            CatalogError::NotFound(_)
        ));
        assert!(matches!(
            classify_error(StatusCode::OK, "Error getting data.".to_string()),
            CatalogError::NotFound(_)
        ));
        assert!(matches!(
            classify_error(StatusCode::OK, "Something broke".to_string()),
            CatalogError::Upstream { status: None, .. }
        ));
    }
}
