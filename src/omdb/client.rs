use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use serde::de::DeserializeOwned;

use crate::models::{MovieRecord, MovieSummary};

use super::{
    error::FetchError,
    types::{DetailResponse, SearchResponse},
    MovieSource,
};

/// OMDb returns at most ten hits per page; the menu shows one page.
pub const MAX_SEARCH_RESULTS: usize = 10;

#[derive(Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build OMDb HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, FetchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(FetchError::Decode)
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    async fn search(&self, title: &str) -> Result<Vec<MovieSummary>, FetchError> {
        let response: SearchResponse = self.get(&[("s", title), ("type", "movie")]).await?;

        if !response.is_success() {
            if response.is_empty_result() {
                debug!("OMDb search for '{}' had no results", title);
                return Ok(Vec::new());
            }
            return Err(FetchError::Provider(
                response.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(response
            .search
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(MovieSummary::from)
            .collect())
    }

    async fn fetch_detail(&self, external_id: &str) -> Result<MovieRecord, FetchError> {
        let response: DetailResponse = self.get(&[("i", external_id), ("plot", "full")]).await?;

        if !response.is_success() {
            debug!(
                "OMDb detail for '{}' failed: {}",
                external_id,
                response.error.as_deref().unwrap_or("no error given")
            );
            if response.is_unknown_id() {
                return Err(FetchError::NotFound(external_id.to_string()));
            }
            return Err(FetchError::Provider(
                response.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(response.into_record(external_id, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    const API_KEY: &str = "secret-key";

    /// Serves one canned HTTP response and yields the request head it got.
    async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });

        (base_url, handle)
    }

    fn client(base_url: &str) -> OmdbClient {
        OmdbClient::new(base_url, API_KEY, Duration::from_secs(5)).unwrap()
    }

    fn search_body(count: usize) -> String {
        let items: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"Title":"Alien {i}","Year":"19{i:02}","imdbID":"tt{i:07}","Type":"movie"}}"#))
            .collect();
        format!(r#"{{"Search":[{}],"totalResults":"{count}","Response":"True"}}"#, items.join(","))
    }

    #[tokio::test]
    async fn test_search_sends_query_and_caps_results() {
        let (base_url, server) = serve_once("200 OK", search_body(12)).await;

        let movies = client(&base_url).search("alien").await.unwrap();
        assert_eq!(movies.len(), MAX_SEARCH_RESULTS);
        assert_eq!(movies[0].menu_label(), "Alien 0 (1900)");

        let head = server.await.unwrap();
        assert!(head.starts_with("GET /?"));
        assert!(head.contains("apikey=secret-key"));
        assert!(head.contains("s=alien"));
        assert!(head.contains("type=movie"));
    }

    #[tokio::test]
    async fn test_search_without_matches_is_empty() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#.to_string();
        let (base_url, _server) = serve_once("200 OK", body).await;

        assert!(client(&base_url).search("zzzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_provider_error_is_not_empty_result() {
        let body = r#"{"Response":"False","Error":"Invalid API key!"}"#.to_string();
        let (base_url, _server) = serve_once("200 OK", body).await;

        let err = client(&base_url).search("alien").await.unwrap_err();
        assert!(matches!(err, FetchError::Provider(ref msg) if msg == "Invalid API key!"));
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let (base_url, _server) = serve_once("503 Service Unavailable", String::new()).await;

        let err = client(&base_url).search("alien").await.unwrap_err();
        assert!(matches!(err, FetchError::Status(status) if status.as_u16() == 503));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base_url, _server) = serve_once("200 OK", "<html>oops</html>".to_string()).await;

        let err = client(&base_url).search("alien").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_hides_api_key() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let err = client(&base_url).search("alien").await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
        assert!(!err.to_string().contains(API_KEY));
        assert!(!format!("{:?}", err).contains(API_KEY));
    }

    #[tokio::test]
    async fn test_detail_success() {
        let body = r#"{"Title":"Alien","Year":"1979","Genre":"Horror, Sci-Fi","imdbRating":"8.5",
            "Metascore":"89","Poster":"N/A","imdbID":"tt0078748","Response":"True"}"#
            .to_string();
        let (base_url, server) = serve_once("200 OK", body).await;

        let record = client(&base_url).fetch_detail("tt0078748").await.unwrap();
        assert_eq!(record.title, "Alien");
        assert_eq!(record.rating, Some(8.5));
        assert_eq!(record.poster_url, None);

        let head = server.await.unwrap();
        assert!(head.contains("i=tt0078748"));
        assert!(head.contains("plot=full"));
    }

    #[tokio::test]
    async fn test_detail_unknown_id_is_not_found() {
        let body = r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#.to_string();
        let (base_url, _server) = serve_once("200 OK", body).await;

        let err = client(&base_url).fetch_detail("tt9999999").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref id) if id == "tt9999999"));
    }

    #[tokio::test]
    async fn test_detail_quota_error_is_provider_error() {
        let body = r#"{"Response":"False","Error":"Request limit reached!"}"#.to_string();
        let (base_url, _server) = serve_once("200 OK", body).await;

        let err = client(&base_url).fetch_detail("tt0078748").await.unwrap_err();
        assert!(matches!(err, FetchError::Provider(ref msg) if msg == "Request limit reached!"));
    }
}
