use thiserror::Error;

/// Failure talking to the metadata provider.
///
/// "No results" is not represented here; searches report it as an empty list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to metadata provider failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("metadata provider returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("could not decode metadata response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("metadata provider error: {0}")]
    Provider(String),

    #[error("no movie with id '{0}'")]
    NotFound(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry the API key.
        FetchError::Http(err.without_url())
    }
}
