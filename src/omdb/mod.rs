pub mod client;
pub mod error;
pub mod types;

pub use client::OmdbClient;
pub use error::FetchError;

use async_trait::async_trait;

use crate::models::{MovieRecord, MovieSummary};

/// Where movie metadata comes from. The controller only sees this trait.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Up to [`client::MAX_SEARCH_RESULTS`] matches; an empty list when the provider
    /// has nothing for the title.
    async fn search(&self, title: &str) -> Result<Vec<MovieSummary>, FetchError>;

    async fn fetch_detail(&self, external_id: &str) -> Result<MovieRecord, FetchError>;
}
