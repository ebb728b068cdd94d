//! OMDb wire format.
//!
//! OMDb answers every query with HTTP 200 and a `Response` field of `"True"` or
//! `"False"`; on `"False"` the `Error` field says why. Field names are
//! PascalCase except for the `imdb*` ones.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{MovieRecord, MovieSummary, NOT_AVAILABLE};

/// Provider errors that mean "nothing to show" rather than a failure.
const EMPTY_RESULT_ERRORS: [&str; 2] = ["Movie not found!", "Too many results."];
/// Detail errors that mean the id itself is unknown.
const UNKNOWN_ID_ERRORS: [&str; 3] = ["Incorrect IMDb ID.", "Movie not found!", "Error getting data."];

fn error_in(error: Option<&str>, known: &[&str]) -> bool {
    error.is_some_and(|e| known.contains(&e.trim()))
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchItem>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    pub fn is_empty_result(&self) -> bool {
        error_in(self.error.as_deref(), &EMPTY_RESULT_ERRORS)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
}

impl From<SearchItem> for MovieSummary {
    fn from(item: SearchItem) -> Self {
        MovieSummary {
            title: available(item.title).unwrap_or_else(|| "Unknown".to_string()),
            year: available(item.year),
            external_id: item.imdb_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Rated")]
    pub rated: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Metascore")]
    pub metascore: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
}

impl DetailResponse {
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// A failed lookup caused by the id, as opposed to the key or quota.
    pub fn is_unknown_id(&self) -> bool {
        error_in(self.error.as_deref(), &UNKNOWN_ID_ERRORS)
    }

    pub fn into_record(self, requested_id: &str, fetched_at: DateTime<Utc>) -> MovieRecord {
        MovieRecord {
            external_id: available(self.imdb_id).unwrap_or_else(|| requested_id.to_string()),
            title: available(self.title).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            year: available(self.year),
            rated: available(self.rated),
            runtime: available(self.runtime),
            genre: available(self.genre),
            director: available(self.director),
            actors: available(self.actors)
                .map(|a| {
                    a.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            plot: available(self.plot),
            rating: parse_rating(self.imdb_rating.as_deref()),
            critic_score: parse_critic_score(self.metascore.as_deref()),
            poster_url: available(self.poster),
            fetched_at,
        }
    }
}

/// Missing, blank and `N/A` all mean the provider has no value.
pub fn available(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE) {
        None
    } else if trimmed.len() == raw.len() {
        Some(raw)
    } else {
        Some(trimmed.to_string())
    }
}

pub fn parse_rating(raw: Option<&str>) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    (value.is_finite() && (0.0..=10.0).contains(&value)).then_some(value)
}

pub fn parse_critic_score(raw: Option<&str>) -> Option<u8> {
    let value: u8 = raw?.trim().parse().ok()?;
    (value <= 100).then_some(value)
}
