use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label shown wherever the provider had no value for a field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Telegram user id; history and conversation state are keyed by it.
pub type UserId = i64;

/// Telegram chat id; replies are addressed to it.
pub type ChatId = i64;

/// A single search hit, only used to build the selection menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub title: String,
    pub year: Option<String>,
    pub external_id: String,
}

impl MovieSummary {
    /// Button label, `Title (Year)` or just `Title` when the year is unknown.
    pub fn menu_label(&self) -> String {
        match &self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

/// Full detail record for one movie.
///
/// Every optional field is `None` when the provider omitted it or sent its
/// unavailable marker. Numeric fields are only `Some` when they parsed into
/// their valid range, so an unavailable rating can never be read as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub external_id: String,
    pub title: String,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub runtime: Option<String>,
    /// Comma separated category list as the provider sends it.
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Vec<String>,
    pub plot: Option<String>,
    /// IMDb user rating, 0-10.
    pub rating: Option<f64>,
    /// Metascore, 0-100.
    pub critic_score: Option<u8>,
    pub poster_url: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl MovieRecord {
    /// Individual genre tokens, trimmed, empty tokens dropped.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genre
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    /// The literal year label; unknown years group under [`NOT_AVAILABLE`].
    pub fn year_label(&self) -> &str {
        self.year.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn imdb_url(&self) -> String {
        imdb_url(&self.external_id)
    }
}

pub fn imdb_url(external_id: &str) -> String {
    format!("https://www.imdb.com/title/{}/", external_id)
}

#[cfg(test)]
pub(crate) fn sample_record(title: &str, year: &str, genre: &str, rating: Option<f64>) -> MovieRecord {
    MovieRecord {
        external_id: format!("tt{:07}", title.len()),
        title: title.to_string(),
        year: Some(year.to_string()),
        rated: None,
        runtime: None,
        genre: Some(genre.to_string()),
        director: None,
        actors: Vec::new(),
        plot: None,
        rating,
        critic_score: None,
        poster_url: None,
        fetched_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genres_are_trimmed() {
        let record = sample_record("Heat", "1995", " Action,Crime , ,Drama", Some(8.3));
        let genres: Vec<&str> = record.genres().collect();
        assert_eq!(genres, vec!["Action", "Crime", "Drama"]);
    }

    #[test]
    fn test_missing_genre_yields_nothing() {
        let mut record = sample_record("Heat", "1995", "", None);
        record.genre = None;
        assert_eq!(record.genres().count(), 0);
    }

    #[test]
    fn test_year_label_falls_back() {
        let mut record = sample_record("Heat", "1995", "Action", None);
        assert_eq!(record.year_label(), "1995");
        record.year = None;
        assert_eq!(record.year_label(), NOT_AVAILABLE);
    }

    #[test]
    fn test_menu_label() {
        let summary = MovieSummary {
            title: "Inception".into(),
            year: Some("2010".into()),
            external_id: "tt1375666".into(),
        };
        assert_eq!(summary.menu_label(), "Inception (2010)");

        let summary = MovieSummary { year: None, ..summary };
        assert_eq!(summary.menu_label(), "Inception");
    }
}
