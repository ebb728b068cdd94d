pub mod config;
pub mod frequency;
pub mod histogram;
pub mod types;

pub use config::StatsConfig;
pub use frequency::{genre_frequency, year_frequency};
pub use histogram::{average_rating, rating_histogram};
pub use types::{Aggregate, GenreFrequency, RatingHistogram, StatsSummary, YearFrequency};

#[cfg(test)]
pub use types::FrequencyTable;

use crate::models::MovieRecord;

/// All three chart projections of one history snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryAggregates {
    pub ratings: Aggregate<RatingHistogram>,
    pub genres: Aggregate<GenreFrequency>,
    pub years: Aggregate<YearFrequency>,
}

pub fn aggregate_history(history: &[MovieRecord], config: &StatsConfig) -> HistoryAggregates {
    HistoryAggregates {
        ratings: rating_histogram(history, config.bin_count),
        genres: genre_frequency(history, config.top_genres),
        years: year_frequency(history),
    }
}

pub fn summarize(history: &[MovieRecord]) -> StatsSummary {
    StatsSummary {
        total_movies: history.len(),
        rated_movies: history.iter().filter(|r| r.rating.is_some()).count(),
        average_rating: average_rating(history),
        first_viewed_at: history.iter().map(|r| r.fetched_at).min(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_record;

    #[test]
    fn test_summary_counts_only_rated_movies_in_average() {
        let history = vec![
            sample_record("a", "2000", "Drama", Some(9.0)),
            sample_record("b", "2001", "Drama", None),
            sample_record("c", "2002", "Drama", Some(5.0)),
        ];
        let summary = summarize(&history);
        assert_eq!(summary.total_movies, 3);
        assert_eq!(summary.rated_movies, 2);
        assert_eq!(summary.average_rating, Aggregate::Ready(7.0));
        assert!(summary.first_viewed_at.is_some());
    }

    #[test]
    fn test_empty_history_aggregates_to_no_data() {
        let aggregates = aggregate_history(&[], &StatsConfig::default());
        assert!(aggregates.ratings.is_no_data());
        assert!(aggregates.genres.is_no_data());
        assert!(aggregates.years.is_no_data());

        let summary = summarize(&[]);
        assert_eq!(summary.average_rating, Aggregate::NoData);
        assert_eq!(summary.first_viewed_at, None);
    }
}
