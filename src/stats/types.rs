use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of an aggregation. `NoData` means there was nothing to aggregate and
/// nothing should be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Aggregate<T> {
    NoData,
    Ready(T),
}

impl<T> Aggregate<T> {
    #[cfg(test)]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Aggregate::NoData)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Aggregate::Ready(value) => Some(value),
            Aggregate::NoData => None,
        }
    }
}

impl<T> From<Option<T>> for Aggregate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Aggregate::NoData, Aggregate::Ready)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingHistogram {
    pub bins: Vec<RatingBin>,
}

impl RatingHistogram {
    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Label/count pairs in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    pub entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
    }
}

/// Most frequent genres, count descending.
pub type GenreFrequency = FrequencyTable;

/// Year labels ascending by their string form.
pub type YearFrequency = FrequencyTable;

/// Numbers for the text that follows the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_movies: usize,
    pub rated_movies: usize,
    pub average_rating: Aggregate<f64>,
    pub first_viewed_at: Option<DateTime<Utc>>,
}
