//! Chart rendering for `/stats`.
//!
//! Every renderer is a pure function from an aggregate to PNG bytes. A
//! `NoData` aggregate yields `Ok(None)`; identical input yields identical
//! bytes.

pub mod axes;
pub mod bars;
pub mod canvas;
pub mod font;
pub mod histogram;
pub mod palette;
pub mod pie;

pub use bars::render_year_bars;
pub use histogram::render_rating_histogram;
pub use pie::render_genre_pie;

use anyhow::Result;

use crate::stats::HistoryAggregates;

use canvas::Canvas;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub png: Vec<u8>,
}

impl ChartImage {
    fn from_canvas(canvas: &Canvas) -> Result<Self> {
        Ok(Self {
            png: canvas.encode_png()?,
        })
    }
}

/// The three stats charts in the order they are sent.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsCharts {
    pub ratings: Option<ChartImage>,
    pub genres: Option<ChartImage>,
    pub years: Option<ChartImage>,
}

pub fn render_all(aggregates: &HistoryAggregates) -> Result<StatsCharts> {
    Ok(StatsCharts {
        ratings: render_rating_histogram(&aggregates.ratings)?,
        genres: render_genre_pie(&aggregates.genres)?,
        years: render_year_bars(&aggregates.years)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_record;
    use crate::stats::{aggregate_history, StatsConfig};

    #[test]
    fn test_unrated_history_skips_rating_chart_only() {
        let history = vec![
            sample_record("a", "1999", "Drama, Crime", None),
            sample_record("b", "2001", "Drama", None),
        ];
        let charts = render_all(&aggregate_history(&history, &StatsConfig::default())).unwrap();
        assert!(charts.ratings.is_none());
        assert!(charts.genres.is_some());
        assert!(charts.years.is_some());
    }

    #[test]
    fn test_render_all_is_deterministic() {
        let history = vec![
            sample_record("a", "1999", "Drama, Crime", Some(7.7)),
            sample_record("b", "2001", "Comedy", Some(6.1)),
        ];
        let aggregates = aggregate_history(&history, &StatsConfig::default());
        assert_eq!(render_all(&aggregates).unwrap(), render_all(&aggregates).unwrap());
    }
}
