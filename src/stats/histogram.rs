use crate::models::MovieRecord;

use super::types::{Aggregate, RatingBin, RatingHistogram};

pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 10.0;

/// Bucket present ratings into `bin_count` equal-width bins over [0, 10].
///
/// Bins are closed on the right: the first is `[0, w]`, every later one is
/// `(lower, upper]`. Records without a rating are skipped.
pub fn rating_histogram(history: &[MovieRecord], bin_count: usize) -> Aggregate<RatingHistogram> {
    let ratings: Vec<f64> = rated(history).collect();
    if ratings.is_empty() {
        return Aggregate::NoData;
    }

    let bin_count = bin_count.max(1);
    let width = (RATING_MAX - RATING_MIN) / bin_count as f64;
    let mut bins: Vec<RatingBin> = (0..bin_count)
        .map(|i| RatingBin {
            lower: RATING_MIN + width * i as f64,
            upper: if i + 1 == bin_count {
                RATING_MAX
            } else {
                RATING_MIN + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    let last = bin_count - 1;
    for rating in ratings {
        let idx = bins.iter().position(|b| rating <= b.upper).unwrap_or(last);
        bins[idx].count += 1;
    }

    Aggregate::Ready(RatingHistogram { bins })
}

/// Mean of the present ratings; absent ratings count toward neither sum nor
/// denominator.
pub fn average_rating(history: &[MovieRecord]) -> Aggregate<f64> {
    let (sum, count) = rated(history).fold((0.0, 0usize), |(sum, count), r| (sum + r, count + 1));
    if count == 0 {
        Aggregate::NoData
    } else {
        Aggregate::Ready(sum / count as f64)
    }
}

fn rated(history: &[MovieRecord]) -> impl Iterator<Item = f64> + '_ {
    history.iter().filter_map(|r| r.rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_record;

    fn with_ratings(ratings: &[Option<f64>]) -> Vec<MovieRecord> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, r)| sample_record(&format!("m{i}"), "2000", "Drama", *r))
            .collect()
    }

    #[test]
    fn test_low_and_high_ratings_land_in_edge_bins() {
        let history = with_ratings(&[Some(1.0), Some(1.0), Some(9.9)]);
        let Aggregate::Ready(histogram) = rating_histogram(&history, 10) else {
            panic!("expected a histogram");
        };

        assert_eq!(histogram.bins.len(), 10);
        assert_eq!(histogram.bins[0].count, 2);
        assert_eq!(histogram.bins[9].count, 1);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_bin_edges_cover_zero_to_ten() {
        let history = with_ratings(&[Some(0.0), Some(10.0), Some(5.0)]);
        let Aggregate::Ready(histogram) = rating_histogram(&history, 4) else {
            panic!("expected a histogram");
        };

        assert_eq!(histogram.bins[0].lower, 0.0);
        assert_eq!(histogram.bins[3].upper, 10.0);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[1].count, 1);
        assert_eq!(histogram.bins[3].count, 1);
    }

    #[test]
    fn test_unrated_records_are_skipped() {
        let history = with_ratings(&[None, Some(7.2), None]);
        let histogram = rating_histogram(&history, 10);
        assert_eq!(histogram.ready().map(|h| h.total()), Some(1));
    }

    #[test]
    fn test_no_ratings_is_no_data() {
        assert!(rating_histogram(&[], 10).is_no_data());
        assert!(rating_histogram(&with_ratings(&[None, None]), 10).is_no_data());
    }

    #[test]
    fn test_average_ignores_missing_ratings() {
        let history = with_ratings(&[Some(8.0), None, Some(6.0), None]);
        assert_eq!(average_rating(&history), Aggregate::Ready(7.0));
    }

    #[test]
    fn test_average_without_ratings_is_no_data() {
        assert_eq!(average_rating(&with_ratings(&[None])), Aggregate::NoData);
        assert_eq!(average_rating(&[]), Aggregate::NoData);
    }
}
