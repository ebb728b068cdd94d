use std::collections::{BTreeMap, HashMap};

use crate::models::MovieRecord;

use super::types::{Aggregate, FrequencyTable, GenreFrequency, YearFrequency};

/// Count genre tokens across the history and keep the `top_n` most frequent.
///
/// Ties keep the order in which the genres were first seen.
pub fn genre_frequency(history: &[MovieRecord], top_n: usize) -> Aggregate<GenreFrequency> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();

    for genre in history.iter().flat_map(MovieRecord::genres) {
        match positions.get(genre) {
            Some(&idx) => entries[idx].1 += 1,
            None => {
                positions.insert(genre, entries.len());
                entries.push((genre.to_string(), 1));
            }
        }
    }

    if entries.is_empty() {
        return Aggregate::NoData;
    }

    // Stable sort, so first-seen order survives among equal counts.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(top_n);

    if entries.is_empty() {
        Aggregate::NoData
    } else {
        Aggregate::Ready(FrequencyTable { entries })
    }
}

/// Count records per literal year label, ascending by label.
pub fn year_frequency(history: &[MovieRecord]) -> Aggregate<YearFrequency> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in history {
        *counts.entry(record.year_label()).or_insert(0) += 1;
    }

    if counts.is_empty() {
        return Aggregate::NoData;
    }

    Aggregate::Ready(FrequencyTable {
        entries: counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_record, NOT_AVAILABLE};

    fn with_genres(genres: &[&str]) -> Vec<MovieRecord> {
        genres
            .iter()
            .enumerate()
            .map(|(i, g)| sample_record(&format!("m{i}"), "2000", g, None))
            .collect()
    }

    fn with_years(years: &[&str]) -> Vec<MovieRecord> {
        years
            .iter()
            .enumerate()
            .map(|(i, y)| sample_record(&format!("m{i}"), y, "Drama", None))
            .collect()
    }

    #[test]
    fn test_shared_genre_ranks_first() {
        let history = with_genres(&["Action, Drama", "Drama, Comedy"]);
        let Aggregate::Ready(table) = genre_frequency(&history, 8) else {
            panic!("expected genres");
        };

        assert_eq!(
            table.entries,
            vec![
                ("Drama".to_string(), 2),
                ("Action".to_string(), 1),
                ("Comedy".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_n_truncates() {
        let history = with_genres(&["A, B, C, D", "D, C", "D"]);
        let table = genre_frequency(&history, 2);
        let labels: Vec<&str> = table
            .ready()
            .unwrap()
            .entries
            .iter()
            .map(|(l, _)| l.as_str())
            .collect();
        assert_eq!(labels, vec!["D", "C"]);
    }

    #[test]
    fn test_records_without_genre_are_no_data() {
        let mut history = with_genres(&["Drama"]);
        history[0].genre = None;
        assert!(genre_frequency(&history, 8).is_no_data());
        assert!(genre_frequency(&[], 8).is_no_data());
    }

    #[test]
    fn test_years_sorted_ascending() {
        let history = with_years(&["2001", "1999", "2001"]);
        let Aggregate::Ready(table) = year_frequency(&history) else {
            panic!("expected years");
        };
        assert_eq!(
            table.entries,
            vec![("1999".to_string(), 1), ("2001".to_string(), 2)]
        );
    }

    #[test]
    fn test_malformed_year_labels_are_kept() {
        let mut history = with_years(&["2010–2014", "1999"]);
        let mut unknown = sample_record("x", "", "Drama", None);
        unknown.year = None;
        history.push(unknown);

        let table = year_frequency(&history);
        let table = table.ready().unwrap();
        assert_eq!(table.get("2010–2014"), Some(1));
        assert_eq!(table.get(NOT_AVAILABLE), Some(1));
        assert_eq!(table.entries[0].0, "1999");
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_empty_history_has_no_years() {
        assert!(year_frequency(&[]).is_no_data());
    }
}
