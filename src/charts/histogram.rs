use anyhow::Result;

use crate::stats::{Aggregate, RatingHistogram};

use super::axes::{draw_frame, label_stride, CountAxis, Labels, PlotArea, TICK_SCALE};
use super::canvas::Canvas;
use super::palette::{over_white, BAR_ALPHA, BLACK, RATING_BAR, TEXT, WHITE};
use super::ChartImage;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;

const PLOT: PlotArea = PlotArea {
    left: 80,
    top: 60,
    width: 680,
    height: 330,
};

/// Bar chart of the rating bins. `None` when there are no ratings.
pub fn render_rating_histogram(aggregate: &Aggregate<RatingHistogram>) -> Result<Option<ChartImage>> {
    let Some(histogram) = aggregate.ready() else {
        return Ok(None);
    };
    if histogram.bins.is_empty() {
        return Ok(None);
    }

    let mut canvas = Canvas::new(WIDTH, HEIGHT, WHITE);
    let axis = CountAxis::for_max(histogram.max_count());
    draw_frame(
        &mut canvas,
        &PLOT,
        &axis,
        &Labels {
            title: "Rating Distribution of Your Searched Movies",
            x: "IMDb Rating",
            y: "Number of Movies",
        },
    );

    let bin_count = histogram.bins.len();
    let slot = PLOT.width as f64 / bin_count as f64;
    let fill = over_white(RATING_BAR, BAR_ALPHA);

    for (i, bin) in histogram.bins.iter().enumerate() {
        let x0 = PLOT.left + (slot * i as f64).round() as i64;
        let x1 = PLOT.left + (slot * (i + 1) as f64).round() as i64;
        let height = axis.bar_height(bin.count, &PLOT);
        if height == 0 {
            continue;
        }
        let top = PLOT.bottom() - height as i64;
        let width = (x1 - x0).max(1) as u32;
        canvas.fill_rect(x0, top, width, height, fill);
        canvas.stroke_rect(x0, top, width + 1, height + 1, BLACK);
    }

    let edges: Vec<String> = std::iter::once(histogram.bins[0].lower)
        .chain(histogram.bins.iter().map(|b| b.upper))
        .map(edge_label)
        .collect();
    let stride = label_stride(edges.iter().map(String::as_str), slot, TICK_SCALE);
    let tick_y = PLOT.bottom() + 6;
    for (i, label) in edges.iter().enumerate() {
        let x = PLOT.left + (slot * i as f64).round() as i64;
        canvas.vline(x, PLOT.bottom(), PLOT.bottom() + 3, BLACK);
        if i % stride == 0 {
            canvas.text_centered(x, tick_y + 2, label, TICK_SCALE, TEXT);
        }
    }

    Ok(Some(ChartImage::from_canvas(&canvas)?))
}

fn edge_label(edge: f64) -> String {
    if (edge - edge.round()).abs() < 1e-9 {
        format!("{:.0}", edge)
    } else {
        format!("{:.1}", edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_record;
    use crate::stats::rating_histogram;

    fn histogram(ratings: &[f64]) -> Aggregate<RatingHistogram> {
        let history: Vec<_> = ratings
            .iter()
            .enumerate()
            .map(|(i, r)| sample_record(&format!("m{i}"), "2000", "Drama", Some(*r)))
            .collect();
        rating_histogram(&history, 10)
    }

    #[test]
    fn test_no_data_renders_nothing() {
        assert!(render_rating_histogram(&Aggregate::NoData).unwrap().is_none());
    }

    #[test]
    fn test_renders_png_of_expected_size() {
        let chart = render_rating_histogram(&histogram(&[7.1, 8.4, 8.8]))
            .unwrap()
            .expect("chart");
        let decoded = image::load_from_memory(&chart.png).unwrap();
        assert_eq!(decoded.width(), WIDTH);
        assert_eq!(decoded.height(), HEIGHT);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let aggregate = histogram(&[1.0, 1.0, 9.9, 5.5]);
        let first = render_rating_histogram(&aggregate).unwrap().unwrap();
        let second = render_rating_histogram(&aggregate).unwrap().unwrap();
        assert_eq!(first.png, second.png);
    }

    #[test]
    fn test_edge_labels() {
        assert_eq!(edge_label(0.0), "0");
        assert_eq!(edge_label(10.0), "10");
        assert_eq!(edge_label(2.5), "2.5");
    }
}
