use anyhow::Result;

use crate::stats::{Aggregate, YearFrequency};

use super::axes::{draw_frame, label_stride, CountAxis, Labels, PlotArea, TICK_SCALE};
use super::canvas::Canvas;
use super::font::{fit_text, text_width};
use super::palette::{over_white, BAR_ALPHA, BLACK, TEXT, WHITE, YEAR_BAR};
use super::ChartImage;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 480;

const PLOT: PlotArea = PlotArea {
    left: 80,
    top: 60,
    width: 840,
    height: 330,
};

/// Fraction of each slot covered by its bar.
const BAR_FILL: f64 = 0.8;

/// One bar per year label, in table order. `None` for an empty table.
pub fn render_year_bars(aggregate: &Aggregate<YearFrequency>) -> Result<Option<ChartImage>> {
    let Some(table) = aggregate.ready() else {
        return Ok(None);
    };
    if table.entries.is_empty() {
        return Ok(None);
    }

    let mut canvas = Canvas::new(WIDTH, HEIGHT, WHITE);
    let axis = CountAxis::for_max(table.max_count());
    draw_frame(
        &mut canvas,
        &PLOT,
        &axis,
        &Labels {
            title: "Movies Searched by Release Year",
            x: "Year",
            y: "Number of Movies",
        },
    );

    let slot = PLOT.width as f64 / table.entries.len() as f64;
    let bar_width = ((slot * BAR_FILL).round() as u32).max(1);
    let fill = over_white(YEAR_BAR, BAR_ALPHA);

    // Labels longer than a handful of slots are cut rather than thinned away.
    let max_label_width = (slot * 4.0).max(text_width("0000", TICK_SCALE) as f64) as u32;
    let labels: Vec<String> = table
        .entries
        .iter()
        .map(|(label, _)| fit_text(label, TICK_SCALE, max_label_width))
        .collect();
    let stride = label_stride(labels.iter().map(String::as_str), slot, TICK_SCALE);

    for (i, (_, count)) in table.entries.iter().enumerate() {
        let center = PLOT.left + (slot * (i as f64 + 0.5)).round() as i64;
        let x0 = center - bar_width as i64 / 2;
        let height = axis.bar_height(*count, &PLOT);
        if height > 0 {
            let top = PLOT.bottom() - height as i64;
            canvas.fill_rect(x0, top, bar_width, height, fill);
            canvas.stroke_rect(x0, top, bar_width, height + 1, BLACK);
        }

        canvas.vline(center, PLOT.bottom(), PLOT.bottom() + 3, BLACK);
        if i % stride == 0 {
            canvas.text_centered(center, PLOT.bottom() + 8, &labels[i], TICK_SCALE, TEXT);
        }
    }

    Ok(Some(ChartImage::from_canvas(&canvas)?))
}
