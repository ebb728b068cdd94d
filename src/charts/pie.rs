use std::f64::consts::TAU;

use anyhow::Result;

use crate::stats::{Aggregate, GenreFrequency};

use super::axes::{TITLE_SCALE, TICK_SCALE};
use super::canvas::Canvas;
use super::font::{fit_text, GLYPH_HEIGHT};
use super::palette::{genre_color, BLACK, TEXT, WHITE};
use super::ChartImage;

const WIDTH: u32 = 760;
const HEIGHT: u32 = 560;

const CENTER_X: i64 = 270;
const CENTER_Y: i64 = 300;
const RADIUS: f64 = 210.0;

const LEGEND_X: i64 = 520;
const LEGEND_TOP: i64 = 120;
const LEGEND_ROW: i64 = 34;
const SWATCH: u32 = 18;
const LEGEND_SCALE: u32 = 2;

/// Slices narrower than this get no percentage label.
const MIN_LABELLED_FRACTION: f64 = 0.04;

/// Pie of genre shares, starting at twelve o'clock and running
/// counter-clockwise. `None` when there are no genres.
pub fn render_genre_pie(aggregate: &Aggregate<GenreFrequency>) -> Result<Option<ChartImage>> {
    let Some(table) = aggregate.ready() else {
        return Ok(None);
    };
    let total = table.total();
    if total == 0 {
        return Ok(None);
    }

    let fractions: Vec<f64> = table
        .entries
        .iter()
        .map(|(_, count)| *count as f64 / total as f64)
        .collect();
    let mut ends = Vec::with_capacity(fractions.len());
    let mut running = 0.0;
    for fraction in &fractions {
        running += fraction;
        ends.push(running * TAU);
    }
    // Guard against the cumulative sum landing a hair under a full turn.
    if let Some(last) = ends.last_mut() {
        *last = TAU;
    }

    let mut canvas = Canvas::new(WIDTH, HEIGHT, WHITE);
    canvas.text_centered(WIDTH as i64 / 2, 16, "Genre Distribution of Your Searched Movies", TITLE_SCALE, TEXT);

    let reach = RADIUS.ceil() as i64;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (fx, fy) = (dx as f64, dy as f64);
            if fx * fx + fy * fy > RADIUS * RADIUS {
                continue;
            }
            let angle = sweep_angle(fx, fy);
            let slice = ends.iter().position(|end| angle < *end).unwrap_or(ends.len() - 1);
            canvas.put(CENTER_X + dx, CENTER_Y + dy, genre_color(slice));
        }
    }

    let mut start = 0.0;
    for (i, fraction) in fractions.iter().enumerate() {
        if *fraction >= MIN_LABELLED_FRACTION {
            let mid = start + fraction * TAU / 2.0;
            let (x, y) = point_at(mid, RADIUS * 0.62);
            let label = format!("{:.1}%", fraction * 100.0);
            let label_y = y - (GLYPH_HEIGHT * LEGEND_SCALE) as i64 / 2;
            canvas.text_centered(x, label_y, &label, LEGEND_SCALE, WHITE);
        }
        start = ends[i];
    }

    for (i, (genre, _)) in table.entries.iter().enumerate() {
        let row_y = LEGEND_TOP + i as i64 * LEGEND_ROW;
        canvas.fill_rect(LEGEND_X, row_y, SWATCH, SWATCH, genre_color(i));
        canvas.stroke_rect(LEGEND_X, row_y, SWATCH, SWATCH, BLACK);
        let text_x = LEGEND_X + SWATCH as i64 + 10;
        let max_width = (WIDTH as i64 - text_x - 10).max(0) as u32;
        let text_y = row_y + (SWATCH as i64 - (GLYPH_HEIGHT * LEGEND_SCALE) as i64) / 2;
        canvas.text(text_x, text_y, &fit_text(genre, LEGEND_SCALE, max_width), LEGEND_SCALE, TEXT);
    }

    let footer = format!("{} GENRE TAGS", total);
    canvas.text_centered(CENTER_X, HEIGHT as i64 - 30, &footer, TICK_SCALE, TEXT);

    Ok(Some(ChartImage::from_canvas(&canvas)?))
}

/// Angle from twelve o'clock, counter-clockwise, in [0, TAU), for a pixel
/// offset with y pointing down.
fn sweep_angle(dx: f64, dy: f64) -> f64 {
    // Rotate so "up" is zero and turning left is positive.
    let angle = (-dx).atan2(-dy);
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

fn point_at(angle: f64, radius: f64) -> (i64, i64) {
    let x = CENTER_X as f64 - radius * angle.sin();
    let y = CENTER_Y as f64 - radius * angle.cos();
    (x.round() as i64, y.round() as i64)
}
