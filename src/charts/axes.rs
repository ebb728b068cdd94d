use super::canvas::Canvas;
use super::font::{text_width, ADVANCE, GLYPH_HEIGHT};
use super::palette::{BLACK, GRID, TEXT};

pub const TITLE_SCALE: u32 = 2;
pub const LABEL_SCALE: u32 = 2;
pub const TICK_SCALE: u32 = 1;

/// Rectangle the bars are drawn into, in canvas pixels.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: i64,
    pub top: i64,
    pub width: u32,
    pub height: u32,
}

impl PlotArea {
    pub fn bottom(&self) -> i64 {
        self.top + self.height as i64
    }

    pub fn right(&self) -> i64 {
        self.left + self.width as i64
    }
}

/// Integer count scale for the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountAxis {
    pub top: usize,
    pub step: usize,
}

impl CountAxis {
    /// At most five steps, always whole numbers, top strictly above zero.
    pub fn for_max(max_count: usize) -> Self {
        let max_count = max_count.max(1);
        let step = max_count.div_ceil(5).max(1);
        let top = max_count.div_ceil(step) * step;
        Self { top, step }
    }

    /// Pixel height of a bar holding `count` inside `area`.
    pub fn bar_height(&self, count: usize, area: &PlotArea) -> u32 {
        ((count as f64 / self.top as f64) * area.height as f64).round() as u32
    }
}

pub struct Labels<'a> {
    pub title: &'a str,
    pub x: &'a str,
    pub y: &'a str,
}

/// Title, grid, y ticks, both axis lines and axis labels.
pub fn draw_frame(canvas: &mut Canvas, area: &PlotArea, axis: &CountAxis, labels: &Labels<'_>) {
    let center_x = canvas.width() as i64 / 2;
    canvas.text_centered(center_x, 16, labels.title, TITLE_SCALE, TEXT);

    let mut tick = 0;
    while tick <= axis.top {
        let y = area.bottom() - axis.bar_height(tick, area) as i64;
        if tick > 0 {
            canvas.hline(area.left + 1, area.right(), y, GRID);
        }
        canvas.hline(area.left - 4, area.left - 1, y, BLACK);
        let label_y = y - (GLYPH_HEIGHT * TICK_SCALE) as i64 / 2;
        canvas.text_right(area.left - 8, label_y, &tick.to_string(), TICK_SCALE, TEXT);
        tick += axis.step;
    }

    canvas.vline(area.left, area.top, area.bottom(), BLACK);
    canvas.hline(area.left, area.right(), area.bottom(), BLACK);

    let x_label_y = canvas.height() as i64 - (GLYPH_HEIGHT * LABEL_SCALE) as i64 - 12;
    canvas.text_centered(area.left + area.width as i64 / 2, x_label_y, labels.x, LABEL_SCALE, TEXT);
    canvas.text_vertical(14, area.top + area.height as i64 / 2, labels.y, LABEL_SCALE, TEXT);
}

/// Draw every `stride`-th label so neighbours never overlap.
pub fn label_stride<'a>(labels: impl Iterator<Item = &'a str>, slot_width: f64, scale: u32) -> usize {
    let widest = labels.map(|l| text_width(l, scale)).max().unwrap_or(0);
    let needed = (widest + ADVANCE * scale) as f64;
    if slot_width <= 0.0 {
        return 1;
    }
    (needed / slot_width).ceil().max(1.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_axis_small() {
        assert_eq!(CountAxis::for_max(0), CountAxis { top: 1, step: 1 });
        assert_eq!(CountAxis::for_max(3), CountAxis { top: 3, step: 1 });
        assert_eq!(CountAxis::for_max(5), CountAxis { top: 5, step: 1 });
    }

    #[test]
    fn test_count_axis_large() {
        assert_eq!(CountAxis::for_max(12), CountAxis { top: 12, step: 3 });
        assert_eq!(CountAxis::for_max(11), CountAxis { top: 12, step: 3 });
        assert_eq!(CountAxis::for_max(100), CountAxis { top: 100, step: 20 });
    }

    #[test]
    fn test_bar_height_scales_to_area() {
        let area = PlotArea { left: 0, top: 0, width: 100, height: 200 };
        let axis = CountAxis::for_max(4);
        assert_eq!(axis.bar_height(4, &area), 200);
        assert_eq!(axis.bar_height(2, &area), 100);
        assert_eq!(axis.bar_height(0, &area), 0);
    }

    #[test]
    fn test_label_stride() {
        let labels = ["1999", "2000", "2001"];
        assert_eq!(label_stride(labels.iter().copied(), 100.0, 1), 1);
        // 4 chars at scale 1 = 23px plus 6px gap needs two 15px slots.
        assert_eq!(label_stride(labels.iter().copied(), 15.0, 1), 2);
    }
}
