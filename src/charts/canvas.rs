use std::io::Cursor;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};

use super::font::{glyph, text_width, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

/// An owned drawing surface. Every render builds its own, so nothing carries
/// over between charts.
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Set one pixel; coordinates outside the canvas are ignored.
    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x < 0 || y < 0 || x >= self.img.width() as i64 || y >= self.img.height() as i64 {
            return;
        }
        self.img.put_pixel(x as u32, y as u32, color);
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width as i64).min(self.img.width() as i64);
        let y1 = (y + height as i64).min(self.img.height() as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.img.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width as i64 - 1;
        let bottom = y + height as i64 - 1;
        self.hline(x, right, y, color);
        self.hline(x, right, bottom, color);
        self.vline(x, y, bottom, color);
        self.vline(right, y, bottom, color);
    }

    pub fn hline(&mut self, x0: i64, x1: i64, y: i64, color: Rgb<u8>) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.put(x, y, color);
        }
    }

    pub fn vline(&mut self, x: i64, y0: i64, y1: i64, color: Rgb<u8>) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.put(x, y, color);
        }
    }

    /// Draw `text` with its top-left corner at (x, y).
    pub fn text(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let scale = scale.max(1) as i64;
        for (i, c) in text.chars().enumerate() {
            let origin = x + i as i64 * ADVANCE as i64 * scale;
            self.glyph_pixels(c, |col, row| {
                let px = origin + col as i64 * scale;
                let py = y + row as i64 * scale;
                (px, py)
            }, scale, color);
        }
    }

    pub fn text_centered(&mut self, center_x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let width = text_width(text, scale) as i64;
        self.text(center_x - width / 2, y, text, scale, color);
    }

    pub fn text_right(&mut self, right_x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let width = text_width(text, scale) as i64;
        self.text(right_x - width, y, text, scale, color);
    }

    /// Draw `text` rotated a quarter turn counter-clockwise, reading bottom to
    /// top, centred vertically on `center_y` with its left edge at `x`.
    pub fn text_vertical(&mut self, x: i64, center_y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let scale_px = scale.max(1) as i64;
        let bottom = center_y + text_width(text, scale) as i64 / 2;
        for (i, c) in text.chars().enumerate() {
            let origin = bottom - i as i64 * ADVANCE as i64 * scale_px;
            self.glyph_pixels(c, |col, row| {
                let px = x + row as i64 * scale_px;
                let py = origin - (col as i64 + 1) * scale_px + 1;
                (px, py)
            }, scale_px, color);
        }
    }

    fn glyph_pixels<F>(&mut self, c: char, place: F, scale: i64, color: Rgb<u8>)
    where
        F: Fn(u32, u32) -> (i64, i64),
    {
        let rows = glyph(c);
        for row in 0..GLYPH_HEIGHT {
            let bits = rows[row as usize];
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let (px, py) = place(col, row);
                self.fill_rect(px, py, scale as u32, scale as u32, color);
            }
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.img.get_pixel(x, y)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.img
            .write_to(&mut buf, ImageFormat::Png)
            .context("failed to encode chart as PNG")?;
        Ok(buf.into_inner())
    }
}
