use image::Rgb;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const TEXT: Rgb<u8> = Rgb([34, 34, 34]);
pub const GRID: Rgb<u8> = Rgb([222, 222, 222]);

pub const RATING_BAR: Rgb<u8> = Rgb([0x34, 0x98, 0xdb]);
pub const YEAR_BAR: Rgb<u8> = Rgb([0x9b, 0x59, 0xb6]);

/// Genre slices are coloured in this order, largest genre first.
pub const GENRE_COLORS: [Rgb<u8>; 8] = [
    Rgb([0xe7, 0x4c, 0x3c]),
    Rgb([0x34, 0x98, 0xdb]),
    Rgb([0x2e, 0xcc, 0x71]),
    Rgb([0xf3, 0x9c, 0x12]),
    Rgb([0x9b, 0x59, 0xb6]),
    Rgb([0x1a, 0xbc, 0x9c]),
    Rgb([0x34, 0x49, 0x5e]),
    Rgb([0xe6, 0x7e, 0x22]),
];

/// Bars are drawn at 70% opacity over the white background.
pub const BAR_ALPHA: f32 = 0.7;

pub fn genre_color(index: usize) -> Rgb<u8> {
    GENRE_COLORS[index % GENRE_COLORS.len()]
}

/// `color` composited over white at the given opacity.
pub fn over_white(color: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let mix = |c: u8| -> u8 {
        let value = alpha * c as f32 + (1.0 - alpha) * 255.0;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgb([mix(color[0]), mix(color[1]), mix(color[2])])
}
