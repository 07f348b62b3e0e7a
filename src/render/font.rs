//! 3x5 bitmap glyphs for digits and a dash.

use image::{Rgb, RgbImage};

pub const GLYPH_WIDTH: u32 = 3;
pub const GLYPH_HEIGHT: u32 = 5;

// Each row holds three bits, most significant bit on the left.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

const DASH: [u8; 5] = [0b000, 0b000, 0b111, 0b000, 0b000];

fn glyph(c: char) -> Option<[u8; 5]> {
    match c {
        '0'..='9' => c.to_digit(10).map(|d| DIGITS[d as usize]),
        '-' => Some(DASH),
        _ => None,
    }
}

/// Width in pixels of `text` at `scale`, with one blank column between glyphs.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    (n * (GLYPH_WIDTH + 1) - 1) * scale
}

/// Fill a rectangle, clipped to the image bounds.
pub fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(w).min(img.width());
    let y_end = y.saturating_add(h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

/// Draw `text` with its top-left corner at `(x, y)`. Unknown characters
/// leave a gap.
pub fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, scale: u32, color: Rgb<u8>) {
    let advance = (GLYPH_WIDTH + 1) * scale;
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let origin = x + i as u32 * advance;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    fill_rect(
                        img,
                        origin + col * scale,
                        y + row as u32 * scale,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgb<u8> = Rgb([0, 0, 0]);
    const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 4), 0);
        assert_eq!(text_width("7", 4), 12);
        assert_eq!(text_width("31", 2), 14);
    }

    #[test]
    fn test_draw_one() {
        let mut img = RgbImage::from_pixel(3, 5, PAPER);
        draw_text(&mut img, 0, 0, "1", 1, INK);

        assert_eq!(*img.get_pixel(1, 0), INK);
        assert_eq!(*img.get_pixel(0, 0), PAPER);
        assert_eq!(*img.get_pixel(0, 4), INK);
        assert_eq!(*img.get_pixel(2, 4), INK);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut img = RgbImage::from_pixel(4, 4, PAPER);
        fill_rect(&mut img, 2, 2, 10, 10, INK);
        assert_eq!(*img.get_pixel(3, 3), INK);
        assert_eq!(*img.get_pixel(1, 1), PAPER);
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let mut img = RgbImage::from_pixel(8, 5, PAPER);
        draw_text(&mut img, 0, 0, "x", 1, INK);
        assert!(img.pixels().all(|p| *p == PAPER));
    }
}
