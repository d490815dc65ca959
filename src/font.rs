/// Text rendering for the HUD: the score counter and the "Hit" banner.

use crate::canvas::{Canvas, Pixel};

/// Anything that can draw a string into the canvas with its top-left
/// corner at `(x, y)`.
pub trait TextRenderer {
    fn draw_text(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str);
}

pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 5;
/// Horizontal distance between glyph origins (one column of spacing).
pub const GLYPH_ADVANCE: i32 = 4;

// ── 3x5 bitmap glyphs ───────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u32; GLYPH_HEIGHT]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b011, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

const LETTER_H: [u32; GLYPH_HEIGHT] = [0b101, 0b101, 0b111, 0b101, 0b101];
const LETTER_I: [u32; GLYPH_HEIGHT] = [0b010, 0b000, 0b010, 0b010, 0b010];
const LETTER_T: [u32; GLYPH_HEIGHT] = [0b010, 0b111, 0b010, 0b010, 0b011];

/// Tiny fixed-width pixel font covering digits and the letters of "Hit".
#[derive(Clone, Copy, Debug, Default)]
pub struct PixelFont;

impl PixelFont {
    pub fn glyph(c: char) -> Option<&'static [u32; GLYPH_HEIGHT]> {
        match c {
            '0'..='9' => Some(&DIGITS[c as usize - '0' as usize]),
            'H' => Some(&LETTER_H),
            'i' => Some(&LETTER_I),
            't' => Some(&LETTER_T),
            _ => None,
        }
    }
}

impl TextRenderer for PixelFont {
    /// Characters without a glyph (including space) leave a blank cell.
    fn draw_text(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str) {
        let mut cx = x;
        for c in text.chars() {
            if let Some(rows) = Self::glyph(c) {
                canvas.blit(cx, y, GLYPH_WIDTH, rows, Pixel::On);
            }
            cx = cx.saturating_add(GLYPH_ADVANCE);
        }
    }
}
