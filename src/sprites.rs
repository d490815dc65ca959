/// Animation frames for the running character.
///
/// Each frame is a 23×32 bit grid written as binary literals, one per row,
/// so the art stays readable in source.  A `1` is ink.

use crate::canvas::{Canvas, Pixel};

pub const SPRITE_WIDTH: usize = 23;
pub const SPRITE_HEIGHT: usize = 32;
pub const FRAME_COUNT: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteFrame {
    rows: [u32; SPRITE_HEIGHT],
}

impl SpriteFrame {
    pub const fn from_rows(rows: [u32; SPRITE_HEIGHT]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn is_set(&self, col: usize, row: usize) -> bool {
        col < SPRITE_WIDTH
            && row < SPRITE_HEIGHT
            && (self.rows[row] >> (SPRITE_WIDTH - 1 - col)) & 1 == 1
    }

    /// Canvas points covered by this frame when its top-left corner sits at
    /// `(origin_x, origin_y)`.  Points past the `i32` range are skipped.
    pub fn points(&self, origin_x: i32, origin_y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..SPRITE_HEIGHT).flat_map(move |row| {
            (0..SPRITE_WIDTH)
                .filter(move |&col| self.is_set(col, row))
                .filter_map(move |col| {
                    Some((
                        origin_x.checked_add(col as i32)?,
                        origin_y.checked_add(row as i32)?,
                    ))
                })
        })
    }

    pub fn draw(&self, canvas: &mut Canvas, origin_x: i32, origin_y: i32) {
        canvas.blit(origin_x, origin_y, SPRITE_WIDTH, &self.rows, Pixel::On);
    }
}

/// The fixed three-frame walk cycle, indexed 1..=3.
#[derive(Clone, Copy, Debug)]
pub struct SpriteAtlas {
    frames: &'static [SpriteFrame; FRAME_COUNT],
}

impl Default for SpriteAtlas {
    fn default() -> Self {
        Self { frames: &FRAMES }
    }
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame for a 1-based animation index.  Indices outside 1..=3 wrap.
    pub fn frame(&self, index: u8) -> &'static SpriteFrame {
        let slot = (index as usize + FRAME_COUNT - 1) % FRAME_COUNT;
        &self.frames[slot]
    }
}

// ── Bitmap data ───────────────────────────────────────────────────────────────

static FRAMES: [SpriteFrame; FRAME_COUNT] = [
    SpriteFrame::from_rows(FRAME_1),
    SpriteFrame::from_rows(FRAME_2),
    SpriteFrame::from_rows(FRAME_3),
];

// Frame 1 art is 30 rows tall; the last two rows are blank padding.
#[rustfmt::skip]
const FRAME_1: [u32; SPRITE_HEIGHT] = [
    0b00000000000000111100000,
    0b00001111000000111110000,
    0b00001111100001111110000,
    0b00011111100001111110000,
    0b00011111111111111111000,
    0b00011111111111111111000,
    0b00011111111111111111000,
    0b00111111111111111111000,
    0b00111111111111111111100,
    0b01001111000000011111110,
    0b01100000011110000000010,
    0b10110000111101000000001,
    0b10110000111110100000001,
    0b10110000111110100000001,
    0b10110000111110100000001,
    0b01110000011100100000001,
    0b01100000001111000000010,
    0b00100101000000000000010,
    0b00010011000000000000100,
    0b00001100000000000011110,
    0b00000011111111111100001,
    0b00000100000000000000001,
    0b00001000000000000011110,
    0b00001001000000000010000,
    0b00000111000000000010000,
    0b00000001000000000011100,
    0b00000010000000000100010,
    0b00000100000111111000010,
    0b00000100011000000111100,
    0b00000011100000000000000,
    0b00000000000000000000000,
    0b00000000000000000000000,
];

#[rustfmt::skip]
const FRAME_2: [u32; SPRITE_HEIGHT] = [
    0b00000000111110000000000,
    0b00000001111111000000000,
    0b00000001111111100000000,
    0b00000001111111100000000,
    0b00000001111111100000000,
    0b00000011111111111000000,
    0b00001111111111111110000,
    0b00011111111111111111000,
    0b00110111111111111111100,
    0b01000000000000111111110,
    0b01000011110000000000010,
    0b10000111001000000000001,
    0b10000111100100000000001,
    0b10000111100100000000001,
    0b10000111100100000000001,
    0b10000011101000000000001,
    0b10000001110000000000010,
    0b01000100000000000000010,
    0b00100100000000000000100,
    0b00011000000000000011000,
    0b00000111111111111100000,
    0b00000001000000001000000,
    0b00000001000001000100000,
    0b00000001000100100100000,
    0b00000001000100100010000,
    0b00000001000100100010000,
    0b00000001000011000010000,
    0b00000000100000000100000,
    0b00000000111100011000000,
    0b00000000100100010000000,
    0b00000000100100010000000,
    0b00000000011011100000000,
];

#[rustfmt::skip]
const FRAME_3: [u32; SPRITE_HEIGHT] = [
    0b00000000000000000000000,
    0b00000011110000000000000,
    0b00000111111000011110000,
    0b00000111111100111111000,
    0b00000111111100111111000,
    0b00001111111111111111100,
    0b00001111111111111111100,
    0b00111111111111111111100,
    0b00111111111111111111100,
    0b01110000000111111111110,
    0b01111000000000000000010,
    0b10110100000000000000001,
    0b10110100000000000000001,
    0b10110100000000000000001,
    0b10110100000000000000001,
    0b10011000000000000000001,
    0b01000000000000000000010,
    0b00100000000000000000010,
    0b00011000000000000000100,
    0b00000110000000000001000,
    0b00000001111111111110000,
    0b00000001001100000100000,
    0b00000001010000000100000,
    0b00000010010001000010000,
    0b00000010001110000010000,
    0b00000010000000000010000,
    0b00000010000000000001000,
    0b00000100000000000001000,
    0b00000100011111111001000,
    0b00000100100000000110000,
    0b00000011000000000000000,
    0b00000000000000000000000,
];
