/// Frame composition — all canvas drawing for a tick lives here.
///
/// Functions receive the canvas plus immutable views of the state.  No game
/// logic is performed; this module only translates state into pixels.

use crate::canvas::{Canvas, Pixel};
use crate::compute::JUMP_APEX;
use crate::entities::PhysicsState;
use crate::font::TextRenderer;
use crate::sprites::SpriteAtlas;

// ── Layout ────────────────────────────────────────────────────────────────────

pub const SCORE_POS: (i32, i32) = (0, 0);
pub const OBSTACLE_TOP: i32 = 32;
pub const OBSTACLE_BOTTOM: i32 = 42;
/// Obstacle spans `x..=x + OBSTACLE_EXTENT`.
pub const OBSTACLE_EXTENT: i32 = 3;
pub const CHARACTER_X: i32 = 60;
pub const GROUND_ROWS: [i32; 2] = [43, 44];
pub const HIT_POS: (i32, i32) = (40, 10);

// ── Public entry points ───────────────────────────────────────────────────────

/// Draw one complete tick.
///
/// `before` is the state entering the tick and `after` the state it
/// produced: the score, obstacle and animation frame are shown as they were
/// when the tick began, while the character's height already reflects this
/// tick's physics.
pub fn compose_frame<T: TextRenderer + ?Sized>(
    canvas: &mut Canvas,
    atlas: &SpriteAtlas,
    font: &T,
    before: &PhysicsState,
    after: &PhysicsState,
) {
    canvas.clear(Pixel::Off);
    font.draw_text(canvas, SCORE_POS.0, SCORE_POS.1, &before.score.to_string());
    draw_obstacle(canvas, before.obstacle_x);
    draw_character(canvas, atlas, before.frame_index, after.jump_offset);
    draw_ground(canvas);
}

/// Stamp the end-of-run banner over whatever the canvas holds.
pub fn compose_hit_overlay<T: TextRenderer + ?Sized>(canvas: &mut Canvas, font: &T) {
    font.draw_text(canvas, HIT_POS.0, HIT_POS.1, "Hit");
}

// ── Pieces ────────────────────────────────────────────────────────────────────

pub fn draw_obstacle(canvas: &mut Canvas, x: i32) {
    canvas.fill_rect(x, OBSTACLE_TOP, x + OBSTACLE_EXTENT, OBSTACLE_BOTTOM, Pixel::On);
}

/// The sprite's top edge sits at `JUMP_APEX - jump_offset`, so a grounded
/// character's feet rest on the ground lines and a jump lifts it straight up.
pub fn draw_character(canvas: &mut Canvas, atlas: &SpriteAtlas, frame_index: u8, jump_offset: i32) {
    atlas
        .frame(frame_index)
        .draw(canvas, CHARACTER_X, JUMP_APEX - jump_offset);
}

pub fn draw_ground(canvas: &mut Canvas) {
    let right = canvas.width() as i32 - 1;
    for y in GROUND_ROWS {
        canvas.line(0, y, right, y, Pixel::On);
    }
}
