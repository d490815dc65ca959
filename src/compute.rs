/// Pure game-logic functions.
///
/// Every public function takes the current `PhysicsState` by reference and
/// returns a brand-new one.  Nothing here touches the canvas, the clock or
/// the input thread, so a whole run can be replayed from a key script.

use crate::entities::{InputEvent, PhysicsState};

// ── Balancing constants ──────────────────────────────────────────────────────

/// Key that starts a jump.
pub const JUMP_KEY: char = ' ';
/// Score added every tick.
pub const SCORE_PER_TICK: u32 = 3;
/// Score needed per point of speed bonus.
pub const SCORE_PER_SPEED_STEP: u32 = 100;
pub const MAX_SPEED_BONUS: i32 = 10;
/// Obstacle speed before any bonus.
pub const BASE_OBSTACLE_SPEED: i32 = 4;
/// Once the obstacle's left edge reaches this column it wraps around.
pub const OBSTACLE_WRAP_X: i32 = 84;
/// Where a wrapped obstacle re-enters, just off the left edge.
pub const OBSTACLE_RESET_X: i32 = -4;
pub const JUMP_STEP: i32 = 3;
pub const JUMP_APEX: i32 = 12;
/// Obstacle positions that overlap the character's footprint.
pub const COLLISION_MIN_X: i32 = 67;
pub const COLLISION_MAX_X: i32 = 80;
/// Highest jump offset still low enough to touch the obstacle.
pub const COLLISION_MAX_OFFSET: i32 = 7;

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn init_state() -> PhysicsState {
    PhysicsState::default()
}

// ── Difficulty ───────────────────────────────────────────────────────────────

pub fn speed_bonus_for(score: u32) -> i32 {
    ((score / SCORE_PER_SPEED_STEP) as i32).min(MAX_SPEED_BONUS)
}

// ── Single-concern transitions ───────────────────────────────────────────────

/// Move the obstacle right by `4 + speed_bonus`, wrapping once it reaches
/// the right edge.
pub fn advance_obstacle(state: &PhysicsState) -> PhysicsState {
    let x = state.obstacle_x + BASE_OBSTACLE_SPEED + state.speed_bonus;
    PhysicsState {
        obstacle_x: if x >= OBSTACLE_WRAP_X { OBSTACLE_RESET_X } else { x },
        ..*state
    }
}

/// Start a jump if `event` is the jump key and the character is on the
/// ground.  Anything else leaves the state untouched.
pub fn request_jump(state: &PhysicsState, event: Option<InputEvent>) -> PhysicsState {
    match event {
        Some(InputEvent::Key(JUMP_KEY)) if state.is_grounded() => {
            PhysicsState {
                ascending: true,
                ..*state
            }
        }
        _ => *state,
    }
}

/// One step of the jump arc.  Rising adds 3 until the apex; the tick that
/// finds the character already at the apex only flips it to falling.
/// Falling subtracts 3, floored at 0.
pub fn advance_jump(state: &PhysicsState) -> PhysicsState {
    let (jump_offset, ascending) = if state.ascending {
        if state.jump_offset < JUMP_APEX {
            ((state.jump_offset + JUMP_STEP).min(JUMP_APEX), true)
        } else {
            (JUMP_APEX, false)
        }
    } else {
        ((state.jump_offset - JUMP_STEP).max(0), false)
    };
    PhysicsState {
        jump_offset,
        ascending,
        ..*state
    }
}

/// 1 → 2 → 3 → 1.
pub fn next_frame_index(index: u8) -> u8 {
    index % 3 + 1
}

/// True when the obstacle sits inside the character's footprint and the
/// character has not risen clear of it.
pub fn is_collision(state: &PhysicsState) -> bool {
    (COLLISION_MIN_X..=COLLISION_MAX_X).contains(&state.obstacle_x)
        && state.jump_offset <= COLLISION_MAX_OFFSET
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick, consuming at most one input event.
///
/// Order matters and mirrors the drawing order in `render`: the speed bonus
/// is derived from the score before this tick's increment, the obstacle
/// moves before the jump is considered, and the animation frame advances
/// last.
pub fn tick(state: &PhysicsState, event: Option<InputEvent>) -> PhysicsState {
    let state = PhysicsState {
        speed_bonus: speed_bonus_for(state.score),
        ..*state
    };
    let state = PhysicsState {
        score: state.score + SCORE_PER_TICK,
        ..state
    };
    let state = advance_obstacle(&state);
    let state = request_jump(&state, event);
    let state = advance_jump(&state);
    PhysicsState {
        frame_index: next_frame_index(state.frame_index),
        ..state
    }
}
