//! All game entity types — pure data, no logic.

// ── Input ─────────────────────────────────────────────────────────────────────

/// A single observation from the input device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable key press.
    Key(char),
    /// The player asked to abort the run (Ctrl-C, Esc, `q`).
    Interrupt,
}

// ── Character ─────────────────────────────────────────────────────────────────

/// Where the character is in its jump arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterPhase {
    Grounded,
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Hit,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the simulation tracks between ticks.  `Copy` so the pure
/// update functions can hand back a fresh value and callers can keep the
/// previous one for drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicsState {
    /// Height of the character above the ground line, 0..=12.
    pub jump_offset: i32,
    /// True while the character is still rising.
    pub ascending: bool,
    /// Left edge of the obstacle.  Goes negative right after a wrap.
    pub obstacle_x: i32,
    pub score: u32,
    /// Extra obstacle speed earned by score, 0..=10.
    pub speed_bonus: i32,
    /// Animation phase, 1..=3.
    pub frame_index: u8,
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self {
            jump_offset: 0,
            ascending: false,
            obstacle_x: 0,
            score: 0,
            speed_bonus: 0,
            frame_index: 1,
        }
    }
}

impl PhysicsState {
    pub fn phase(&self) -> CharacterPhase {
        if self.ascending {
            CharacterPhase::Ascending
        } else if self.jump_offset > 0 {
            CharacterPhase::Descending
        } else {
            CharacterPhase::Grounded
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.phase() == CharacterPhase::Grounded
    }
}
