//! Display services — the hand-off point for finished frames.
//!
//! The game loop composes a whole frame into a `Canvas` and passes it to a
//! `Display`.  Implementations only transmit pixels; no game logic lives
//! here.

mod terminal;

pub use terminal::{TerminalDisplay, TerminalSession};

use crate::canvas::Canvas;
use crate::error::DisplayError;

/// PCD8544 panel resolution.
pub const LCD_WIDTH: usize = 84;
pub const LCD_HEIGHT: usize = 48;

pub trait Display {
    /// Show `canvas`.  An error here ends the run.
    fn present(&mut self, canvas: &Canvas) -> Result<(), DisplayError>;
}

/// Reject canvases that do not match the panel.
pub fn check_size(canvas: &Canvas, width: usize, height: usize) -> Result<(), DisplayError> {
    if canvas.width() != width || canvas.height() != height {
        return Err(DisplayError::SizeMismatch {
            got_w: canvas.width(),
            got_h: canvas.height(),
            want_w: width,
            want_h: height,
        });
    }
    Ok(())
}

// ── In-memory display ─────────────────────────────────────────────────────────

/// Keeps a copy of every presented frame.  Can be told to start failing
/// after a number of frames to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    pub frames: Vec<Canvas>,
    fail_after: Option<usize>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `frames` presents, then fail every one after.
    pub fn failing_after(frames: usize) -> Self {
        Self {
            frames: Vec::new(),
            fail_after: Some(frames),
        }
    }

    pub fn last(&self) -> Option<&Canvas> {
        self.frames.last()
    }
}

impl Display for MemoryDisplay {
    fn present(&mut self, canvas: &Canvas) -> Result<(), DisplayError> {
        check_size(canvas, LCD_WIDTH, LCD_HEIGHT)?;
        if self.fail_after.is_some_and(|n| self.frames.len() >= n) {
            return Err(DisplayError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "display went away",
            )));
        }
        self.frames.push(canvas.clone());
        Ok(())
    }
}

impl<D: Display + ?Sized> Display for &mut D {
    fn present(&mut self, canvas: &Canvas) -> Result<(), DisplayError> {
        (**self).present(canvas)
    }
}
