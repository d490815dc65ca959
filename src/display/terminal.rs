use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use log::debug;

use super::{check_size, Display, LCD_HEIGHT, LCD_WIDTH};
use crate::canvas::{Canvas, Pixel};
use crate::error::DisplayError;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_INK: Color = Color::Rgb { r: 30, g: 40, b: 30 };
const C_BACKLIGHT: Color = Color::Rgb { r: 150, g: 185, b: 140 };

/// Emulates the 84×48 LCD in a terminal.  Each character cell carries two
/// vertically stacked pixels via half-block glyphs, so the panel occupies
/// 84 columns × 24 rows starting at `origin`.
pub struct TerminalDisplay<W: Write> {
    out: W,
    origin: (u16, u16),
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, origin: (u16, u16)) -> Self {
        Self { out, origin }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Raw mode, alternate screen and hidden cursor for the length of a run.
///
/// Dropping the session puts the terminal back, including when `start`
/// fails halfway through setup.
pub struct TerminalSession<W: Write> {
    out: W,
    raw_mode: bool,
}

impl<W: Write> TerminalSession<W> {
    pub fn start(out: W) -> std::io::Result<Self> {
        Self::open(out, true)
    }

    /// Same screen handling, but leaves the tty line discipline alone.  For
    /// writers that are not the controlling terminal.
    pub fn without_raw_mode(out: W) -> std::io::Result<Self> {
        Self::open(out, false)
    }

    fn open(out: W, raw_mode: bool) -> std::io::Result<Self> {
        if raw_mode {
            terminal::enable_raw_mode()?;
        }
        // From here on an early return drops `session`, which restores.
        let mut session = Self { out, raw_mode };
        session.out.execute(terminal::EnterAlternateScreen)?;
        session.out.execute(cursor::Hide)?;
        session.out.execute(terminal::Clear(terminal::ClearType::All))?;
        Ok(session)
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
        debug!("TerminalSession: terminal restored");
    }
}

fn cell(top: Pixel, bottom: Pixel) -> char {
    match (top, bottom) {
        (Pixel::On, Pixel::On) => '█',
        (Pixel::On, Pixel::Off) => '▀',
        (Pixel::Off, Pixel::On) => '▄',
        (Pixel::Off, Pixel::Off) => ' ',
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn present(&mut self, canvas: &Canvas) -> Result<(), DisplayError> {
        check_size(canvas, LCD_WIDTH, LCD_HEIGHT)?;
        let (ox, oy) = self.origin;

        self.out.queue(style::SetForegroundColor(C_INK))?;
        self.out.queue(style::SetBackgroundColor(C_BACKLIGHT))?;

        for row in 0..LCD_HEIGHT / 2 {
            let line: String = (0..LCD_WIDTH as i32)
                .map(|x| {
                    let y = row as i32 * 2;
                    cell(canvas.get(x, y), canvas.get(x, y + 1))
                })
                .collect();
            self.out.queue(cursor::MoveTo(ox, oy + row as u16))?;
            self.out.queue(Print(line))?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
