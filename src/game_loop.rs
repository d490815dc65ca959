/// The fixed-cadence loop: sample input, step physics, compose, present.
///
/// `GameLoop` is the only owner of the physics state and the canvas.  The
/// input thread talks to it exclusively through an `InputChannel`.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::canvas::Canvas;
use crate::compute::{init_state, is_collision, tick};
use crate::display::{Display, LCD_HEIGHT, LCD_WIDTH};
use crate::entities::{GameStatus, InputEvent, PhysicsState};
use crate::error::GameError;
use crate::font::{PixelFont, TextRenderer};
use crate::input::{InputChannel, InputDevice, InputSampler};
use crate::render::{compose_frame, compose_hit_overlay};
use crate::sprites::SpriteAtlas;

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame presented, keep going.
    Continue,
    /// Collision; the "Hit" frame has been presented.
    Hit,
    /// The player aborted; nothing was drawn this tick.
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Hit,
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: EndReason,
    pub score: u32,
    pub ticks: u64,
}

pub struct GameLoop<D: Display, T: TextRenderer = PixelFont> {
    display: D,
    font: T,
    atlas: SpriteAtlas,
    canvas: Canvas,
    input: InputChannel,
    tick: Duration,
    state: PhysicsState,
    status: GameStatus,
    ticks: u64,
}

impl<D: Display> GameLoop<D, PixelFont> {
    pub fn new(display: D, input: InputChannel, tick: Duration) -> Self {
        Self::with_font(display, PixelFont, input, tick)
    }
}

impl<D: Display, T: TextRenderer> GameLoop<D, T> {
    pub fn with_font(display: D, font: T, input: InputChannel, tick: Duration) -> Self {
        Self {
            display,
            font,
            atlas: SpriteAtlas::new(),
            canvas: Canvas::new(LCD_WIDTH, LCD_HEIGHT),
            input,
            tick,
            state: init_state(),
            status: GameStatus::Running,
            ticks: 0,
        }
    }

    pub fn state(&self) -> &PhysicsState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    /// Run one tick without sleeping.
    ///
    /// Once a collision has been reported, further calls return `Hit`
    /// without drawing or presenting again.
    pub fn step(&mut self) -> Result<TickOutcome, GameError> {
        if self.status == GameStatus::Hit {
            return Ok(TickOutcome::Hit);
        }

        let event = self.input.take();
        if event == Some(InputEvent::Interrupt) {
            info!("GameLoop: interrupted at tick {}", self.ticks);
            return Ok(TickOutcome::Interrupted);
        }

        let before = self.state;
        let after = tick(&before, event);
        self.ticks += 1;
        if after.ascending && !before.ascending {
            debug!("GameLoop: jump at tick {}", self.ticks);
        }

        compose_frame(&mut self.canvas, &self.atlas, &self.font, &before, &after);
        self.state = after;

        if is_collision(&self.state) {
            info!(
                "GameLoop: hit at tick {} (obstacle_x={}, jump_offset={}, score={})",
                self.ticks, self.state.obstacle_x, self.state.jump_offset, self.state.score
            );
            self.status = GameStatus::Hit;
            compose_hit_overlay(&mut self.canvas, &self.font);
            self.display.present(&self.canvas)?;
            return Ok(TickOutcome::Hit);
        }

        self.display.present(&self.canvas)?;
        Ok(TickOutcome::Continue)
    }

    /// Tick until the character is hit or the player aborts.  Each tick
    /// sleeps whatever is left of its slot; overruns are not made up later.
    pub fn run(&mut self) -> Result<RunSummary, GameError> {
        info!("GameLoop: starting, tick = {:?}", self.tick);
        loop {
            let tick_start = Instant::now();
            let reason = match self.step()? {
                TickOutcome::Continue => None,
                TickOutcome::Hit => Some(EndReason::Hit),
                TickOutcome::Interrupted => Some(EndReason::Interrupted),
            };
            if let Some(reason) = reason {
                let summary = RunSummary {
                    reason,
                    score: self.state.score,
                    ticks: self.ticks,
                };
                info!("GameLoop: finished {:?}", summary);
                return Ok(summary);
            }

            let elapsed = tick_start.elapsed();
            if elapsed < self.tick {
                std::thread::sleep(self.tick - elapsed);
            } else if !self.tick.is_zero() {
                warn!("GameLoop: tick {} overran by {:?}", self.ticks, elapsed - self.tick);
            }
        }
    }
}

/// Play one round end to end: start sampling `device`, run the loop against
/// `display`, then stop the sampler once the final frame is out.
///
/// The sampler is always joined.  A loop error wins over a sampler panic.
pub fn play<I, D>(device: I, display: D, tick: Duration) -> Result<RunSummary, GameError>
where
    I: InputDevice + Send + 'static,
    D: Display,
{
    let sampler = InputSampler::spawn(device)?;
    let mut game = GameLoop::new(display, sampler.channel(), tick);
    let result = game.run();
    if !sampler.is_running() {
        warn!("GameLoop: input sampler had already stopped");
    }
    // A display failure is the cause of the run ending; report it over any
    // trouble stopping the sampler.
    let stopped = sampler.shutdown();
    if let (Err(_), Err(e)) = (&result, &stopped) {
        warn!("GameLoop: {} while ending after a display error", e);
    }
    let summary = result?;
    stopped?;
    Ok(summary)
}
