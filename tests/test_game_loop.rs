use std::thread;
use std::time::{Duration, Instant};

use test_log::test;

use pixel_jumper::canvas::{Canvas, Pixel};
use pixel_jumper::compute::{init_state, tick, JUMP_APEX};
use pixel_jumper::display::{Display, MemoryDisplay, LCD_HEIGHT, LCD_WIDTH};
use pixel_jumper::entities::{GameStatus, InputEvent, PhysicsState};
use pixel_jumper::error::{DisplayError, GameError, InputError};
use pixel_jumper::font::PixelFont;
use pixel_jumper::game_loop::*;
use pixel_jumper::input::{InputChannel, InputDevice};
use pixel_jumper::render::*;
use pixel_jumper::sprites::SpriteAtlas;

fn new_loop() -> (GameLoop<MemoryDisplay>, InputChannel) {
    let input = InputChannel::new();
    let game = GameLoop::new(MemoryDisplay::new(), input.clone(), Duration::ZERO);
    (game, input)
}

/// What the loop should have drawn for the tick `before -> after`.
fn expected_frame(before: &PhysicsState, after: &PhysicsState) -> Canvas {
    let mut c = Canvas::new(LCD_WIDTH, LCD_HEIGHT);
    compose_frame(&mut c, &SpriteAtlas::new(), &PixelFont, before, after);
    c
}

/// Step until the loop stops continuing, pressing jump on the given ticks.
fn play_script(game: &mut GameLoop<MemoryDisplay>, input: &InputChannel, jumps: &[u64], limit: u64) -> TickOutcome {
    for t in 1..=limit {
        if jumps.contains(&t) {
            input.publish(InputEvent::Key(' '));
        }
        let outcome = game.step().unwrap();
        if outcome != TickOutcome::Continue {
            return outcome;
        }
    }
    TickOutcome::Continue
}

// ── Idle run ──────────────────────────────────────────────────────────────────

#[test]
fn idle_run_ends_with_single_hit_frame() {
    let (mut game, _input) = new_loop();
    let summary = game.run().unwrap();

    assert_eq!(summary.reason, EndReason::Hit);
    assert_eq!(summary.ticks, 17);
    assert_eq!(summary.score, 51);
    assert_eq!(game.status(), GameStatus::Hit);

    // 16 ordinary frames plus the hit frame.
    let frames = &game.display().frames;
    assert_eq!(frames.len(), 17);

    let mut state = init_state();
    for (i, frame) in frames.iter().enumerate() {
        let next = tick(&state, None);
        let mut expected = expected_frame(&state, &next);
        if i == 16 {
            compose_hit_overlay(&mut expected, &PixelFont);
        }
        assert_eq!(frame, &expected, "frame {}", i + 1);
        state = next;
    }
}

#[test]
fn hit_is_presented_only_once() {
    let (mut game, _input) = new_loop();
    game.run().unwrap();
    let count = game.display().frames.len();

    assert_eq!(game.step().unwrap(), TickOutcome::Hit);
    assert_eq!(game.step().unwrap(), TickOutcome::Hit);
    assert_eq!(game.display().frames.len(), count);
    assert_eq!(game.ticks(), 17);
}

#[test]
fn hit_frame_differs_from_play_frame_only_by_banner() {
    let (mut game, _input) = new_loop();
    game.run().unwrap();
    let hit = game.display().last().unwrap().clone();

    let mut banner = Canvas::new(LCD_WIDTH, LCD_HEIGHT);
    compose_hit_overlay(&mut banner, &PixelFont);
    for y in 0..LCD_HEIGHT as i32 {
        for x in 0..LCD_WIDTH as i32 {
            if banner.get(x, y) == Pixel::On {
                assert_eq!(hit.get(x, y), Pixel::On);
            }
        }
    }
}

// ── Jumping ───────────────────────────────────────────────────────────────────

#[test]
fn timed_jump_clears_the_obstacle() {
    let (mut game, input) = new_loop();
    assert_eq!(play_script(&mut game, &input, &[15], 30), TickOutcome::Continue);
    assert_eq!(game.ticks(), 30);
    assert_eq!(game.display().frames.len(), 30);
}

#[test]
fn mistimed_jumps_are_hit() {
    for (jump_tick, hit_tick) in [(14, 20), (16, 17)] {
        let (mut game, input) = new_loop();
        assert_eq!(play_script(&mut game, &input, &[jump_tick], 30), TickOutcome::Hit);
        assert_eq!(game.ticks(), hit_tick, "jump on tick {}", jump_tick);
    }
}

#[test]
fn airborne_presses_change_nothing() {
    let (mut a, input_a) = new_loop();
    let (mut b, input_b) = new_loop();
    play_script(&mut a, &input_a, &[15], 25);
    play_script(&mut b, &input_b, &[15, 16, 18, 20], 25);
    assert_eq!(a.state(), b.state());
    assert_eq!(a.display().frames, b.display().frames);
}

#[test]
fn key_is_consumed_once() {
    let (mut game, input) = new_loop();
    input.publish(InputEvent::Key(' '));
    game.step().unwrap();
    assert!(game.state().ascending);
    assert_eq!(input.take(), None);
}

#[test]
fn jump_lifts_sprite_on_canvas() {
    let (mut game, input) = new_loop();
    input.publish(InputEvent::Key(' '));
    game.step().unwrap();
    let offset = game.state().jump_offset;
    assert_eq!(offset, 3);

    for (x, y) in SpriteAtlas::new().frame(1).points(CHARACTER_X, JUMP_APEX - offset) {
        assert_eq!(game.canvas().get(x, y), Pixel::On);
    }
}

// ── Composition ───────────────────────────────────────────────────────────────

#[test]
fn first_frame_layout() {
    let (mut game, _input) = new_loop();
    game.step().unwrap();
    let c = game.canvas();

    // Ground lines span the full width.
    for y in GROUND_ROWS {
        assert!((0..LCD_WIDTH as i32).all(|x| c.get(x, y) == Pixel::On));
    }
    // Obstacle drawn at its starting column.
    for y in OBSTACLE_TOP..=OBSTACLE_BOTTOM {
        for x in 0..=OBSTACLE_EXTENT {
            assert_eq!(c.get(x, y), Pixel::On, "({}, {})", x, y);
        }
    }
    assert_eq!(c.get(OBSTACLE_EXTENT + 1, OBSTACLE_TOP), Pixel::Off);
    // Score "0" in the corner.
    assert_eq!(c.get(0, 0), Pixel::On);
}

#[test]
fn no_pixels_leak_between_ticks() {
    let (mut game, _input) = new_loop();
    for _ in 0..10 {
        let before = *game.state();
        game.step().unwrap();
        let after = *game.state();
        assert_eq!(game.canvas(), &expected_frame(&before, &after));
    }
}

#[test]
fn compose_on_dirty_canvas_matches_fresh() {
    let before = init_state();
    let after = tick(&before, None);

    let mut dirty = Canvas::new(LCD_WIDTH, LCD_HEIGHT);
    dirty.clear(Pixel::On);
    dirty.line(0, 47, 83, 0, Pixel::Off);
    compose_frame(&mut dirty, &SpriteAtlas::new(), &PixelFont, &before, &after);

    assert_eq!(dirty, expected_frame(&before, &after));
}

// ── Interrupt & errors ────────────────────────────────────────────────────────

#[test]
fn interrupt_ends_run_without_drawing() {
    let (mut game, input) = new_loop();
    game.step().unwrap();
    game.step().unwrap();
    input.publish(InputEvent::Interrupt);

    let summary = game.run().unwrap();
    assert_eq!(summary.reason, EndReason::Interrupted);
    assert_eq!(summary.ticks, 2);
    assert_eq!(summary.score, 6);
    assert_eq!(game.display().frames.len(), 2);
    assert_eq!(game.status(), GameStatus::Running);
}

#[test]
fn display_failure_ends_the_run() {
    let input = InputChannel::new();
    let mut game = GameLoop::new(MemoryDisplay::failing_after(3), input, Duration::ZERO);
    match game.run() {
        Err(GameError::Display(DisplayError::Io(_))) => {}
        other => panic!("expected display error, got {:?}", other),
    }
    assert_eq!(game.ticks(), 4);
    assert_eq!(game.display().frames.len(), 3);
}

#[test]
fn memory_display_rejects_wrong_size() {
    let mut display = MemoryDisplay::new();
    let err = display.present(&Canvas::new(10, 10)).unwrap_err();
    assert!(matches!(err, DisplayError::SizeMismatch { got_w: 10, want_w: 84, .. }));
}

#[test]
fn loop_can_borrow_its_display() {
    let mut display = MemoryDisplay::new();
    {
        let mut game = GameLoop::new(&mut display, InputChannel::new(), Duration::ZERO);
        game.step().unwrap();
    }
    assert_eq!(display.frames.len(), 1);
}

// ── Pacing ────────────────────────────────────────────────────────────────────

#[test]
fn run_sleeps_between_ticks() {
    let input = InputChannel::new();
    let mut game = GameLoop::new(MemoryDisplay::new(), input, Duration::from_millis(5));
    let start = Instant::now();
    let summary = game.run().unwrap();
    // 16 full slots elapse before the 17th tick hits.
    assert_eq!(summary.ticks, 17);
    assert!(start.elapsed() >= Duration::from_millis(80));
}

// ── play() with a background sampler ──────────────────────────────────────────

struct IdleDevice;

impl InputDevice for IdleDevice {
    fn read_event(&mut self) -> Result<Option<InputEvent>, InputError> {
        thread::sleep(Duration::from_millis(1));
        Ok(None)
    }
}

struct BrokenDevice;

impl InputDevice for BrokenDevice {
    fn read_event(&mut self) -> Result<Option<InputEvent>, InputError> {
        Err(InputError::Closed)
    }
}

#[test]
fn play_runs_to_hit_and_stops_sampler() {
    let mut display = MemoryDisplay::new();
    let summary = play(IdleDevice, &mut display, Duration::ZERO).unwrap();
    assert_eq!(summary.reason, EndReason::Hit);
    assert_eq!(display.frames.len(), 17);
}

#[test]
fn play_survives_dead_input_device() {
    let mut display = MemoryDisplay::new();
    let summary = play(BrokenDevice, &mut display, Duration::from_millis(1)).unwrap();
    assert_eq!(summary.reason, EndReason::Hit);
    assert_eq!(summary.ticks, 17);
}

struct PanickingDevice;

impl InputDevice for PanickingDevice {
    fn read_event(&mut self) -> Result<Option<InputEvent>, InputError> {
        panic!("keyboard driver crashed");
    }
}

#[test]
fn display_error_wins_over_sampler_panic() {
    let result = play(PanickingDevice, MemoryDisplay::failing_after(2), Duration::ZERO);
    assert!(matches!(result, Err(GameError::Display(DisplayError::Io(_)))));
}

#[test]
fn sampler_panic_surfaces_after_clean_run() {
    let mut display = MemoryDisplay::new();
    let result = play(PanickingDevice, &mut display, Duration::ZERO);
    assert!(matches!(result, Err(GameError::SamplerPanicked)));
    // The round itself still ran to the Hit frame.
    assert_eq!(display.frames.len(), 17);
}
