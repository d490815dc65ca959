/// Background key sampling.
///
/// A dedicated thread blocks on the input device and drops whatever it reads
/// into a single-slot mailbox.  The game loop empties the mailbox once per
/// tick.  There is no queue: a newer key overwrites an older one that was
/// never taken.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error, info};

use crate::entities::InputEvent;
use crate::error::{GameError, InputError};

/// Source of key presses.
///
/// `read_event` may block, but should return `Ok(None)` now and then when
/// nothing arrives so the sampler gets a chance to notice it was stopped.
pub trait InputDevice {
    fn read_event(&mut self) -> Result<Option<InputEvent>, InputError>;
}

// ── Mailbox ───────────────────────────────────────────────────────────────────

/// Shared "last key" cell.  Cloning yields another handle to the same slot.
#[derive(Clone, Debug, Default)]
pub struct InputChannel {
    slot: Arc<Mutex<Option<InputEvent>>>,
}

impl InputChannel {
    pub fn new() -> Self {
        Self::default()
    }

    // The slot holds plain data, so a writer that panicked mid-store cannot
    // leave it half-written.
    fn lock(&self) -> MutexGuard<'_, Option<InputEvent>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `event`, replacing anything not yet taken.
    pub fn publish(&self, event: InputEvent) {
        *self.lock() = Some(event);
    }

    /// Remove and return the pending event, if any.
    pub fn take(&self) -> Option<InputEvent> {
        self.lock().take()
    }
}

// ── Sampler thread ────────────────────────────────────────────────────────────

pub struct InputSampler {
    channel: InputChannel,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputSampler {
    /// Start sampling `device` on a new thread.
    pub fn spawn<D>(device: D) -> std::io::Result<Self>
    where
        D: InputDevice + Send + 'static,
    {
        let channel = InputChannel::new();
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = {
            let channel = channel.clone();
            let shutdown = Arc::clone(&shutdown);
            thread::Builder::new()
                .name("input-sampler".to_string())
                .spawn(move || sample_loop(device, &channel, &shutdown))?
        };
        info!("InputSampler: spawned");

        Ok(Self {
            channel,
            shutdown,
            handle: Some(handle),
        })
    }

    pub fn channel(&self) -> InputChannel {
        self.channel.clone()
    }

    /// False once the thread has exited, e.g. after a device error.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Ask the thread to stop and wait for it.  The thread notices at its
    /// next poll boundary.
    pub fn shutdown(mut self) -> Result<(), GameError> {
        self.shutdown.store(true, Ordering::Release);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| GameError::SamplerPanicked),
            None => Ok(()),
        }
    }
}

impl Drop for InputSampler {
    fn drop(&mut self) {
        // Not joined here: the device may be blocked for a while and drop
        // must not hang.
        self.shutdown.store(true, Ordering::Release);
    }
}

fn sample_loop<D: InputDevice>(mut device: D, channel: &InputChannel, shutdown: &AtomicBool) {
    info!("InputSampler: Thread started");
    while !shutdown.load(Ordering::Acquire) {
        match device.read_event() {
            Ok(Some(event)) => {
                debug!("InputSampler: {:?}", event);
                channel.publish(event);
            }
            Ok(None) => {}
            Err(e) => {
                // Fatal to this thread only; the game keeps running without
                // fresh input.
                error!("InputSampler: {}, no further input will be read", e);
                break;
            }
        }
    }
    info!("InputSampler: Thread stopped");
}

// ── Terminal device ───────────────────────────────────────────────────────────

/// Reads keys from the controlling terminal via crossterm.  The terminal
/// must already be in raw mode.
pub struct TerminalInput {
    poll: Duration,
}

impl TerminalInput {
    pub fn new(poll: Duration) -> Self {
        Self { poll }
    }
}

impl InputDevice for TerminalInput {
    fn read_event(&mut self) -> Result<Option<InputEvent>, InputError> {
        if !event::poll(self.poll)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Translate a crossterm key event.  Releases and non-character keys other
/// than Esc are dropped.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Interrupt)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Interrupt),
        KeyCode::Char(c) => Some(InputEvent::Key(c)),
        _ => None,
    }
}
