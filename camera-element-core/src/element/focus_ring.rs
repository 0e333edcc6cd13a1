use std::thread;
use std::time::Duration;

use crate::dispatch::generation::{Generation, GenerationCounter};
use crate::dispatch::main_queue::{MainHandle, MainMessage};

/// Transient tap-focus indicator.
///
/// Shown at the touch point and dismissed by a timer thread after a fixed
/// interval, independent of any hardware operation. A newer `show`
/// supersedes the timers of older ones.
#[derive(Debug)]
pub struct FocusRing {
    duration: Duration,
    displays: GenerationCounter,
    position: Option<(f32, f32)>,
}

impl FocusRing {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            displays: GenerationCounter::new(),
            position: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }

    /// View-local centre of the visible ring.
    pub fn position(&self) -> Option<(f32, f32)> {
        self.position
    }

    pub fn show(&mut self, x: f32, y: f32, main: &MainHandle) {
        let display = self.displays.advance();
        self.position = Some((x, y));

        let main = main.clone();
        let duration = self.duration;
        let spawned = thread::Builder::new()
            .name("focus-ring-timer".into())
            .spawn(move || {
                thread::sleep(duration);
                main.post(MainMessage::FocusRingExpired { display });
            });
        if let Err(e) = spawned {
            log::error!("Failed to spawn focus ring timer: {}", e);
            self.hide();
        }
    }

    /// Apply a timer expiry. Returns `true` if it dismissed the ring.
    pub fn expire(&mut self, display: Generation) -> bool {
        if !self.displays.is_current(display) {
            return false;
        }
        self.position = None;
        true
    }

    pub fn hide(&mut self) {
        self.displays.advance();
        self.position = None;
    }
}
