//! Countdown clock for timed play.
//!
//! The clock itself is passive: a page-level task ticks it once per second
//! while the running flag holds. Remaining time never goes below zero.

use std::time::Duration;

use shakmaty::Color;

#[derive(Debug, Clone)]
pub struct Clock {
    white: Duration,
    black: Duration,
    active: Color,
    running: bool,
}

impl Clock {
    pub fn new(initial: Duration) -> Self {
        Clock {
            white: initial,
            black: initial,
            active: Color::White,
            running: false,
        }
    }

    pub fn remaining(&self, color: Color) -> Duration {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn active(&self) -> Color {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// A side whose time reached zero has lost on time.
    pub fn is_flagged(&self, color: Color) -> bool {
        self.remaining(color).is_zero()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Hand the move over: the other side's time starts counting.
    pub fn press(&mut self) {
        self.active = !self.active;
    }

    /// Advance the active side's countdown. Ignored while stopped;
    /// saturates at zero and clears the running flag when time runs out.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.running {
            return;
        }
        let side = match self.active {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        *side = side.saturating_sub(elapsed);
        if side.is_zero() {
            self.running = false;
        }
    }
}
