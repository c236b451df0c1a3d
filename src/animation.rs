//! Cosmetic on/off pacing for the energizer blink and the maze flash.
//!
//! The simulation only advances these; a renderer reads the phase and the
//! running state.

/// A square-wave toggle over ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pulse {
    interval: u32,
    start_on: bool,
    on: bool,
    tick: u32,
    running: bool,
}

impl Pulse {
    /// Creates a stopped pulse that toggles every `interval` ticks once
    /// running, starting in the `start_on` phase.
    pub fn new(interval: u32, start_on: bool) -> Self {
        Self {
            interval,
            start_on,
            on: start_on,
            tick: 0,
            running: false,
        }
    }

    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.tick += 1;
        if self.tick >= self.interval {
            self.tick = 0;
            self.on = !self.on;
        }
    }

    pub fn restart(&mut self) {
        self.tick = 0;
        self.on = self.start_on;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.tick = 0;
        self.on = self.start_on;
        self.running = false;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
