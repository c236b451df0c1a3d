//! Tick-based countdown timer used throughout the simulation (hunting
//! phases, power pellets, bonus lifetimes, animation pacing).
//!
//! There is no wall-clock dependency: the driving loop advances the
//! simulation at a fixed logical rate and every timer counts those ticks.

use crate::constants::TICKS_PER_SECOND;

/// Converts seconds at the reference tick rate into a tick count.
pub const fn secs_to_ticks(seconds: u64) -> u64 {
    seconds * TICKS_PER_SECOND
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Created or reset, not yet counting.
    Ready,
    Running,
    Stopped,
    Expired,
}

/// A countdown over discrete ticks with start/stop/reset/expire semantics.
///
/// A duration of [`TickTimer::INDEFINITE`] never expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTimer {
    duration: u64,
    tick: u64,
    state: TimerState,
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TickTimer {
    /// Sentinel duration for a timer that runs forever.
    pub const INDEFINITE: u64 = u64::MAX;

    pub const fn new() -> Self {
        Self {
            duration: 0,
            tick: 0,
            state: TimerState::Ready,
        }
    }

    /// Sets a new duration and starts counting from zero.
    pub fn restart_ticks(&mut self, ticks: u64) {
        self.duration = ticks;
        self.tick = 0;
        self.state = TimerState::Running;
    }

    /// Sets a new duration in seconds at the reference tick rate and starts
    /// counting from zero.
    pub fn restart_seconds(&mut self, seconds: u64) {
        self.restart_ticks(secs_to_ticks(seconds));
    }

    /// Starts counting towards no expiry at all.
    pub fn restart_indefinitely(&mut self) {
        self.restart_ticks(Self::INDEFINITE);
    }

    /// Resumes a stopped or ready timer without touching the tick count.
    pub fn start(&mut self) {
        if matches!(self.state, TimerState::Ready | TimerState::Stopped) {
            self.state = TimerState::Running;
        }
    }

    /// Pauses a running timer.
    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
        }
    }

    /// Returns the timer to `Ready` with a zero tick count and duration.
    pub fn reset(&mut self) {
        self.duration = 0;
        self.tick = 0;
        self.state = TimerState::Ready;
    }

    /// Advances one tick. Only a running timer moves; expiry happens on the
    /// tick that reaches the duration.
    pub fn advance(&mut self) {
        if self.state != TimerState::Running {
            return;
        }
        self.tick += 1;
        if self.duration != Self::INDEFINITE && self.tick >= self.duration {
            self.state = TimerState::Expired;
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn has_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Ticks counted so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Ticks left until expiry, or `INDEFINITE` for an endless timer.
    pub fn remaining(&self) -> u64 {
        if self.duration == Self::INDEFINITE {
            Self::INDEFINITE
        } else {
            self.duration.saturating_sub(self.tick)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_ready() {
        let timer = TickTimer::new();
        assert_eq!(timer.state(), TimerState::Ready);
        assert_eq!(timer.tick_count(), 0);
    }

    #[test]
    fn test_restart_and_expire() {
        let mut timer = TickTimer::new();
        timer.restart_ticks(3);
        assert!(timer.is_running());
        timer.advance();
        timer.advance();
        assert!(!timer.has_expired());
        assert_eq!(timer.remaining(), 1);
        timer.advance();
        assert!(timer.has_expired());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_expired_timer_does_not_advance() {
        let mut timer = TickTimer::new();
        timer.restart_ticks(1);
        timer.advance();
        assert!(timer.has_expired());
        timer.advance();
        assert_eq!(timer.tick_count(), 1);
    }

    #[test]
    fn test_stop_and_start() {
        let mut timer = TickTimer::new();
        timer.restart_ticks(10);
        timer.advance();
        timer.stop();
        timer.advance();
        assert_eq!(timer.tick_count(), 1);
        timer.start();
        timer.advance();
        assert_eq!(timer.tick_count(), 2);
    }

    #[test]
    fn test_indefinite_never_expires() {
        let mut timer = TickTimer::new();
        timer.restart_indefinitely();
        for _ in 0..10_000 {
            timer.advance();
        }
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), TickTimer::INDEFINITE);
    }

    #[test]
    fn test_reset_clears_expiry() {
        let mut timer = TickTimer::new();
        timer.restart_ticks(1);
        timer.advance();
        assert!(timer.has_expired());
        timer.reset();
        assert_eq!(timer.state(), TimerState::Ready);
        assert!(!timer.has_expired());
    }

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1), 60);
        assert_eq!(secs_to_ticks(6), 360);
    }
}
