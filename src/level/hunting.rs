//! The hunting phase timer: eight alternating scatter/chase phases per
//! level, driven by the per-variant duration tables.

use tracing::info;

use crate::error::{GameResult, PhaseError};
use crate::level::data::{hunting_durations, GameVariant};
use crate::timer::TickTimer;

/// Drives the eight scatter/chase phases of a level. Even phase indices are
/// scatter phases, odd ones chase phases; the final chase phase never ends.
pub struct HuntingTimer {
    phase: u8,
    timer: TickTimer,
    durations: [u64; 8],
}

impl HuntingTimer {
    pub fn new(variant: GameVariant, level_number: u32) -> Self {
        Self {
            phase: 0,
            timer: TickTimer::new(),
            durations: hunting_durations(variant, level_number),
        }
    }

    /// Restarts at the given phase index.
    pub fn start_phase(&mut self, phase: u8) -> GameResult<()> {
        if phase > 7 {
            return Err(PhaseError::IllegalPhaseIndex(phase).into());
        }
        self.phase = phase;
        self.timer.restart_ticks(self.durations[phase as usize]);
        info!(
            phase,
            name = self.phase_name(),
            ticks = self.durations[phase as usize],
            "Hunting phase started"
        );
        Ok(())
    }

    /// Advances one tick. Returns the new phase index when the current phase
    /// just ended and the next one began.
    pub fn advance(&mut self) -> GameResult<Option<u8>> {
        self.timer.advance();
        if self.timer.has_expired() {
            let next = self.phase + 1;
            self.start_phase(next)?;
            return Ok(Some(next));
        }
        Ok(None)
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn start(&mut self) {
        self.timer.start();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Scatter phase number (0..=3) while scattering.
    pub fn scatter_phase(&self) -> Option<u8> {
        (self.phase % 2 == 0).then_some(self.phase / 2)
    }

    /// Chase phase number (0..=3) while chasing.
    pub fn chasing_phase(&self) -> Option<u8> {
        (self.phase % 2 == 1).then_some(self.phase / 2)
    }

    pub fn phase_name(&self) -> &'static str {
        if self.phase % 2 == 0 {
            "scatter"
        } else {
            "chase"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_scattering() {
        let mut timer = HuntingTimer::new(GameVariant::Pacman, 1);
        timer.start_phase(0).unwrap();
        assert_eq!(timer.phase(), 0);
        assert_eq!(timer.scatter_phase(), Some(0));
        assert_eq!(timer.chasing_phase(), None);
        assert_eq!(timer.phase_name(), "scatter");
    }

    #[test]
    fn test_phase_change_after_duration() {
        let mut timer = HuntingTimer::new(GameVariant::Pacman, 1);
        timer.start_phase(0).unwrap();
        for _ in 0..419 {
            assert_eq!(timer.advance().unwrap(), None);
        }
        assert_eq!(timer.advance().unwrap(), Some(1));
        assert_eq!(timer.chasing_phase(), Some(0));
    }

    #[test]
    fn test_last_phase_never_ends() {
        let mut timer = HuntingTimer::new(GameVariant::Pacman, 1);
        timer.start_phase(7).unwrap();
        for _ in 0..100_000 {
            assert_eq!(timer.advance().unwrap(), None);
        }
        assert_eq!(timer.phase(), 7);
    }

    #[test]
    fn test_scatter_and_chase_are_mutually_exclusive() {
        let mut timer = HuntingTimer::new(GameVariant::Pacman, 1);
        for phase in 0..=7 {
            timer.start_phase(phase).unwrap();
            let scatter = timer.scatter_phase();
            let chase = timer.chasing_phase();
            assert!(scatter.is_some() != chase.is_some());
        }
    }

    #[test]
    fn test_illegal_phase_index() {
        let mut timer = HuntingTimer::new(GameVariant::Pacman, 1);
        assert!(timer.start_phase(8).is_err());
    }

    #[test]
    fn test_stop_freezes_phase_progress() {
        let mut timer = HuntingTimer::new(GameVariant::Pacman, 1);
        timer.start_phase(0).unwrap();
        timer.stop();
        for _ in 0..1000 {
            assert_eq!(timer.advance().unwrap(), None);
        }
        assert_eq!(timer.phase(), 0);
        timer.start();
        assert!(timer.is_running());
    }
}
