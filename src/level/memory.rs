//! Per-tick scratchpad of what happened during the current frame.
//!
//! The level fills this record while simulating one frame and the caller may
//! inspect it afterwards. It is cleared at the start of every frame.

use glam::IVec2;
use smallvec::SmallVec;

use crate::entity::ghost::GhostId;

/// What happened during the current simulation frame.
#[derive(Debug, Default, Clone)]
pub struct Memory {
    /// Tile where food was found this tick, if any.
    pub food_found_tile: Option<IVec2>,
    /// The found food was an energizer.
    pub energizer_found: bool,
    /// The last food of the level was eaten this tick.
    pub level_completed: bool,
    /// Index of the bonus whose food threshold was reached this tick.
    pub bonus_reached: Option<usize>,
    pub pac_power_starts: bool,
    pub pac_power_active: bool,
    pub pac_power_fading: bool,
    pub pac_power_lost: bool,
    pub pac_killed: bool,
    /// Frightened ghosts on Pac-Man's tile this tick, in id order.
    pub pac_prey: SmallVec<[GhostId; 4]>,
    /// Ghosts killed this tick, in id order.
    pub killed_ghosts: SmallVec<[GhostId; 4]>,
}

impl Memory {
    /// Clears the record for the next frame.
    pub fn forget(&mut self) {
        *self = Memory::default();
    }

    /// Whether anything noteworthy happened this frame. Used to keep trace
    /// logs quiet on uneventful ticks.
    pub fn is_eventful(&self) -> bool {
        self.food_found_tile.is_some()
            || self.level_completed
            || self.bonus_reached.is_some()
            || self.pac_power_starts
            || self.pac_power_fading
            || self.pac_power_lost
            || self.pac_killed
            || !self.pac_prey.is_empty()
            || !self.killed_ghosts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forget_resets_everything() {
        let mut memory = Memory {
            food_found_tile: Some(IVec2::new(1, 1)),
            energizer_found: true,
            level_completed: true,
            pac_killed: true,
            ..Memory::default()
        };
        memory.pac_prey.push(GhostId::Red);
        memory.forget();
        assert!(memory.food_found_tile.is_none());
        assert!(!memory.energizer_found);
        assert!(!memory.level_completed);
        assert!(!memory.pac_killed);
        assert!(memory.pac_prey.is_empty());
        assert!(!memory.is_eventful());
    }

    #[test]
    fn test_eventful_on_food() {
        let mut memory = Memory::default();
        assert!(!memory.is_eventful());
        memory.food_found_tile = Some(IVec2::new(3, 4));
        assert!(memory.is_eventful());
    }
}
