//! Ghost house access control: the private and global dot counters and the
//! starving fallback deciding when locked ghosts may leave.

use strum_macros::AsRefStr;

use crate::entity::ghost::{Ghost, GhostId, GhostState};
use crate::timer::secs_to_ticks;

/// Why a locked ghost gets to leave the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum UnlockReason {
    #[strum(serialize = "unlocked immediately")]
    Immediate,
    #[strum(serialize = "global dot counter reached limit")]
    GlobalCounter,
    #[strum(serialize = "private dot counter reached limit")]
    PrivateCounter,
    #[strum(serialize = "Pac-Man starved too long")]
    PacStarved,
}

/// Per-ghost dot limits before the private counter releases a ghost.
fn private_dot_limit(id: GhostId, level_number: u32) -> u16 {
    match id {
        GhostId::Red | GhostId::Pink => 0,
        GhostId::Cyan => {
            if level_number == 1 {
                30
            } else {
                0
            }
        }
        GhostId::Orange => match level_number {
            1 => 60,
            2 => 50,
            _ => 0,
        },
    }
}

/// Global counter limits used after Pac-Man lost a life.
fn global_dot_limit(id: GhostId) -> u16 {
    match id {
        GhostId::Red => 0,
        GhostId::Pink => 7,
        GhostId::Cyan => 17,
        GhostId::Orange => 32,
    }
}

/// Ticks without food after which the preferred locked ghost is released
/// anyway.
fn pac_starving_limit(level_number: u32) -> u32 {
    if level_number < 5 {
        secs_to_ticks(4) as u32
    } else {
        secs_to_ticks(3) as u32
    }
}

/// Dot counter state controlling when ghosts may leave the house.
///
/// Normally each ghost has a private counter; after Pac-Man lost a life a
/// single global counter takes over until it releases the orange ghost.
#[derive(Debug, Default)]
pub struct GhostHouse {
    counters: [u16; 4],
    global_counter: u16,
    global_enabled: bool,
}

impl GhostHouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, id: GhostId) -> u16 {
        self.counters[id.index()]
    }

    pub fn global_counter(&self) -> u16 {
        self.global_counter
    }

    pub fn is_global_counter_enabled(&self) -> bool {
        self.global_enabled
    }

    /// Switches to the global counter. Called when Pac-Man loses a life.
    pub fn on_pac_killed(&mut self) {
        self.global_counter = 0;
        self.global_enabled = true;
    }

    /// Registers one eaten dot: it goes to the global counter while that is
    /// enabled, otherwise to the private counter of the preferred locked
    /// ghost.
    pub fn on_food_eaten(&mut self, ghosts: &[Ghost; 4]) {
        if self.global_enabled {
            self.global_counter += 1;
            // The global counter retires once it has counted the orange
            // ghost out while that ghost still sits inside.
            if self.global_counter == global_dot_limit(GhostId::Orange)
                && ghosts[GhostId::Orange.index()].state == GhostState::Locked
            {
                self.global_enabled = false;
                self.global_counter = 0;
            }
            return;
        }
        if let Some(id) = self.preferred_locked_ghost(ghosts) {
            self.counters[id.index()] += 1;
        }
    }

    /// The locked ghost whose private counter absorbs dots, in the fixed
    /// release order.
    fn preferred_locked_ghost(&self, ghosts: &[Ghost; 4]) -> Option<GhostId> {
        [GhostId::Pink, GhostId::Cyan, GhostId::Orange]
            .into_iter()
            .find(|id| ghosts[id.index()].state == GhostState::Locked)
    }

    /// Decides which locked ghost (if any) leaves the house this tick,
    /// together with the reason. The red ghost never waits; the others leave
    /// when their counter reaches its limit or when Pac-Man has starved for
    /// too long.
    pub fn unlock_decision(
        &self,
        level_number: u32,
        ghosts: &[Ghost; 4],
        pac_starving_ticks: u32,
    ) -> Option<(GhostId, UnlockReason)> {
        if ghosts[GhostId::Red.index()].state == GhostState::Locked {
            return Some((GhostId::Red, UnlockReason::Immediate));
        }
        let id = self.preferred_locked_ghost(ghosts)?;
        if self.global_enabled {
            if self.global_counter >= global_dot_limit(id) {
                return Some((id, UnlockReason::GlobalCounter));
            }
        } else if self.counter(id) >= private_dot_limit(id, level_number) {
            return Some((id, UnlockReason::PrivateCounter));
        }
        if pac_starving_ticks >= pac_starving_limit(level_number) {
            return Some((id, UnlockReason::PacStarved));
        }
        None
    }
}
