//! Pac-Man entity: movement plus the rest/starve/power counters the level
//! orchestration reads.

use crate::entity::{Creature, MoveConstraints};
use crate::level::data::GameLevelData;
use crate::map::builder::World;
use crate::map::direction::Direction;
use crate::timer::TickTimer;

/// Strategy steering Pac-Man in demo levels. A human player bypasses this by
/// setting the wish direction directly.
pub trait Steering {
    /// Returns the wish direction for this tick, if any.
    fn steer(&mut self, world: &World, pac: &Pac) -> Option<Direction>;
}

pub struct Pac {
    pub creature: Creature,
    /// Ticks Pac-Man still pauses after eating.
    rest_ticks: u32,
    /// Ticks since the last food was found.
    starving_ticks: u32,
    pub power_timer: TickTimer,
}

impl Pac {
    pub fn new(world: &World) -> Self {
        Self {
            creature: Creature::new(world.pac_start(), Direction::Left),
            rest_ticks: 0,
            starving_ticks: 0,
            power_timer: TickTimer::new(),
        }
    }

    /// Whether a power pellet is currently in effect.
    pub fn is_powered(&self) -> bool {
        self.power_timer.is_running()
    }

    /// Pauses movement for the given number of ticks.
    pub fn rest(&mut self, ticks: u32) {
        self.rest_ticks = ticks;
    }

    pub fn starve(&mut self) {
        self.starving_ticks += 1;
    }

    pub fn stop_starving(&mut self) {
        self.starving_ticks = 0;
    }

    pub fn starving_ticks(&self) -> u32 {
        self.starving_ticks
    }

    /// Advances Pac-Man one tick: power timer, rest pause, then movement at
    /// the level's normal or powered speed.
    pub fn update(&mut self, world: &World, data: &GameLevelData) {
        self.power_timer.advance();
        if self.rest_ticks > 0 {
            self.rest_ticks -= 1;
            self.creature.moved = false;
            self.creature.new_tile_entered = false;
            return;
        }
        let percentage = if self.is_powered() {
            data.pac_speed_powered_pct
        } else {
            data.pac_speed_pct
        };
        self.creature.set_percentage(percentage);
        self.creature.try_move(world, MoveConstraints::PAC);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;

    fn setup() -> (World, Pac, GameLevelData) {
        let world = World::new(&RAW_BOARD).unwrap();
        let pac = Pac::new(&world);
        (world, pac, GameLevelData::new(1))
    }

    #[test]
    fn test_pac_starts_at_world_start() {
        let (world, pac, _) = setup();
        assert_eq!(pac.creature.position, world.pac_start());
        assert_eq!(pac.creature.move_dir, Direction::Left);
    }

    #[test]
    fn test_resting_pauses_movement() {
        let (world, mut pac, data) = setup();
        pac.rest(2);
        pac.update(&world, &data);
        assert!(!pac.creature.moved);
        pac.update(&world, &data);
        assert!(!pac.creature.moved);
        pac.update(&world, &data);
        assert!(pac.creature.moved);
    }

    #[test]
    fn test_starving_counter() {
        let (_, mut pac, _) = setup();
        pac.starve();
        pac.starve();
        assert_eq!(pac.starving_ticks(), 2);
        pac.stop_starving();
        assert_eq!(pac.starving_ticks(), 0);
    }

    #[test]
    fn test_power_state_follows_timer() {
        let (_, mut pac, _) = setup();
        assert!(!pac.is_powered());
        pac.power_timer.restart_ticks(2);
        assert!(pac.is_powered());
    }
}
