//! Level orchestration: one [`GameLevel`] owns the maze, Pac-Man, the four
//! ghosts, the bonus and all level timers, and advances them together in
//! [`GameLevel::simulate_one_frame`].
//!
//! The level publishes what happened through an [`EventSink`] and records it
//! in [`Memory`]; score and lives are kept by the caller.

pub mod data;
pub mod house;
pub mod hunting;
pub mod memory;

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, trace};

use crate::animation::Pulse;
use crate::constants::{
    BONUS_EATEN_DISPLAY_TICKS, BONUS_EDIBLE_BASE_TICKS, ENERGIZER_BLINK_TICKS, KILL_VALUES,
    MAZE_FLASH_TICKS, POINTS_ALL_GHOSTS_IN_LEVEL, POINTS_ENERGIZER, POINTS_PELLET, RAW_BOARD,
    RESTING_TICKS_ENERGIZER, RESTING_TICKS_PELLET, TICKS_PER_SECOND,
};
use crate::entity::bonus::{Bonus, BonusState, MovingBonus, StaticBonus};
use crate::entity::ghost::{Ghost, GhostContext, GhostId, GhostState};
use crate::entity::pacman::{Pac, Steering};
use crate::error::{GameResult, LevelError};
use crate::events::{EventSink, GameEvent};
use crate::level::data::{
    bonus_food_thresholds, bonus_points, bonus_symbol, GameLevelData, GameVariant,
};
use crate::level::house::{GhostHouse, UnlockReason};
use crate::level::hunting::HuntingTimer;
use crate::level::memory::Memory;
use crate::map::builder::World;
use crate::map::direction::Direction;
use crate::timer::TickTimer;

/// One level of the simulation: world, creatures, bonus, timers.
pub struct GameLevel {
    number: u32,
    variant: GameVariant,
    data: GameLevelData,
    /// Demo levels steer Pac-Man through the installed [`Steering`].
    demo: bool,
    pub world: World,
    pub pac: Pac,
    pub ghosts: [Ghost; 4],
    hunting: HuntingTimer,
    house: GhostHouse,
    pub memory: Memory,
    bonus_symbols: [u8; 2],
    bonus: Option<Bonus>,
    /// 0 off, 1/2 active tier, -1/-2 temporarily disabled tier.
    cruise_elroy: i8,
    /// Ghosts eaten during the current power cycle.
    cycle_kills: u8,
    /// Ghosts eaten during the whole level.
    level_kills: u8,
    pub energizer_pulse: Pulse,
    pub maze_flashing: Pulse,
    rng: SmallRng,
    pac_immune: bool,
    steering: Option<Box<dyn Steering>>,
}

impl GameLevel {
    /// Creates a level with a seeded random source. All randomness of the
    /// level (frightened roaming, bonus selection, bonus lifetime) flows
    /// from this seed, so two levels with equal seed and inputs replay
    /// identically.
    pub fn new(variant: GameVariant, number: u32, seed: u64, demo: bool) -> GameResult<Self> {
        if number == 0 {
            return Err(LevelError::IllegalLevelNumber(number).into());
        }
        let world = World::new(&RAW_BOARD)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let bonus_symbols = [
            bonus_symbol(variant, number, &mut rng),
            bonus_symbol(variant, number, &mut rng),
        ];
        let pac = Pac::new(&world);
        let ghosts = [
            Ghost::new(GhostId::Red, &world),
            Ghost::new(GhostId::Pink, &world),
            Ghost::new(GhostId::Cyan, &world),
            Ghost::new(GhostId::Orange, &world),
        ];
        info!(variant = variant.as_ref(), number, seed, demo, "Level created");
        Ok(Self {
            number,
            variant,
            data: GameLevelData::new(number),
            demo,
            world,
            pac,
            ghosts,
            hunting: HuntingTimer::new(variant, number),
            house: GhostHouse::new(),
            memory: Memory::default(),
            bonus_symbols,
            bonus: None,
            cruise_elroy: 0,
            cycle_kills: 0,
            level_kills: 0,
            energizer_pulse: Pulse::new(ENERGIZER_BLINK_TICKS, true),
            maze_flashing: Pulse::new(MAZE_FLASH_TICKS, false),
            rng,
            pac_immune: false,
            steering: None,
        })
    }

    /// Begins gameplay: the first scatter phase starts and the energizers
    /// blink.
    pub fn start(&mut self) -> GameResult<()> {
        self.hunting.start_phase(0)?;
        self.energizer_pulse.restart();
        Ok(())
    }

    /// Ends gameplay: timers freeze, ghosts disappear, the maze flashes.
    pub fn end(&mut self) {
        self.hunting.stop();
        self.energizer_pulse.reset();
        self.maze_flashing.restart();
        for ghost in &mut self.ghosts {
            ghost.creature.visible = false;
        }
        info!(number = self.number, "Level ended");
    }

    /// Advances the simulation by one tick.
    ///
    /// The step order is fixed: perception, food, bonus, power, collision
    /// detection, movement, house control, timers. The [`Memory`] describes
    /// this frame afterwards; killing detected prey and reacting to Pac-Man's
    /// death are left to the caller.
    pub fn simulate_one_frame(&mut self, sink: &mut dyn EventSink) -> GameResult<()> {
        self.memory.forget();
        self.collect_information();

        if let Some(tile) = self.memory.food_found_tile {
            self.handle_food_found(tile, sink)?;
        } else {
            self.pac.starve();
        }

        if self.memory.level_completed {
            self.end();
            return Ok(());
        }

        if let Some(index) = self.memory.bonus_reached {
            self.activate_bonus(index, sink)?;
        }

        if self.memory.pac_power_starts {
            self.handle_pac_power_starts(sink);
        } else if self.memory.pac_power_fading {
            sink.publish(GameEvent::PacStartsLosingPower);
        } else if self.memory.pac_power_lost {
            self.handle_pac_power_lost(sink);
        }

        self.detect_collisions();

        self.energizer_pulse.tick();
        self.maze_flashing.tick();

        self.update_pac();
        self.unlock_ghost();
        self.update_ghosts();
        self.update_bonus(sink)?;

        // Frightening and death freeze phase progression; the caller reacts
        // to pac_prey and pac_killed through the kill operations.
        if self.memory.pac_power_starts || self.memory.pac_killed {
            self.hunting.stop();
        } else {
            self.update_hunting_timer()?;
        }

        if self.memory.is_eventful() {
            trace!(memory = ?self.memory, "Frame summary");
        }
        Ok(())
    }

    /// Fills the [`Memory`] with what the level perceives at the start of
    /// the frame: food under Pac-Man and the power timer edges.
    fn collect_information(&mut self) {
        let pac_tile = self.pac.creature.tile();

        if self.world.has_food_at(pac_tile) {
            self.memory.food_found_tile = Some(pac_tile);
            self.memory.energizer_found = self.world.is_energizer(pac_tile);
            self.memory.pac_power_starts =
                self.memory.energizer_found && self.data.pac_power_ticks() > 0;
            self.memory.level_completed = self.world.uneaten_food_count() == 1;
        }

        if self.memory.pac_power_starts {
            self.memory.pac_power_active = true;
        } else {
            self.memory.pac_power_active = self.pac.is_powered();
            self.memory.pac_power_lost = self.pac.power_timer.has_expired();
            self.memory.pac_power_fading = self.pac.power_timer.is_running()
                && self.pac.power_timer.remaining() == self.data.power_fading_ticks;
        }
    }

    /// Records contacts between Pac-Man and ghosts, after the power
    /// transitions have settled the ghost states. Frightened ghosts on
    /// Pac-Man's tile become prey; a hunting ghost there kills him. The
    /// level only records these, the caller reacts through
    /// [`GameLevel::kill_edible_ghosts`] and [`GameLevel::on_pac_killed`].
    fn detect_collisions(&mut self) {
        let pac_tile = self.pac.creature.tile();
        for ghost in &self.ghosts {
            if ghost.creature.tile() != pac_tile {
                continue;
            }
            match ghost.state {
                GhostState::Frightened => self.memory.pac_prey.push(ghost.id),
                GhostState::HuntingPac if !self.pac_immune => self.memory.pac_killed = true,
                _ => {}
            }
        }
    }

    /// Consumes the food under Pac-Man: scoring, resting, the house dot
    /// counters, the elroy thresholds and the bonus thresholds.
    fn handle_food_found(&mut self, tile: IVec2, sink: &mut dyn EventSink) -> GameResult<()> {
        let energizer = self.memory.energizer_found;
        self.world.eat_food(tile);
        self.pac.stop_starving();
        if energizer {
            self.cycle_kills = 0;
        }
        self.pac.rest(if energizer {
            RESTING_TICKS_ENERGIZER
        } else {
            RESTING_TICKS_PELLET
        });
        self.house.on_food_eaten(&self.ghosts);

        let uneaten = self.world.uneaten_food_count();
        if uneaten == self.data.elroy1_dots_left {
            self.set_cruise_elroy_tier(1)?;
        } else if uneaten == self.data.elroy2_dots_left {
            self.set_cruise_elroy_tier(2)?;
        }

        let eaten = self.world.eaten_food_count();
        let thresholds = bonus_food_thresholds(self.variant);
        if eaten == thresholds[0] {
            self.memory.bonus_reached = Some(0);
        } else if eaten == thresholds[1] {
            // In the Ms. Pac-Man variant the second bonus only enters while
            // no earlier bonus is still wandering.
            let suppressed = self.variant == GameVariant::MsPacman
                && self.bonus.as_ref().is_some_and(|b| b.state() != BonusState::Inactive);
            if !suppressed {
                self.memory.bonus_reached = Some(1);
            }
        }

        sink.publish(GameEvent::PacFoundFood { tile });
        sink.publish(GameEvent::Scored {
            points: if energizer { POINTS_ENERGIZER } else { POINTS_PELLET },
        });
        Ok(())
    }

    /// Puts the level bonus on the board.
    fn activate_bonus(&mut self, index: usize, sink: &mut dyn EventSink) -> GameResult<()> {
        if index > 1 {
            return Err(LevelError::IllegalBonusIndex(index).into());
        }
        let symbol = self.bonus_symbols[index];
        let points = bonus_points(self.variant, symbol)?;
        let mut bonus = match self.variant {
            GameVariant::Pacman => {
                let door = self.world.house().door[0];
                Bonus::Static(StaticBonus::new(symbol, points, IVec2::new(door.x, door.y + 5)))
            }
            GameVariant::MsPacman => {
                Bonus::Moving(MovingBonus::new(symbol, points, &self.world, &mut self.rng))
            }
        };
        let ticks = match bonus {
            Bonus::Static(_) => BONUS_EDIBLE_BASE_TICKS + self.rng.random_range(0..TICKS_PER_SECOND),
            Bonus::Moving(_) => TickTimer::INDEFINITE,
        };
        bonus.set_edible(ticks)?;
        let tile = bonus.tile();
        debug!(index, symbol, points, "Bonus activated");
        sink.publish(GameEvent::BonusActivated { tile });
        self.bonus = Some(bonus);
        Ok(())
    }

    /// An energizer took effect: the hunting pause begins, hunting ghosts
    /// turn frightened and every frightened ghost reverses.
    fn handle_pac_power_starts(&mut self, sink: &mut dyn EventSink) {
        self.hunting.stop();
        self.pac.power_timer.restart_ticks(self.data.pac_power_ticks());
        for ghost in &mut self.ghosts {
            if ghost.state == GhostState::HuntingPac {
                ghost.state = GhostState::Frightened;
            }
            if ghost.state == GhostState::Frightened {
                ghost.creature.reverse_as_soon_as_possible();
            }
        }
        debug!(ticks = self.data.pac_power_ticks(), "Pac power starts");
        sink.publish(GameEvent::PacGetsPower);
    }

    /// The power timer ran out: frightened ghosts hunt again and the
    /// hunting timer resumes.
    fn handle_pac_power_lost(&mut self, sink: &mut dyn EventSink) {
        self.pac.power_timer.reset();
        for ghost in &mut self.ghosts {
            if ghost.state == GhostState::Frightened {
                ghost.state = GhostState::HuntingPac;
            }
        }
        self.hunting.start();
        debug!("Pac power lost");
        sink.publish(GameEvent::PacLostPower);
    }

    /// Eats every ghost recorded as prey this frame. The caller invokes
    /// this after [`GameLevel::simulate_one_frame`] reported prey in the
    /// [`Memory`].
    pub fn kill_edible_ghosts(&mut self, sink: &mut dyn EventSink) {
        let prey = self.memory.pac_prey.clone();
        for id in prey {
            self.kill_ghost(id, sink);
        }
    }

    /// Kills one ghost: eaten state, the doubling kill value and the flat
    /// reward for clearing all sixteen kills of a level.
    fn kill_ghost(&mut self, id: GhostId, sink: &mut dyn EventSink) {
        let index = (self.cycle_kills as usize).min(KILL_VALUES.len() - 1);
        let ghost = &mut self.ghosts[id.index()];
        ghost.state = GhostState::Eaten;
        ghost.killed_index = Some(index as u8);
        self.cycle_kills += 1;
        self.level_kills += 1;
        self.memory.killed_ghosts.push(id);
        let tile = self.ghosts[id.index()].creature.tile();
        let mut points = KILL_VALUES[index];
        if self.level_kills == 16 {
            points += POINTS_ALL_GHOSTS_IN_LEVEL;
        }
        info!(ghost = id.as_ref(), points, "Ghost eaten");
        sink.publish(GameEvent::GhostEaten { ghost: id, tile });
        sink.publish(GameEvent::Scored { points });
    }

    /// Kills every ghost currently outside the house, regardless of state.
    /// Cheat used by demo tooling.
    pub fn kill_all_hunting_and_frightened_ghosts(&mut self, sink: &mut dyn EventSink) {
        self.hunting.stop();
        self.cycle_kills = 0;
        for id in GhostId::ALL {
            if matches!(
                self.ghosts[id.index()].state,
                GhostState::HuntingPac | GhostState::Frightened
            ) {
                self.kill_ghost(id, sink);
            }
        }
    }

    /// Pac-Man was caught: the level freezes its hunting timer, the house
    /// switches to the global dot counter, and the elroy boost pauses while
    /// the orange ghost waits inside. The caller invokes this after the
    /// [`Memory`] reported the kill.
    pub fn on_pac_killed(&mut self) {
        self.hunting.stop();
        self.pac.stop_starving();
        self.house.on_pac_killed();
        if self.ghosts[GhostId::Orange.index()].state == GhostState::Locked {
            self.set_cruise_elroy_enabled(false);
        }
        info!(tile = ?self.pac.creature.tile(), "Pac killed");
    }

    fn update_pac(&mut self) {
        if self.demo {
            match self.steering.as_mut() {
                Some(steering) => {
                    if let Some(direction) = steering.steer(&self.world, &self.pac) {
                        self.pac.creature.wish_dir = direction;
                    }
                }
                None => error!("Demo level without a steering installed"),
            }
        }
        self.pac.update(&self.world, &self.data);
    }

    /// Asks the house whether a locked ghost leaves this frame and performs
    /// the release.
    fn unlock_ghost(&mut self) {
        let Some((id, reason)) =
            self.house
                .unlock_decision(self.number, &self.ghosts, self.pac.starving_ticks())
        else {
            return;
        };
        if reason == UnlockReason::PacStarved {
            self.pac.stop_starving();
        }
        let ghost = &mut self.ghosts[id.index()];
        if id == GhostId::Red {
            // The red ghost starts outside the house.
            ghost.state = GhostState::HuntingPac;
            ghost.creature.force_direction(Direction::Left);
            ghost.creature.new_tile_entered = true;
        } else {
            ghost.state = GhostState::LeavingHouse;
        }
        if id == GhostId::Orange {
            self.set_cruise_elroy_enabled(true);
        }
        info!(ghost = id.as_ref(), reason = reason.as_ref(), "Ghost unlocked");
    }

    fn update_ghosts(&mut self) {
        let ctx = GhostContext {
            variant: self.variant,
            hunting_phase: self.hunting.phase(),
            scatter_phase: self.hunting.scatter_phase(),
            cruise_elroy: self.cruise_elroy,
            pac_tile: self.pac.creature.tile(),
            pac_dir: self.pac.creature.move_dir,
            red_tile: self.ghosts[GhostId::Red.index()].creature.tile(),
            ghost_speed_pct: self.data.ghost_speed_pct,
            tunnel_speed_pct: self.data.ghost_speed_tunnel_pct,
            frightened_speed_pct: self.data.ghost_speed_frightened_pct,
            elroy1_speed_pct: self.data.elroy1_speed_pct,
            elroy2_speed_pct: self.data.elroy2_speed_pct,
        };
        for ghost in &mut self.ghosts {
            ghost.update(&self.world, &ctx, &mut self.rng);
        }
    }

    /// Checks the bonus against Pac-Man and advances its lifecycle.
    fn update_bonus(&mut self, sink: &mut dyn EventSink) -> GameResult<()> {
        let Some(bonus) = self.bonus.as_mut() else {
            return Ok(());
        };
        if bonus.state() == BonusState::Edible && bonus.tile() == self.pac.creature.tile() {
            let tile = bonus.tile();
            let points = bonus.points();
            bonus.set_eaten(BONUS_EATEN_DISPLAY_TICKS)?;
            debug!(points, "Bonus eaten");
            sink.publish(GameEvent::BonusEaten { tile });
            sink.publish(GameEvent::Scored { points });
        }
        bonus.update(&self.world, sink);
        Ok(())
    }

    /// Advances the hunting timer. While an energizer pauses it the timer
    /// is stopped and nothing moves. A phase change makes every ghost on
    /// normal duty reverse.
    fn update_hunting_timer(&mut self) -> GameResult<()> {
        if self.hunting.advance()?.is_some() {
            self.cycle_kills = 0;
            for ghost in &mut self.ghosts {
                if matches!(
                    ghost.state,
                    GhostState::HuntingPac | GhostState::Locked | GhostState::LeavingHouse
                ) {
                    ghost.creature.reverse_as_soon_as_possible();
                }
            }
        }
        Ok(())
    }

    fn set_cruise_elroy_tier(&mut self, tier: i8) -> GameResult<()> {
        // A disabled boost stays disabled; only the tier magnitude moves.
        let value = if self.cruise_elroy < 0 { -tier } else { tier };
        self.set_cruise_elroy(value)
    }

    /// Sets the cruise elroy value directly. Negative values keep the tier
    /// but disable its effect.
    pub fn set_cruise_elroy(&mut self, value: i8) -> GameResult<()> {
        if !(-2..=2).contains(&value) {
            return Err(LevelError::IllegalCruiseElroyValue(value).into());
        }
        self.cruise_elroy = value;
        debug!(value, "Cruise elroy set");
        Ok(())
    }

    /// Enables or disables the elroy boost without forgetting the tier.
    pub fn set_cruise_elroy_enabled(&mut self, enabled: bool) {
        self.cruise_elroy = if enabled {
            self.cruise_elroy.abs()
        } else {
            -self.cruise_elroy.abs()
        };
    }

    pub fn install_steering(&mut self, steering: Box<dyn Steering>) {
        self.steering = Some(steering);
    }

    /// Makes ghost contact harmless. Cheat used by demo tooling.
    pub fn set_pac_immune(&mut self, immune: bool) {
        self.pac_immune = immune;
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn data(&self) -> &GameLevelData {
        &self.data
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn ghost(&self, id: GhostId) -> &Ghost {
        &self.ghosts[id.index()]
    }

    pub fn ghost_mut(&mut self, id: GhostId) -> &mut Ghost {
        &mut self.ghosts[id.index()]
    }

    pub fn bonus(&self) -> Option<&Bonus> {
        self.bonus.as_ref()
    }

    pub fn bonus_symbols(&self) -> [u8; 2] {
        self.bonus_symbols
    }

    pub fn hunting_phase(&self) -> u8 {
        self.hunting.phase()
    }

    pub fn scatter_phase(&self) -> Option<u8> {
        self.hunting.scatter_phase()
    }

    pub fn chasing_phase(&self) -> Option<u8> {
        self.hunting.chasing_phase()
    }

    pub fn cruise_elroy(&self) -> i8 {
        self.cruise_elroy
    }

    pub fn house(&self) -> &GhostHouse {
        &self.house
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;

    fn level() -> GameLevel {
        let mut level = GameLevel::new(GameVariant::Pacman, 1, 42, false).unwrap();
        level.start().unwrap();
        level
    }

    #[test]
    fn test_new_level_rejects_zero() {
        assert!(GameLevel::new(GameVariant::Pacman, 0, 0, false).is_err());
    }

    #[test]
    fn test_started_level_scatters_first() {
        let level = level();
        assert_eq!(level.hunting_phase(), 0);
        assert_eq!(level.scatter_phase(), Some(0));
        assert!(level.energizer_pulse.is_running());
    }

    #[test]
    fn test_red_ghost_released_on_first_frame() {
        let mut level = level();
        let mut sink = RecordingSink::new();
        level.simulate_one_frame(&mut sink).unwrap();
        assert_eq!(level.ghost(GhostId::Red).state, GhostState::HuntingPac);
    }

    #[test]
    fn test_cruise_elroy_validation() {
        let mut level = level();
        assert!(level.set_cruise_elroy(3).is_err());
        assert!(level.set_cruise_elroy(-2).is_ok());
        level.set_cruise_elroy_enabled(true);
        assert_eq!(level.cruise_elroy(), 2);
        level.set_cruise_elroy_enabled(false);
        assert_eq!(level.cruise_elroy(), -2);
    }

    #[test]
    fn test_collect_information_is_idempotent() {
        let mut level = level();
        level.pac.creature.place_at_tile(glam::IVec2::new(1, 1));
        level.collect_information();
        let first = level.memory.clone();
        level.memory.forget();
        level.collect_information();
        assert_eq!(level.memory.food_found_tile, first.food_found_tile);
        assert_eq!(level.memory.energizer_found, first.energizer_found);
        assert_eq!(level.memory.level_completed, first.level_completed);
    }

    #[test]
    fn test_memory_cleared_every_frame() {
        let mut level = level();
        let mut sink = RecordingSink::new();
        level.memory.pac_killed = true;
        level.simulate_one_frame(&mut sink).unwrap();
        assert!(!level.memory.pac_killed);
    }
}
