//! Bonus fruit lifecycle.
//!
//! Two variants share the inactive/edible/eaten state machine: the classic
//! static fruit below the house, and the Ms. Pac-Man fruit that wanders in
//! through one portal, loops past the house door, and leaves through
//! another.

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::Rng;
use smallvec::SmallVec;
use strum_macros::AsRefStr;
use tracing::debug;

use crate::constants::PCT_MOVING_BONUS;
use crate::entity::{Creature, MoveConstraints};
use crate::error::{BonusError, GameResult};
use crate::events::{EventSink, GameEvent};
use crate::map::builder::World;
use crate::map::center_of;
use crate::map::direction::Direction;
use crate::timer::TickTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum BonusState {
    Inactive,
    Edible,
    Eaten,
}

/// A fruit fixed to one tile for a limited time.
pub struct StaticBonus {
    symbol: u8,
    points: u32,
    tile: IVec2,
    state: BonusState,
    timer: TickTimer,
}

/// A fruit following a precomputed route through the maze.
pub struct MovingBonus {
    symbol: u8,
    points: u32,
    pub creature: Creature,
    state: BonusState,
    timer: TickTimer,
    route: SmallVec<[IVec2; 8]>,
    route_index: usize,
    bob_ticks: u32,
}

pub enum Bonus {
    Static(StaticBonus),
    Moving(MovingBonus),
}

impl StaticBonus {
    pub fn new(symbol: u8, points: u32, tile: IVec2) -> Self {
        Self {
            symbol,
            points,
            tile,
            state: BonusState::Inactive,
            timer: TickTimer::new(),
        }
    }
}

impl MovingBonus {
    /// Builds the fruit and its route: enter at a random portal, pass the
    /// house entry, loop one row below the house, pass the entry again, and
    /// leave through a random portal side. The route is consumed by the
    /// shared steering; moving bonuses never reverse.
    pub fn new(symbol: u8, points: u32, world: &World, rng: &mut SmallRng) -> Self {
        let portal = world.portals()[rng.random_range(0..world.portals().len())];
        let enter_left = rng.random_range(0..2) == 0;
        let exit_left = rng.random_range(0..2) == 0;
        let (entry_tile, direction) = if enter_left {
            (portal.left, Direction::Right)
        } else {
            (portal.right, Direction::Left)
        };
        let exit_tile = if exit_left { portal.left } else { portal.right };

        let house_entry = world.house().entry_tiles()[0];
        let below_house = IVec2::new(house_entry.x, world.house().door[0].y + 5);
        let route = SmallVec::from_slice(&[house_entry, below_house, house_entry, exit_tile]);

        let mut creature = Creature::new(center_of(entry_tile), direction);
        creature.set_percentage(PCT_MOVING_BONUS);
        Self {
            symbol,
            points,
            creature,
            state: BonusState::Inactive,
            timer: TickTimer::new(),
            route,
            route_index: 0,
            bob_ticks: 0,
        }
    }

    /// Cosmetic vertical offset in pixels; not part of collision.
    pub fn vertical_bob(&self) -> f32 {
        let phase = self.bob_ticks % 32;
        if phase < 16 {
            phase as f32 / 8.0 - 1.0
        } else {
            (32 - phase) as f32 / 8.0 - 1.0
        }
    }

    fn follow_route(&mut self, world: &World) -> bool {
        let constraints = MoveConstraints {
            pass_door: false,
            no_up_in_red_zone: false,
        };
        let target = self.route[self.route_index];
        if self.creature.new_tile_entered || self.creature.got_stuck {
            self.creature.steer_towards(world, target, constraints);
        }
        self.creature.try_move(world, constraints);
        self.bob_ticks = self.bob_ticks.wrapping_add(1);
        if self.creature.tile() == target {
            self.route_index += 1;
        }
        self.route_index >= self.route.len()
    }
}

impl Bonus {
    pub fn state(&self) -> BonusState {
        match self {
            Bonus::Static(bonus) => bonus.state,
            Bonus::Moving(bonus) => bonus.state,
        }
    }

    pub fn symbol(&self) -> u8 {
        match self {
            Bonus::Static(bonus) => bonus.symbol,
            Bonus::Moving(bonus) => bonus.symbol,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Bonus::Static(bonus) => bonus.points,
            Bonus::Moving(bonus) => bonus.points,
        }
    }

    /// The tile relevant for the Pac-Man collision check.
    pub fn tile(&self) -> IVec2 {
        match self {
            Bonus::Static(bonus) => bonus.tile,
            Bonus::Moving(bonus) => bonus.creature.tile(),
        }
    }

    fn state_mut(&mut self) -> &mut BonusState {
        match self {
            Bonus::Static(bonus) => &mut bonus.state,
            Bonus::Moving(bonus) => &mut bonus.state,
        }
    }

    fn timer_mut(&mut self) -> &mut TickTimer {
        match self {
            Bonus::Static(bonus) => &mut bonus.timer,
            Bonus::Moving(bonus) => &mut bonus.timer,
        }
    }

    pub fn set_inactive(&mut self) {
        *self.state_mut() = BonusState::Inactive;
        self.timer_mut().reset();
    }

    /// Makes the bonus edible for the given ticks (or indefinitely for a
    /// moving bonus, which expires at the end of its route instead).
    pub fn set_edible(&mut self, ticks: u64) -> GameResult<()> {
        if ticks == 0 {
            return Err(BonusError::NonPositiveTicks.into());
        }
        *self.state_mut() = BonusState::Edible;
        self.timer_mut().restart_ticks(ticks);
        Ok(())
    }

    /// Shows the eaten value for the given ticks.
    pub fn set_eaten(&mut self, ticks: u64) -> GameResult<()> {
        if ticks == 0 {
            return Err(BonusError::NonPositiveTicks.into());
        }
        if self.state() != BonusState::Edible {
            return Err(BonusError::IllegalTransition {
                from: match self.state() {
                    BonusState::Inactive => "Inactive",
                    BonusState::Edible => "Edible",
                    BonusState::Eaten => "Eaten",
                },
            }
            .into());
        }
        *self.state_mut() = BonusState::Eaten;
        self.timer_mut().restart_ticks(ticks);
        Ok(())
    }

    /// Advances the bonus one tick: route following for the moving variant,
    /// countdown for both. Publishes `BonusExpired` when the bonus leaves
    /// the edible or eaten state on its own.
    pub fn update(&mut self, world: &World, sink: &mut dyn EventSink) {
        if self.state() == BonusState::Inactive {
            return;
        }
        if let Bonus::Moving(bonus) = self {
            if bonus.state == BonusState::Edible && bonus.follow_route(world) {
                let tile = bonus.creature.tile();
                bonus.state = BonusState::Inactive;
                bonus.timer.reset();
                debug!(symbol = bonus.symbol, "Moving bonus left the maze");
                sink.publish(GameEvent::BonusExpired { tile });
                return;
            }
        }
        let tile = self.tile();
        let timer = self.timer_mut();
        timer.advance();
        if timer.has_expired() {
            let state = *self.state_mut();
            self.set_inactive();
            debug!(symbol = self.symbol(), state = ?state, "Bonus expired");
            sink.publish(GameEvent::BonusExpired { tile });
        }
    }
}
