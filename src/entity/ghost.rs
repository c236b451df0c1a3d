//! Ghost entity implementation: the per-ghost state machine, hunting
//! targeting, frightened roaming, and the scripted house exit/entry moves.

use glam::{IVec2, Vec2};
use rand::rngs::SmallRng;
use rand::Rng;
use strum_macros::AsRefStr;
use tracing::debug;

use crate::constants::{GHOST_EATEN_DISPLAY_TICKS, PCT_GHOST_INSIDE_HOUSE, PCT_GHOST_RETURNING_HOME};
use crate::entity::{Creature, MoveConstraints};
use crate::level::data::GameVariant;
use crate::map::builder::World;
use crate::map::direction::Direction;

/// The four classic ghosts, in update order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum GhostId {
    Red,
    Pink,
    Cyan,
    Orange,
}

impl GhostId {
    pub const ALL: [GhostId; 4] = [GhostId::Red, GhostId::Pink, GhostId::Cyan, GhostId::Orange];

    pub const fn index(self) -> usize {
        match self {
            GhostId::Red => 0,
            GhostId::Pink => 1,
            GhostId::Cyan => 2,
            GhostId::Orange => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum GhostState {
    Locked,
    LeavingHouse,
    HuntingPac,
    Frightened,
    Eaten,
    ReturningToHouse,
    EnteringHouse,
}

/// Level state a ghost reads while updating. Built fresh by the level each
/// tick; ghosts never reach back into the level.
#[derive(Debug, Clone, Copy)]
pub struct GhostContext {
    pub variant: GameVariant,
    pub hunting_phase: u8,
    /// Present while the current phase is a scatter phase.
    pub scatter_phase: Option<u8>,
    pub cruise_elroy: i8,
    pub pac_tile: IVec2,
    pub pac_dir: Direction,
    pub red_tile: IVec2,
    pub ghost_speed_pct: u8,
    pub tunnel_speed_pct: u8,
    pub frightened_speed_pct: u8,
    pub elroy1_speed_pct: u8,
    pub elroy2_speed_pct: u8,
}

/// Computes the tile `n` steps ahead of a creature, reproducing the original
/// arcade overflow quirk: when facing up, the lookahead also shifts left by
/// the same amount.
pub fn tiles_ahead_buggy(tile: IVec2, direction: Direction, n: i32) -> IVec2 {
    match direction {
        Direction::Up => tile + IVec2::new(-n, -n),
        _ => tile + direction.as_ivec2() * n,
    }
}

/// Fixed scatter corner per ghost, independent of the maze layout.
pub fn scatter_target(id: GhostId) -> IVec2 {
    match id {
        GhostId::Red => IVec2::new(25, 0),
        GhostId::Pink => IVec2::new(2, 0),
        GhostId::Cyan => IVec2::new(27, 30),
        GhostId::Orange => IVec2::new(0, 30),
    }
}

pub struct Ghost {
    pub id: GhostId,
    pub creature: Creature,
    pub state: GhostState,
    /// Index into the kill value sequence while eaten during the current
    /// power cycle.
    pub killed_index: Option<u8>,
    pub revival_position: Vec2,
    eaten_ticks: u32,
}

impl Ghost {
    pub fn new(id: GhostId, world: &World) -> Self {
        let house = world.house();
        let (position, direction, revival) = match id {
            GhostId::Red => (house.entry, Direction::Left, house.seat_middle),
            GhostId::Pink => (house.seat_middle, Direction::Down, house.seat_middle),
            GhostId::Cyan => (house.seat_left, Direction::Up, house.seat_left),
            GhostId::Orange => (house.seat_right, Direction::Up, house.seat_right),
        };
        Self {
            id,
            creature: Creature::new(position, direction),
            state: GhostState::Locked,
            killed_index: None,
            revival_position: revival,
            eaten_ticks: 0,
        }
    }

    /// The tile a hunting ghost chases, computed fresh each tick.
    pub fn chasing_target(&self, ctx: &GhostContext) -> IVec2 {
        match self.id {
            // Direct pursuit.
            GhostId::Red => ctx.pac_tile,
            // Ambush four tiles ahead (with the arcade lookahead bug).
            GhostId::Pink => tiles_ahead_buggy(ctx.pac_tile, ctx.pac_dir, 4),
            // Mirror the red ghost through the point two tiles ahead of Pac.
            GhostId::Cyan => tiles_ahead_buggy(ctx.pac_tile, ctx.pac_dir, 2) * 2 - ctx.red_tile,
            // Pursue when far, retreat to the corner when close.
            GhostId::Orange => {
                if (self.creature.tile() - ctx.pac_tile).as_vec2().length() < 8.0 {
                    scatter_target(self.id)
                } else {
                    ctx.pac_tile
                }
            }
        }
    }

    fn hunting_speed_pct(&self, world: &World, ctx: &GhostContext) -> u8 {
        if world.is_tunnel(self.creature.tile()) {
            ctx.tunnel_speed_pct
        } else if self.id == GhostId::Red && ctx.cruise_elroy == 1 {
            ctx.elroy1_speed_pct
        } else if self.id == GhostId::Red && ctx.cruise_elroy == 2 {
            ctx.elroy2_speed_pct
        } else {
            ctx.ghost_speed_pct
        }
    }

    fn hunting_constraints(&self, ctx: &GhostContext) -> MoveConstraints {
        MoveConstraints {
            pass_door: false,
            no_up_in_red_zone: ctx.variant == GameVariant::Pacman,
        }
    }

    /// Advances the ghost one tick.
    pub fn update(&mut self, world: &World, ctx: &GhostContext, rng: &mut SmallRng) {
        match self.state {
            GhostState::Locked => self.bounce(),
            GhostState::LeavingHouse => self.leave_house(world),
            GhostState::HuntingPac => self.hunt(world, ctx, rng),
            GhostState::Frightened => {
                let percentage = if world.is_tunnel(self.creature.tile()) {
                    ctx.tunnel_speed_pct
                } else {
                    ctx.frightened_speed_pct
                };
                self.roam(world, percentage, rng);
            }
            GhostState::Eaten => {
                self.eaten_ticks += 1;
                if self.eaten_ticks >= GHOST_EATEN_DISPLAY_TICKS {
                    self.eaten_ticks = 0;
                    self.state = GhostState::ReturningToHouse;
                    debug!(ghost = self.id.as_ref(), "Eaten ghost heads home");
                }
            }
            GhostState::ReturningToHouse => self.return_home(world),
            GhostState::EnteringHouse => self.enter_house(),
        }
    }

    /// Hunting behavior: chase or scatter by phase, with the variant quirks
    /// and the cruise elroy override.
    fn hunt(&mut self, world: &World, ctx: &GhostContext, rng: &mut SmallRng) {
        let percentage = self.hunting_speed_pct(world, ctx);

        // Ms. Pac-Man quirk: red and pink roam during the very first
        // scatter phase instead of heading for their corners.
        let first_scatter = ctx.hunting_phase == 0 && ctx.scatter_phase.is_some();
        if ctx.variant == GameVariant::MsPacman && first_scatter && matches!(self.id, GhostId::Red | GhostId::Pink) {
            self.roam(world, percentage, rng);
            return;
        }

        let elroy_chases = self.id == GhostId::Red && ctx.cruise_elroy > 0;
        let target = if !elroy_chases && ctx.scatter_phase.is_some() {
            scatter_target(self.id)
        } else {
            self.chasing_target(ctx)
        };

        let constraints = self.hunting_constraints(ctx);
        self.creature.set_percentage(percentage);
        if self.creature.new_tile_entered || self.creature.got_stuck {
            self.creature.steer_towards(world, target, constraints);
        }
        self.creature.try_move(world, constraints);
    }

    /// Frightened-style wandering: a new direction is chosen only on tile
    /// entry (or when stuck), never inside a portal area. The draw is
    /// weighted (up 16.3%, right 25.2%, down 28.5%, left the rest) and
    /// rotated clockwise until it is legal and not a reversal.
    fn roam(&mut self, world: &World, percentage: u8, rng: &mut SmallRng) {
        self.creature.set_percentage(percentage);
        let tile = self.creature.tile();
        if (self.creature.new_tile_entered || self.creature.got_stuck) && !world.is_portal_area(tile) {
            let mut direction = weighted_random_direction(rng);
            for _ in 0..Direction::DIRECTIONS.len() {
                if direction != self.creature.move_dir.opposite()
                    && world.is_accessible(tile + direction.as_ivec2(), false)
                {
                    self.creature.wish_dir = direction;
                    break;
                }
                direction = direction.next_clockwise();
            }
        }
        self.creature.try_move(
            world,
            MoveConstraints {
                pass_door: false,
                no_up_in_red_zone: false,
            },
        );
    }

    /// Locked ghosts bounce vertically around their seat.
    fn bounce(&mut self) {
        let seat = self.revival_position;
        self.creature.set_percentage(PCT_GHOST_INSIDE_HOUSE);
        if self.creature.position.y <= seat.y - 4.0 {
            self.creature.force_direction(Direction::Down);
        } else if self.creature.position.y >= seat.y + 4.0 {
            self.creature.force_direction(Direction::Up);
        }
        self.creature.position.y += self.creature.move_dir.as_vec2().y * self.creature.speed();
    }

    /// Scripted exit: center on the house axis, rise through the door, then
    /// start hunting to the left.
    fn leave_house(&mut self, world: &World) {
        let entry = world.house().entry;
        self.creature.set_percentage(PCT_GHOST_INSIDE_HOUSE);
        let speed = self.creature.speed();
        let position = self.creature.position;
        if (position.x - entry.x).abs() > speed {
            let direction = if position.x < entry.x { Direction::Right } else { Direction::Left };
            self.creature.force_direction(direction);
            self.creature.position.x += direction.as_vec2().x * speed;
        } else if position.y > entry.y {
            self.creature.position.x = entry.x;
            self.creature.force_direction(Direction::Up);
            self.creature.position.y = (position.y - speed).max(entry.y);
        } else {
            self.creature.position = entry;
            self.creature.force_direction(Direction::Left);
            self.creature.new_tile_entered = true;
            self.state = GhostState::HuntingPac;
            debug!(ghost = self.id.as_ref(), "Ghost left the house");
        }
    }

    /// Eyes fly home at double speed, through the door once they reach the
    /// entry tiles.
    fn return_home(&mut self, world: &World) {
        let house = world.house();
        self.creature.set_percentage(PCT_GHOST_RETURNING_HOME);
        let speed = self.creature.speed();
        let constraints = MoveConstraints {
            pass_door: true,
            no_up_in_red_zone: false,
        };
        if house.entry_tiles().contains(&self.creature.tile()) {
            // Final approach: slide onto the house axis above the door.
            let delta = house.entry.x - self.creature.position.x;
            if delta.abs() <= speed {
                self.creature.position = house.entry;
                self.creature.force_direction(Direction::Down);
                self.state = GhostState::EnteringHouse;
            } else {
                let direction = if delta > 0.0 { Direction::Right } else { Direction::Left };
                self.creature.force_direction(direction);
                self.creature.position.x += direction.as_vec2().x * speed;
            }
            return;
        }
        if self.creature.new_tile_entered || self.creature.got_stuck {
            self.creature.steer_towards(world, house.entry_tiles()[0], constraints);
        }
        self.creature.try_move(world, constraints);
    }

    /// Scripted entry: descend through the door, then slide to the revival
    /// seat and lock.
    fn enter_house(&mut self) {
        let target = self.revival_position;
        self.creature.set_percentage(PCT_GHOST_INSIDE_HOUSE);
        let speed = self.creature.speed();
        let position = self.creature.position;
        if position.y < target.y {
            self.creature.force_direction(Direction::Down);
            self.creature.position.y = (position.y + speed).min(target.y);
        } else if (position.x - target.x).abs() > speed {
            let direction = if position.x < target.x { Direction::Right } else { Direction::Left };
            self.creature.force_direction(direction);
            self.creature.position.x += direction.as_vec2().x * speed;
        } else {
            self.creature.position = target;
            self.creature.force_direction(Direction::Up);
            self.killed_index = None;
            self.state = GhostState::Locked;
            debug!(ghost = self.id.as_ref(), "Ghost revived at its seat");
        }
    }
}

/// Weighted pseudo-random direction draw used by frightened roaming.
fn weighted_random_direction(rng: &mut SmallRng) -> Direction {
    let roll: f32 = rng.random_range(0.0..1.0);
    if roll < 0.163 {
        Direction::Up
    } else if roll < 0.163 + 0.252 {
        Direction::Right
    } else if roll < 0.163 + 0.252 + 0.285 {
        Direction::Down
    } else {
        Direction::Left
    }
}
