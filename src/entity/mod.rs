//! Moving entities: the shared grid-movement core, Pac-Man, ghosts, and
//! bonus fruit.

pub mod bonus;
pub mod ghost;
pub mod pacman;

use glam::{IVec2, Vec2};

use crate::constants::BASE_SPEED;
use crate::map::builder::World;
use crate::map::direction::Direction;
use crate::map::{center_of, tile_at};

/// Movement permissions of a creature for one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveConstraints {
    /// May pass through the ghost house door.
    pub pass_door: bool,
    /// Turning up is forbidden on red-zone tiles (hunting ghosts in the
    /// Pac-Man variant).
    pub no_up_in_red_zone: bool,
}

impl MoveConstraints {
    pub const PAC: MoveConstraints = MoveConstraints {
        pass_door: false,
        no_up_in_red_zone: false,
    };
}

/// Shared movement state of Pac-Man, ghosts and the moving bonus: a pixel
/// position on the grid, a current and a buffered wish direction, and a
/// percentage speed over the common base speed.
///
/// Movement is tile-by-tile: 180° turns apply immediately, 90° turns only
/// while passing a tile center (the creature then snaps onto the center),
/// and a step into a blocked tile clamps at the center and sets
/// `got_stuck`.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    /// Center position in pixels.
    pub position: Vec2,
    pub move_dir: Direction,
    pub wish_dir: Direction,
    percentage: u8,
    pub visible: bool,
    /// Whether the last movement step covered any distance.
    pub moved: bool,
    /// Whether the last movement step entered a new tile.
    pub new_tile_entered: bool,
    /// Whether the last movement step was blocked by a wall.
    pub got_stuck: bool,
    reverse_pending: bool,
}

impl Creature {
    pub fn new(position: Vec2, direction: Direction) -> Self {
        Self {
            position,
            move_dir: direction,
            wish_dir: direction,
            percentage: 100,
            visible: true,
            moved: false,
            new_tile_entered: true,
            got_stuck: false,
            reverse_pending: false,
        }
    }

    pub fn tile(&self) -> IVec2 {
        tile_at(self.position)
    }

    pub fn set_percentage(&mut self, percentage: u8) {
        self.percentage = percentage;
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// Pixels covered per tick at the current percentage speed.
    pub fn speed(&self) -> f32 {
        BASE_SPEED * self.percentage as f32 / 100.0
    }

    /// Places the creature at the center of the given tile.
    pub fn place_at_tile(&mut self, tile: IVec2) {
        self.position = center_of(tile);
        self.new_tile_entered = true;
    }

    /// Sets both the movement and the wish direction.
    pub fn force_direction(&mut self, direction: Direction) {
        self.move_dir = direction;
        self.wish_dir = direction;
    }

    /// Requests a reversal; it is executed at the next movement step.
    pub fn reverse_as_soon_as_possible(&mut self) {
        self.reverse_pending = true;
    }

    pub fn reverse_pending(&self) -> bool {
        self.reverse_pending
    }

    fn can_access(&self, world: &World, tile: IVec2, constraints: MoveConstraints) -> bool {
        world.is_accessible(tile, constraints.pass_door)
    }

    /// Euclidean distance of the creature center from the center of its tile,
    /// measured along the axis of the given direction.
    fn offset_along(&self, direction: Direction) -> f32 {
        let center = center_of(self.tile());
        if direction.is_horizontal() {
            (self.position.x - center.x).abs()
        } else {
            (self.position.y - center.y).abs()
        }
    }

    fn can_turn_to(&self, world: &World, direction: Direction, constraints: MoveConstraints) -> bool {
        if constraints.no_up_in_red_zone && direction == Direction::Up && world.is_red_zone(self.tile()) {
            return false;
        }
        // 90° turns only while passing the tile center this tick.
        if self.offset_along(self.move_dir) > self.speed() {
            return false;
        }
        self.can_access(world, self.tile() + direction.as_ivec2(), constraints)
    }

    /// Advances one movement step through the maze.
    pub fn try_move(&mut self, world: &World, constraints: MoveConstraints) {
        self.moved = false;
        self.got_stuck = false;
        let tile_before = self.tile();

        if self.reverse_pending {
            self.wish_dir = self.move_dir.opposite();
            self.reverse_pending = false;
        }

        let speed = self.speed();
        if speed <= 0.0 {
            self.new_tile_entered = false;
            return;
        }

        if self.wish_dir != self.move_dir {
            if self.wish_dir == self.move_dir.opposite() {
                self.move_dir = self.wish_dir;
            } else if self.can_turn_to(world, self.wish_dir, constraints) {
                self.position = center_of(tile_before);
                self.move_dir = self.wish_dir;
            }
        }

        let center = center_of(self.tile());
        let mut next = self.position + self.move_dir.as_vec2() * speed;
        let ahead = self.tile() + self.move_dir.as_ivec2();
        if !self.can_access(world, ahead, constraints) {
            // Clamp at the tile center instead of walking into the wall.
            match self.move_dir {
                Direction::Right if next.x > center.x => {
                    next.x = center.x;
                    self.got_stuck = true;
                }
                Direction::Left if next.x < center.x => {
                    next.x = center.x;
                    self.got_stuck = true;
                }
                Direction::Down if next.y > center.y => {
                    next.y = center.y;
                    self.got_stuck = true;
                }
                Direction::Up if next.y < center.y => {
                    next.y = center.y;
                    self.got_stuck = true;
                }
                _ => {}
            }
        }

        self.moved = next != self.position;
        self.position = next;
        if let Some(wrapped) = world.wrap(self.position) {
            self.position = wrapped;
        }
        self.new_tile_entered = self.tile() != tile_before;
    }

    /// Picks the wish direction that brings the next tile closest to the
    /// target (Euclidean), never reversing. Ties resolve in the classic
    /// arcade order up, left, down, right.
    pub fn steer_towards(&mut self, world: &World, target: IVec2, constraints: MoveConstraints) {
        let tile = self.tile();
        let mut best: Option<(f32, Direction)> = None;
        for direction in [Direction::Up, Direction::Left, Direction::Down, Direction::Right] {
            if direction == self.move_dir.opposite() {
                continue;
            }
            if constraints.no_up_in_red_zone && direction == Direction::Up && world.is_red_zone(tile) {
                continue;
            }
            let next = tile + direction.as_ivec2();
            if !self.can_access(world, next, constraints) {
                continue;
            }
            let distance = (next - target).as_vec2().length_squared();
            if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                best = Some((distance, direction));
            }
        }
        if let Some((_, direction)) = best {
            self.wish_dir = direction;
        }
    }
}
