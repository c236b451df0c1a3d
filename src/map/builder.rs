//! Parses the raw character board into the static per-level world.
//!
//! The world is read-mostly after construction; eating food is the only
//! mutation. Everything the movement and AI code asks per tick (walls,
//! doors, tunnels, portals, house geometry) is answered from here.

use bitflags::bitflags;
use glam::{IVec2, Vec2};
use smallvec::SmallVec;

use crate::constants::CELL_SIZE;
use crate::error::ParseError;
use crate::map::{center_of, tile_at};

bitflags! {
    /// Per-tile attributes of the parsed board.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TileFlags: u8 {
        const WALL = 1 << 0;
        const FOOD = 1 << 1;
        const ENERGIZER = 1 << 2;
        const EATEN = 1 << 3;
        const TUNNEL = 1 << 4;
        const DOOR = 1 << 5;
    }
}

/// A pair of maze-edge tiles connected by wraparound movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Portal {
    pub left: IVec2,
    pub right: IVec2,
}

/// Ghost house geometry, derived from the two door tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    pub door: [IVec2; 2],
    /// Position right above the door where ghosts enter and leave.
    pub entry: Vec2,
    pub seat_left: Vec2,
    pub seat_middle: Vec2,
    pub seat_right: Vec2,
    top_left: IVec2,
    bottom_right: IVec2,
}

impl House {
    fn from_door(door: [IVec2; 2]) -> Self {
        let (left, row) = (door[0].x.min(door[1].x), door[0].y);
        let center_x = ((left + 1) * CELL_SIZE) as f32;
        let seat_y = ((row + 2) * CELL_SIZE + CELL_SIZE / 2) as f32;
        Self {
            door,
            entry: Vec2::new(center_x, ((row - 1) * CELL_SIZE + CELL_SIZE / 2) as f32),
            seat_left: Vec2::new(center_x - 20.0, seat_y),
            seat_middle: Vec2::new(center_x, seat_y),
            seat_right: Vec2::new(center_x + 20.0, seat_y),
            top_left: IVec2::new(left - 2, row + 1),
            bottom_right: IVec2::new(left + 3, row + 3),
        }
    }

    /// Whether the tile lies inside the house (door and interior).
    pub fn contains(&self, tile: IVec2) -> bool {
        let interior = tile.x >= self.top_left.x
            && tile.x <= self.bottom_right.x
            && tile.y >= self.top_left.y
            && tile.y <= self.bottom_right.y;
        interior || self.door.contains(&tile)
    }

    /// The two walkable tiles right above the door.
    pub fn entry_tiles(&self) -> [IVec2; 2] {
        [
            IVec2::new(self.door[0].x, self.door[0].y - 1),
            IVec2::new(self.door[1].x, self.door[1].y - 1),
        ]
    }
}

/// The static maze of one level plus its mutable food state.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    size: IVec2,
    tiles: Vec<TileFlags>,
    portals: Vec<Portal>,
    total_food: u32,
    eaten_food: u32,
    pac_start: Vec2,
    house: House,
    red_zone: SmallVec<[IVec2; 4]>,
}

impl World {
    /// Parses a character board (`#` wall, `.` pellet, `o` energizer,
    /// `T` portal end, `=` house door, `P` Pac-Man start, ` ` floor).
    pub fn new(board: &[&str]) -> Result<Self, ParseError> {
        let height = board.len();
        let width = board.first().map_or(0, |row| row.len());
        let mut tiles = vec![TileFlags::default(); width * height];
        let mut door_tiles: Vec<IVec2> = Vec::new();
        let mut portal_ends: Vec<IVec2> = Vec::new();
        let mut pac_start_tile: Option<IVec2> = None;
        let mut total_food = 0u32;

        for (y, row) in board.iter().enumerate() {
            if row.len() != width {
                return Err(ParseError::InvalidRowLength {
                    row: y,
                    found: row.len(),
                    expected: width,
                });
            }
            for (x, c) in row.chars().enumerate() {
                let tile = IVec2::new(x as i32, y as i32);
                let flags = match c {
                    '#' => TileFlags::WALL,
                    '.' => {
                        total_food += 1;
                        TileFlags::FOOD
                    }
                    'o' => {
                        total_food += 1;
                        TileFlags::FOOD | TileFlags::ENERGIZER
                    }
                    'T' => {
                        portal_ends.push(tile);
                        TileFlags::TUNNEL
                    }
                    '=' => {
                        door_tiles.push(tile);
                        TileFlags::DOOR
                    }
                    'P' => {
                        pac_start_tile = Some(tile);
                        TileFlags::default()
                    }
                    ' ' => TileFlags::default(),
                    other => return Err(ParseError::UnknownCharacter(other)),
                };
                tiles[y * width + x] = flags;
            }
        }

        if door_tiles.len() != 2 {
            return Err(ParseError::InvalidHouseDoorCount(door_tiles.len()));
        }
        let pac_start_tile = pac_start_tile.ok_or(ParseError::MissingPacStart)?;

        // Pair portal ends row by row and flag the outer six columns of each
        // portal row as tunnel for the ghost speed rule.
        let mut portals = Vec::new();
        for end in &portal_ends {
            if end.x == 0 {
                let right = portal_ends
                    .iter()
                    .find(|other| other.y == end.y && other.x != 0)
                    .copied()
                    .unwrap_or(IVec2::new(width as i32 - 1, end.y));
                portals.push(Portal { left: *end, right });
                for x in 0..width as i32 {
                    if x < 6 || x >= width as i32 - 6 {
                        tiles[end.y as usize * width + x as usize] |= TileFlags::TUNNEL;
                    }
                }
            }
        }

        let house = House::from_door([door_tiles[0], door_tiles[1]]);
        let mut red_zone: SmallVec<[IVec2; 4]> = SmallVec::from_slice(&house.entry_tiles());
        red_zone.push(pac_start_tile - IVec2::Y);
        red_zone.push(pac_start_tile + IVec2::X - IVec2::Y);

        Ok(Self {
            size: IVec2::new(width as i32, height as i32),
            tiles,
            portals,
            total_food,
            eaten_food: 0,
            pac_start: center_of(pac_start_tile) + Vec2::new(CELL_SIZE as f32 / 2.0, 0.0),
            house,
            red_zone,
        })
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn in_bounds(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.x < self.size.x && tile.y >= 0 && tile.y < self.size.y
    }

    fn flags(&self, tile: IVec2) -> TileFlags {
        if self.in_bounds(tile) {
            self.tiles[tile.y as usize * self.size.x as usize + tile.x as usize]
        } else {
            TileFlags::default()
        }
    }

    pub fn is_wall(&self, tile: IVec2) -> bool {
        self.flags(tile).contains(TileFlags::WALL)
    }

    pub fn is_door(&self, tile: IVec2) -> bool {
        self.flags(tile).contains(TileFlags::DOOR)
    }

    pub fn is_tunnel(&self, tile: IVec2) -> bool {
        self.flags(tile).contains(TileFlags::TUNNEL)
    }

    /// Whether the tile belongs to a portal transition area (a portal end or
    /// the off-board continuation of a portal row). Frightened ghosts do not
    /// re-steer here.
    pub fn is_portal_area(&self, tile: IVec2) -> bool {
        self.portals.iter().any(|portal| {
            tile.y == portal.left.y && (tile.x <= portal.left.x || tile.x >= portal.right.x)
        })
    }

    /// Whether a creature may occupy the tile. Off-board tiles are passable
    /// only along portal rows; door tiles only with `pass_door`.
    pub fn is_accessible(&self, tile: IVec2, pass_door: bool) -> bool {
        if !self.in_bounds(tile) {
            return tile.y >= 0
                && tile.y < self.size.y
                && self.portals.iter().any(|portal| portal.left.y == tile.y);
        }
        let flags = self.flags(tile);
        if flags.contains(TileFlags::WALL) {
            return false;
        }
        if flags.contains(TileFlags::DOOR) && !pass_door {
            return false;
        }
        true
    }

    /// Teleports a position that walked past a portal end to the paired side.
    pub fn wrap(&self, position: Vec2) -> Option<Vec2> {
        let tile = tile_at(position);
        if !self.portals.iter().any(|portal| portal.left.y == tile.y) {
            return None;
        }
        let width = (self.size.x * CELL_SIZE) as f32;
        let margin = CELL_SIZE as f32 / 2.0;
        let span = width + 2.0 * margin;
        if position.x < -margin {
            Some(Vec2::new(position.x + span, position.y))
        } else if position.x > width + margin {
            Some(Vec2::new(position.x - span, position.y))
        } else {
            None
        }
    }

    pub fn has_food_at(&self, tile: IVec2) -> bool {
        let flags = self.flags(tile);
        flags.contains(TileFlags::FOOD) && !flags.contains(TileFlags::EATEN)
    }

    pub fn is_energizer(&self, tile: IVec2) -> bool {
        self.flags(tile).contains(TileFlags::ENERGIZER)
    }

    /// Removes the food at the tile. Returns false if there was none.
    pub fn eat_food(&mut self, tile: IVec2) -> bool {
        if !self.has_food_at(tile) {
            return false;
        }
        self.tiles[tile.y as usize * self.size.x as usize + tile.x as usize] |= TileFlags::EATEN;
        self.eaten_food += 1;
        true
    }

    pub fn total_food(&self) -> u32 {
        self.total_food
    }

    pub fn eaten_food_count(&self) -> u32 {
        self.eaten_food
    }

    pub fn uneaten_food_count(&self) -> u32 {
        self.total_food - self.eaten_food
    }

    /// All tiles still holding food.
    pub fn food_tiles(&self) -> impl Iterator<Item = IVec2> + '_ {
        let width = self.size.x;
        self.tiles.iter().enumerate().filter_map(move |(i, flags)| {
            (flags.contains(TileFlags::FOOD) && !flags.contains(TileFlags::EATEN))
                .then(|| IVec2::new(i as i32 % width, i as i32 / width))
        })
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn pac_start(&self) -> Vec2 {
        self.pac_start
    }

    pub fn house(&self) -> &House {
        &self.house
    }

    /// Tiles where hunting ghosts must not turn up (Pac-Man variant rule).
    pub fn is_red_zone(&self, tile: IVec2) -> bool {
        self.red_zone.contains(&tile)
    }
}
