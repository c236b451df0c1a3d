//! Maze geometry: directions, tile math, and the parsed world.

pub mod builder;
pub mod direction;

use glam::{IVec2, Vec2};

use crate::constants::CELL_SIZE;

/// Returns the tile containing the given pixel position.
pub fn tile_at(position: Vec2) -> IVec2 {
    (position / CELL_SIZE as f32).floor().as_ivec2()
}

/// Returns the pixel center of the given tile.
pub fn center_of(tile: IVec2) -> Vec2 {
    tile.as_vec2() * CELL_SIZE as f32 + Vec2::splat(CELL_SIZE as f32 / 2.0)
}
