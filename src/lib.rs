//! Deterministic tick-based Pac-Man / Ms. Pac-Man simulation core.

pub mod animation;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod level;
pub mod map;
pub mod timer;
