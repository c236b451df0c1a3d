//! This module contains all the constants used by the simulation.

use glam::IVec2;

/// Number of simulation ticks per second.
pub const TICKS_PER_SECOND: u64 = 60;

/// The size of each cell, in pixels.
pub const CELL_SIZE: i32 = 8;
/// The size of the game board, in cells.
pub const BOARD_CELL_SIZE: IVec2 = IVec2::new(28, 31);

/// Base movement speed at a percentage of 100, in pixels per tick.
pub const BASE_SPEED: f32 = 1.25;

/// Points awarded for a normal pellet.
pub const POINTS_PELLET: u32 = 10;
/// Points awarded for an energizer.
pub const POINTS_ENERGIZER: u32 = 50;
/// Points awarded for the ghosts eaten during a single power cycle, indexed
/// by how many have been eaten in that cycle so far.
pub const KILL_VALUES: [u32; 4] = [200, 400, 800, 1600];
/// Flat bonus awarded when the 16th ghost of a level is killed.
pub const POINTS_ALL_GHOSTS_IN_LEVEL: u32 = 12_000;

/// Ticks Pac-Man rests (does not move) after eating a normal pellet.
pub const RESTING_TICKS_PELLET: u32 = 1;
/// Ticks Pac-Man rests after eating an energizer.
pub const RESTING_TICKS_ENERGIZER: u32 = 3;

/// Ticks an eaten ghost stays in place showing its kill value.
pub const GHOST_EATEN_DISPLAY_TICKS: u32 = 60;

/// Minimum number of ticks a static bonus stays edible (plus up to one
/// second chosen at random).
pub const BONUS_EDIBLE_BASE_TICKS: u64 = 9 * TICKS_PER_SECOND;
/// Ticks an eaten bonus keeps showing its point value.
pub const BONUS_EATEN_DISPLAY_TICKS: u64 = 2 * TICKS_PER_SECOND;

/// Percentage speed of ghosts moving inside the house (locked bounce,
/// leaving, entering).
pub const PCT_GHOST_INSIDE_HOUSE: u8 = 45;
/// Percentage speed of an eaten ghost returning to the house.
pub const PCT_GHOST_RETURNING_HOME: u8 = 200;
/// Percentage speed of the moving bonus in the Ms. Pac-Man variant.
pub const PCT_MOVING_BONUS: u8 = 50;

/// Half-period of the energizer blink, in ticks.
pub const ENERGIZER_BLINK_TICKS: u32 = 10;
/// Half-period of the maze flash shown at level completion, in ticks.
pub const MAZE_FLASH_TICKS: u32 = 12;

/// The raw layout of the game board, as a 2D array of characters.
///
/// `#` wall, `.` pellet, `o` energizer, `T` portal end, `=` house door,
/// `P` Pac-Man start, ` ` empty floor.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #      # ##.######",
    "T     .   #      #   .     T",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......P .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];
