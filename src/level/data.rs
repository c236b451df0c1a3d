//! Per-level parameter tables: speeds, elroy thresholds, power duration,
//! hunting phase durations, and bonus symbols/points per game variant.

use rand::rngs::SmallRng;
use rand::Rng;
use strum_macros::AsRefStr;

use crate::error::{GameResult, LevelError};
use crate::timer::{secs_to_ticks, TickTimer};

/// The two supported rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum GameVariant {
    Pacman,
    MsPacman,
}

/// Raw level rows: pac speed, ghost speed, ghost tunnel speed, elroy 1 dots
/// left, elroy 1 speed, elroy 2 dots left, elroy 2 speed, powered pac speed,
/// frightened ghost speed, power seconds, maze flashes, intermission number.
/// Speeds are percentages of the base speed.
#[rustfmt::skip]
const RAW_LEVEL_DATA: [[u8; 12]; 21] = [
    /* 1*/ [ 80, 75, 40,  20,  85, 10,  95,  90, 50, 6, 5, 0],
    /* 2*/ [ 90, 85, 45,  30,  90, 15,  95,  95, 55, 5, 5, 1],
    /* 3*/ [ 90, 85, 45,  40,  90, 20,  95,  95, 55, 4, 5, 0],
    /* 4*/ [ 90, 85, 45,  40,  90, 20,  95,  95, 55, 3, 5, 0],
    /* 5*/ [100, 95, 50,  40, 100, 20, 105, 100, 60, 2, 5, 2],
    /* 6*/ [100, 95, 50,  50, 100, 25, 105, 100, 60, 5, 5, 0],
    /* 7*/ [100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5, 0],
    /* 8*/ [100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5, 0],
    /* 9*/ [100, 95, 50,  60, 100, 30, 105, 100, 60, 1, 3, 3],
    /*10*/ [100, 95, 50,  60, 100, 30, 105, 100, 60, 5, 5, 0],
    /*11*/ [100, 95, 50,  60, 100, 30, 105, 100, 60, 2, 5, 0],
    /*12*/ [100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3, 0],
    /*13*/ [100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3, 3],
    /*14*/ [100, 95, 50,  80, 100, 40, 105, 100, 60, 3, 5, 0],
    /*15*/ [100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3, 0],
    /*16*/ [100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3, 0],
    /*17*/ [100, 95, 50, 100, 100, 50, 105, 100, 60, 0, 0, 3],
    /*18*/ [100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3, 0],
    /*19*/ [100, 95, 50, 120, 100, 60, 105, 100, 60, 0, 0, 0],
    /*20*/ [100, 95, 50, 120, 100, 60, 105, 100, 60, 0, 0, 0],
    /*21*/ [ 90, 95, 50, 120, 100, 60, 105,  90, 60, 0, 0, 0],
];

/// The parameter set of one level. Constructed once per level; levels past
/// the table reuse its last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLevelData {
    pub pac_speed_pct: u8,
    pub ghost_speed_pct: u8,
    pub ghost_speed_tunnel_pct: u8,
    pub elroy1_dots_left: u32,
    pub elroy1_speed_pct: u8,
    pub elroy2_dots_left: u32,
    pub elroy2_speed_pct: u8,
    pub pac_speed_powered_pct: u8,
    pub ghost_speed_frightened_pct: u8,
    pub pac_power_seconds: u8,
    pub num_flashes: u8,
    pub intermission_number: u8,
    /// Remaining power ticks at which the "power fading" warning fires.
    pub power_fading_ticks: u64,
}

impl GameLevelData {
    pub fn new(level_number: u32) -> Self {
        let row = RAW_LEVEL_DATA[(level_number as usize).clamp(1, RAW_LEVEL_DATA.len()) - 1];
        Self {
            pac_speed_pct: row[0],
            ghost_speed_pct: row[1],
            ghost_speed_tunnel_pct: row[2],
            elroy1_dots_left: row[3] as u32,
            elroy1_speed_pct: row[4],
            elroy2_dots_left: row[5] as u32,
            elroy2_speed_pct: row[6],
            pac_speed_powered_pct: row[7],
            ghost_speed_frightened_pct: row[8],
            pac_power_seconds: row[9],
            num_flashes: row[10],
            intermission_number: row[11],
            power_fading_ticks: secs_to_ticks(2),
        }
    }

    /// Configured power pellet duration in ticks.
    pub fn pac_power_ticks(&self) -> u64 {
        secs_to_ticks(self.pac_power_seconds as u64)
    }
}

/// Scatter/chase durations in ticks for the eight hunting phases of a level.
/// The last chase phase runs indefinitely.
pub fn hunting_durations(variant: GameVariant, level_number: u32) -> [u64; 8] {
    const EOT: u64 = TickTimer::INDEFINITE;
    match variant {
        GameVariant::Pacman => match level_number {
            1 => [420, 1200, 420, 1200, 300, 1200, 300, EOT],
            2..=4 => [420, 1200, 420, 1200, 300, 61980, 1, EOT],
            _ => [300, 1200, 300, 1200, 300, 62262, 1, EOT],
        },
        GameVariant::MsPacman => [420, 1200, 1, 62220, 1, 62220, 1, EOT],
    }
}

/// Points per bonus symbol in the Pac-Man variant (cherries through key).
pub const PACMAN_BONUS_POINTS: [u32; 8] = [100, 300, 500, 700, 1000, 2000, 3000, 5000];
/// Points per bonus symbol in the Ms. Pac-Man variant (cherries through
/// banana).
pub const MS_PACMAN_BONUS_POINTS: [u32; 7] = [100, 200, 500, 700, 1000, 2000, 5000];

/// Food-count thresholds at which the two bonuses of a level appear.
pub const fn bonus_food_thresholds(variant: GameVariant) -> [u32; 2] {
    match variant {
        GameVariant::Pacman => [70, 170],
        GameVariant::MsPacman => [64, 176],
    }
}

/// Picks a bonus symbol for the level: Pac-Man uses a fixed level-banded
/// table, Ms. Pac-Man a fixed progression for the first seven levels and a
/// uniform random symbol afterwards.
pub fn bonus_symbol(variant: GameVariant, level_number: u32, rng: &mut SmallRng) -> u8 {
    match variant {
        GameVariant::Pacman => match level_number {
            1 => 0,
            2 => 1,
            3 | 4 => 2,
            5 | 6 => 3,
            7 | 8 => 4,
            9 | 10 => 5,
            11 | 12 => 6,
            _ => 7,
        },
        GameVariant::MsPacman => {
            if level_number <= 7 {
                (level_number - 1) as u8
            } else {
                rng.random_range(0..MS_PACMAN_BONUS_POINTS.len() as u8)
            }
        }
    }
}

/// Point value of a bonus symbol.
pub fn bonus_points(variant: GameVariant, symbol: u8) -> GameResult<u32> {
    let table: &[u32] = match variant {
        GameVariant::Pacman => &PACMAN_BONUS_POINTS,
        GameVariant::MsPacman => &MS_PACMAN_BONUS_POINTS,
    };
    table
        .get(symbol as usize)
        .copied()
        .ok_or_else(|| LevelError::IllegalBonusSymbol(symbol).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_level_one_parameters() {
        let data = GameLevelData::new(1);
        assert_eq!(data.pac_speed_pct, 80);
        assert_eq!(data.ghost_speed_pct, 75);
        assert_eq!(data.elroy1_dots_left, 20);
        assert_eq!(data.elroy2_dots_left, 10);
        assert_eq!(data.pac_power_seconds, 6);
        assert_eq!(data.pac_power_ticks(), 360);
    }

    #[test]
    fn test_levels_past_table_reuse_last_row() {
        assert_eq!(GameLevelData::new(21), GameLevelData::new(99));
    }

    #[test]
    fn test_hunting_tables_end_indefinitely() {
        for level in 1..=10 {
            for variant in [GameVariant::Pacman, GameVariant::MsPacman] {
                let durations = hunting_durations(variant, level);
                assert_eq!(durations[7], TickTimer::INDEFINITE);
            }
        }
    }

    #[test]
    fn test_pacman_bonus_symbols_fixed_by_level() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(bonus_symbol(GameVariant::Pacman, 1, &mut rng), 0);
        assert_eq!(bonus_symbol(GameVariant::Pacman, 4, &mut rng), 2);
        assert_eq!(bonus_symbol(GameVariant::Pacman, 13, &mut rng), 7);
    }

    #[test]
    fn test_ms_pacman_bonus_symbols_random_after_level_seven() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(bonus_symbol(GameVariant::MsPacman, 3, &mut rng), 2);
        for _ in 0..100 {
            let symbol = bonus_symbol(GameVariant::MsPacman, 8, &mut rng);
            assert!((symbol as usize) < MS_PACMAN_BONUS_POINTS.len());
        }
    }

    #[test]
    fn test_bonus_thresholds() {
        assert_eq!(bonus_food_thresholds(GameVariant::Pacman), [70, 170]);
        assert_eq!(bonus_food_thresholds(GameVariant::MsPacman), [64, 176]);
    }

    #[test]
    fn test_bonus_points_rejects_unknown_symbols() {
        assert_eq!(bonus_points(GameVariant::Pacman, 0).unwrap(), 100);
        assert_eq!(bonus_points(GameVariant::MsPacman, 6).unwrap(), 5000);
        assert!(bonus_points(GameVariant::Pacman, 8).is_err());
        assert!(bonus_points(GameVariant::MsPacman, 7).is_err());
    }
}
