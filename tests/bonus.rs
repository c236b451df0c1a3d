use glam::IVec2;

use pacsim::entity::bonus::{Bonus, BonusState};
use pacsim::events::{GameEvent, RecordingSink};
use pacsim::level::data::GameVariant;
use pacsim::level::GameLevel;

fn level_with_bonus(variant: GameVariant, seed: u64) -> (GameLevel, RecordingSink) {
    let mut level = GameLevel::new(variant, 1, seed, false).unwrap();
    level.start().unwrap();
    level.set_pac_immune(true);
    let mut sink = RecordingSink::new();

    let thresholds = match variant {
        GameVariant::Pacman => 70,
        GameVariant::MsPacman => 64,
    };
    let target = IVec2::new(1, 1);
    let fill: Vec<IVec2> = level
        .world
        .food_tiles()
        .filter(|tile| *tile != target)
        .take(thresholds - 1)
        .collect();
    for tile in fill {
        level.world.eat_food(tile);
    }
    level.pac.creature.place_at_tile(target);
    level.simulate_one_frame(&mut sink).unwrap();
    (level, sink)
}

#[test]
fn test_static_bonus_expires_if_ignored() {
    let (mut level, mut sink) = level_with_bonus(GameVariant::Pacman, 9);
    assert!(level.bonus().is_some());
    sink.clear();

    // Pac rests at (1, 1) against the wall; the fruit times out on its own
    // after at most ten seconds.
    for _ in 0..601 {
        level.simulate_one_frame(&mut sink).unwrap();
    }
    assert_eq!(level.bonus().unwrap().state(), BonusState::Inactive);
    assert!(sink
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::BonusExpired { .. })));
    assert!(!sink
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::BonusEaten { .. })));
}

#[test]
fn test_static_bonus_awards_points_when_eaten() {
    let (mut level, mut sink) = level_with_bonus(GameVariant::Pacman, 9);
    let bonus_tile = level.bonus().unwrap().tile();
    let points = level.bonus().unwrap().points();
    assert_eq!(points, 100);
    sink.clear();

    level.pac.creature.place_at_tile(bonus_tile);
    level.simulate_one_frame(&mut sink).unwrap();

    assert!(sink.contains(&GameEvent::BonusEaten { tile: bonus_tile }));
    assert!(sink.contains(&GameEvent::Scored { points }));
    assert_eq!(level.bonus().unwrap().state(), BonusState::Eaten);

    // The point display disappears after two seconds.
    for _ in 0..120 {
        level.simulate_one_frame(&mut sink).unwrap();
    }
    assert_eq!(level.bonus().unwrap().state(), BonusState::Inactive);
}

#[test]
fn test_moving_bonus_tours_the_maze_and_leaves() {
    let (mut level, mut sink) = level_with_bonus(GameVariant::MsPacman, 4);
    let bonus = level.bonus().unwrap();
    assert!(matches!(bonus, Bonus::Moving(_)));
    assert_eq!(bonus.state(), BonusState::Edible);
    sink.clear();

    let mut expired = false;
    for _ in 0..5000 {
        level.simulate_one_frame(&mut sink).unwrap();
        if level.bonus().unwrap().state() == BonusState::Inactive {
            expired = true;
            break;
        }
    }
    assert!(expired, "moving bonus never left the maze");
    assert!(sink
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::BonusExpired { .. })));
}

#[test]
fn test_ms_pacman_second_bonus_waits_for_the_first() {
    let (mut level, mut sink) = level_with_bonus(GameVariant::MsPacman, 4);
    assert_eq!(level.bonus().unwrap().state(), BonusState::Edible);
    sink.clear();

    // Reach the second threshold while the first fruit still wanders.
    let target = IVec2::new(26, 29);
    let fill: Vec<IVec2> = level
        .world
        .food_tiles()
        .filter(|tile| *tile != target)
        .take(111)
        .collect();
    for tile in fill {
        level.world.eat_food(tile);
    }
    level.pac.creature.place_at_tile(target);
    level.simulate_one_frame(&mut sink).unwrap();

    assert_eq!(level.world.eaten_food_count(), 176);
    assert!(!sink
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::BonusActivated { .. })));
    assert_eq!(level.bonus().unwrap().symbol(), 0);
}

#[test]
fn test_ms_pacman_first_bonus_is_cherries() {
    let (level, _) = level_with_bonus(GameVariant::MsPacman, 4);
    assert_eq!(level.bonus().unwrap().symbol(), 0);
    assert_eq!(level.bonus().unwrap().points(), 100);
}
