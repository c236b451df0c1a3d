use glam::IVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use pacsim::constants::RAW_BOARD;
use pacsim::entity::ghost::{scatter_target, Ghost, GhostContext, GhostId, GhostState};
use pacsim::level::data::GameVariant;
use pacsim::map::builder::World;
use pacsim::map::direction::Direction;

fn world() -> World {
    World::new(&RAW_BOARD).unwrap()
}

fn context(pac_tile: IVec2, pac_dir: Direction) -> GhostContext {
    GhostContext {
        variant: GameVariant::Pacman,
        hunting_phase: 1,
        scatter_phase: None,
        cruise_elroy: 0,
        pac_tile,
        pac_dir,
        red_tile: IVec2::new(14, 11),
        ghost_speed_pct: 75,
        tunnel_speed_pct: 40,
        frightened_speed_pct: 50,
        elroy1_speed_pct: 85,
        elroy2_speed_pct: 95,
    }
}

#[test]
fn test_red_targets_pac_directly() {
    let world = world();
    let ghost = Ghost::new(GhostId::Red, &world);
    let ctx = context(IVec2::new(10, 20), Direction::Right);
    assert_eq!(ghost.chasing_target(&ctx), IVec2::new(10, 20));
}

#[test]
fn test_pink_ambushes_four_ahead_with_overflow_quirk() {
    let world = world();
    let ghost = Ghost::new(GhostId::Pink, &world);

    let ctx = context(IVec2::new(10, 20), Direction::Right);
    assert_eq!(ghost.chasing_target(&ctx), IVec2::new(14, 20));

    // Facing up also shifts the target four tiles to the left.
    let ctx = context(IVec2::new(10, 20), Direction::Up);
    assert_eq!(ghost.chasing_target(&ctx), IVec2::new(6, 16));
}

#[test]
fn test_cyan_mirrors_red_through_the_point_two_ahead() {
    let world = world();
    let ghost = Ghost::new(GhostId::Cyan, &world);
    let mut ctx = context(IVec2::new(10, 20), Direction::Right);
    ctx.red_tile = IVec2::new(4, 20);
    // Two ahead of Pac is (12, 20); mirrored: 2 * (12, 20) - (4, 20).
    assert_eq!(ghost.chasing_target(&ctx), IVec2::new(20, 20));
}

#[test]
fn test_orange_retreats_when_close() {
    let world = world();
    let mut ghost = Ghost::new(GhostId::Orange, &world);

    ghost.creature.place_at_tile(IVec2::new(1, 29));
    let ctx = context(IVec2::new(20, 8), Direction::Left);
    assert_eq!(ghost.chasing_target(&ctx), IVec2::new(20, 8));

    let ctx = context(IVec2::new(3, 29), Direction::Left);
    assert_eq!(ghost.chasing_target(&ctx), scatter_target(GhostId::Orange));
}

#[test]
fn test_frightened_ghost_keeps_direction_between_tiles() {
    let world = world();
    let mut rng = SmallRng::seed_from_u64(11);
    let mut ghost = Ghost::new(GhostId::Red, &world);
    ghost.state = GhostState::Frightened;
    ghost.creature.place_at_tile(IVec2::new(1, 1));
    ghost.creature.force_direction(Direction::Right);

    let ctx = context(IVec2::new(26, 29), Direction::Left);
    for _ in 0..300 {
        let could_resteer = ghost.creature.new_tile_entered || ghost.creature.got_stuck;
        let wish_before = ghost.creature.wish_dir;
        ghost.update(&world, &ctx, &mut rng);
        if !could_resteer {
            assert_eq!(ghost.creature.wish_dir, wish_before);
        }
    }
}

#[test]
fn test_frightened_ghost_never_reverses() {
    let world = world();
    let mut rng = SmallRng::seed_from_u64(5);
    let mut ghost = Ghost::new(GhostId::Red, &world);
    ghost.state = GhostState::Frightened;
    ghost.creature.place_at_tile(IVec2::new(1, 1));
    ghost.creature.force_direction(Direction::Right);

    let ctx = context(IVec2::new(26, 29), Direction::Left);
    for _ in 0..500 {
        let before = ghost.creature.move_dir;
        let was_stuck = ghost.creature.got_stuck;
        ghost.update(&world, &ctx, &mut rng);
        if !was_stuck {
            assert_ne!(ghost.creature.move_dir, before.opposite());
        }
    }
}

#[test]
fn test_locked_ghost_bounces_around_its_seat() {
    let world = world();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut ghost = Ghost::new(GhostId::Pink, &world);
    let seat_y = ghost.revival_position.y;

    let ctx = context(IVec2::new(14, 23), Direction::Left);
    for _ in 0..200 {
        ghost.update(&world, &ctx, &mut rng);
        assert!((ghost.creature.position.y - seat_y).abs() <= 5.0);
        assert_eq!(ghost.state, GhostState::Locked);
    }
}

#[test]
fn test_leaving_ghost_exits_through_the_door() {
    let world = world();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut ghost = Ghost::new(GhostId::Cyan, &world);
    ghost.state = GhostState::LeavingHouse;

    let ctx = context(IVec2::new(14, 23), Direction::Left);
    for _ in 0..200 {
        ghost.update(&world, &ctx, &mut rng);
        if ghost.state == GhostState::HuntingPac {
            break;
        }
    }
    assert_eq!(ghost.state, GhostState::HuntingPac);
    assert_eq!(ghost.creature.position, world.house().entry);
    assert_eq!(ghost.creature.move_dir, Direction::Left);
}

#[test]
fn test_ms_pacman_red_and_pink_roam_in_first_scatter() {
    let world = world();
    // Four-way junction; coming down into it, corner steering for the red
    // and pink ghosts (both corners at the top) would always pick a fixed
    // direction, while roaming spreads over the other exits.
    let junction = IVec2::new(6, 5);
    let mut ctx = context(IVec2::new(26, 29), Direction::Left);
    ctx.variant = GameVariant::MsPacman;
    ctx.hunting_phase = 0;
    ctx.scatter_phase = Some(0);

    for id in [GhostId::Red, GhostId::Pink] {
        let mut wishes = Vec::new();
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut ghost = Ghost::new(id, &world);
            ghost.state = GhostState::HuntingPac;
            ghost.creature.place_at_tile(junction);
            ghost.creature.force_direction(Direction::Down);
            ghost.update(&world, &ctx, &mut rng);
            wishes.push(ghost.creature.wish_dir);
        }
        // A corner-steered ghost would pick the same exit for every seed.
        let first = wishes[0];
        assert!(wishes.iter().any(|wish| *wish != first));
        assert!(!wishes.contains(&Direction::Up));
    }

    // Cyan keeps heading for its corner in the lower right.
    let mut rng = SmallRng::seed_from_u64(0);
    let mut ghost = Ghost::new(GhostId::Cyan, &world);
    ghost.state = GhostState::HuntingPac;
    ghost.creature.place_at_tile(junction);
    ghost.creature.force_direction(Direction::Down);
    ghost.update(&world, &ctx, &mut rng);
    assert_eq!(ghost.creature.wish_dir, Direction::Down);
}

#[test]
fn test_elroy_red_chases_during_scatter() {
    let world = world();
    let mut rng = SmallRng::seed_from_u64(0);
    // Four-way junction: up and right lead towards the scatter corner,
    // down towards Pac-Man in the lower left.
    let junction = IVec2::new(6, 5);
    let mut ctx = context(IVec2::new(1, 23), Direction::Left);
    ctx.scatter_phase = Some(1);
    ctx.hunting_phase = 2;

    let mut ghost = Ghost::new(GhostId::Red, &world);
    ghost.state = GhostState::HuntingPac;
    ghost.creature.place_at_tile(junction);
    ghost.creature.force_direction(Direction::Right);
    ghost.update(&world, &ctx, &mut rng);
    assert_eq!(ghost.creature.wish_dir, Direction::Right);

    let mut ghost = Ghost::new(GhostId::Red, &world);
    ghost.state = GhostState::HuntingPac;
    ghost.creature.place_at_tile(junction);
    ghost.creature.force_direction(Direction::Right);
    ctx.cruise_elroy = 1;
    ghost.update(&world, &ctx, &mut rng);
    assert_eq!(ghost.creature.wish_dir, Direction::Down);
}
