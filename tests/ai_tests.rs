use broadside::{
    choose_target, index_to_row_col, random_fleet, CellSet, MatchState, Phase, Role, ShipName,
    NUM_CELLS, NUM_SHIPS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_hunt_mode_avoids_attacked_cells() {
    let mut rng = SmallRng::seed_from_u64(7);
    let hits = CellSet::new();
    let misses: CellSet = (0..50).collect();
    for _ in 0..200 {
        let target = choose_target(hits, misses, &mut rng).unwrap();
        assert!(!misses.contains(target));
    }
}

#[test]
fn test_target_mode_stays_adjacent_to_hits() {
    let mut rng = SmallRng::seed_from_u64(11);
    // Single hit in the middle of the board at (5, 5).
    let hits: CellSet = [55].into_iter().collect();
    let misses = CellSet::new();
    for _ in 0..100 {
        let target = choose_target(hits, misses, &mut rng).unwrap();
        let (r, c) = index_to_row_col(target);
        assert_eq!(r.abs_diff(5) + c.abs_diff(5), 1, "target {} not adjacent", target);
    }
}

#[test]
fn test_target_mode_skips_exhausted_neighbors() {
    let mut rng = SmallRng::seed_from_u64(13);
    // Hit at corner 0; right neighbor already missed, so only the cell below
    // remains eligible.
    let hits: CellSet = [0].into_iter().collect();
    let misses: CellSet = [1].into_iter().collect();
    for _ in 0..50 {
        assert_eq!(choose_target(hits, misses, &mut rng), Some(10));
    }
}

#[test]
fn test_falls_back_to_hunt_when_no_neighbor_eligible() {
    let mut rng = SmallRng::seed_from_u64(17);
    // Hit at 0 with both neighbors resolved: target mode has nothing, hunt
    // mode picks among the rest.
    let hits: CellSet = [0].into_iter().collect();
    let misses: CellSet = [1, 10].into_iter().collect();
    let attacked = hits | misses;
    for _ in 0..100 {
        let target = choose_target(hits, misses, &mut rng).unwrap();
        assert!(!attacked.contains(target));
    }
}

#[test]
fn test_exhausted_board_yields_none() {
    let mut rng = SmallRng::seed_from_u64(19);
    let hits: CellSet = (0..NUM_CELLS).collect();
    assert_eq!(choose_target(hits, CellSet::new(), &mut rng), None);
}

#[test]
fn test_random_fleet_places_all_ships_validly() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let state = random_fleet(&MatchState::new(), Role::Player2, &mut rng);
        let fleet = &state.player2.fleet;
        assert!(fleet.is_fully_placed(), "seed {} left ships unplaced", seed);
        // No overlap: the union has exactly the catalog total of cells.
        let total: usize = ShipName::ALL.iter().map(|s| s.length()).sum();
        assert_eq!(fleet.ship_map().len(), total);
        assert_eq!(ShipName::ALL.len(), NUM_SHIPS);
    }
}

#[test]
fn test_random_fleet_keeps_existing_placements() {
    let mut rng = SmallRng::seed_from_u64(23);
    let state = MatchState::new().place_ship(
        Role::Player2,
        ShipName::Carrier,
        0,
        broadside::Orientation::Horizontal,
    );
    let state = random_fleet(&state, Role::Player2, &mut rng);
    assert_eq!(state.player2.fleet.ship(ShipName::Carrier).origin(), Some(0));
    assert!(state.player2.fleet.is_fully_placed());
}

#[test]
fn test_seeded_games_are_reproducible() {
    let run = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = random_fleet(&MatchState::new(), Role::Player2, &mut rng);
        state.phase = Phase::Battle;
        let mut targets = Vec::new();
        for _ in 0..10 {
            let defender = &state.player1;
            let target =
                choose_target(defender.fleet.hit_map(), defender.misses(), &mut rng).unwrap();
            targets.push(target);
            state = state.attack(Role::Player2, target);
        }
        targets
    };
    assert_eq!(run(42), run(42));
}
