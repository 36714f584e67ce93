use broadside::{Alert, Cell, MatchState, Orientation, Phase, Role, ShipName};

/// Battle-ready state with a known player2 layout: Patrol at {0, 1}, the rest
/// of the fleet parked on distinct rows further down.
fn battle_state() -> MatchState {
    let mut state = MatchState::new();
    for (name, origin) in [
        (ShipName::Patrol, 0),
        (ShipName::Carrier, 30),
        (ShipName::Battleship, 40),
        (ShipName::Destroyer, 50),
        (ShipName::Submarine, 60),
    ] {
        state = state.place_ship(Role::Player2, name, origin, Orientation::Horizontal);
        assert!(state.alert.is_none());
    }
    state.phase = Phase::Battle;
    state
}

#[test]
fn test_hit_marks_cell_and_keeps_turn() {
    let state = battle_state().attack(Role::Player1, 0);
    assert_eq!(state.player2.cell(0), Cell::Hit);
    assert_eq!(state.current_player, Role::Player1);
    assert_eq!(state.player1.shots(), &[0]);
    assert_eq!(state.player1.hit_streak(), 1);
}

#[test]
fn test_miss_marks_cell_and_passes_turn() {
    let state = battle_state().attack(Role::Player1, 2);
    assert_eq!(state.player2.cell(2), Cell::Miss);
    assert_eq!(state.current_player, Role::Player2);
    assert_eq!(state.player1.shots(), &[2]);
    assert_eq!(state.player1.hit_streak(), 0);
}

#[test]
fn test_duplicate_attack_rejected_unchanged() {
    let once = battle_state().attack(Role::Player1, 0);
    let twice = once.attack(Role::Player1, 0);
    assert_eq!(twice.alert, Some(Alert::DuplicateAttack));
    assert_eq!(twice.current_player, once.current_player);
    assert_eq!(twice.player1.shots(), once.player1.shots());
    assert_eq!(twice.player2.fleet, once.player2.fleet);

    // Duplicate on a missed cell behaves the same.
    let miss = once.attack(Role::Player1, 2);
    let dup = miss.attack(Role::Player2, 2);
    assert_eq!(dup.alert, Some(Alert::DuplicateAttack));
    assert_eq!(dup.current_player, miss.current_player);
}

#[test]
fn test_spectator_cannot_attack() {
    let state = battle_state().attack(Role::Spectator, 0);
    assert_eq!(state.alert, Some(Alert::InvalidPlayerRole));
    assert_eq!(state.player2.cell(0), Cell::Occupied);
}

#[test]
fn test_hit_streak_resets_on_miss() {
    let state = battle_state().attack(Role::Player1, 0).attack(Role::Player1, 1);
    assert_eq!(state.player1.hit_streak(), 2);
    let state = state.attack(Role::Player1, 5);
    assert_eq!(state.player1.hit_streak(), 0);
}

#[test]
fn test_destroying_last_ship_finishes_match() {
    let mut state = battle_state();
    // Sink everything; each ship occupies a contiguous horizontal run.
    for (origin, len) in [(0, 2), (30, 5), (40, 4), (50, 3), (60, 3)] {
        for offset in 0..len {
            state = state.attack(Role::Player1, origin + offset);
        }
    }
    assert_eq!(state.phase, Phase::Finished);
    assert_eq!(state.winner, Some(Role::Player1));
    assert_eq!(state.alert, Some(Alert::Winner(Role::Player1)));
    // Attacker kept the turn through the entire streak of hits.
    assert_eq!(state.current_player, Role::Player1);
    assert!(state.player2.fleet.all_destroyed());
}

#[test]
fn test_win_checked_on_triggering_hit_not_deferred() {
    let mut state = battle_state();
    for target in [30, 31, 32, 33, 34, 40, 41, 42, 43, 50, 51, 52, 60, 61, 62, 0] {
        state = state.attack(Role::Player1, target);
        assert_eq!(state.phase, Phase::Battle);
    }
    // One Patrol cell left; the next hit must finish immediately.
    let state = state.attack(Role::Player1, 1);
    assert_eq!(state.phase, Phase::Finished);
    assert_eq!(state.winner, Some(Role::Player1));
}

#[test]
fn test_alert_cleared_on_next_operation() {
    let state = battle_state().attack(Role::Player1, 0).attack(Role::Player1, 0);
    assert_eq!(state.alert, Some(Alert::DuplicateAttack));
    let state = state.attack(Role::Player1, 5);
    assert!(state.alert.is_none());
}

#[test]
fn test_shot_history_is_chronological() {
    let state = battle_state()
        .attack(Role::Player1, 0)
        .attack(Role::Player1, 5)
        .attack(Role::Player2, 70)
        .attack(Role::Player1, 1);
    assert_eq!(state.player1.shots(), &[0, 5, 1]);
    assert_eq!(state.player2.shots(), &[70]);
}
