//! Hunt/target heuristic for the non-human side, plus random fleet placement.
//!
//! Every randomized entry point takes a caller-supplied `Rng` so games and
//! tests can be made reproducible with a seeded generator.

use rand::Rng;

use crate::grid::{orthogonal_neighbors, CellIndex, CellSet};
use crate::ship::{Orientation, ShipName};
use crate::state::{MatchState, Phase, Role};

/// Cap on rejection-sampling attempts per ship. The fixed 10×10 board and
/// five-ship fleet always admit a placement well within this bound.
const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Choose the next target given the hits and misses recorded so far on the
/// defender's board.
///
/// Target mode: concentrate on in-bounds orthogonal neighbors of known hits
/// that have not been attacked yet. Hunt mode: when no such neighbor exists,
/// fall back to a uniform pick over all unattacked cells. Returns `None` only
/// when every cell has been attacked, which cannot happen before a win.
pub fn choose_target<R: Rng + ?Sized>(
    hits: CellSet,
    misses: CellSet,
    rng: &mut R,
) -> Option<CellIndex> {
    let attacked = hits | misses;

    let around_hits: CellSet = hits
        .iter()
        .flat_map(orthogonal_neighbors)
        .filter(|&n| !attacked.contains(n))
        .collect();
    let pool = if around_hits.is_empty() {
        !attacked
    } else {
        around_hits
    };

    let candidates: Vec<CellIndex> = pool.iter().collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

/// Place every still-unplaced ship for `role` by rejection sampling: pick a
/// random origin and orientation, re-attempt until the placement engine
/// accepts. Attempts are capped per ship as a defensive bound.
pub fn random_fleet<R: Rng + ?Sized>(state: &MatchState, role: Role, rng: &mut R) -> MatchState {
    let mut state = state.clone();
    for name in ShipName::ALL {
        if state
            .player(role)
            .map(|p| p.fleet.ship(name).is_placed())
            .unwrap_or(true)
        {
            continue;
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let origin = rng.random_range(0..crate::grid::NUM_CELLS);
            let next = state.place_ship(role, name, origin, orientation);
            if next.alert.is_none() {
                state = next;
                break;
            }
        }
    }
    state
}

/// Apply one heuristic attack by `role`. No-op outside battle or when the
/// defending board is exhausted.
pub fn ai_attack<R: Rng + ?Sized>(state: &MatchState, role: Role, rng: &mut R) -> MatchState {
    if state.phase != Phase::Battle {
        return state.clone();
    }
    let defender = match role.opponent().and_then(|d| state.player(d)) {
        Some(d) => d,
        None => return state.clone(),
    };
    match choose_target(defender.fleet.hit_map(), defender.misses(), rng) {
        Some(target) => state.attack(role, target),
        None => state.clone(),
    }
}
