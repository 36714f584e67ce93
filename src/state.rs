//! Match state and the placement/attack engines.
//!
//! All engine operations are functional updates: they take the previous
//! `MatchState` by reference and return a new one. Bad caller input never
//! panics or errors; it degrades to an unchanged state carrying an [`Alert`].

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, CellIndex, CellSet, NUM_CELLS};
use crate::ship::{footprint, Fleet, Orientation, ShipName};

/// Who is acting. Spectators may watch but never mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player1,
    Player2,
    Spectator,
}

impl Role {
    /// The other player, `None` for spectators.
    pub fn opponent(self) -> Option<Role> {
        match self {
            Role::Player1 => Some(Role::Player2),
            Role::Player2 => Some(Role::Player1),
            Role::Spectator => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player1 => f.write_str("player1"),
            Role::Player2 => f.write_str("player2"),
            Role::Spectator => f.write_str("spectator"),
        }
    }
}

/// Match phase; advances only forward, reset replaces the whole state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Placement,
    Battle,
    Finished,
}

/// Non-fatal rejection or notification, surfaced as transient alert text.
/// Cleared at the start of every engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alert {
    OutOfBoundsPlacement,
    OutOfBoundsAttack,
    OverlappingPlacement,
    ShipAlreadyPlaced(ShipName),
    DuplicateAttack,
    InvalidPlayerRole,
    PrematureBattleStart,
    OutOfTurn,
    Winner(Role),
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::OutOfBoundsPlacement => {
                write!(f, "Error placing ship: placement is out of bounds.")
            }
            Alert::OutOfBoundsAttack => {
                write!(f, "Error attacking: target is off the board.")
            }
            Alert::OverlappingPlacement => {
                write!(f, "Error placing ship: overlapping with another ship.")
            }
            Alert::ShipAlreadyPlaced(name) => {
                write!(f, "The {} has already been placed.", name)
            }
            Alert::DuplicateAttack => write!(f, "You already attacked this area."),
            Alert::InvalidPlayerRole => write!(f, "Invalid acting player role."),
            Alert::PrematureBattleStart => {
                write!(f, "Battle cannot start before both fleets are ready.")
            }
            Alert::OutOfTurn => write!(f, "It is not your turn."),
            Alert::Winner(role) => write!(f, "{} won!", role),
        }
    }
}

/// One side of the match: fleet, misses against it, and outgoing shot history.
///
/// Ship occupancy and ship damage live on the fleet alone; the per-cell board
/// value is derived on read, so the two views can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub fleet: Fleet,
    misses: CellSet,
    shots: Vec<CellIndex>,
    hit_streak: u32,
}

impl PlayerState {
    fn new() -> Self {
        PlayerState {
            fleet: Fleet::new(),
            misses: CellSet::new(),
            shots: Vec::new(),
            hit_streak: 0,
        }
    }

    /// Derived state of one cell on this player's board.
    pub fn cell(&self, index: CellIndex) -> Cell {
        if self.fleet.hit_map().contains(index) {
            Cell::Hit
        } else if self.misses.contains(index) {
            Cell::Miss
        } else if self.fleet.ship_map().contains(index) {
            Cell::Occupied
        } else {
            Cell::Empty
        }
    }

    /// Cells already attacked on this board (hits and misses).
    pub fn attacked(&self) -> CellSet {
        self.fleet.hit_map() | self.misses
    }

    /// Missed shots against this board.
    pub fn misses(&self) -> CellSet {
        self.misses
    }

    /// Chronological list of cells this player has fired upon.
    pub fn shots(&self) -> &[CellIndex] {
        &self.shots
    }

    /// Consecutive hits in the current run, backing the extra-shot rule.
    pub fn hit_streak(&self) -> u32 {
        self.hit_streak
    }
}

/// Root aggregate: both sides plus turn, phase, and transient alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub player1: PlayerState,
    pub player2: PlayerState,
    pub current_player: Role,
    pub phase: Phase,
    pub winner: Option<Role>,
    pub alert: Option<Alert>,
}

impl MatchState {
    /// Fresh match: empty boards, unplaced fleets, player1 to act.
    pub fn new() -> Self {
        MatchState {
            player1: PlayerState::new(),
            player2: PlayerState::new(),
            current_player: Role::Player1,
            phase: Phase::Placement,
            winner: None,
            alert: None,
        }
    }

    pub fn player(&self, role: Role) -> Option<&PlayerState> {
        match role {
            Role::Player1 => Some(&self.player1),
            Role::Player2 => Some(&self.player2),
            Role::Spectator => None,
        }
    }

    fn player_mut(&mut self, role: Role) -> &mut PlayerState {
        match role {
            Role::Player1 => &mut self.player1,
            Role::Player2 => &mut self.player2,
            Role::Spectator => unreachable!("spectators hold no state"),
        }
    }

    fn rejected(&self, alert: Alert) -> MatchState {
        let mut next = self.clone();
        next.alert = Some(alert);
        next
    }

    /// Place `name` for `role` anchored at `origin`.
    ///
    /// Rejections leave the state unchanged apart from the alert: the ship is
    /// already placed, the run leaves the board, or it overlaps another ship.
    pub fn place_ship(
        &self,
        role: Role,
        name: ShipName,
        origin: CellIndex,
        orientation: Orientation,
    ) -> MatchState {
        if origin >= NUM_CELLS {
            return self.rejected(Alert::OutOfBoundsPlacement);
        }
        let player = match self.player(role) {
            Some(p) => p,
            None => return self.rejected(Alert::InvalidPlayerRole),
        };
        if player.fleet.ship(name).is_placed() {
            return self.rejected(Alert::ShipAlreadyPlaced(name));
        }
        let cells = match footprint(name, origin, orientation) {
            Some(cells) => cells,
            None => return self.rejected(Alert::OutOfBoundsPlacement),
        };
        if !(player.fleet.ship_map() & cells).is_empty() {
            return self.rejected(Alert::OverlappingPlacement);
        }

        let mut next = self.clone();
        next.alert = None;
        next.player_mut(role)
            .fleet
            .ship_mut(name)
            .place(origin, cells, orientation);
        next
    }

    /// Resolve an attack by `role` against the opposing board.
    ///
    /// A hit keeps the turn with the attacker; a miss passes it. Destroying
    /// the last ship finishes the match immediately, winner = attacker.
    pub fn attack(&self, role: Role, target: CellIndex) -> MatchState {
        let attacker = role;
        let defender = match attacker.opponent() {
            Some(d) => d,
            None => return self.rejected(Alert::InvalidPlayerRole),
        };
        // Out-of-range targets are a caller contract violation; the transport
        // adapter validates inbound indices before they reach the engine.
        let defending = self.player(defender).expect("defender is a player");
        if matches!(defending.cell(target), Cell::Hit | Cell::Miss) {
            // Turn does not pass on a duplicate.
            return self.rejected(Alert::DuplicateAttack);
        }

        let mut next = self.clone();
        next.alert = None;
        next.player_mut(attacker).shots.push(target);

        let hit_ship = next
            .player(defender)
            .expect("defender is a player")
            .fleet
            .ship_at(target);
        match hit_ship {
            Some(name) => {
                let defending = next.player_mut(defender);
                defending.fleet.ship_mut(name).record_hit(target);
                let destroyed = defending.fleet.ship(name).is_destroyed();
                let fleet_gone = destroyed && defending.fleet.all_destroyed();
                next.player_mut(attacker).hit_streak += 1;
                if fleet_gone {
                    next.phase = Phase::Finished;
                    next.winner = Some(attacker);
                    next.alert = Some(Alert::Winner(attacker));
                }
                // Extra shot on hit: current_player stays with the attacker.
            }
            None => {
                next.player_mut(defender).misses.insert(target);
                next.player_mut(attacker).hit_streak = 0;
                next.current_player = defender;
            }
        }
        next
    }
}

impl Default for MatchState {
    fn default() -> Self {
        MatchState::new()
    }
}
