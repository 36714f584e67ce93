//! Turn/session orchestrator: the single mutation surface for UI handlers and
//! network-inbound events, plus the phase state machine.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai;
use crate::grid::{CellIndex, NUM_CELLS};
use crate::ship::{Orientation, ShipName};
use crate::state::{Alert, MatchState, Phase, Role};

/// Who the local side is playing against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Second side is the built-in heuristic; its fleet is auto-placed and its
    /// turns resolved by the orchestrator.
    LocalAi,
    /// Second side is a peer whose actions arrive over a transport.
    Networked,
}

/// Holds the current [`MatchState`] and sequences phases.
///
/// Every mutator swaps the held state for the engine's returned one, so the
/// previous snapshot is never partially visible. No method panics or errors
/// on bad caller input; rejections surface on `state().alert`.
pub struct Match {
    state: MatchState,
    mode: Mode,
    rng: SmallRng,
    ready: [bool; 2],
}

impl Match {
    pub fn new(mode: Mode) -> Self {
        let mut seed_rng = rand::rng();
        Match::with_rng(mode, SmallRng::from_rng(&mut seed_rng))
    }

    /// Fixed seed for reproducible AI placement and targeting.
    pub fn with_seed(mode: Mode, seed: u64) -> Self {
        Match::with_rng(mode, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(mode: Mode, rng: SmallRng) -> Self {
        Match {
            state: MatchState::new(),
            mode,
            rng,
            ready: [false; 2],
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Place one ship for `role`. In local-AI mode, completing the human
    /// fleet also auto-places the opposing fleet so battle never starts with
    /// a partial one.
    pub fn place(
        &mut self,
        role: Role,
        name: ShipName,
        origin: CellIndex,
        orientation: Orientation,
    ) {
        if self.state.phase != Phase::Placement {
            self.state.alert = Some(Alert::PrematureBattleStart);
            return;
        }
        self.state = self.state.place_ship(role, name, origin, orientation);
        if self.mode == Mode::LocalAi
            && role == Role::Player1
            && self.state.player1.fleet.is_fully_placed()
        {
            self.state = ai::random_fleet(&self.state, Role::Player2, &mut self.rng);
        }
    }

    /// Record a ready acknowledgment. In networked mode battle starts only
    /// once both sides have acknowledged.
    pub fn mark_ready(&mut self, role: Role) {
        match role {
            Role::Player1 => self.ready[0] = true,
            Role::Player2 => self.ready[1] = true,
            Role::Spectator => {
                self.state.alert = Some(Alert::InvalidPlayerRole);
                return;
            }
        }
        if self.ready == [true, true] {
            self.start_battle();
        }
    }

    /// True while `local` has acknowledged ready but the peer has not.
    pub fn waiting_for_peer(&self, local: Role) -> bool {
        if self.mode != Mode::Networked || self.state.phase != Phase::Placement {
            return false;
        }
        match local {
            Role::Player1 => self.ready[0] && !self.ready[1],
            Role::Player2 => self.ready[1] && !self.ready[0],
            Role::Spectator => false,
        }
    }

    /// `placement → battle`, only once both fleets are fully placed (and, in
    /// networked mode, both peers acknowledged ready).
    pub fn start_battle(&mut self) {
        if self.state.phase != Phase::Placement {
            return;
        }
        let fleets_ready = self.state.player1.fleet.is_fully_placed()
            && self.state.player2.fleet.is_fully_placed();
        let peers_ready = self.mode == Mode::LocalAi || self.ready == [true, true];
        if !fleets_ready || !peers_ready {
            self.state.alert = Some(Alert::PrematureBattleStart);
            return;
        }
        self.state.alert = None;
        self.state.phase = Phase::Battle;
    }

    /// Resolve an attack by `role`. Out-of-turn and out-of-phase attempts are
    /// rejected with an alert and no other change.
    pub fn attack(&mut self, role: Role, target: CellIndex) {
        if role == Role::Spectator {
            self.state.alert = Some(Alert::InvalidPlayerRole);
            return;
        }
        if self.state.phase != Phase::Battle {
            self.state.alert = Some(Alert::PrematureBattleStart);
            return;
        }
        if role != self.state.current_player {
            self.state.alert = Some(Alert::OutOfTurn);
            return;
        }
        if target >= NUM_CELLS {
            // Defensive: a hostile peer could send any index.
            self.state.alert = Some(Alert::OutOfBoundsAttack);
            return;
        }
        self.state = self.state.attack(role, target);
    }

    /// Whether the heuristic side owes a move.
    pub fn ai_turn_pending(&self) -> bool {
        self.mode == Mode::LocalAi
            && self.state.phase == Phase::Battle
            && self.state.current_player == Role::Player2
    }

    /// Apply a single heuristic attack. Drivers that want a visible thinking
    /// delay call this once per timer tick; [`Match::resolve_ai_turns`] loops
    /// it for synchronous callers.
    pub fn ai_step(&mut self) {
        if !self.ai_turn_pending() {
            return;
        }
        self.state = ai::ai_attack(&self.state, Role::Player2, &mut self.rng);
    }

    /// Run heuristic attacks until the turn returns to the human side or the
    /// match finishes. Extra shots on hits are resolved here.
    pub fn resolve_ai_turns(&mut self) {
        while self.ai_turn_pending() {
            let shots_before = self.state.player2.shots().len();
            self.ai_step();
            if self.state.player2.shots().len() == shots_before {
                // Exhausted board; nothing left to fire at.
                break;
            }
        }
    }

    /// Full restart: a fresh state with empty boards and unplaced fleets.
    pub fn reset(&mut self) {
        self.state = MatchState::new();
        self.ready = [false; 2];
    }
}
