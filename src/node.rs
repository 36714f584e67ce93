//! Session adapter for networked play: applies local intents to the held
//! [`Match`] and mirrors them to the peer, and replays inbound peer events
//! onto the local copy.
//!
//! Convergence relies on the relay delivering each session's events at most
//! once and in order; there is no reconciliation.

use log::{debug, info, warn};

use crate::game::{Match, Mode};
use crate::grid::{CellIndex, NUM_CELLS};
use crate::protocol::Event;
use crate::ship::{Orientation, ShipName};
use crate::state::Role;
use crate::transport::Transport;

pub struct SessionNode {
    session: String,
    role: Role,
    game: Match,
    transport: Box<dyn Transport>,
    peer_name: Option<String>,
    battle_started: bool,
}

impl SessionNode {
    /// Join `session` on the relay and wait for the role assignment.
    pub async fn join(
        mut transport: Box<dyn Transport>,
        session: String,
        player_name: String,
    ) -> anyhow::Result<Self> {
        transport
            .send(Event::JoinSession {
                session: session.clone(),
                player_name,
            })
            .await?;
        let role = loop {
            match transport.recv().await? {
                Event::AssignRole { role } => break role,
                other => debug!("pre-assignment event ignored: {:?}", other),
            }
        };
        info!("joined session {} as {}", session, role);
        Ok(SessionNode {
            session,
            role,
            game: Match::new(Mode::Networked),
            transport,
            peer_name: None,
            battle_started: false,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn peer_name(&self) -> Option<&str> {
        self.peer_name.as_deref()
    }

    /// True once the relay has announced both sides ready.
    pub fn battle_started(&self) -> bool {
        self.battle_started
    }

    /// Place a ship locally and mirror the action to the peer.
    pub async fn place(
        &mut self,
        name: ShipName,
        index: CellIndex,
        orientation: Orientation,
    ) -> anyhow::Result<()> {
        self.game.place(self.role, name, index, orientation);
        if self.game.state().alert.is_some() {
            // Rejected locally; nothing to mirror.
            return Ok(());
        }
        self.transport
            .send(Event::PlaceShip {
                session: self.session.clone(),
                role: self.role,
                ship: name,
                index,
                orientation,
            })
            .await
    }

    /// Announce readiness once the local fleet is fully placed.
    pub async fn ready(&mut self) -> anyhow::Result<()> {
        self.game.mark_ready(self.role);
        self.transport
            .send(Event::PlayerReady {
                session: self.session.clone(),
                role: self.role,
            })
            .await
    }

    /// Attack locally and mirror the action to the peer.
    pub async fn attack(&mut self, index: CellIndex) -> anyhow::Result<()> {
        self.game.attack(self.role, index);
        if self.game.state().alert.is_some() {
            return Ok(());
        }
        self.transport
            .send(Event::Attack {
                session: self.session.clone(),
                role: self.role,
                index,
            })
            .await
    }

    pub async fn leave(&mut self) -> anyhow::Result<()> {
        self.transport
            .send(Event::LeaveSession {
                session: self.session.clone(),
            })
            .await
    }

    /// Receive and apply the next peer event.
    pub async fn pump(&mut self) -> anyhow::Result<Event> {
        let event = self.transport.recv().await?;
        self.apply(event.clone());
        Ok(event)
    }

    /// Apply one inbound event to the local match copy.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::PlaceShip {
                role,
                ship,
                index,
                orientation,
                ..
            } => {
                if index < NUM_CELLS {
                    self.game.place(role, ship, index, orientation);
                }
            }
            Event::Attack { role, index, .. } => {
                if index < NUM_CELLS {
                    self.game.attack(role, index);
                }
            }
            Event::PlayerReady { role, .. } => {
                self.game.mark_ready(role);
            }
            Event::BothPlayersReady => {
                self.battle_started = true;
                self.game.start_battle();
            }
            Event::UpdatePlayerNames { player1, player2 } => {
                self.peer_name = match self.role {
                    Role::Player1 => player2,
                    _ => player1,
                };
            }
            Event::AssignRole { .. } => {}
            Event::JoinSession { .. } | Event::LeaveSession { .. } => {
                warn!("unexpected relay-bound event from peer: ignoring");
            }
        }
    }
}
