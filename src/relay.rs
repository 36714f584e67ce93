//! Relay server: session rooms, role assignment, and verbatim fan-out.
//!
//! The relay holds no game rules. It tracks who is in which session, assigns
//! `player1`/`player2`/`spectator` in join order, aggregates the two ready
//! flags, and forwards placement and attack events to the other members
//! untouched.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{info, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use crate::protocol::{decode_payload, encode_frame, Event, MAX_FRAME_SIZE};
use crate::state::Role;

type ClientId = u64;
type Outbox = mpsc::UnboundedSender<Event>;

#[derive(Default)]
struct Session {
    members: Vec<(ClientId, Role)>,
    player1_name: Option<String>,
    player2_name: Option<String>,
    player1_ready: bool,
    player2_ready: bool,
}

impl Session {
    fn next_role(&self) -> Role {
        let taken: Vec<Role> = self.members.iter().map(|(_, r)| *r).collect();
        if !taken.contains(&Role::Player1) {
            Role::Player1
        } else if !taken.contains(&Role::Player2) {
            Role::Player2
        } else {
            Role::Spectator
        }
    }

    fn both_ready(&self) -> bool {
        self.player1_ready && self.player2_ready
    }
}

#[derive(Default)]
struct RelayState {
    sessions: HashMap<String, Session>,
    outboxes: HashMap<ClientId, Outbox>,
}

impl RelayState {
    /// Send to every member of `session` except `from`.
    fn fan_out(&self, session: &Session, from: ClientId, event: &Event) {
        for (id, _) in &session.members {
            if *id == from {
                continue;
            }
            if let Some(tx) = self.outboxes.get(id) {
                let _ = tx.send(event.clone());
            }
        }
    }

    /// Send to every member of `session`, sender included.
    fn broadcast(&self, session: &Session, event: &Event) {
        for (id, _) in &session.members {
            if let Some(tx) = self.outboxes.get(id) {
                let _ = tx.send(event.clone());
            }
        }
    }

    fn leave(&mut self, session_id: &str, client: ClientId) {
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.members.retain(|(id, _)| *id != client);
            if session.members.is_empty() {
                self.sessions.remove(session_id);
                info!("session {} emptied, dropping room", session_id);
            }
        }
    }
}

/// Shared relay: session bookkeeping behind a mutex, one task per client.
#[derive(Clone, Default)]
pub struct Relay {
    state: Arc<Mutex<RelayState>>,
}

impl Relay {
    pub fn new() -> Self {
        Relay::default()
    }

    /// Accept loop. Runs until the listener errors.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        info!("relay listening on {}", listener.local_addr()?);
        let mut next_id: ClientId = 0;
        loop {
            let (stream, addr) = listener.accept().await?;
            let id = next_id;
            next_id += 1;
            info!("client {} connected from {}", id, addr);
            let relay = self.clone();
            tokio::spawn(async move {
                if let Err(e) = relay.handle_client(id, stream).await {
                    warn!("client {} closed: {}", id, e);
                }
                relay.disconnect(id);
            });
        }
    }

    /// Apply one inbound event to the room bookkeeping and fan it out.
    /// Payloads are forwarded verbatim; the relay never rewrites them.
    fn handle_event(&self, client: ClientId, event: Event) {
        let mut state = self.state.lock().expect("relay state poisoned");
        match event {
            Event::JoinSession {
                session: session_id,
                player_name,
            } => {
                let session = state.sessions.entry(session_id.clone()).or_default();
                let role = session.next_role();
                session.members.push((client, role));
                match role {
                    Role::Player1 => session.player1_name = Some(player_name),
                    Role::Player2 => session.player2_name = Some(player_name),
                    Role::Spectator => {}
                }
                info!("client {} joined {} as {}", client, session_id, role);
                let names = Event::UpdatePlayerNames {
                    player1: session.player1_name.clone(),
                    player2: session.player2_name.clone(),
                };
                if let Some(tx) = state.outboxes.get(&client) {
                    let _ = tx.send(Event::AssignRole { role });
                }
                let session = &state.sessions[&session_id];
                state.broadcast(session, &names);
            }
            Event::PlayerReady { session: session_id, role } => {
                let Some(session) = state.sessions.get_mut(&session_id) else {
                    return;
                };
                match role {
                    Role::Player1 => session.player1_ready = true,
                    Role::Player2 => session.player2_ready = true,
                    Role::Spectator => return,
                }
                let both = session.both_ready();
                let forward = Event::PlayerReady {
                    session: session_id.clone(),
                    role,
                };
                let session = &state.sessions[&session_id];
                state.fan_out(session, client, &forward);
                if both {
                    state.broadcast(session, &Event::BothPlayersReady);
                }
            }
            Event::PlaceShip { ref session, .. } | Event::Attack { ref session, .. } => {
                if let Some(room) = state.sessions.get(session) {
                    state.fan_out(room, client, &event);
                }
            }
            Event::LeaveSession { session } => {
                state.leave(&session, client);
            }
            // Server-originated events have no meaning inbound.
            Event::AssignRole { .. }
            | Event::UpdatePlayerNames { .. }
            | Event::BothPlayersReady => {
                warn!("client {} sent a relay-only event, ignoring", client);
            }
        }
    }

    fn disconnect(&self, client: ClientId) {
        let mut state = self.state.lock().expect("relay state poisoned");
        state.outboxes.remove(&client);
        let rooms: Vec<String> = state
            .sessions
            .iter()
            .filter(|(_, s)| s.members.iter().any(|(id, _)| *id == client))
            .map(|(id, _)| id.clone())
            .collect();
        for room in rooms {
            state.leave(&room, client);
        }
    }

    async fn handle_client(&self, id: ClientId, stream: TcpStream) -> anyhow::Result<()> {
        let (mut reader, mut writer) = stream.into_split();
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
        self.state
            .lock()
            .expect("relay state poisoned")
            .outboxes
            .insert(id, tx);

        let write_task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let frame = encode_frame(&event)?;
                writer.write_all(&frame).await?;
            }
            anyhow::Ok(())
        });

        let read_result: anyhow::Result<()> = async {
            loop {
                let mut len_buf = [0u8; 4];
                reader.read_exact(&mut len_buf).await?;
                let len = u32::from_be_bytes(len_buf);
                if len > MAX_FRAME_SIZE {
                    anyhow::bail!("oversized frame from client {}", id);
                }
                let mut payload = vec![0u8; len as usize];
                reader.read_exact(&mut payload).await?;
                self.handle_event(id, decode_payload(&payload)?);
            }
        }
        .await;

        write_task.abort();
        read_result
    }
}
