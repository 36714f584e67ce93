//! Session events exchanged through the relay, one per orchestrator-visible
//! action, and their wire framing.
//!
//! Frames are a 4-byte big-endian length prefix followed by a bincode
//! payload. The relay forwards payloads verbatim; it never inspects game
//! content beyond the session id and role needed for fan-out.

use serde::{Deserialize, Serialize};

use crate::grid::CellIndex;
use crate::ship::{Orientation, ShipName};
use crate::state::Role;

/// Upper bound on a single frame. Events are tiny; anything larger is a
/// corrupt or hostile stream.
pub const MAX_FRAME_SIZE: u32 = 64 * 1024;

/// Everything that crosses the wire between a client and the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Client asks to join (or create) a session room.
    JoinSession {
        session: String,
        player_name: String,
    },
    /// Relay's reply to a join: the role this client will play.
    AssignRole { role: Role },
    /// Broadcast to the whole room whenever membership changes.
    UpdatePlayerNames {
        player1: Option<String>,
        player2: Option<String>,
    },
    /// Mirror of a local placement onto the peer's copy of the board.
    PlaceShip {
        session: String,
        role: Role,
        ship: ShipName,
        index: CellIndex,
        orientation: Orientation,
    },
    /// One side finished placing and is ready for battle.
    PlayerReady { session: String, role: Role },
    /// Relay aggregation: both sides are ready, battle starts everywhere.
    BothPlayersReady,
    /// Mirror of a local attack onto the peer's copy of the board.
    Attack {
        session: String,
        role: Role,
        index: CellIndex,
    },
    /// Client is leaving its session room.
    LeaveSession { session: String },
}

/// Encode an event into a length-prefixed frame.
pub fn encode_frame(event: &Event) -> anyhow::Result<Vec<u8>> {
    let payload = bincode::serialize(event)?;
    let len = u32::try_from(payload.len())?;
    if len > MAX_FRAME_SIZE {
        anyhow::bail!("frame too large: {} bytes", len);
    }
    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Decode a frame payload (without the length prefix) back into an event.
pub fn decode_payload(payload: &[u8]) -> anyhow::Result<Event> {
    Ok(bincode::deserialize(payload)?)
}
