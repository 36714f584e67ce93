//! Event transport abstraction injected into the session adapter, so the
//! networking layer can be swapped for an in-memory pair in tests.

use crate::protocol::Event;

#[async_trait::async_trait]
pub trait Transport: Send {
    async fn send(&mut self, event: Event) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Event>;
}

pub mod in_memory;
pub mod tcp;
