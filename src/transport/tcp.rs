//! TCP transport: length-prefixed bincode frames over a single stream.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::timeout;

use crate::protocol::{decode_payload, encode_frame, Event, MAX_FRAME_SIZE};
use crate::transport::Transport;

/// Timeout applied to every read and write.
const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TcpTransport {
    stream: TcpStream,
    io_timeout: Duration,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    pub fn with_timeout(stream: TcpStream, io_timeout: Duration) -> Self {
        Self { stream, io_timeout }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, event: Event) -> anyhow::Result<()> {
        let frame = encode_frame(&event)?;
        timeout(self.io_timeout, self.stream.write_all(&frame)).await??;
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Event> {
        // No deadline on the header read: the peer may legitimately sit idle
        // while its player thinks. Once a frame starts it must finish quickly.
        let mut len_buf = [0u8; 4];
        self.stream.read_exact(&mut len_buf).await?;
        let len = u32::from_be_bytes(len_buf);
        if len > MAX_FRAME_SIZE {
            anyhow::bail!("incoming frame of {} bytes exceeds limit", len);
        }
        let mut payload = vec![0u8; len as usize];
        timeout(self.io_timeout, self.stream.read_exact(&mut payload)).await??;
        decode_payload(&payload)
    }
}
