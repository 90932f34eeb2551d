//! Connection Handler
//!
//! Handles individual client connections.
//!
//! ```text
//! AwaitingFrame ──frame──▶ Dispatched ──response written──▶ AwaitingFrame
//!       │                       │
//!   eof / read error       write error
//!       ▼                       ▼
//!     Closed ◀──────────────────┘
//! ```

use std::io::BufWriter;
use std::net::TcpStream;
use std::sync::Arc;

use crate::engine::Engine;
use crate::error::Result;
use crate::protocol::{write_frame, FrameReader, Response};

/// Where a connection is in its read → dispatch → write cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    AwaitingFrame,
    Dispatched,
    Closed,
}

/// Handles a single client connection
pub struct Connection {
    /// Frame reader over the TCP stream
    reader: FrameReader<TcpStream>,

    /// TCP stream writer (buffered, flushed once per frame)
    writer: BufWriter<TcpStream>,

    /// Reference to the command engine
    engine: Arc<Engine>,

    /// Current position in the state machine
    state: ConnectionState,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(stream: TcpStream, engine: Arc<Engine>) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: FrameReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            engine,
            state: ConnectionState::AwaitingFrame,
            peer_addr,
        })
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads frames in a loop and sends exactly one response per frame.
    /// Returns `Ok` when the client disconnects, `Err` on any other I/O
    /// failure. Either way the connection ends up `Closed`.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Client connected from {}", self.peer_addr);

        let result = self.serve();
        self.state = ConnectionState::Closed;

        match result {
            Ok(()) => {
                tracing::debug!("Client {} disconnected", self.peer_addr);
                Ok(())
            }
            Err(e) if e.is_disconnect() => {
                tracing::debug!("Client {} dropped the connection: {}", self.peer_addr, e);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Error handling client {}: {}", self.peer_addr, e);
                Err(e)
            }
        }
    }

    fn serve(&mut self) -> Result<()> {
        loop {
            self.state = ConnectionState::AwaitingFrame;

            let frame = match self.reader.read_frame()? {
                Some(frame) => frame,
                None => return Ok(()),
            };

            tracing::debug!("Received from {}: {}", self.peer_addr, frame);

            self.state = ConnectionState::Dispatched;
            let response = self.engine.handle_frame(&frame);

            tracing::trace!("Responding to {}: {:?}", self.peer_addr, response);
            self.send_response(&response)?;
        }
    }

    /// Send a response to the client
    fn send_response(&mut self, response: &Response) -> Result<()> {
        write_frame(&mut self.writer, &response.encode())
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
