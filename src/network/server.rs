//! TCP Server
//!
//! Accepts connections and runs each one on its own thread.

use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{Result, SqlFrameError};

use super::Connection;

/// TCP server for SQLFrame
///
/// One thread per accepted connection, no cap on the number of connections.
/// Threads share only the engine.
pub struct Server {
    /// Shared command engine
    engine: Arc<Engine>,

    /// Bound listening socket
    listener: TcpListener,

    /// Set once shutdown is requested
    shutdown: Arc<AtomicBool>,
}

/// Stops a running [`Server`] from another thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl Server {
    /// Bind the configured address
    pub fn bind(config: &Config, engine: Arc<Engine>) -> Result<Self> {
        let addr = config.listen_addr();
        let listener = TcpListener::bind(&addr).map_err(|e| {
            SqlFrameError::Network(format!("Failed to bind {}: {}", addr, e))
        })?;

        Ok(Self {
            engine,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle that can stop the accept loop
    pub fn shutdown_handle(&self) -> Result<ShutdownHandle> {
        let mut wake_addr = self.local_addr()?;
        if wake_addr.ip().is_unspecified() {
            wake_addr.set_ip(Ipv4Addr::LOCALHOST.into());
        }

        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            wake_addr,
        })
    }

    /// Accept connections until shutdown (blocking)
    ///
    /// Connections already running keep going after the loop exits.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Server started on {}", self.local_addr()?);
        tracing::info!("Waiting for connections...");

        for stream in self.listener.incoming() {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => tracing::warn!("Failed to accept connection: {}", e),
            }
        }

        tracing::info!("Shutting down server...");
        Ok(())
    }

    fn spawn_connection(&self, stream: TcpStream) {
        let engine = Arc::clone(&self.engine);

        let spawned = thread::Builder::new()
            .name("sqlframe-conn".to_string())
            .spawn(move || match Connection::new(stream, engine) {
                Ok(mut connection) => {
                    // Errors are already logged by the handler
                    let _ = connection.handle();
                }
                Err(e) => tracing::warn!("Failed to set up connection: {}", e),
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn connection thread: {}", e);
        }
    }
}

impl ShutdownHandle {
    /// Set the flag and poke the listener so a blocked `accept` returns
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
        let _ = TcpStream::connect(self.wake_addr);
    }
}
