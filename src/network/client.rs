//! Blocking client
//!
//! Sends one statement per frame and waits for the matching response.

use std::io::BufWriter;
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{Result, SqlFrameError};
use crate::protocol::{write_frame, FrameReader, Response};

/// A single connection to a SQLFrame server
pub struct Client {
    reader: FrameReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    /// Connect to a server
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: FrameReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send a request and return the raw response text
    pub fn send_raw(&mut self, request: &str) -> Result<String> {
        write_frame(&mut self.writer, request)?;

        self.reader.read_frame()?.ok_or_else(|| {
            SqlFrameError::Network("Server closed the connection".to_string())
        })
    }

    /// Send a request and parse the response
    pub fn send(&mut self, request: &str) -> Result<Response> {
        let text = self.send_raw(request)?;
        Response::from_wire(&text)
    }
}
