//! Frame codec
//!
//! Reading and writing of zero-terminated text frames.
//!
//! ## Wire Format
//!
//! ```text
//! ┌─────────────────────────────────────────┬──────┐
//! │        UTF-8 text (any length)          │ 0x00 │
//! └─────────────────────────────────────────┴──────┘
//! ```
//!
//! A single underlying read may carry zero, one, or many frames, or only part
//! of one. Bytes following a terminator stay buffered for the next call.

use std::io::{ErrorKind, Read, Write};

use bytes::{Buf, BytesMut};

use crate::error::Result;

/// Frame terminator byte
pub const FRAME_TERMINATOR: u8 = 0x00;

/// Size of each underlying read
pub const READ_CHUNK_SIZE: usize = 1024;

/// Buffered reader that yields one frame per call
pub struct FrameReader<R> {
    /// Underlying byte stream
    inner: R,

    /// Bytes read but not yet returned as a frame
    buffer: BytesMut,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: BytesMut::with_capacity(READ_CHUNK_SIZE),
        }
    }

    /// Read the next frame
    ///
    /// Returns `Ok(None)` once the stream reaches end-of-input without a
    /// terminator. Any unterminated trailing bytes are dropped at that point.
    /// Invalid UTF-8 is replaced with U+FFFD instead of failing the read.
    pub fn read_frame(&mut self) -> Result<Option<String>> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        loop {
            if let Some(frame) = self.take_buffered_frame() {
                return Ok(Some(frame));
            }

            let n = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            if n == 0 {
                if !self.buffer.is_empty() {
                    tracing::trace!(
                        "Dropping {} unterminated bytes at end of stream",
                        self.buffer.len()
                    );
                    self.buffer.clear();
                }
                return Ok(None);
            }

            self.buffer.extend_from_slice(&chunk[..n]);
        }
    }

    /// Split one complete frame off the front of the buffer, if present
    fn take_buffered_frame(&mut self) -> Option<String> {
        let end = self.buffer.iter().position(|&b| b == FRAME_TERMINATOR)?;
        let frame = self.buffer.split_to(end);
        self.buffer.advance(1);
        Some(String::from_utf8_lossy(&frame).into_owned())
    }

    /// Number of bytes buffered past the last returned frame
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Encode text as a terminated frame
pub fn encode_frame(text: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(text.len() + 1);
    frame.extend_from_slice(text.as_bytes());
    frame.push(FRAME_TERMINATOR);
    frame
}

/// Write a single frame to a stream
///
/// The whole frame goes out in one `write_all` so frames on the same writer
/// never interleave.
pub fn write_frame<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    let bytes = encode_frame(text);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
