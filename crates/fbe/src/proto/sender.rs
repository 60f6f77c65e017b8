// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Framed message sender.
//!
//! Wraps any [`io::Write`] and emits `[length BE][frame]` records. Each
//! send issues exactly one `write` call, so a frame is never interleaved
//! with another writer's bytes on a shared stream; a partial write is
//! reported as [`Error::ShortWrite`] rather than silently retried, since
//! retrying would leave a torn frame on the wire.

use std::io::Write;

use log::trace;

use crate::error::{Error, Result};
use crate::proto::message::Message;
use crate::proto::receiver::WIRE_PREFIX_SIZE;

/// Framed message sender over a byte-stream writer.
#[derive(Debug)]
pub struct Sender<W> {
    writer: W,

    /// Statistics: messages sent
    messages_sent: u64,

    /// Statistics: wire bytes sent (prefixes included)
    bytes_sent: u64,
}

impl<W: Write> Sender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            messages_sent: 0,
            bytes_sent: 0,
        }
    }

    /// Number of messages sent.
    pub fn messages_sent(&self) -> u64 {
        self.messages_sent
    }

    /// Total wire bytes sent, length prefixes included.
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    /// Serialize and send one message.
    ///
    /// Returns the number of wire bytes written.
    pub fn send<M: Message>(&mut self, message: &M) -> Result<usize> {
        let frame = message.to_frame()?;
        self.send_frame(&frame)
    }

    /// Send an already-built frame.
    pub fn send_frame(&mut self, frame: &[u8]) -> Result<usize> {
        let mut wire = Vec::with_capacity(WIRE_PREFIX_SIZE + frame.len());
        wire.extend_from_slice(&(frame.len() as u32).to_be_bytes());
        wire.extend_from_slice(frame);
        self.write_wire(&wire, 1)
    }

    /// Send multiple frames with a single `write` call.
    ///
    /// More efficient than sending separately when flushing batches.
    pub fn send_batch(&mut self, frames: &[&[u8]]) -> Result<usize> {
        let total: usize = frames.iter().map(|f| WIRE_PREFIX_SIZE + f.len()).sum();
        let mut wire = Vec::with_capacity(total);
        for frame in frames {
            wire.extend_from_slice(&(frame.len() as u32).to_be_bytes());
            wire.extend_from_slice(frame);
        }
        self.write_wire(&wire, frames.len() as u64)
    }

    fn write_wire(&mut self, wire: &[u8], messages: u64) -> Result<usize> {
        let written = self.writer.write(wire)?;
        if written != wire.len() {
            return Err(Error::ShortWrite {
                written,
                expected: wire.len(),
            });
        }
        self.messages_sent += messages;
        self.bytes_sent += written as u64;
        trace!(
            "sent {} message(s), {} wire bytes (total {} / {})",
            messages,
            written,
            self.messages_sent,
            self.bytes_sent
        );
        Ok(written)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Take back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
