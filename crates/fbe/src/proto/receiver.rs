// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Framed message receiver.
//!
//! Reassembles `[length BE][frame]` records from a byte stream. The
//! receiver maintains partial read state, so frames may arrive split at
//! any byte boundary, across any number of reads, and coalesced with
//! their neighbors; exactly one frame is surfaced per completed record.
//!
//! Two intake modes:
//!
//! - [`Receiver::receive`] pulls from the owned [`Read`] stream. Designed
//!   for non-blocking sockets: `WouldBlock` maps to `Ok(None)`,
//!   `Interrupted` is retried, EOF at a record boundary is a clean close
//!   (`Ok(None)`), EOF inside a record is [`Error::UnexpectedEof`].
//! - [`Receiver::feed`] + [`Receiver::poll_frame`] accept bytes pushed
//!   from elsewhere (a TLS session, a test harness) through an internal
//!   accumulator.
//!
//! A length prefix above the configured maximum is rejected with
//! [`Error::FrameTooLarge`] before any allocation, so a hostile peer
//! cannot force an out-of-memory with a four-byte header.

use std::io::{self, Read};

use log::{trace, warn};

use crate::error::{Error, Result};
use crate::proto::message::Message;
use crate::proto::registry::MessageRegistry;

/// Wire length-prefix size (u32 big-endian).
pub const WIRE_PREFIX_SIZE: usize = 4;

/// Default maximum frame size (10 MB).
pub const DEFAULT_MAX_FRAME_SIZE: usize = 10 * 1024 * 1024;

/// Internal state for incremental reading.
#[derive(Debug, Clone, Copy)]
enum ReadState {
    /// Reading the 4-byte length prefix
    AwaitingLength { bytes_read: usize },

    /// Reading the frame body
    AwaitingFrame {
        expected_len: usize,
        bytes_read: usize,
    },
}

impl Default for ReadState {
    fn default() -> Self {
        ReadState::AwaitingLength { bytes_read: 0 }
    }
}

/// Framed message receiver over a byte-stream reader.
#[derive(Debug)]
pub struct Receiver<R> {
    reader: R,

    /// Current read state
    state: ReadState,

    /// Buffer for the record being assembled
    buffer: Vec<u8>,

    /// Maximum allowed frame size (anti-OOM protection)
    max_frame_size: usize,

    /// Statistics: frames received
    frames_received: u64,

    /// Statistics: frame bytes received
    bytes_received: u64,

    /// Statistics: frames rejected (too large)
    frames_rejected: u64,

    /// Accumulator for pushed bytes (feed/poll mode)
    accumulator: Vec<u8>,

    /// Read position in accumulator
    accumulator_pos: usize,
}

impl<R: Read> Receiver<R> {
    /// Create a receiver with the default maximum frame size.
    pub fn new(reader: R) -> Self {
        Self::with_max_frame_size(reader, DEFAULT_MAX_FRAME_SIZE)
    }

    /// Create a receiver with an explicit maximum frame size.
    pub fn with_max_frame_size(reader: R, max_frame_size: usize) -> Self {
        Self {
            reader,
            state: ReadState::default(),
            buffer: vec![0u8; WIRE_PREFIX_SIZE],
            max_frame_size,
            frames_received: 0,
            bytes_received: 0,
            frames_rejected: 0,
            accumulator: Vec::with_capacity(16384),
            accumulator_pos: 0,
        }
    }

    /// Maximum allowed frame size.
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }

    /// Number of frames received.
    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }

    /// Total frame bytes received (length prefixes excluded).
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    /// Number of frames rejected for exceeding the maximum size.
    pub fn frames_rejected(&self) -> u64 {
        self.frames_rejected
    }

    /// True when a record is partially assembled.
    pub fn is_partial(&self) -> bool {
        match self.state {
            ReadState::AwaitingLength { bytes_read } => bytes_read > 0,
            ReadState::AwaitingFrame { .. } => true,
        }
    }

    /// Bytes still needed to complete the current record.
    pub fn bytes_needed(&self) -> usize {
        match self.state {
            ReadState::AwaitingLength { bytes_read } => WIRE_PREFIX_SIZE - bytes_read,
            ReadState::AwaitingFrame {
                expected_len,
                bytes_read,
            } => expected_len - bytes_read,
        }
    }

    /// Reset partial state and discard buffered bytes (connection reset).
    pub fn reset(&mut self) {
        self.state = ReadState::default();
        self.buffer.resize(WIRE_PREFIX_SIZE, 0);
        self.accumulator.clear();
        self.accumulator_pos = 0;
    }

    /// Take back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Validate a parsed length prefix and move to the frame state.
    ///
    /// Returns `Ok(true)` when the record is an (unusual but legal)
    /// zero-length frame, complete on the spot.
    fn accept_length(&mut self, len: usize) -> Result<bool> {
        if len > self.max_frame_size {
            self.frames_rejected += 1;
            self.state = ReadState::default();
            warn!(
                "rejecting oversized frame: {} bytes (max {})",
                len, self.max_frame_size
            );
            return Err(Error::FrameTooLarge {
                len,
                max: self.max_frame_size,
            });
        }
        if len == 0 {
            self.frames_received += 1;
            self.state = ReadState::default();
            return Ok(true);
        }
        self.buffer.resize(len, 0);
        self.state = ReadState::AwaitingFrame {
            expected_len: len,
            bytes_read: 0,
        };
        Ok(false)
    }

    /// Book-keeping for a fully assembled frame.
    fn complete_frame(&mut self, expected_len: usize) -> Vec<u8> {
        let frame = self.buffer[..expected_len].to_vec();
        self.frames_received += 1;
        self.bytes_received += expected_len as u64;
        self.buffer.resize(WIRE_PREFIX_SIZE, 0);
        self.state = ReadState::default();
        trace!(
            "received frame of {} bytes (total {} / {})",
            expected_len,
            self.frames_received,
            self.bytes_received
        );
        frame
    }

    /// Try to receive one complete frame from the reader.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` - a complete frame was assembled
    /// - `Ok(None)` - need more data (`WouldBlock`), or clean EOF at a
    ///   record boundary
    /// - `Err(e)` - I/O or protocol error
    ///
    /// Designed for non-blocking I/O: call repeatedly when the stream
    /// becomes readable until it returns `Ok(None)`.
    pub fn receive(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            match self.state {
                ReadState::AwaitingLength { bytes_read } => {
                    match self.reader.read(&mut self.buffer[bytes_read..WIRE_PREFIX_SIZE]) {
                        Ok(0) => {
                            if bytes_read == 0 {
                                // Clean close at a record boundary.
                                return Ok(None);
                            }
                            return Err(Error::UnexpectedEof {
                                buffered: bytes_read,
                                needed: WIRE_PREFIX_SIZE - bytes_read,
                            });
                        }
                        Ok(n) => {
                            let total = bytes_read + n;
                            if total < WIRE_PREFIX_SIZE {
                                self.state = ReadState::AwaitingLength { bytes_read: total };
                                continue;
                            }
                            let len = u32::from_be_bytes([
                                self.buffer[0],
                                self.buffer[1],
                                self.buffer[2],
                                self.buffer[3],
                            ]) as usize;
                            if self.accept_length(len)? {
                                return Ok(Some(Vec::new()));
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                            self.state = ReadState::AwaitingLength { bytes_read };
                            return Ok(None);
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(Error::Io(e)),
                    }
                }

                ReadState::AwaitingFrame {
                    expected_len,
                    bytes_read,
                } => {
                    match self.reader.read(&mut self.buffer[bytes_read..expected_len]) {
                        Ok(0) => {
                            return Err(Error::UnexpectedEof {
                                buffered: bytes_read,
                                needed: expected_len - bytes_read,
                            });
                        }
                        Ok(n) => {
                            let total = bytes_read + n;
                            if total < expected_len {
                                self.state = ReadState::AwaitingFrame {
                                    expected_len,
                                    bytes_read: total,
                                };
                                continue;
                            }
                            return Ok(Some(self.complete_frame(expected_len)));
                        }
                        Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                            self.state = ReadState::AwaitingFrame {
                                expected_len,
                                bytes_read,
                            };
                            return Ok(None);
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(Error::Io(e)),
                    }
                }
            }
        }
    }

    /// Receive one frame and decode it through a registry.
    pub fn receive_message<M>(&mut self, registry: &MessageRegistry<M>) -> Result<Option<M>> {
        match self.receive()? {
            Some(frame) => registry.decode_frame(&frame).map(Some),
            None => Ok(None),
        }
    }

    /// Receive one frame and decode it as a known message type.
    pub fn receive_typed<M: Message>(&mut self) -> Result<Option<M>> {
        match self.receive()? {
            Some(frame) => M::from_frame(&frame).map(Some),
            None => Ok(None),
        }
    }

    /// Push bytes into the accumulator (feed/poll mode).
    ///
    /// After feeding, call [`Receiver::poll_frame`] repeatedly to drain
    /// every complete frame.
    pub fn feed(&mut self, data: &[u8]) {
        // Compact once more than half the accumulator is consumed.
        if self.accumulator_pos > 0 && self.accumulator_pos > self.accumulator.len() / 2 {
            self.accumulator.drain(..self.accumulator_pos);
            self.accumulator_pos = 0;
        }
        self.accumulator.extend_from_slice(data);
    }

    /// Bytes fed but not yet consumed by [`Receiver::poll_frame`].
    pub fn buffered(&self) -> usize {
        self.accumulator.len() - self.accumulator_pos
    }

    /// Try to assemble one complete frame from the accumulator.
    ///
    /// Returns `Ok(None)` when more data is needed. An oversized length
    /// prefix discards the whole accumulator: the stream position is
    /// unrecoverable once a record cannot be skipped.
    pub fn poll_frame(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let available = self.accumulator.len() - self.accumulator_pos;

            match self.state {
                ReadState::AwaitingLength { bytes_read } => {
                    let needed = WIRE_PREFIX_SIZE - bytes_read;
                    if available < needed {
                        return Ok(None);
                    }
                    let start = self.accumulator_pos;
                    self.buffer[bytes_read..WIRE_PREFIX_SIZE]
                        .copy_from_slice(&self.accumulator[start..start + needed]);
                    self.accumulator_pos += needed;

                    let len = u32::from_be_bytes([
                        self.buffer[0],
                        self.buffer[1],
                        self.buffer[2],
                        self.buffer[3],
                    ]) as usize;
                    match self.accept_length(len) {
                        Ok(true) => return Ok(Some(Vec::new())),
                        Ok(false) => {}
                        Err(e) => {
                            self.accumulator.clear();
                            self.accumulator_pos = 0;
                            return Err(e);
                        }
                    }
                }

                ReadState::AwaitingFrame {
                    expected_len,
                    bytes_read,
                } => {
                    let needed = expected_len - bytes_read;
                    let take = needed.min(available);
                    if take == 0 {
                        return Ok(None);
                    }
                    let start = self.accumulator_pos;
                    self.buffer[bytes_read..bytes_read + take]
                        .copy_from_slice(&self.accumulator[start..start + take]);
                    self.accumulator_pos += take;
                    if take < needed {
                        self.state = ReadState::AwaitingFrame {
                            expected_len,
                            bytes_read: bytes_read + take,
                        };
                        return Ok(None);
                    }
                    return Ok(Some(self.complete_frame(expected_len)));
                }
            }
        }
    }

    /// Poll one frame and decode it through a registry.
    pub fn poll_message<M>(&mut self, registry: &MessageRegistry<M>) -> Result<Option<M>> {
        match self.poll_frame()? {
            Some(frame) => registry.decode_frame(&frame).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::message::build_frame;
    use crate::proto::sender::Sender;
    use std::io::Cursor;

    fn wire(frames: &[&[u8]]) -> Vec<u8> {
        let mut sender = Sender::new(Vec::new());
        sender.send_batch(frames).unwrap();
        sender.into_inner()
    }

    #[test]
    fn test_receive_single_frame() {
        let frame = build_frame(1, b"hello");
        let mut rx = Receiver::new(Cursor::new(wire(&[&frame])));
        assert_eq!(rx.receive().unwrap(), Some(frame));
        assert_eq!(rx.frames_received(), 1);
        assert_eq!(rx.bytes_received(), 13);
    }

    #[test]
    fn test_receive_multiple_then_clean_eof() {
        let first = build_frame(1, b"a");
        let second = build_frame(2, b"bb");
        let mut rx = Receiver::new(Cursor::new(wire(&[&first, &second])));
        assert_eq!(rx.receive().unwrap(), Some(first));
        assert_eq!(rx.receive().unwrap(), Some(second));
        // Exhausted at a record boundary: clean close, not an error.
        assert_eq!(rx.receive().unwrap(), None);
        assert!(!rx.is_partial());
    }

    #[test]
    fn test_eof_inside_prefix() {
        let frame = build_frame(1, b"hello");
        let stream = wire(&[&frame]);
        let mut rx = Receiver::new(Cursor::new(stream[..2].to_vec()));
        match rx.receive().unwrap_err() {
            Error::UnexpectedEof { buffered, needed } => {
                assert_eq!(buffered, 2);
                assert_eq!(needed, 2);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_eof_inside_frame() {
        let frame = build_frame(1, b"hello");
        let stream = wire(&[&frame]);
        let mut rx = Receiver::new(Cursor::new(stream[..8].to_vec()));
        assert!(matches!(
            rx.receive(),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_oversized_prefix_rejected_without_allocation() {
        let mut stream = u32::MAX.to_be_bytes().to_vec();
        stream.push(0);
        let mut rx = Receiver::with_max_frame_size(Cursor::new(stream), 1024);
        match rx.receive().unwrap_err() {
            Error::FrameTooLarge { len, max } => {
                assert_eq!(len, u32::MAX as usize);
                assert_eq!(max, 1024);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(rx.frames_rejected(), 1);
    }

    #[test]
    fn test_zero_length_frame_is_legal() {
        let stream = 0u32.to_be_bytes().to_vec();
        let mut rx = Receiver::new(Cursor::new(stream));
        assert_eq!(rx.receive().unwrap(), Some(Vec::new()));
        assert_eq!(rx.frames_received(), 1);
    }

    #[test]
    fn test_feed_poll_whole_stream() {
        let first = build_frame(1, b"one");
        let second = build_frame(2, b"two!");
        let stream = wire(&[&first, &second]);
        let mut rx = Receiver::new(std::io::empty());
        rx.feed(&stream);
        assert_eq!(rx.poll_frame().unwrap(), Some(first));
        assert_eq!(rx.poll_frame().unwrap(), Some(second));
        assert_eq!(rx.poll_frame().unwrap(), None);
        assert_eq!(rx.buffered(), 0);
    }

    #[test]
    fn test_feed_every_split_point_yields_one_frame() {
        let frame = build_frame(7, b"fragmentation");
        let stream = wire(&[&frame]);
        for split in 0..=stream.len() {
            let mut rx = Receiver::new(std::io::empty());
            rx.feed(&stream[..split]);
            let early = rx.poll_frame().unwrap();
            if split < stream.len() {
                assert_eq!(early, None, "premature frame at split {}", split);
                rx.feed(&stream[split..]);
                assert_eq!(rx.poll_frame().unwrap(), Some(frame.clone()));
            } else {
                assert_eq!(early, Some(frame.clone()));
            }
            assert_eq!(rx.poll_frame().unwrap(), None);
            assert_eq!(rx.frames_received(), 1, "split {}", split);
        }
    }

    #[test]
    fn test_feed_byte_at_a_time() {
        let frame = build_frame(3, b"drip");
        let stream = wire(&[&frame]);
        let mut rx = Receiver::new(std::io::empty());
        let mut out = Vec::new();
        for byte in &stream {
            rx.feed(&[*byte]);
            while let Some(f) = rx.poll_frame().unwrap() {
                out.push(f);
            }
        }
        assert_eq!(out, vec![frame]);
    }

    #[test]
    fn test_feed_random_splits() {
        let frames: Vec<Vec<u8>> = (0..20)
            .map(|i| {
                let payload: Vec<u8> = (0..fastrand::usize(..200)).map(|_| fastrand::u8(..)).collect();
                build_frame(i, &payload)
            })
            .collect();
        let refs: Vec<&[u8]> = frames.iter().map(|f| f.as_slice()).collect();
        let stream = wire(&refs);

        let mut rx = Receiver::new(std::io::empty());
        let mut out = Vec::new();
        let mut pos = 0;
        while pos < stream.len() {
            let chunk = fastrand::usize(1..=64).min(stream.len() - pos);
            rx.feed(&stream[pos..pos + chunk]);
            pos += chunk;
            while let Some(f) = rx.poll_frame().unwrap() {
                out.push(f);
            }
        }
        assert_eq!(out, frames);
        assert_eq!(rx.frames_received(), 20);
    }

    #[test]
    fn test_oversized_discards_accumulator() {
        let mut rx = Receiver::with_max_frame_size(std::io::empty(), 16);
        let mut stream = 1_000u32.to_be_bytes().to_vec();
        stream.extend_from_slice(&[0u8; 32]);
        rx.feed(&stream);
        assert!(matches!(
            rx.poll_frame(),
            Err(Error::FrameTooLarge { .. })
        ));
        assert_eq!(rx.buffered(), 0);
        assert_eq!(rx.frames_rejected(), 1);
    }

    #[test]
    fn test_reset_clears_partial_state() {
        let mut rx = Receiver::new(std::io::empty());
        rx.feed(&[0, 0]);
        let _ = rx.poll_frame();
        rx.reset();
        assert!(!rx.is_partial());
        assert_eq!(rx.bytes_needed(), WIRE_PREFIX_SIZE);
        assert_eq!(rx.buffered(), 0);
    }

    /// Reader that yields WouldBlock after a scripted prefix.
    struct Throttled {
        data: Vec<u8>,
        pos: usize,
        ready: usize,
    }

    impl Read for Throttled {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.ready {
                return Err(io::Error::new(io::ErrorKind::WouldBlock, "not ready"));
            }
            let n = buf.len().min(self.ready - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_would_block_returns_none_and_resumes() {
        let frame = build_frame(4, b"resume");
        let stream = wire(&[&frame]);
        let mut rx = Receiver::new(Throttled {
            data: stream.clone(),
            pos: 0,
            ready: 6,
        });
        assert_eq!(rx.receive().unwrap(), None);
        assert!(rx.is_partial());

        // Stream becomes readable again.
        rx.reader.ready = stream.len();
        assert_eq!(rx.receive().unwrap(), Some(frame));
    }

    /// Reader that injects one Interrupted before each successful read.
    struct Flaky {
        inner: Cursor<Vec<u8>>,
        interrupt_next: bool,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            self.interrupt_next = true;
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_interrupted_is_retried() {
        let frame = build_frame(9, b"EINTR");
        let mut rx = Receiver::new(Flaky {
            inner: Cursor::new(wire(&[&frame])),
            interrupt_next: true,
        });
        assert_eq!(rx.receive().unwrap(), Some(frame));
    }
}
