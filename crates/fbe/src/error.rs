// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for buffer access, codec, and protocol operations.
//!
//! Five error classes cover the whole crate:
//!
//! - Bounds: `OutOfBounds` -- an offset/length pair falls outside the valid
//!   region of a buffer. This is the security boundary of the codec; no read
//!   ever touches memory past the valid size.
//! - Type contract: `TypeContract` -- a value violates a constructor
//!   invariant (e.g. a `Decimal` scale above 28).
//! - Format: `Format` -- malformed input: short frames, bad headers, invalid
//!   UTF-8, out-of-range enum discriminants. Never recovered best-effort.
//! - Registry: `DuplicateType` / `UnknownType` -- type-id dispatch failures.
//! - Stream: `ShortWrite` / `UnexpectedEof` / `FrameTooLarge` / `Io` --
//!   fatal transport conditions; a connection hitting one of these is done.
//!
//! Errors carry structured context (offsets, sizes, type ids) so callers can
//! log or convert them without re-parsing message strings. The crate never
//! retries internally; every error propagates to the immediate caller.

use std::fmt;
use std::io;

/// Crate-wide error type.
#[derive(Debug)]
pub enum Error {
    /// Read or write outside the buffer's valid region.
    OutOfBounds {
        /// Relative offset of the attempted access.
        offset: usize,
        /// Length of the attempted access.
        len: usize,
        /// Valid size of the buffer at the time of access.
        size: usize,
    },
    /// A value violates a type-level invariant at construction.
    TypeContract { reason: String },
    /// Malformed wire data: bad header, length mismatch, invalid encoding.
    Format { reason: String },
    /// A type id is already bound in the message registry.
    DuplicateType { type_id: u32 },
    /// No decoder registered for a type id.
    UnknownType { type_id: u32 },
    /// The sink accepted fewer bytes than requested in a single write.
    ShortWrite { written: usize, expected: usize },
    /// The stream ended while a partial frame was buffered.
    UnexpectedEof { buffered: usize, needed: usize },
    /// A frame declared a length above the configured maximum.
    FrameTooLarge { len: usize, max: usize },
    /// Underlying I/O failure.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfBounds { offset, len, size } => write!(
                f,
                "out of bounds: {} bytes at offset {} exceed valid size {}",
                len, offset, size
            ),
            Error::TypeContract { reason } => write!(f, "type contract violation: {}", reason),
            Error::Format { reason } => write!(f, "malformed data: {}", reason),
            Error::DuplicateType { type_id } => {
                write!(f, "type id {} is already registered", type_id)
            }
            Error::UnknownType { type_id } => {
                write!(f, "no decoder registered for type id {}", type_id)
            }
            Error::ShortWrite { written, expected } => {
                write!(f, "short write: {} of {} bytes accepted", written, expected)
            }
            Error::UnexpectedEof { buffered, needed } => write!(
                f,
                "unexpected end of stream: {} bytes buffered, {} more needed",
                buffered, needed
            ),
            Error::FrameTooLarge { len, max } => {
                write!(f, "frame too large: {} bytes (max {})", len, max)
            }
            Error::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
