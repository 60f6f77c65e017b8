// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message framing protocol.
//!
//! Byte streams have no message boundaries. This module layers two
//! headers on top of the serialized payload:
//!
//! ```text
//! wire:   +----------------+----------------------------------+
//!         | Length (4B BE) | Frame                            |
//!         +----------------+----------------------------------+
//! frame:  +---------------+---------------+-------------------+
//!         | Type (4B LE)  | Size (4B LE)  | Payload           |
//!         +---------------+---------------+-------------------+
//! ```
//!
//! The outer length prefix is big-endian (network byte order) and counts
//! the frame only, not itself. The frame's size field counts the payload
//! only, its 8-byte header excluded; the type field selects the decoder
//! on the receiving side.
//!
//! [`Sender`] writes framed messages to any [`std::io::Write`];
//! [`Receiver`] reassembles frames from any [`std::io::Read`], handling
//! partial reads, non-blocking sockets, and hostile length prefixes.
//! [`MessageRegistry`] maps type identifiers to decoders so one receiver
//! can carry a heterogeneous protocol.

pub mod message;
pub mod receiver;
pub mod registry;
pub mod sender;

pub use message::{build_frame, parse_frame, Message, FRAME_HEADER_SIZE};
pub use receiver::{Receiver, DEFAULT_MAX_FRAME_SIZE, WIRE_PREFIX_SIZE};
pub use registry::MessageRegistry;
pub use sender::Sender;
