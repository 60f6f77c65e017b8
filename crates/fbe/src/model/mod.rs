// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct-level serialization entry points.
//!
//! The codec traits encode one field at a time; this module wraps them into
//! whole-struct operations:
//!
//! - [`standard`]: versioned layout with a leading size header and an
//!   optional type header, pointer fields resolved through the arena.
//! - [`final_layout`]: compact headerless layout, fields back to back.
//!
//! A buffer is single-shot: call [`crate::buffer::WriteBuffer::clear`]
//! before reusing it for another struct, otherwise stale arena bytes from
//! the previous encode leak into the next one.
//!
//! ```text
//! Standard:        [u32 size][fixed slots ...][arena ...]
//! Standard typed:  [u32 size][u32 type][fixed slots ...][arena ...]
//! Final:           [field][field][field ...]
//! ```

pub mod final_layout;
pub mod standard;

/// A top-level schema struct with a protocol-unique type identifier.
///
/// The identifier is carried in typed Standard headers and in message
/// frames; it is how a receiver picks the decoder for an incoming payload.
pub trait Record {
    const TYPE_ID: u32;
}
