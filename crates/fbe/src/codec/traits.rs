// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encoding/decoding contracts for both wire layouts.
//!
//! Each trait is bound to one buffer direction, so reading through a write
//! buffer (or vice versa) is unrepresentable rather than a runtime error.
//! Byte counts are threaded through return values; implementations hold no
//! state between calls.

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::error::Result;

/// Inline (Final layout) encoding.
pub trait FinalEncode {
    /// Fixed inline width, or 0 when the encoded size depends on the value.
    ///
    /// An absent `Option<T>` reserves `1 + T::STATIC_SIZE` bytes so the
    /// following field's offset stays deterministic.
    const STATIC_SIZE: usize;

    /// Encode at `offset`; returns the bytes consumed.
    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize>;
}

/// Inline (Final layout) decoding.
pub trait FinalDecode: Sized {
    /// Mirror of [`FinalEncode::STATIC_SIZE`].
    const STATIC_SIZE: usize;

    /// Decode at `offset`; returns the value and the bytes consumed.
    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)>;
}

/// Pointer-indirected (Standard layout) encoding.
pub trait StandardEncode {
    /// Width of this field's slot in the struct's fixed region: the static
    /// width for fixed-size types, 4 (one pointer) for variable-size types.
    const FIXED_SIZE: usize;

    /// Encode into the slot at `offset`, appending any out-of-line data to
    /// the arena; returns the extra bytes appended.
    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize>;
}

/// Pointer-indirected (Standard layout) decoding.
pub trait StandardDecode: Sized {
    /// Mirror of [`StandardEncode::FIXED_SIZE`].
    const FIXED_SIZE: usize;

    /// Decode the slot at `offset`, following pointers as needed; returns
    /// the value and the out-of-line bytes occupied.
    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)>;
}
