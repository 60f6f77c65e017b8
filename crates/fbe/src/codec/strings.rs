// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec implementations for strings and raw byte blobs.
//!
//! Final layout: `[u32 len LE][payload]` inline. Standard layout: a 4-byte
//! pointer slot, payload at the arena target. Empty values still encode
//! their 4-byte length at the target; only a null pointer reads back as
//! empty without a target access.

use super::traits::{FinalDecode, FinalEncode, StandardDecode, StandardEncode};
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::error::Result;

/// Raw byte blob.
///
/// A newtype rather than a plain `Vec<u8>` so byte fields and generic
/// vectors of `u8` coexist as distinct codec types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl From<&[u8]> for Bytes {
    fn from(data: &[u8]) -> Self {
        Self(data.to_vec())
    }
}

impl FinalEncode for String {
    const STATIC_SIZE: usize = 0;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        Ok(buf.write_string_inline(offset, self))
    }
}

impl FinalDecode for String {
    const STATIC_SIZE: usize = 0;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        buf.read_string_inline(offset)
    }
}

impl StandardEncode for String {
    const FIXED_SIZE: usize = 4;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_string_ptr(offset, self);
        Ok(4 + self.len())
    }
}

impl StandardDecode for String {
    const FIXED_SIZE: usize = 4;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        buf.read_string_ptr(offset)
    }
}

impl FinalEncode for Bytes {
    const STATIC_SIZE: usize = 0;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        Ok(buf.write_bytes_inline(offset, &self.0))
    }
}

impl FinalDecode for Bytes {
    const STATIC_SIZE: usize = 0;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let (data, consumed) = buf.read_bytes_inline(offset)?;
        Ok((Self(data), consumed))
    }
}

impl StandardEncode for Bytes {
    const FIXED_SIZE: usize = 4;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_bytes_ptr(offset, &self.0);
        Ok(4 + self.0.len())
    }
}

impl StandardDecode for Bytes {
    const FIXED_SIZE: usize = 4;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let (data, extra) = buf.read_bytes_ptr(offset)?;
        Ok((Self(data), extra))
    }
}
