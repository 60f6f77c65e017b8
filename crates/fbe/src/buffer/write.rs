// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Growable write buffer with high-water-mark size tracking.

use crate::buffer::ReadBuffer;
use crate::types::Decimal;
use uuid::Uuid;

/// Generate write methods for little-endian primitive types.
///
/// Each generated method grows the buffer as needed, stores the
/// little-endian bytes, and advances the valid size to the high-water mark.
macro_rules! impl_write_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self, offset: usize, value: $type) {
            let abs = self.offset + offset;
            self.ensure(abs + $size);
            self.data[abs..abs + $size].copy_from_slice(&value.to_le_bytes());
        }
    };
}

/// Write buffer owned by a single encoder.
///
/// Writes never fail: any store past the current valid size grows the
/// backing storage (amortized doubling) and advances `size` to cover the
/// write. [`WriteBuffer::allocate`] reserves zeroed bytes at the end of
/// valid data, which is how every pointer-based field claims its
/// out-of-line target; allocation is append-only, so targets written in
/// field order never overlap.
///
/// Re-encoding independent messages into one buffer requires
/// [`WriteBuffer::clear`] in between; the arena is never reused or freed
/// within a message.
#[derive(Debug, Default)]
pub struct WriteBuffer {
    data: Vec<u8>,
    offset: usize,
    size: usize,
}

impl WriteBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
            offset: 0,
            size: 0,
        }
    }

    /// Base offset added to every relative write.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// High-water mark of all writes so far.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Valid bytes as a slice, from absolute position 0.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.size]
    }

    /// Reset to an empty buffer, keeping the allocation.
    pub fn clear(&mut self) {
        self.offset = 0;
        self.size = 0;
        // Stale bytes must not leak into the next message's zero-fill.
        self.data.fill(0);
    }

    /// Consume the buffer, returning exactly the valid bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.size);
        self.data
    }

    /// Grow storage to cover `end` and advance the high-water mark.
    fn ensure(&mut self, end: usize) {
        if end > self.data.len() {
            let grown = self.data.len().max(16).saturating_mul(2).max(end);
            self.data.resize(grown, 0);
        }
        if end > self.size {
            self.size = end;
        }
    }

    /// Reserve `len` zeroed bytes at the end of valid data.
    ///
    /// Returns the absolute offset of the reservation. This is the
    /// append-only arena behind every pointer-based field.
    pub fn allocate(&mut self, len: usize) -> usize {
        let start = self.size;
        self.ensure(start + len);
        start
    }

    impl_write_le!(write_u8, u8, 1);
    impl_write_le!(write_u16, u16, 2);
    impl_write_le!(write_u32, u32, 4);
    impl_write_le!(write_u64, u64, 8);
    impl_write_le!(write_i8, i8, 1);
    impl_write_le!(write_i16, i16, 2);
    impl_write_le!(write_i32, i32, 4);
    impl_write_le!(write_i64, i64, 8);

    pub fn write_bool(&mut self, offset: usize, value: bool) {
        self.write_u8(offset, u8::from(value));
    }

    pub fn write_f32(&mut self, offset: usize, value: f32) {
        self.write_u32(offset, value.to_bits());
    }

    pub fn write_f64(&mut self, offset: usize, value: f64) {
        self.write_u64(offset, value.to_bits());
    }

    pub fn write_bytes(&mut self, offset: usize, data: &[u8]) {
        let abs = self.offset + offset;
        self.ensure(abs + data.len());
        self.data[abs..abs + data.len()].copy_from_slice(data);
    }

    /// Zero `len` bytes at relative `offset`, extending the valid size.
    pub fn fill_zero(&mut self, offset: usize, len: usize) {
        let abs = self.offset + offset;
        self.ensure(abs + len);
        self.data[abs..abs + len].fill(0);
    }

    /// 16 raw bytes, network byte order (matches canonical hex order).
    pub fn write_uuid(&mut self, offset: usize, value: &Uuid) {
        self.write_bytes(offset, value.as_bytes());
    }

    /// 16-byte decimal: 96-bit LE magnitude, scale byte, sign byte.
    pub fn write_decimal(&mut self, offset: usize, value: &Decimal) {
        self.write_bytes(offset, &value.to_bytes());
    }

    /// Inline bytes: `[u32 len LE][payload]` at relative `offset`.
    ///
    /// Returns the bytes consumed (`4 + len`).
    pub fn write_bytes_inline(&mut self, offset: usize, data: &[u8]) -> usize {
        self.write_u32(offset, data.len() as u32);
        self.write_bytes(offset + 4, data);
        4 + data.len()
    }

    /// Inline string, see [`WriteBuffer::write_bytes_inline`].
    pub fn write_string_inline(&mut self, offset: usize, value: &str) -> usize {
        self.write_bytes_inline(offset, value.as_bytes())
    }

    /// Pointer bytes: allocates `[u32 len LE][payload]` at the arena tail
    /// and stores the absolute target offset at relative `offset`.
    ///
    /// Returns the absolute pointer written.
    pub fn write_bytes_ptr(&mut self, offset: usize, data: &[u8]) -> usize {
        let target = self.allocate(4 + data.len());
        self.data[target..target + 4].copy_from_slice(&(data.len() as u32).to_le_bytes());
        self.data[target + 4..target + 4 + data.len()].copy_from_slice(data);
        self.write_u32(offset, target as u32);
        target
    }

    /// Pointer string, see [`WriteBuffer::write_bytes_ptr`].
    pub fn write_string_ptr(&mut self, offset: usize, value: &str) -> usize {
        self.write_bytes_ptr(offset, value.as_bytes())
    }

    /// Write a u32 at an absolute position (pointer-target headers).
    pub(crate) fn write_u32_abs(&mut self, abs: usize, value: u32) {
        self.ensure(abs + 4);
        self.data[abs..abs + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Freeze into a [`ReadBuffer`] over exactly the valid bytes.
    pub fn freeze(self) -> ReadBuffer {
        ReadBuffer::new(self.into_vec())
    }
}

impl From<WriteBuffer> for ReadBuffer {
    fn from(buf: WriteBuffer) -> Self {
        buf.freeze()
    }
}
