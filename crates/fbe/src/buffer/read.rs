// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Immutable bounds-checked read buffer.

use crate::error::{Error, Result};
use crate::types::Decimal;
use uuid::Uuid;

/// Generate read methods for little-endian primitive types.
///
/// Each generated method:
/// 1. Checks `[offset, offset + width)` against the valid size
/// 2. Converts bytes to value via `from_le_bytes()`
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&self, offset: usize) -> Result<$type> {
            let abs = self.checked(offset, $size)?;
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(&self.data[abs..abs + $size]);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Read-only buffer over an owned byte region.
///
/// The valid size is fixed at construction; every accessor takes an offset
/// relative to the buffer's base and fails with [`Error::OutOfBounds`] when
/// the access would leave the valid region. Immutable, so instances may be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct ReadBuffer {
    data: Vec<u8>,
    offset: usize,
    size: usize,
}

impl ReadBuffer {
    /// Wrap an owned byte vector; the whole vector is the valid region.
    pub fn new(data: Vec<u8>) -> Self {
        let size = data.len();
        Self {
            data,
            offset: 0,
            size,
        }
    }

    /// Wrap a byte vector with a non-zero base offset.
    ///
    /// Relative accessors address bytes starting at `offset`; absolute
    /// pointers still resolve against position 0.
    pub fn with_offset(data: Vec<u8>, offset: usize) -> Result<Self> {
        let size = data.len();
        if offset > size {
            return Err(Error::OutOfBounds {
                offset,
                len: 0,
                size,
            });
        }
        Ok(Self { data, offset, size })
    }

    /// Base offset added to every relative access.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of valid bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Valid bytes as a slice, from absolute position 0.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.size]
    }

    /// Check a relative access and return its absolute start position.
    fn checked(&self, offset: usize, len: usize) -> Result<usize> {
        let abs = self.offset.checked_add(offset).ok_or(Error::OutOfBounds {
            offset,
            len,
            size: self.size,
        })?;
        self.checked_abs(abs, len).map_err(|_| Error::OutOfBounds {
            offset,
            len,
            size: self.size,
        })
    }

    /// Check an absolute access (used for pointer targets).
    fn checked_abs(&self, abs: usize, len: usize) -> Result<usize> {
        match abs.checked_add(len) {
            Some(end) if end <= self.size => Ok(abs),
            _ => Err(Error::OutOfBounds {
                offset: abs,
                len,
                size: self.size,
            }),
        }
    }

    /// Verify that `len` bytes at relative `offset` are readable.
    pub fn check_range(&self, offset: usize, len: usize) -> Result<()> {
        self.checked(offset, len).map(|_| ())
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_u16, u16, 2);
    impl_read_le!(read_u32, u32, 4);
    impl_read_le!(read_u64, u64, 8);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_i16, i16, 2);
    impl_read_le!(read_i32, i32, 4);
    impl_read_le!(read_i64, i64, 8);

    /// Any nonzero byte decodes as `true`.
    pub fn read_bool(&self, offset: usize) -> Result<bool> {
        Ok(self.read_u8(offset)? != 0)
    }

    pub fn read_f32(&self, offset: usize) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32(offset)?))
    }

    pub fn read_f64(&self, offset: usize) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64(offset)?))
    }

    /// Raw byte slice of `len` bytes at relative `offset`.
    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let abs = self.checked(offset, len)?;
        Ok(&self.data[abs..abs + len])
    }

    /// 16 raw bytes, network byte order (matches canonical hex order).
    pub fn read_uuid(&self, offset: usize) -> Result<Uuid> {
        let abs = self.checked(offset, 16)?;
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&self.data[abs..abs + 16]);
        Ok(Uuid::from_bytes(bytes))
    }

    /// 16-byte decimal: 96-bit LE magnitude, scale byte, sign byte.
    pub fn read_decimal(&self, offset: usize) -> Result<Decimal> {
        let abs = self.checked(offset, 16)?;
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&self.data[abs..abs + 16]);
        Decimal::from_bytes(bytes)
    }

    /// Inline bytes: `[u32 len LE][payload]` at relative `offset`.
    ///
    /// Returns the payload and the bytes consumed (`4 + len`).
    pub fn read_bytes_inline(&self, offset: usize) -> Result<(Vec<u8>, usize)> {
        let len = self.read_u32(offset)? as usize;
        let payload = self.read_bytes(offset + 4, len)?.to_vec();
        Ok((payload, 4 + len))
    }

    /// Inline string: `[u32 len LE][utf8]` at relative `offset`.
    pub fn read_string_inline(&self, offset: usize) -> Result<(String, usize)> {
        let (bytes, consumed) = self.read_bytes_inline(offset)?;
        let value = String::from_utf8(bytes).map_err(|e| Error::Format {
            reason: format!("invalid utf-8 in string at offset {}: {}", offset, e),
        })?;
        Ok((value, consumed))
    }

    /// Pointer bytes: `[u32 ptr LE]` at the field, `[u32 len LE][payload]`
    /// at the absolute pointer target. Pointer 0 decodes as empty.
    ///
    /// Returns the payload and the out-of-line bytes occupied (`4 + len`,
    /// or 0 for a null pointer).
    pub fn read_bytes_ptr(&self, offset: usize) -> Result<(Vec<u8>, usize)> {
        let ptr = self.read_u32(offset)? as usize;
        if ptr == 0 {
            return Ok((Vec::new(), 0));
        }
        let abs = self.checked_abs(ptr, 4)?;
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&self.data[abs..abs + 4]);
        let len = u32::from_le_bytes(len_bytes) as usize;
        let start = self.checked_abs(ptr + 4, len)?;
        Ok((self.data[start..start + len].to_vec(), 4 + len))
    }

    /// Pointer string, see [`ReadBuffer::read_bytes_ptr`].
    pub fn read_string_ptr(&self, offset: usize) -> Result<(String, usize)> {
        let (bytes, extra) = self.read_bytes_ptr(offset)?;
        let value = String::from_utf8(bytes).map_err(|e| Error::Format {
            reason: format!("invalid utf-8 in string at offset {}: {}", offset, e),
        })?;
        Ok((value, extra))
    }

    /// Read a u32 at an absolute position (pointer-target headers).
    pub(crate) fn read_u32_abs(&self, abs: usize) -> Result<u32> {
        let abs = self.checked_abs(abs, 4)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[abs..abs + 4]);
        Ok(u32::from_le_bytes(bytes))
    }

    /// Verify that `len` bytes at absolute `abs` are readable.
    pub(crate) fn check_abs(&self, abs: usize, len: usize) -> Result<()> {
        self.checked_abs(abs, len).map(|_| ())
    }
}

impl From<Vec<u8>> for ReadBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for ReadBuffer {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}
