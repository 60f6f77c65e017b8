// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec implementations for fixed-width scalar types.
//!
//! Fixed-size values are inline in both layouts; their Standard-layout slot
//! holds the value itself (no pointer), so `encode_standard` never appends
//! arena data.

use super::traits::{FinalDecode, FinalEncode, StandardDecode, StandardEncode};
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::error::{Error, Result};
use crate::types::{Decimal, Timestamp};
use uuid::Uuid;

/// Generate both-layout codec impls for a fixed-width scalar.
macro_rules! impl_fixed_scalar {
    ($type:ty, $size:expr, $write:ident, $read:ident) => {
        impl FinalEncode for $type {
            const STATIC_SIZE: usize = $size;

            fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
                buf.$write(offset, *self);
                Ok($size)
            }
        }

        impl FinalDecode for $type {
            const STATIC_SIZE: usize = $size;

            fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
                Ok((buf.$read(offset)?, $size))
            }
        }

        impl StandardEncode for $type {
            const FIXED_SIZE: usize = $size;

            fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
                buf.$write(offset, *self);
                Ok(0)
            }
        }

        impl StandardDecode for $type {
            const FIXED_SIZE: usize = $size;

            fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
                Ok((buf.$read(offset)?, 0))
            }
        }
    };
}

impl_fixed_scalar!(bool, 1, write_bool, read_bool);
impl_fixed_scalar!(u8, 1, write_u8, read_u8);
impl_fixed_scalar!(i8, 1, write_i8, read_i8);
impl_fixed_scalar!(u16, 2, write_u16, read_u16);
impl_fixed_scalar!(i16, 2, write_i16, read_i16);
impl_fixed_scalar!(u32, 4, write_u32, read_u32);
impl_fixed_scalar!(i32, 4, write_i32, read_i32);
impl_fixed_scalar!(u64, 8, write_u64, read_u64);
impl_fixed_scalar!(i64, 8, write_i64, read_i64);
impl_fixed_scalar!(f32, 4, write_f32, read_f32);
impl_fixed_scalar!(f64, 8, write_f64, read_f64);

// ============================================================================
// Wide character (u32 LE code point, validated on decode)
// ============================================================================

impl FinalEncode for char {
    const STATIC_SIZE: usize = 4;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_u32(offset, *self as u32);
        Ok(4)
    }
}

impl FinalDecode for char {
    const STATIC_SIZE: usize = 4;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let raw = buf.read_u32(offset)?;
        let value = char::from_u32(raw).ok_or_else(|| Error::Format {
            reason: format!("invalid character code point {:#x}", raw),
        })?;
        Ok((value, 4))
    }
}

impl StandardEncode for char {
    const FIXED_SIZE: usize = 4;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_u32(offset, *self as u32);
        Ok(0)
    }
}

impl StandardDecode for char {
    const FIXED_SIZE: usize = 4;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let (value, _) = <char as FinalDecode>::decode_final(buf, offset)?;
        Ok((value, 0))
    }
}

// ============================================================================
// UUID / Decimal / Timestamp (16-, 16-, 8-byte fixed values)
// ============================================================================

impl FinalEncode for Uuid {
    const STATIC_SIZE: usize = 16;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_uuid(offset, self);
        Ok(16)
    }
}

impl FinalDecode for Uuid {
    const STATIC_SIZE: usize = 16;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        Ok((buf.read_uuid(offset)?, 16))
    }
}

impl StandardEncode for Uuid {
    const FIXED_SIZE: usize = 16;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_uuid(offset, self);
        Ok(0)
    }
}

impl StandardDecode for Uuid {
    const FIXED_SIZE: usize = 16;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        Ok((buf.read_uuid(offset)?, 0))
    }
}

impl FinalEncode for Decimal {
    const STATIC_SIZE: usize = 16;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_decimal(offset, self);
        Ok(16)
    }
}

impl FinalDecode for Decimal {
    const STATIC_SIZE: usize = 16;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        Ok((buf.read_decimal(offset)?, 16))
    }
}

impl StandardEncode for Decimal {
    const FIXED_SIZE: usize = 16;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_decimal(offset, self);
        Ok(0)
    }
}

impl StandardDecode for Decimal {
    const FIXED_SIZE: usize = 16;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        Ok((buf.read_decimal(offset)?, 0))
    }
}

impl FinalEncode for Timestamp {
    const STATIC_SIZE: usize = 8;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_u64(offset, self.as_nanos());
        Ok(8)
    }
}

impl FinalDecode for Timestamp {
    const STATIC_SIZE: usize = 8;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        Ok((Timestamp::from_unix_nanos(buf.read_u64(offset)?), 8))
    }
}

impl StandardEncode for Timestamp {
    const FIXED_SIZE: usize = 8;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_u64(offset, self.as_nanos());
        Ok(0)
    }
}

impl StandardDecode for Timestamp {
    const FIXED_SIZE: usize = 8;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        Ok((Timestamp::from_unix_nanos(buf.read_u64(offset)?), 0))
    }
}
