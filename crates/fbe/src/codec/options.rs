// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec implementations for optional values.
//!
//! Wire shape: `[u8 presence][value if present]`. Absence has exactly one
//! representation, the zero presence byte; there is no in-band sentinel.
//!
//! In the Final layout an absent value still reserves `1 + STATIC_SIZE(T)`
//! bytes (zero-filled), regardless of the field's position in the struct,
//! so the offsets of the fields after it stay deterministic. In the
//! Standard layout the whole slot is `1 + FIXED_SIZE(T)` wide for the same
//! reason.

use super::traits::{FinalDecode, FinalEncode, StandardDecode, StandardEncode};
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::error::Result;

impl<T: FinalEncode> FinalEncode for Option<T> {
    const STATIC_SIZE: usize = 1 + T::STATIC_SIZE;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        match self {
            Some(value) => {
                buf.write_u8(offset, 1);
                Ok(1 + value.encode_final(buf, offset + 1)?)
            }
            None => {
                buf.write_u8(offset, 0);
                buf.fill_zero(offset + 1, T::STATIC_SIZE);
                Ok(1 + T::STATIC_SIZE)
            }
        }
    }
}

impl<T: FinalDecode> FinalDecode for Option<T> {
    const STATIC_SIZE: usize = 1 + T::STATIC_SIZE;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        if buf.read_u8(offset)? == 0 {
            buf.check_range(offset + 1, T::STATIC_SIZE)?;
            return Ok((None, 1 + T::STATIC_SIZE));
        }
        let (value, consumed) = T::decode_final(buf, offset + 1)?;
        Ok((Some(value), 1 + consumed))
    }
}

impl<T: StandardEncode> StandardEncode for Option<T> {
    const FIXED_SIZE: usize = 1 + T::FIXED_SIZE;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        match self {
            Some(value) => {
                buf.write_u8(offset, 1);
                value.encode_standard(buf, offset + 1)
            }
            None => {
                buf.write_u8(offset, 0);
                buf.fill_zero(offset + 1, T::FIXED_SIZE);
                Ok(0)
            }
        }
    }
}

impl<T: StandardDecode> StandardDecode for Option<T> {
    const FIXED_SIZE: usize = 1 + T::FIXED_SIZE;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        if buf.read_u8(offset)? == 0 {
            buf.check_range(offset + 1, T::FIXED_SIZE)?;
            return Ok((None, 0));
        }
        let (value, extra) = T::decode_standard(buf, offset + 1)?;
        Ok((Some(value), extra))
    }
}
