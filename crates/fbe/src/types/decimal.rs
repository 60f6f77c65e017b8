// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! 96-bit decimal with explicit scale and sign.
//!
//! Wire layout (16 bytes):
//!
//! ```text
//! +---------------------+----------+--------+--------+
//! | magnitude (3x u32 LE) | reserved | scale  | sign   |
//! | bytes 0-11            | 12-13    | 14     | 15     |
//! +---------------------+----------+--------+--------+
//! ```
//!
//! The magnitude is an unsigned 96-bit integer; the sign lives in byte 15
//! (`0x80` negative, `0x00` positive) and the scale byte holds the number
//! of fractional digits, 0 through 28.

use crate::error::{Error, Result};
use std::fmt;

/// Largest representable magnitude (2^96 - 1).
const MAX_MAGNITUDE: u128 = (1u128 << 96) - 1;

/// Largest valid scale (fractional digit count).
pub const MAX_SCALE: u8 = 28;

/// Sign bit in the final byte of the wire form.
const SIGN_NEGATIVE: u8 = 0x80;

/// Decimal value: unsigned 96-bit magnitude, scale, sign.
///
/// The logical value is `(-1)^sign * magnitude * 10^(-scale)`. Negative
/// zero normalizes to positive at construction so equal values compare
/// equal and encode byte-identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    magnitude: u128,
    scale: u8,
    negative: bool,
}

impl Decimal {
    /// Build a decimal from magnitude, scale, and sign.
    ///
    /// Fails with [`Error::TypeContract`] when the magnitude exceeds 96
    /// bits or the scale exceeds 28.
    pub fn new(magnitude: u128, scale: u8, negative: bool) -> Result<Self> {
        if magnitude > MAX_MAGNITUDE {
            return Err(Error::TypeContract {
                reason: format!("decimal magnitude {} exceeds 96 bits", magnitude),
            });
        }
        if scale > MAX_SCALE {
            return Err(Error::TypeContract {
                reason: format!("decimal scale {} exceeds maximum {}", scale, MAX_SCALE),
            });
        }
        Ok(Self {
            magnitude,
            scale,
            negative: negative && magnitude != 0,
        })
    }

    /// Zero with scale 0.
    pub fn zero() -> Self {
        Self {
            magnitude: 0,
            scale: 0,
            negative: false,
        }
    }

    pub fn magnitude(&self) -> u128 {
        self.magnitude
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Encode to the 16-byte wire layout.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&((self.magnitude & 0xFFFF_FFFF) as u32).to_le_bytes());
        bytes[4..8].copy_from_slice(&(((self.magnitude >> 32) & 0xFFFF_FFFF) as u32).to_le_bytes());
        bytes[8..12]
            .copy_from_slice(&(((self.magnitude >> 64) & 0xFFFF_FFFF) as u32).to_le_bytes());
        bytes[14] = self.scale;
        bytes[15] = if self.negative { SIGN_NEGATIVE } else { 0x00 };
        bytes
    }

    /// Decode from the 16-byte wire layout.
    ///
    /// A scale byte above 28 is malformed input ([`Error::Format`]).
    pub fn from_bytes(bytes: [u8; 16]) -> Result<Self> {
        let lo = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as u128;
        let mid = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as u128;
        let hi = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as u128;
        let scale = bytes[14];
        if scale > MAX_SCALE {
            return Err(Error::Format {
                reason: format!("decimal scale byte {} exceeds maximum {}", scale, MAX_SCALE),
            });
        }
        let magnitude = lo | (mid << 32) | (hi << 64);
        let negative = bytes[15] & SIGN_NEGATIVE != 0;
        Ok(Self {
            magnitude,
            scale,
            negative: negative && magnitude != 0,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        let digits = self.magnitude.to_string();
        if self.scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }
        let scale = self.scale as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{}{}.{}", sign, int_part, frac_part)
        } else {
            write!(f, "{}0.{:0>width$}", sign, digits, width = scale)
        }
    }
}
