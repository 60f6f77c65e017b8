// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Final-layout struct serialization.
//!
//! No headers, no pointers: fields are laid out back to back from the
//! start of the buffer, variable-size data inline. Roughly 2x smaller and
//! faster than the Standard layout, at the cost of schema evolution; both
//! sides must agree on the exact field list.

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{FinalDecode, FinalEncode};
use crate::error::Result;

/// Encode a struct at the start of `buf`. Returns the serialized size.
pub fn encode<T: FinalEncode>(value: &T, buf: &mut WriteBuffer) -> Result<usize> {
    value.encode_final(buf, 0)
}

/// Decode a struct from the start of `buf`.
///
/// Returns the value and the bytes consumed.
pub fn decode<T: FinalDecode>(buf: &ReadBuffer) -> Result<(T, usize)> {
    T::decode_final(buf, 0)
}

/// Structural check: every field decodable from the start of `buf`.
pub fn verify<T: FinalDecode>(buf: &ReadBuffer) -> bool {
    decode::<T>(buf).is_ok()
}
