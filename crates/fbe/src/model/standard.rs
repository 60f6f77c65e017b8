// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Standard-layout struct serialization.
//!
//! Wire shape:
//!
//! ```text
//! [u32 size LE][fixed field slots][arena allocations ...]
//! ```
//!
//! and with a type header (`encode_typed`/`decode_typed`):
//!
//! ```text
//! [u32 size LE][u32 type LE][fixed field slots][arena ...]
//! ```
//!
//! The size header covers the whole struct including itself and every
//! arena allocation, so a reader can validate or skip the struct without
//! walking its fields. Fields encode into the reserved fixed region; the
//! header is written last, once the total is known.
//!
//! Fixed slot widths are compile-time constants (`FIXED_SIZE`), so the
//! size of the fixed region never depends on runtime state.

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{StandardDecode, StandardEncode};
use crate::error::{Error, Result};
use crate::model::Record;

/// Size-header bytes in front of the fixed region.
pub const SIZE_HEADER: usize = 4;
/// Size plus type header bytes for typed structs.
pub const TYPED_HEADER: usize = 8;

/// Encode a struct at the start of `buf`. Returns the total serialized
/// size, which is also the value written into the size header.
pub fn encode<T: StandardEncode>(value: &T, buf: &mut WriteBuffer) -> Result<usize> {
    let fixed = SIZE_HEADER + T::FIXED_SIZE;
    buf.fill_zero(0, fixed);
    let extra = value.encode_standard(buf, SIZE_HEADER)?;
    let total = fixed + extra;
    buf.write_u32(0, total as u32);
    Ok(total)
}

/// Encode a struct with a `[size][type]` header carrying `T::TYPE_ID`.
pub fn encode_typed<T: StandardEncode + Record>(value: &T, buf: &mut WriteBuffer) -> Result<usize> {
    let fixed = TYPED_HEADER + T::FIXED_SIZE;
    buf.fill_zero(0, fixed);
    buf.write_u32(SIZE_HEADER, T::TYPE_ID);
    let extra = value.encode_standard(buf, TYPED_HEADER)?;
    let total = fixed + extra;
    buf.write_u32(0, total as u32);
    Ok(total)
}

/// Validate the size header against the buffer and the fixed region.
fn check_header<T: StandardDecode>(buf: &ReadBuffer, header: usize) -> Result<usize> {
    let declared = buf.read_u32(0)? as usize;
    if declared < header + T::FIXED_SIZE {
        return Err(Error::Format {
            reason: format!(
                "struct size header {} smaller than fixed region {}",
                declared,
                header + T::FIXED_SIZE
            ),
        });
    }
    buf.check_range(0, declared)?;
    Ok(declared)
}

/// Decode a struct from the start of `buf`.
///
/// Returns the value and the size declared by its header.
pub fn decode<T: StandardDecode>(buf: &ReadBuffer) -> Result<(T, usize)> {
    let declared = check_header::<T>(buf, SIZE_HEADER)?;
    let (value, _extra) = T::decode_standard(buf, SIZE_HEADER)?;
    Ok((value, declared))
}

/// Decode a typed struct, rejecting a mismatched type header.
pub fn decode_typed<T: StandardDecode + Record>(buf: &ReadBuffer) -> Result<(T, usize)> {
    let declared = check_header::<T>(buf, TYPED_HEADER)?;
    let type_id = buf.read_u32(SIZE_HEADER)?;
    if type_id != T::TYPE_ID {
        return Err(Error::Format {
            reason: format!(
                "type header {} does not match expected {}",
                type_id,
                T::TYPE_ID
            ),
        });
    }
    let (value, _extra) = T::decode_standard(buf, TYPED_HEADER)?;
    Ok((value, declared))
}

/// Cheap structural check: headers valid and every field decodable.
pub fn verify<T: StandardDecode>(buf: &ReadBuffer) -> bool {
    decode::<T>(buf).is_ok()
}

/// [`verify`] plus the type-header match.
pub fn verify_typed<T: StandardDecode + Record>(buf: &ReadBuffer) -> bool {
    decode_typed::<T>(buf).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Quote {
        symbol: String,
        price: i64,
        live: bool,
    }

    impl Record for Quote {
        const TYPE_ID: u32 = 42;
    }

    impl StandardEncode for Quote {
        const FIXED_SIZE: usize = 4 + 8 + 1;

        fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
            let mut extra = 0;
            extra += self.symbol.encode_standard(buf, offset)?;
            extra += self.price.encode_standard(buf, offset + 4)?;
            extra += self.live.encode_standard(buf, offset + 12)?;
            Ok(extra)
        }
    }

    impl StandardDecode for Quote {
        const FIXED_SIZE: usize = 4 + 8 + 1;

        fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
            let mut extra = 0;
            let (symbol, used) = String::decode_standard(buf, offset)?;
            extra += used;
            let (price, used) = i64::decode_standard(buf, offset + 4)?;
            extra += used;
            let (live, used) = bool::decode_standard(buf, offset + 12)?;
            extra += used;
            Ok((Quote { symbol, price, live }, extra))
        }
    }

    fn sample() -> Quote {
        Quote {
            symbol: String::from("EURUSD"),
            price: 108_550,
            live: true,
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut buf = WriteBuffer::new();
        let total = encode(&sample(), &mut buf).unwrap();
        // header + fixed + (len + "EURUSD")
        assert_eq!(total, 4 + 13 + 4 + 6);
        let read = buf.freeze();
        let (decoded, declared) = decode::<Quote>(&read).unwrap();
        assert_eq!(decoded, sample());
        assert_eq!(declared, total);
    }

    #[test]
    fn test_size_header_written_last_and_covers_arena() {
        let mut buf = WriteBuffer::new();
        let total = encode(&sample(), &mut buf).unwrap();
        let read = buf.freeze();
        assert_eq!(read.read_u32(0).unwrap() as usize, total);
        assert_eq!(read.size(), total);
    }

    #[test]
    fn test_typed_roundtrip_and_header_order() {
        let mut buf = WriteBuffer::new();
        let total = encode_typed(&sample(), &mut buf).unwrap();
        let read = buf.freeze();
        // [size][type], size first.
        assert_eq!(read.read_u32(0).unwrap() as usize, total);
        assert_eq!(read.read_u32(4).unwrap(), Quote::TYPE_ID);
        let (decoded, _) = decode_typed::<Quote>(&read).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_typed_rejects_wrong_type_id() {
        let mut buf = WriteBuffer::new();
        encode_typed(&sample(), &mut buf).unwrap();
        let mut data = buf.into_vec();
        data[4..8].copy_from_slice(&99u32.to_le_bytes());
        let read = ReadBuffer::new(data);
        assert!(matches!(
            decode_typed::<Quote>(&read),
            Err(Error::Format { .. })
        ));
        assert!(!verify_typed::<Quote>(&read));
    }

    #[test]
    fn test_undersized_header_rejected() {
        let mut buf = WriteBuffer::new();
        encode(&sample(), &mut buf).unwrap();
        let mut data = buf.into_vec();
        data[..4].copy_from_slice(&3u32.to_le_bytes());
        let read = ReadBuffer::new(data);
        assert!(matches!(decode::<Quote>(&read), Err(Error::Format { .. })));
    }

    #[test]
    fn test_header_larger_than_buffer_rejected() {
        let mut buf = WriteBuffer::new();
        encode(&sample(), &mut buf).unwrap();
        let mut data = buf.into_vec();
        let lie = (data.len() + 1) as u32;
        data[..4].copy_from_slice(&lie.to_le_bytes());
        let read = ReadBuffer::new(data);
        assert!(matches!(
            decode::<Quote>(&read),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(!verify::<Quote>(&read));
    }

    #[test]
    fn test_truncated_buffer_rejected() {
        let mut buf = WriteBuffer::new();
        encode(&sample(), &mut buf).unwrap();
        let mut data = buf.into_vec();
        data.truncate(data.len() - 1);
        let read = ReadBuffer::new(data);
        assert!(decode::<Quote>(&read).is_err());
    }

    #[test]
    fn test_clear_then_reencode_is_deterministic() {
        let mut buf = WriteBuffer::new();
        encode(&sample(), &mut buf).unwrap();
        let first = buf.as_slice().to_vec();
        buf.clear();
        encode(&sample(), &mut buf).unwrap();
        assert_eq!(buf.as_slice(), &first[..]);
    }

    #[test]
    fn test_verify_accepts_valid_struct() {
        let mut buf = WriteBuffer::new();
        encode(&sample(), &mut buf).unwrap();
        assert!(verify::<Quote>(&buf.freeze()));
    }
}
