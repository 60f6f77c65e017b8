// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec implementations for vectors, sets, and fixed arrays.
//!
//! Wire shapes:
//!
//! - Vector/set, Final layout: `[u32 count LE][elements inline]`.
//! - Vector/set, Standard layout: `[u32 ptr LE]` slot, target
//!   `[u32 count LE][element slots][element extras]`; one arena block per
//!   `encode` covers all slots, nested variable elements append their own
//!   targets after it.
//! - Fixed array `[T; N]`: no count on the wire; N element slots in both
//!   layouts (`N` pointers when the element type is variable-size).
//!
//! Sets are carried as `BTreeSet`, so iteration is already sorted and
//! deduplicated: equal logical sets encode byte-identically, and decoding
//! re-inserts into a fresh set, which normalizes hostile input.
//!
//! Decoders pre-check `count * element_size` against the buffer before
//! allocating, so an attacker-controlled count cannot balloon memory.

use super::traits::{FinalDecode, FinalEncode, StandardDecode, StandardEncode};
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// Pre-validate an element count against the readable region.
fn check_count_final(buf: &ReadBuffer, offset: usize, count: usize, elem: usize) -> Result<()> {
    if elem > 0 {
        buf.check_range(offset, count.saturating_mul(elem))?;
    }
    Ok(())
}

impl<T: FinalEncode> FinalEncode for Vec<T> {
    const STATIC_SIZE: usize = 0;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_u32(offset, self.len() as u32);
        let mut consumed = 4;
        for item in self {
            consumed += item.encode_final(buf, offset + consumed)?;
        }
        Ok(consumed)
    }
}

impl<T: FinalDecode> FinalDecode for Vec<T> {
    const STATIC_SIZE: usize = 0;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let count = buf.read_u32(offset)? as usize;
        check_count_final(buf, offset + 4, count, T::STATIC_SIZE)?;
        let mut items = Vec::with_capacity(if T::STATIC_SIZE > 0 { count } else { 0 });
        let mut consumed = 4;
        for _ in 0..count {
            let (value, used) = T::decode_final(buf, offset + consumed)?;
            items.push(value);
            consumed += used;
        }
        Ok((items, consumed))
    }
}

impl<T: StandardEncode> StandardEncode for Vec<T> {
    const FIXED_SIZE: usize = 4;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        encode_sequence_standard(buf, offset, self.len(), self.iter())
    }
}

impl<T: StandardDecode> StandardDecode for Vec<T> {
    const FIXED_SIZE: usize = 4;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let mut items = Vec::new();
        let extra = decode_sequence_standard(buf, offset, |value: T| items.push(value))?;
        Ok((items, extra))
    }
}

impl<T: FinalEncode + Ord> FinalEncode for BTreeSet<T> {
    const STATIC_SIZE: usize = 0;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        buf.write_u32(offset, self.len() as u32);
        let mut consumed = 4;
        for item in self {
            consumed += item.encode_final(buf, offset + consumed)?;
        }
        Ok(consumed)
    }
}

impl<T: FinalDecode + Ord> FinalDecode for BTreeSet<T> {
    const STATIC_SIZE: usize = 0;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let count = buf.read_u32(offset)? as usize;
        check_count_final(buf, offset + 4, count, T::STATIC_SIZE)?;
        let mut items = BTreeSet::new();
        let mut consumed = 4;
        for _ in 0..count {
            let (value, used) = T::decode_final(buf, offset + consumed)?;
            items.insert(value);
            consumed += used;
        }
        Ok((items, consumed))
    }
}

impl<T: StandardEncode + Ord> StandardEncode for BTreeSet<T> {
    const FIXED_SIZE: usize = 4;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        encode_sequence_standard(buf, offset, self.len(), self.iter())
    }
}

impl<T: StandardDecode + Ord> StandardDecode for BTreeSet<T> {
    const FIXED_SIZE: usize = 4;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let mut items = BTreeSet::new();
        let extra = decode_sequence_standard(buf, offset, |value: T| {
            items.insert(value);
        })?;
        Ok((items, extra))
    }
}

/// Shared Standard-layout sequence encoder: one arena block of
/// `[count][slots]`, element extras appended behind it.
fn encode_sequence_standard<'a, T, I>(
    buf: &mut WriteBuffer,
    offset: usize,
    len: usize,
    items: I,
) -> Result<usize>
where
    T: StandardEncode + 'a,
    I: Iterator<Item = &'a T>,
{
    let block = 4 + len * T::FIXED_SIZE;
    let target = buf.allocate(block);
    buf.write_u32_abs(target, len as u32);
    buf.write_u32(offset, target as u32);
    let base = (target + 4)
        .checked_sub(buf.offset())
        .ok_or(Error::OutOfBounds {
            offset: target,
            len: 4,
            size: buf.size(),
        })?;
    let mut extra = block;
    for (index, item) in items.enumerate() {
        extra += item.encode_standard(buf, base + index * T::FIXED_SIZE)?;
    }
    Ok(extra)
}

/// Shared Standard-layout sequence decoder; elements delivered to `push`.
fn decode_sequence_standard<T, F>(buf: &ReadBuffer, offset: usize, mut push: F) -> Result<usize>
where
    T: StandardDecode,
    F: FnMut(T),
{
    let ptr = buf.read_u32(offset)? as usize;
    if ptr == 0 {
        return Ok(0);
    }
    let count = buf.read_u32_abs(ptr)? as usize;
    let slots = count.saturating_mul(T::FIXED_SIZE);
    buf.check_abs(ptr + 4, slots)?;
    let base = (ptr + 4)
        .checked_sub(buf.offset())
        .ok_or(Error::OutOfBounds {
            offset: ptr,
            len: 4,
            size: buf.size(),
        })?;
    let mut extra = 4 + slots;
    for index in 0..count {
        let (value, used) = T::decode_standard(buf, base + index * T::FIXED_SIZE)?;
        push(value);
        extra += used;
    }
    Ok(extra)
}

impl<T: FinalEncode, const N: usize> FinalEncode for [T; N] {
    const STATIC_SIZE: usize = N * T::STATIC_SIZE;

    fn encode_final(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        let mut consumed = 0;
        for item in self {
            consumed += item.encode_final(buf, offset + consumed)?;
        }
        Ok(consumed)
    }
}

impl<T: FinalDecode, const N: usize> FinalDecode for [T; N] {
    const STATIC_SIZE: usize = N * T::STATIC_SIZE;

    fn decode_final(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let mut items = Vec::with_capacity(N);
        let mut consumed = 0;
        for _ in 0..N {
            let (value, used) = T::decode_final(buf, offset + consumed)?;
            items.push(value);
            consumed += used;
        }
        let array: [T; N] = items.try_into().map_err(|_| Error::Format {
            reason: format!("array element count does not match {}", N),
        })?;
        Ok((array, consumed))
    }
}

impl<T: StandardEncode, const N: usize> StandardEncode for [T; N] {
    const FIXED_SIZE: usize = N * T::FIXED_SIZE;

    fn encode_standard(&self, buf: &mut WriteBuffer, offset: usize) -> Result<usize> {
        let mut extra = 0;
        for (index, item) in self.iter().enumerate() {
            extra += item.encode_standard(buf, offset + index * T::FIXED_SIZE)?;
        }
        Ok(extra)
    }
}

impl<T: StandardDecode, const N: usize> StandardDecode for [T; N] {
    const FIXED_SIZE: usize = N * T::FIXED_SIZE;

    fn decode_standard(buf: &ReadBuffer, offset: usize) -> Result<(Self, usize)> {
        let mut items = Vec::with_capacity(N);
        let mut extra = 0;
        for index in 0..N {
            let (value, used) = T::decode_standard(buf, offset + index * T::FIXED_SIZE)?;
            items.push(value);
            extra += used;
        }
        let array: [T; N] = items.try_into().map_err(|_| Error::Format {
            reason: format!("array element count does not match {}", N),
        })?;
        Ok((array, extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_final_wire_shape() {
        let mut buf = WriteBuffer::new();
        let consumed = vec![1i16, 2, 3].encode_final(&mut buf, 0).unwrap();
        assert_eq!(consumed, 4 + 6);
        assert_eq!(buf.as_slice(), &[3, 0, 0, 0, 1, 0, 2, 0, 3, 0]);
    }

    #[test]
    fn test_vec_final_roundtrip_nested_strings() {
        let value = vec![String::from("a"), String::new(), String::from("ccc")];
        let mut buf = WriteBuffer::new();
        let written = value.encode_final(&mut buf, 0).unwrap();
        let read = buf.freeze();
        let (decoded, consumed) = Vec::<String>::decode_final(&read, 0).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(consumed, written);
    }

    #[test]
    fn test_empty_vec_both_layouts() {
        let mut buf = WriteBuffer::new();
        assert_eq!(Vec::<i32>::new().encode_final(&mut buf, 0).unwrap(), 4);
        let read = buf.freeze();
        assert_eq!(Vec::<i32>::decode_final(&read, 0).unwrap(), (vec![], 4));

        let mut buf = WriteBuffer::new();
        buf.fill_zero(0, 4);
        let extra = Vec::<i32>::new().encode_standard(&mut buf, 0).unwrap();
        assert_eq!(extra, 4);
        let read = buf.freeze();
        assert_eq!(Vec::<i32>::decode_standard(&read, 0).unwrap(), (vec![], 4));
    }

    #[test]
    fn test_vec_standard_fixed_elements() {
        let value = vec![10i32, 20, 30];
        let mut buf = WriteBuffer::new();
        buf.fill_zero(0, 4);
        let extra = value.encode_standard(&mut buf, 0).unwrap();
        assert_eq!(extra, 4 + 12);
        let read = buf.freeze();
        assert_eq!(
            Vec::<i32>::decode_standard(&read, 0).unwrap(),
            (value, 16)
        );
    }

    #[test]
    fn test_vec_standard_variable_elements_recurse() {
        let value = vec![String::from("north"), String::from("south")];
        let mut buf = WriteBuffer::new();
        buf.fill_zero(0, 4);
        let extra = value.encode_standard(&mut buf, 0).unwrap();
        // count + two pointer slots + two (len + payload) targets
        assert_eq!(extra, 4 + 8 + (4 + 5) + (4 + 5));
        let read = buf.freeze();
        let (decoded, read_extra) = Vec::<String>::decode_standard(&read, 0).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(read_extra, extra);
    }

    #[test]
    fn test_standard_back_to_back_sequences() {
        // Two pointer slots sharing one arena; the second block's element
        // base is derived from a nonzero high-water mark.
        let mut buf = WriteBuffer::new();
        buf.fill_zero(0, 8);
        let first = vec![10u16, 20].encode_standard(&mut buf, 0).unwrap();
        let second = vec![30u16, 40, 50].encode_standard(&mut buf, 4).unwrap();
        assert_eq!(first, 4 + 4);
        assert_eq!(second, 4 + 6);
        let read = buf.freeze();
        assert_eq!(
            Vec::<u16>::decode_standard(&read, 0).unwrap(),
            (vec![10, 20], first)
        );
        assert_eq!(
            Vec::<u16>::decode_standard(&read, 4).unwrap(),
            (vec![30, 40, 50], second)
        );
    }

    #[test]
    fn test_null_pointer_decodes_empty() {
        let read = ReadBuffer::new(vec![0u8; 4]);
        assert_eq!(Vec::<u64>::decode_standard(&read, 0).unwrap(), (vec![], 0));
    }

    #[test]
    fn test_hostile_count_rejected_before_allocation() {
        let mut buf = WriteBuffer::new();
        buf.write_u32(0, u32::MAX);
        let read = buf.freeze();
        assert!(matches!(
            Vec::<u64>::decode_final(&read, 0),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_set_encodes_sorted_unique() {
        let set: BTreeSet<i32> = [3, 1, 2, 1].into_iter().collect();
        let mut buf = WriteBuffer::new();
        set.encode_final(&mut buf, 0).unwrap();
        assert_eq!(
            buf.as_slice(),
            &[3, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0]
        );
        let read = buf.freeze();
        let (decoded, _) = BTreeSet::<i32>::decode_final(&read, 0).unwrap();
        assert_eq!(decoded.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_set_reencoding_is_stable() {
        let set: BTreeSet<u16> = [9, 4, 9, 7].into_iter().collect();
        let encode = |s: &BTreeSet<u16>| {
            let mut buf = WriteBuffer::new();
            s.encode_final(&mut buf, 0).unwrap();
            buf.into_vec()
        };
        let first = encode(&set);
        let read = ReadBuffer::new(first.clone());
        let (decoded, _) = BTreeSet::<u16>::decode_final(&read, 0).unwrap();
        assert_eq!(encode(&decoded), first);
    }

    #[test]
    fn test_set_decode_normalizes_hostile_duplicates() {
        // Hand-built wire data with duplicates and unsorted order.
        let mut buf = WriteBuffer::new();
        buf.write_u32(0, 4);
        for (index, value) in [3i32, 1, 2, 1].iter().enumerate() {
            buf.write_i32(4 + index * 4, *value);
        }
        let read = buf.freeze();
        let (decoded, consumed) = BTreeSet::<i32>::decode_final(&read, 0).unwrap();
        assert_eq!(consumed, 20);
        assert_eq!(decoded.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_array_final_no_count_prefix() {
        let mut buf = WriteBuffer::new();
        let consumed = [1u8, 2, 3, 4].encode_final(&mut buf, 0).unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_array_of_strings_standard_pointer_slots() {
        let value = [String::from("x"), String::from("yz")];
        assert_eq!(<[String; 2] as StandardEncode>::FIXED_SIZE, 8);
        let mut buf = WriteBuffer::new();
        buf.fill_zero(0, 8);
        let extra = value.encode_standard(&mut buf, 0).unwrap();
        assert_eq!(extra, (4 + 1) + (4 + 2));
        let read = buf.freeze();
        let (decoded, read_extra) = <[String; 2]>::decode_standard(&read, 0).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(read_extra, extra);
    }

    #[test]
    fn test_array_decode_short_buffer_rejected() {
        let read = ReadBuffer::new(vec![0u8; 3]);
        assert!(matches!(
            <[u8; 4]>::decode_final(&read, 0),
            Err(Error::OutOfBounds { .. })
        ));
    }
}
