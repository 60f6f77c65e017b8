// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type codecs for the two wire layouts.
//!
//! Every value type is encodable twice:
//!
//! - **Final layout** ([`FinalEncode`]/[`FinalDecode`]): everything inline,
//!   fields packed back-to-back, no pointers and no headers. Compact, but
//!   decoding must walk fields in declaration order.
//! - **Standard layout** ([`StandardEncode`]/[`StandardDecode`]): each field
//!   occupies a fixed-width slot in the struct region; variable-length data
//!   lives out-of-line in an append-only arena reached through 4-byte
//!   absolute pointers, which keeps field offsets static and values
//!   mutable in place.
//!
//! All operations return the byte counts they consumed or appended, so no
//! codec carries mutable size state between calls.

mod collections;
mod enums;
mod options;
mod primitives;
mod strings;
mod traits;

pub use strings::Bytes;
pub use traits::{FinalDecode, FinalEncode, StandardDecode, StandardEncode};
