// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-width auxiliary value types consumed by the codec.
//!
//! UUIDs are carried as [`uuid::Uuid`]; its byte order already matches the
//! wire format (big-endian, same order as the canonical hex string).

mod decimal;
mod timestamp;

pub use decimal::Decimal;
pub use timestamp::Timestamp;
