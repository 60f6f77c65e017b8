// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounds-checked byte buffers for both encoding directions.
//!
//! The read and write capabilities are split into two types instead of one
//! buffer with a direction flag:
//!
//! - [`ReadBuffer`] -- immutable after construction, every access checked
//!   against the fixed valid size. Shareable across threads.
//! - [`WriteBuffer`] -- exclusively owned by one encoder, writes auto-grow
//!   the valid size to the high-water mark instead of failing.
//!
//! Both address bytes by a relative offset added to a base `offset`; pointer
//! fields store *absolute* positions (relative to offset 0 of the data), so
//! out-of-line payloads resolve identically no matter where the enclosing
//! struct sits.

mod read;
mod write;

pub use read::ReadBuffer;
pub use write::WriteBuffer;
