// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fast binary serialization with two wire layouts and length-prefixed
//! message framing.
//!
//! # Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |  proto      Sender / Receiver / MessageRegistry              |
//! |             [len BE][type LE][size LE][payload]              |
//! +--------------------------------------------------------------+
//! |  model      standard / final_layout struct entry points      |
//! +--------------------------------------------------------------+
//! |  codec      per-type encode/decode for both layouts          |
//! |             primitives, strings, options, collections, enums |
//! +--------------------------------------------------------------+
//! |  buffer     ReadBuffer / WriteBuffer (bounds-checked, LE)    |
//! +--------------------------------------------------------------+
//! ```
//!
//! # Wire layouts
//!
//! | Layout   | Header         | Variable data         | Use case        |
//! |----------|----------------|-----------------------|-----------------|
//! | Standard | 4B size (+4B type) | arena via 4B pointers | versioned storage, mutation in place |
//! | Final    | none           | inline                | messaging hot path |
//!
//! All integers and floats are little-endian. The framing length prefix
//! is the single big-endian exception (network byte order).
//!
//! # Example
//!
//! ```
//! use fbe::buffer::{ReadBuffer, WriteBuffer};
//! use fbe::codec::{FinalDecode, FinalEncode};
//!
//! let mut buf = WriteBuffer::new();
//! let mut at = 42u32.encode_final(&mut buf, 0).unwrap();
//! at += String::from("hi").encode_final(&mut buf, at).unwrap();
//! assert_eq!(at, 4 + 4 + 2);
//!
//! let read: ReadBuffer = buf.freeze();
//! let (n, used) = u32::decode_final(&read, 0).unwrap();
//! let (s, _) = String::decode_final(&read, used).unwrap();
//! assert_eq!((n, s.as_str()), (42, "hi"));
//! ```

pub mod buffer;
pub mod codec;
pub mod error;
pub mod model;
pub mod proto;
pub mod types;

pub use buffer::{ReadBuffer, WriteBuffer};
pub use codec::{Bytes, FinalDecode, FinalEncode, StandardDecode, StandardEncode};
pub use error::{Error, Result};
pub use model::Record;
pub use proto::{Message, MessageRegistry, Receiver, Sender};
pub use types::{Decimal, Timestamp};

// The UUID carrier is the ecosystem type, re-exported for signature use.
pub use uuid::Uuid;
