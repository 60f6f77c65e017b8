// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Frame construction and the [`Message`] trait.

use crate::error::{Error, Result};
use crate::model::Record;

/// Frame header size: 4-byte type plus 4-byte size.
pub const FRAME_HEADER_SIZE: usize = 8;

/// A serializable protocol message.
///
/// Implementors provide payload encode/decode; the default methods wrap
/// the payload in the `[type][size]` frame header. The type identifier
/// comes from [`Record::TYPE_ID`].
pub trait Message: Record + Sized {
    /// Serialize the message payload (frame header excluded).
    fn encode_payload(&self) -> Result<Vec<u8>>;

    /// Deserialize the message payload (frame header excluded).
    fn decode_payload(payload: &[u8]) -> Result<Self>;

    /// Serialize into a complete frame: `[type LE][size LE][payload]`.
    fn to_frame(&self) -> Result<Vec<u8>> {
        let payload = self.encode_payload()?;
        Ok(build_frame(Self::TYPE_ID, &payload))
    }

    /// Parse a complete frame, rejecting a foreign type identifier.
    fn from_frame(frame: &[u8]) -> Result<Self> {
        let (type_id, payload) = parse_frame(frame)?;
        if type_id != Self::TYPE_ID {
            return Err(Error::UnknownType { type_id });
        }
        Self::decode_payload(payload)
    }
}

/// Build a frame around a serialized payload.
///
/// The size field counts the payload only, header excluded.
pub fn build_frame(type_id: u32, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
    frame.extend_from_slice(&type_id.to_le_bytes());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Split a frame into its type identifier and payload.
///
/// Fails when the frame is shorter than its header or the size field
/// declares more payload than the frame carries. Trailing bytes beyond
/// the declared size are not part of the payload.
pub fn parse_frame(frame: &[u8]) -> Result<(u32, &[u8])> {
    if frame.len() < FRAME_HEADER_SIZE {
        return Err(Error::Format {
            reason: format!(
                "frame shorter than {}-byte header: {} bytes",
                FRAME_HEADER_SIZE,
                frame.len()
            ),
        });
    }
    let type_id = u32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]);
    let size = u32::from_le_bytes([frame[4], frame[5], frame[6], frame[7]]) as usize;
    let available = frame.len() - FRAME_HEADER_SIZE;
    if size > available {
        return Err(Error::Format {
            reason: format!(
                "frame size field {} exceeds available payload {}",
                size, available
            ),
        });
    }
    Ok((type_id, &frame[FRAME_HEADER_SIZE..FRAME_HEADER_SIZE + size]))
}
