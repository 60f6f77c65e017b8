// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-identifier dispatch for incoming frames.
//!
//! A registry maps each protocol type identifier to a decoder function
//! producing a caller-chosen aggregate `M` (typically an enum with one
//! variant per message type). Dispatch is a flat table lookup; no trait
//! objects and no downcasting on the receive path.

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};
use crate::proto::message::{parse_frame, Message};

/// Decoder function for one message type: payload bytes in, `M` out.
pub type Decoder<M> = fn(&[u8]) -> Result<M>;

/// Frame dispatch table keyed by type identifier.
#[derive(Debug)]
pub struct MessageRegistry<M> {
    decoders: HashMap<u32, Decoder<M>>,
}

impl<M> MessageRegistry<M> {
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register a decoder for a type identifier.
    ///
    /// Re-registering an identifier is refused: silently replacing a
    /// decoder mid-protocol is always a wiring bug.
    pub fn register(&mut self, type_id: u32, decoder: Decoder<M>) -> Result<()> {
        if self.decoders.contains_key(&type_id) {
            return Err(Error::DuplicateType { type_id });
        }
        self.decoders.insert(type_id, decoder);
        debug!("registered decoder for type {}", type_id);
        Ok(())
    }

    /// Register a [`Message`] type under its own `TYPE_ID`.
    pub fn register_type<T>(&mut self) -> Result<()>
    where
        T: Message,
        M: From<T>,
    {
        fn decode_into<T, M>(payload: &[u8]) -> Result<M>
        where
            T: Message,
            M: From<T>,
        {
            T::decode_payload(payload).map(M::from)
        }
        self.register(T::TYPE_ID, decode_into::<T, M>)
    }

    /// True when a decoder is registered for `type_id`.
    pub fn contains(&self, type_id: u32) -> bool {
        self.decoders.contains_key(&type_id)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Parse a frame and dispatch its payload to the registered decoder.
    pub fn decode_frame(&self, frame: &[u8]) -> Result<M> {
        let (type_id, payload) = parse_frame(frame)?;
        let decoder = self
            .decoders
            .get(&type_id)
            .ok_or(Error::UnknownType { type_id })?;
        decoder(payload)
    }
}

impl<M> Default for MessageRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}
