//! Fixed-width item UID encoding.
//!
//! A UID is an opaque 64-bit handle carried on the wire as exactly
//! [`UID_SIZE`] big-endian bytes.

use serde::Serialize;

use crate::errors::{BrowseError, Result};
use crate::types::UID_SIZE;

/// An encoded UID block, always exactly `UID_SIZE` bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ItemUid([u8; UID_SIZE]);

impl ItemUid {
    pub fn from_handle(handle: u64) -> Self {
        ItemUid(handle.to_be_bytes())
    }

    /// Parses a block taken from a larger buffer.
    pub fn from_slice(block: &[u8]) -> Result<Self> {
        let bytes: [u8; UID_SIZE] = block.try_into().map_err(|_| BrowseError::MalformedUid {
            expected: UID_SIZE,
            actual: block.len(),
        })?;
        Ok(ItemUid(bytes))
    }

    pub fn handle(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; UID_SIZE] {
        &self.0
    }
}

impl From<u64> for ItemUid {
    fn from(handle: u64) -> Self {
        ItemUid::from_handle(handle)
    }
}

pub struct UidCodec;

impl UidCodec {
    pub fn encode(handle: u64) -> [u8; UID_SIZE] {
        handle.to_be_bytes()
    }

    pub fn decode(block: &[u8]) -> Result<u64> {
        ItemUid::from_slice(block).map(|uid| uid.handle())
    }

    /// Concatenates the blocks of `handles` in order.
    pub fn encode_all(handles: &[u64]) -> Vec<u8> {
        let mut out = Vec::with_capacity(handles.len() * UID_SIZE);
        for handle in handles {
            out.extend_from_slice(&Self::encode(*handle));
        }
        out
    }
}
