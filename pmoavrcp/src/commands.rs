//! Parameter bundles handed from the command layer to the query layer.
//!
//! These carry what the remote controller asked for. They do not check
//! scope semantics, which belong to the query layer; the only invariant is
//! that the declared attribute count agrees with the ids. Item ranges are
//! resolved against a list with [`FolderItemsCmd::window`].

use std::ops::Range;

use serde::Serialize;

use crate::errors::{BrowseError, Result};
use crate::types::{ATTRIBUTE_COUNT_ALL, ATTRIBUTE_COUNT_NONE, PeerAddress, Scope};
use crate::uid::ItemUid;

/// Which attributes the controller wants back for each item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AttributeSelection {
    /// Every attribute the player knows about.
    All,
    /// No attributes at all; the listing carries none.
    NoneRequested,
    List(Vec<u32>),
}

impl AttributeSelection {
    /// Builds a selection from the raw count and id list of a command.
    ///
    /// `0x00` means all attributes and `0xFF` means none; in both cases
    /// the id list must be empty. Any other count must match the ids.
    pub fn from_raw(num_attr: u8, attr_ids: &[u32]) -> Result<Self> {
        match num_attr {
            ATTRIBUTE_COUNT_ALL | ATTRIBUTE_COUNT_NONE if !attr_ids.is_empty() => Err(
                BrowseError::length_mismatch("requested attribute ids", 0, attr_ids.len()),
            ),
            ATTRIBUTE_COUNT_ALL => Ok(AttributeSelection::All),
            ATTRIBUTE_COUNT_NONE => Ok(AttributeSelection::NoneRequested),
            n if n as usize != attr_ids.len() => Err(BrowseError::length_mismatch(
                "requested attribute ids",
                n as usize,
                attr_ids.len(),
            )),
            _ => Ok(AttributeSelection::List(attr_ids.to_vec())),
        }
    }

    pub fn is_requested(&self) -> bool {
        !matches!(self, AttributeSelection::NoneRequested)
    }

    /// Whether attribute `id` should be returned.
    pub fn wants(&self, id: u32) -> bool {
        match self {
            AttributeSelection::All => true,
            AttributeSelection::NoneRequested => false,
            AttributeSelection::List(ids) => ids.contains(&id),
        }
    }

    /// The raw count that encodes this selection.
    ///
    /// A list must hold 1 to 254 ids; other lengths would collide with the
    /// sentinels or overflow the octet.
    pub fn num_attr(&self) -> Result<u8> {
        match self {
            AttributeSelection::All => Ok(ATTRIBUTE_COUNT_ALL),
            AttributeSelection::NoneRequested => Ok(ATTRIBUTE_COUNT_NONE),
            AttributeSelection::List(ids) => match u8::try_from(ids.len()) {
                Ok(n) if n != ATTRIBUTE_COUNT_ALL && n != ATTRIBUTE_COUNT_NONE => Ok(n),
                _ => Err(BrowseError::UnencodableAttributeList(ids.len())),
            },
        }
    }
}

/// GetFolderItems parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FolderItemsCmd {
    pub address: PeerAddress,
    pub scope: Scope,
    pub start_item: u32,
    pub end_item: u32,
    pub attributes: AttributeSelection,
}

impl FolderItemsCmd {
    pub fn new(
        address: PeerAddress,
        scope: Scope,
        start_item: u32,
        end_item: u32,
        num_attr: u8,
        attr_ids: &[u32],
    ) -> Result<Self> {
        Ok(Self {
            address,
            scope,
            start_item,
            end_item,
            attributes: AttributeSelection::from_raw(num_attr, attr_ids)?,
        })
    }

    /// Positions this command selects in a list of `len` items.
    pub fn window(&self, len: usize, max_items: usize) -> Option<Range<usize>> {
        item_window(self.start_item, self.end_item, len, max_items)
    }
}

/// Resolves the inclusive range `start_item..=end_item` against a list of
/// `len` items, capped at `max_items` (at least one).
///
/// `None` when the range is inverted or starts past the end; otherwise the
/// window holds at least one item.
pub(crate) fn item_window(
    start_item: u32,
    end_item: u32,
    len: usize,
    max_items: usize,
) -> Option<Range<usize>> {
    let start = start_item as usize;
    if end_item < start_item || start >= len {
        return None;
    }
    let span = (end_item - start_item) as usize + 1;
    let end = start + span.min(max_items.max(1)).min(len - start);
    Some(start..end)
}

/// GetItemAttributes parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemAttrCmd {
    pub address: PeerAddress,
    pub scope: Scope,
    pub uid: ItemUid,
    pub uid_counter: u16,
    pub attributes: AttributeSelection,
}

impl ItemAttrCmd {
    pub fn new(
        address: PeerAddress,
        scope: Scope,
        uid: &[u8],
        uid_counter: u16,
        num_attr: u8,
        attr_ids: &[u32],
    ) -> Result<Self> {
        Ok(Self {
            address,
            scope,
            uid: ItemUid::from_slice(uid)?,
            uid_counter,
            attributes: AttributeSelection::from_raw(num_attr, attr_ids)?,
        })
    }
}

/// GetElementAttributes parameters for the now playing item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElementAttrCmd {
    pub address: PeerAddress,
    pub attributes: AttributeSelection,
}

impl ElementAttrCmd {
    pub fn new(address: PeerAddress, num_attr: u8, attr_ids: &[u32]) -> Result<Self> {
        Ok(Self {
            address,
            attributes: AttributeSelection::from_raw(num_attr, attr_ids)?,
        })
    }
}
