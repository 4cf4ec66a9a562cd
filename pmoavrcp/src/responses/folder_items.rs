use serde::Serialize;
use tracing::{debug, warn};

use crate::attributes::{AttributeFlattener, FlattenedAttributes};
use crate::errors::{BrowseError, Result};
use crate::responses::ensure_len;
use crate::scratch::ScratchFolderBuffers;
use crate::types::{Scope, StatusCode, UID_SIZE};
use crate::uid::UidCodec;

const BUNDLE: &str = "folder listing";

/// Attributes carried by a folder listing.
///
/// `NotRequested` and a `Returned` value with no attributes are different
/// answers: the first tells the native side to omit attribute fields, the
/// second that every item has zero attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum FolderAttributes {
    NotRequested,
    Returned(FlattenedAttributes),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AttributeState {
    Absent,
    Empty,
    Populated,
}

impl FolderAttributes {
    pub fn state(&self) -> AttributeState {
        match self {
            FolderAttributes::NotRequested => AttributeState::Absent,
            FolderAttributes::Returned(flat) if flat.total() == 0 => AttributeState::Empty,
            FolderAttributes::Returned(_) => AttributeState::Populated,
        }
    }

    pub fn flattened(&self) -> Option<&FlattenedAttributes> {
        match self {
            FolderAttributes::NotRequested => None,
            FolderAttributes::Returned(flat) => Some(flat),
        }
    }
}

/// GetFolderItems response for the filesystem, search and now playing scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FolderListingResponse {
    status: StatusCode,
    uid_counter: u16,
    scope: Scope,
    num_items: usize,
    folder_types: Vec<u8>,
    playable: Vec<u8>,
    item_types: Vec<u8>,
    item_uids: Vec<u8>,
    display_names: Vec<String>,
    attributes: FolderAttributes,
}

impl FolderListingResponse {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        status: StatusCode,
        uid_counter: u16,
        scope: Scope,
        num_items: usize,
        folder_types: Vec<u8>,
        playable: Vec<u8>,
        item_types: Vec<u8>,
        item_uids: Vec<u8>,
        display_names: Vec<String>,
        attributes: FolderAttributes,
    ) -> Result<Self> {
        ensure_len(BUNDLE, "folder types", num_items, folder_types.len())?;
        ensure_len(BUNDLE, "playable flags", num_items, playable.len())?;
        ensure_len(BUNDLE, "item types", num_items, item_types.len())?;
        ensure_len(BUNDLE, "item uids", num_items * UID_SIZE, item_uids.len())?;
        ensure_len(BUNDLE, "display names", num_items, display_names.len())?;
        if let FolderAttributes::Returned(flat) = &attributes {
            ensure_len(BUNDLE, "attribute counts", num_items, flat.item_count())?;
        }

        Ok(Self {
            status,
            uid_counter,
            scope,
            num_items,
            folder_types,
            playable,
            item_types,
            item_uids,
            display_names,
            attributes,
        })
    }

    /// Finalizes a filled scratch buffer.
    ///
    /// With `attributes_requested` unset the buffer must not hold
    /// attributes; with it set they must have been populated, possibly
    /// with nothing via [`ScratchFolderBuffers::init_attributes`].
    pub fn from_scratch(
        status: StatusCode,
        uid_counter: u16,
        scope: Scope,
        buffers: ScratchFolderBuffers,
        attributes_requested: bool,
    ) -> Result<Self> {
        let parts = buffers.into_parts();
        let attributes = match (attributes_requested, parts.attributes) {
            (false, None) => FolderAttributes::NotRequested,
            (true, Some(sets)) => FolderAttributes::Returned(AttributeFlattener::flatten(&sets)),
            (true, None) => {
                warn!(
                    size = parts.size,
                    "folder listing finalized before attributes were populated"
                );
                return Err(BrowseError::AttributesNotPopulated);
            }
            (false, Some(_)) => {
                warn!(size = parts.size, "folder listing carries attributes nobody requested");
                return Err(BrowseError::AttributesNotRequested);
            }
        };

        debug!(
            scope = ?scope,
            items = parts.size,
            attributes = ?attributes.state(),
            "folder listing built"
        );

        Self::new(
            status,
            uid_counter,
            scope,
            parts.size,
            parts.folder_types,
            parts.playable,
            parts.item_types,
            parts.uids,
            parts.display_names,
            attributes,
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn uid_counter(&self) -> u16 {
        self.uid_counter
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    pub fn folder_types(&self) -> &[u8] {
        &self.folder_types
    }

    pub fn playable(&self) -> &[u8] {
        &self.playable
    }

    pub fn item_types(&self) -> &[u8] {
        &self.item_types
    }

    pub fn item_uids(&self) -> &[u8] {
        &self.item_uids
    }

    pub fn item_uid(&self, index: usize) -> Result<u64> {
        if index >= self.num_items {
            return Err(BrowseError::IndexOutOfRange {
                index,
                size: self.num_items,
            });
        }
        UidCodec::decode(&self.item_uids[index * UID_SIZE..(index + 1) * UID_SIZE])
    }

    pub fn display_names(&self) -> &[String] {
        &self.display_names
    }

    pub fn attributes(&self) -> &FolderAttributes {
        &self.attributes
    }
}
