//! Pre-sized working buffers for building a folder listing.

use tracing::trace;

use crate::attributes::AttributeSet;
use crate::errors::{BrowseError, Result};
use crate::types::{FolderType, ITEM_NOT_PLAYABLE, ITEM_PLAYABLE, ItemType, UID_SIZE};
use crate::uid::{ItemUid, UidCodec};

/// Working storage for exactly `size` folder items.
///
/// Every fixed array is allocated once with its final length and never
/// resized. Slots start as mixed-folder, media, playable, with a zero UID
/// and an empty name. Attributes stay absent until the first call that
/// populates them.
#[derive(Clone, Debug)]
pub struct ScratchFolderBuffers {
    size: usize,
    folder_types: Vec<u8>,
    item_types: Vec<u8>,
    playable: Vec<u8>,
    uids: Vec<u8>,
    display_names: Vec<String>,
    attributes: Option<Vec<AttributeSet>>,
}

impl ScratchFolderBuffers {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            folder_types: vec![u8::from(FolderType::Mixed); size],
            item_types: vec![u8::from(ItemType::Media); size],
            playable: vec![ITEM_PLAYABLE; size],
            uids: vec![0; size * UID_SIZE],
            display_names: vec![String::new(); size],
            attributes: None,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.size {
            return Err(BrowseError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(())
    }

    pub fn set_folder_type(&mut self, index: usize, folder_type: FolderType) -> Result<()> {
        self.check(index)?;
        self.folder_types[index] = folder_type.into();
        Ok(())
    }

    pub fn set_item_type(&mut self, index: usize, item_type: ItemType) -> Result<()> {
        self.check(index)?;
        self.item_types[index] = item_type.into();
        Ok(())
    }

    pub fn set_playable(&mut self, index: usize, playable: bool) -> Result<()> {
        self.check(index)?;
        self.playable[index] = if playable {
            ITEM_PLAYABLE
        } else {
            ITEM_NOT_PLAYABLE
        };
        Ok(())
    }

    pub fn set_uid(&mut self, index: usize, uid: impl Into<ItemUid>) -> Result<()> {
        self.check(index)?;
        let start = index * UID_SIZE;
        self.uids[start..start + UID_SIZE].copy_from_slice(uid.into().as_bytes());
        Ok(())
    }

    pub fn set_display_name(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.check(index)?;
        self.display_names[index] = name.into();
        Ok(())
    }

    /// Switches attributes from absent to present, every item with none.
    ///
    /// Used when attributes were requested but the query returned nothing.
    pub fn init_attributes(&mut self) {
        if self.attributes.is_none() {
            trace!(size = self.size, "allocating folder attribute slots");
            self.attributes = Some(vec![AttributeSet::empty(); self.size]);
        }
    }

    pub fn set_attributes(&mut self, index: usize, set: AttributeSet) -> Result<()> {
        self.check(index)?;
        self.init_attributes();
        if let Some(attributes) = self.attributes.as_mut() {
            attributes[index] = set;
        }
        Ok(())
    }

    pub fn folder_types(&self) -> &[u8] {
        &self.folder_types
    }

    pub fn item_types(&self) -> &[u8] {
        &self.item_types
    }

    pub fn playable(&self) -> &[u8] {
        &self.playable
    }

    pub fn uid_block(&self) -> &[u8] {
        &self.uids
    }

    pub fn uid(&self, index: usize) -> Result<u64> {
        self.check(index)?;
        UidCodec::decode(&self.uids[index * UID_SIZE..(index + 1) * UID_SIZE])
    }

    pub fn display_names(&self) -> &[String] {
        &self.display_names
    }

    /// `None` while attributes have not been populated.
    pub fn attributes(&self) -> Option<&[AttributeSet]> {
        self.attributes.as_deref()
    }

    pub(crate) fn into_parts(self) -> ScratchParts {
        ScratchParts {
            size: self.size,
            folder_types: self.folder_types,
            item_types: self.item_types,
            playable: self.playable,
            uids: self.uids,
            display_names: self.display_names,
            attributes: self.attributes,
        }
    }
}

pub(crate) struct ScratchParts {
    pub size: usize,
    pub folder_types: Vec<u8>,
    pub item_types: Vec<u8>,
    pub playable: Vec<u8>,
    pub uids: Vec<u8>,
    pub display_names: Vec<String>,
    pub attributes: Option<Vec<AttributeSet>>,
}
