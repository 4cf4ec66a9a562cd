//! # pmoavrcp - AVRCP browsing data layer
//!
//! This crate builds the data exchanged between an AVRCP target's browsing
//! command layer and its native protocol encoder:
//! - Big-endian item UIDs and 16-chunk player feature masks
//! - Per-item media attributes flattened into parallel arrays
//! - Validated response bundles (player list, folder listing, item attributes)
//! - A registry of addressable and browsable players
//! - The now playing queue of the active player
//!
//! # Architecture
//!
//! - **UidCodec / FeatureMaskCodec / AttributeFlattener**: pure codecs
//! - **FolderItemsCmd / ItemAttrCmd / ElementAttrCmd**: what the controller asked for
//! - **ScratchFolderBuffers**: pre-sized working storage for a listing
//! - **PlayerDirectoryResponse / FolderListingResponse / ItemAttributeResponse**:
//!   bundles that are consistent by construction
//! - **PlayerDirectory / NowPlayingRegistry**: `RwLock` registries handing out
//!   `Arc` snapshots
//!
//! # Example
//!
//! ```
//! use pmoavrcp::{
//!     AttributeSelection, AttributeSet, MediaAttributeId, NowPlayingRegistry, QueueItem,
//! };
//!
//! let queue = NowPlayingRegistry::new();
//! let mut attributes = AttributeSet::empty();
//! attributes.push(MediaAttributeId::Title, "Blue in Green");
//! queue.replace(vec![QueueItem::new(1, "Blue in Green", attributes)]);
//!
//! let buffers = queue.folder_items(0, 9, &AttributeSelection::All).unwrap();
//! assert_eq!(buffers.len(), 1);
//! assert_eq!(buffers.uid(0).unwrap(), 1);
//! ```

mod attributes;
mod commands;
mod directory;
mod errors;
mod feature_mask;
mod now_playing;
mod responses;
mod scratch;
mod settings;
pub mod types;
mod uid;

#[cfg(feature = "pmoconfig")]
mod config_ext;

pub use attributes::{AttributeFlattener, AttributeSet, FlattenedAttributes};
pub use commands::{AttributeSelection, ElementAttrCmd, FolderItemsCmd, ItemAttrCmd};
pub use directory::{
    BrowsePlayerInfo, MediaController, MediaPlayerInfo, PlayerDirectory, UidCounter,
};
pub use errors::{BrowseError, Result};
pub use feature_mask::{FeatureMask, FeatureMaskCodec, PlayerFeature};
pub use now_playing::{NowPlayingRegistry, QueueItem};
pub use responses::{
    AttributeState, FolderAttributes, FolderListingResponse, ItemAttributeResponse,
    PlayerDirectoryResponse,
};
pub use scratch::ScratchFolderBuffers;
pub use settings::{BrowseSettings, DEFAULT_MAX_FOLDER_ITEMS};
pub use types::{
    FEATURE_MASK_SIZE, FolderType, ItemType, MediaAttributeId, PeerAddress, PlayStatus, Scope,
    StatusCode, UID_SIZE,
};
pub use uid::{ItemUid, UidCodec};

#[cfg(feature = "pmoconfig")]
pub use config_ext::BrowseConfigExt;
