//! Validated response bundles for the native boundary.
//!
//! Each response checks its size invariants in its constructor and is
//! immutable afterwards, so a bundle that exists is a bundle the native
//! parser can consume. A failed construction yields no partial bundle.

mod folder_items;
mod item_attributes;
mod player_list;

pub use folder_items::{AttributeState, FolderAttributes, FolderListingResponse};
pub use item_attributes::ItemAttributeResponse;
pub use player_list::PlayerDirectoryResponse;

use tracing::warn;

use crate::errors::{BrowseError, Result};

/// Fails with `InconsistentBundleSize` unless `actual == expected`.
pub(crate) fn ensure_len(
    bundle: &'static str,
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<()> {
    if expected != actual {
        warn!(bundle, field, expected, actual, "rejecting inconsistent bundle");
        return Err(BrowseError::inconsistent(bundle, field, expected, actual));
    }
    Ok(())
}
