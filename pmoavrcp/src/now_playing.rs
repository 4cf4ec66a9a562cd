//! The now playing queue of the active player.
//!
//! The registry holds at most one sequence. [`NowPlayingRegistry::replace`]
//! swaps it whole, so a reader either sees the previous queue or the new
//! one, never a mix of both.

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, trace};

use crate::attributes::AttributeSet;
use crate::commands::{AttributeSelection, FolderItemsCmd, item_window};
use crate::errors::{BrowseError, Result};
use crate::responses::{FolderListingResponse, ItemAttributeResponse};
use crate::scratch::ScratchFolderBuffers;
use crate::settings::BrowseSettings;
use crate::types::{ItemType, Scope, StatusCode};

/// One entry of the now playing queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueueItem {
    /// Queue identifier, exposed to the controller as the item UID.
    pub queue_id: u64,
    pub title: String,
    /// Media attributes known for this item.
    pub attributes: AttributeSet,
}

impl QueueItem {
    pub fn new(queue_id: u64, title: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            queue_id,
            title: title.into(),
            attributes,
        }
    }

    /// The attributes of this item `selection` asks for, in item order.
    pub fn selected_attributes(&self, selection: &AttributeSelection) -> AttributeSet {
        self.attributes
            .iter()
            .filter(|(id, _)| selection.wants(*id))
            .collect()
    }
}

#[derive(Debug)]
pub struct NowPlayingRegistry {
    current: RwLock<Option<Arc<[QueueItem]>>>,
    max_items: usize,
}

impl Default for NowPlayingRegistry {
    fn default() -> Self {
        Self::with_settings(&BrowseSettings::default())
    }
}

impl NowPlayingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &BrowseSettings) -> Self {
        Self {
            current: RwLock::new(None),
            max_items: settings.max_items(),
        }
    }

    /// Installs `items` as the current queue and returns the previous one.
    ///
    /// An empty `items` leaves the registry empty.
    pub fn replace(&self, items: Vec<QueueItem>) -> Option<Arc<[QueueItem]>> {
        let next: Option<Arc<[QueueItem]>> = if items.is_empty() {
            None
        } else {
            Some(items.into())
        };
        debug!(
            items = next.as_ref().map_or(0, |q| q.len()),
            "now playing queue replaced"
        );

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// The current queue, `None` when nothing is playing.
    pub fn current(&self) -> Option<Arc<[QueueItem]>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) -> Option<Arc<[QueueItem]>> {
        self.replace(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.current().map_or(0, |q| q.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, queue_id: u64) -> Result<QueueItem> {
        self.current()
            .and_then(|queue| queue.iter().find(|item| item.queue_id == queue_id).cloned())
            .ok_or_else(|| BrowseError::NotFound(format!("queue item {queue_id}")))
    }

    /// Fills scratch buffers with items `start_item..=end_item` of the
    /// current queue, capped at the configured maximum.
    ///
    /// A range that selects nothing yields empty buffers.
    pub fn folder_items(
        &self,
        start_item: u32,
        end_item: u32,
        selection: &AttributeSelection,
    ) -> Result<ScratchFolderBuffers> {
        let queue = self.current();
        let items: &[QueueItem] = queue.as_deref().unwrap_or(&[]);
        let window = item_window(start_item, end_item, items.len(), self.max_items)
            .unwrap_or(0..0);

        let buffers = fill_buffers(&items[window], selection)?;
        trace!(start_item, end_item, items = buffers.len(), "now playing window filled");
        Ok(buffers)
    }

    /// Answers a GetFolderItems command on the now playing scope.
    pub fn folder_listing(
        &self,
        cmd: &FolderItemsCmd,
        uid_counter: u16,
    ) -> Result<FolderListingResponse> {
        if cmd.scope != Scope::NowPlaying {
            debug!(scope = ?cmd.scope, "folder listing asked on another scope");
            return FolderListingResponse::from_scratch(
                StatusCode::InvalidScope,
                uid_counter,
                cmd.scope,
                ScratchFolderBuffers::new(0),
                false,
            );
        }

        let queue = self.current();
        let items: &[QueueItem] = queue.as_deref().unwrap_or(&[]);
        match cmd.window(items.len(), self.max_items) {
            Some(window) => FolderListingResponse::from_scratch(
                StatusCode::Success,
                uid_counter,
                cmd.scope,
                fill_buffers(&items[window], &cmd.attributes)?,
                cmd.attributes.is_requested(),
            ),
            None => {
                debug!(
                    start_item = cmd.start_item,
                    end_item = cmd.end_item,
                    items = items.len(),
                    "now playing range out of bounds"
                );
                FolderListingResponse::from_scratch(
                    StatusCode::RangeOutOfBounds,
                    uid_counter,
                    cmd.scope,
                    ScratchFolderBuffers::new(0),
                    false,
                )
            }
        }
    }

    /// Attributes of queue item `queue_id`, `DoesNotExist` when it is not queued.
    pub fn item_attributes(
        &self,
        queue_id: u64,
        selection: &AttributeSelection,
    ) -> Result<ItemAttributeResponse> {
        match self.find(queue_id) {
            Ok(item) => ItemAttributeResponse::from_set(
                StatusCode::Success,
                &item.selected_attributes(selection),
            ),
            Err(err) if err.is_not_found() => {
                debug!(queue_id, "attributes asked for an item not in the queue");
                Ok(ItemAttributeResponse::status_only(StatusCode::DoesNotExist))
            }
            Err(err) => Err(err),
        }
    }
}

fn fill_buffers(
    items: &[QueueItem],
    selection: &AttributeSelection,
) -> Result<ScratchFolderBuffers> {
    let mut buffers = ScratchFolderBuffers::new(items.len());
    if selection.is_requested() {
        buffers.init_attributes();
    }

    for (index, item) in items.iter().enumerate() {
        buffers.set_item_type(index, ItemType::Media)?;
        buffers.set_uid(index, item.queue_id)?;
        buffers.set_display_name(index, item.title.clone())?;
        if selection.is_requested() {
            buffers.set_attributes(index, item.selected_attributes(selection))?;
        }
    }
    Ok(buffers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::AttributeState;
    use crate::types::{MediaAttributeId, PeerAddress};

    fn item(id: u64, title: &str) -> QueueItem {
        let mut attributes = AttributeSet::empty();
        attributes.push(MediaAttributeId::Title, title);
        attributes.push(MediaAttributeId::ArtistName, "Artist");
        QueueItem::new(id, title, attributes)
    }

    fn queue(n: u64) -> Vec<QueueItem> {
        (1..=n).map(|i| item(i * 10, &format!("Song {i}"))).collect()
    }

    #[test]
    fn test_replace_and_current() {
        let registry = NowPlayingRegistry::new();
        assert!(registry.current().is_none());

        assert!(registry.replace(queue(2)).is_none());
        let previous = registry.replace(queue(3)).unwrap();
        assert_eq!(previous.len(), 2);
        assert_eq!(registry.len(), 3);

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_replace_with_empty_is_empty() {
        let registry = NowPlayingRegistry::new();
        registry.replace(queue(1));
        registry.replace(Vec::new());
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_find() {
        let registry = NowPlayingRegistry::new();
        registry.replace(queue(3));
        assert_eq!(registry.find(20).unwrap().title, "Song 2");
        assert!(registry.find(21).unwrap_err().is_not_found());
    }

    #[test]
    fn test_folder_items_window() {
        let registry = NowPlayingRegistry::new();
        registry.replace(queue(5));

        let buffers = registry
            .folder_items(1, 2, &AttributeSelection::NoneRequested)
            .unwrap();
        assert_eq!(buffers.len(), 2);
        assert_eq!(buffers.uid(0).unwrap(), 20);
        assert_eq!(buffers.display_names(), &["Song 2".to_string(), "Song 3".to_string()]);
        assert!(buffers.attributes().is_none());

        let past = registry
            .folder_items(7, 9, &AttributeSelection::All)
            .unwrap();
        assert!(past.is_empty());
    }

    #[test]
    fn test_folder_items_respects_cap() {
        let registry = NowPlayingRegistry::with_settings(&BrowseSettings {
            max_folder_items: 2,
            ..BrowseSettings::default()
        });
        registry.replace(queue(5));
        let buffers = registry
            .folder_items(0, 4, &AttributeSelection::All)
            .unwrap();
        assert_eq!(buffers.len(), 2);
    }

    #[test]
    fn test_folder_items_filters_attributes() {
        let registry = NowPlayingRegistry::new();
        registry.replace(queue(1));

        let selection = AttributeSelection::List(vec![MediaAttributeId::ArtistName.into()]);
        let buffers = registry.folder_items(0, 0, &selection).unwrap();
        let sets = buffers.attributes().unwrap();
        assert_eq!(sets[0].ids(), &[2]);
        assert_eq!(sets[0].values(), &["Artist".to_string()]);

        // requested ids the item does not carry give an empty set
        let selection = AttributeSelection::List(vec![MediaAttributeId::Genre.into()]);
        let buffers = registry.folder_items(0, 0, &selection).unwrap();
        assert!(buffers.attributes().unwrap()[0].is_empty());
    }

    #[test]
    fn test_folder_listing() {
        let registry = NowPlayingRegistry::new();
        registry.replace(queue(3));
        let address = PeerAddress([0; 6]);

        let cmd = FolderItemsCmd::new(address, Scope::NowPlaying, 0, 9, 0x00, &[]).unwrap();
        let response = registry.folder_listing(&cmd, 7).unwrap();
        assert_eq!(response.status(), StatusCode::Success);
        assert_eq!(response.num_items(), 3);
        assert_eq!(response.uid_counter(), 7);
        assert_eq!(response.attributes().state(), AttributeState::Populated);

        let cmd = FolderItemsCmd::new(address, Scope::NowPlaying, 0, 9, 0xFF, &[]).unwrap();
        let response = registry.folder_listing(&cmd, 7).unwrap();
        assert_eq!(response.attributes().state(), AttributeState::Absent);

        let cmd = FolderItemsCmd::new(address, Scope::NowPlaying, 5, 9, 0x00, &[]).unwrap();
        let response = registry.folder_listing(&cmd, 7).unwrap();
        assert_eq!(response.status(), StatusCode::RangeOutOfBounds);
        assert_eq!(response.num_items(), 0);

        let cmd = FolderItemsCmd::new(address, Scope::Search, 0, 9, 0x00, &[]).unwrap();
        let response = registry.folder_listing(&cmd, 7).unwrap();
        assert_eq!(response.status(), StatusCode::InvalidScope);
    }

    #[test]
    fn test_zero_cap_agrees_with_directory() {
        let registry = NowPlayingRegistry::with_settings(&BrowseSettings {
            max_folder_items: 0,
            ..BrowseSettings::default()
        });
        registry.replace(queue(3));

        let cmd =
            FolderItemsCmd::new(PeerAddress([0; 6]), Scope::NowPlaying, 0, 0, 0xFF, &[]).unwrap();
        let response = registry.folder_listing(&cmd, 1).unwrap();
        assert_eq!(response.status(), StatusCode::Success);
        assert_eq!(response.num_items(), 1);
    }

    #[test]
    fn test_item_attributes() {
        let registry = NowPlayingRegistry::new();
        registry.replace(queue(2));

        let response = registry
            .item_attributes(10, &AttributeSelection::All)
            .unwrap();
        assert_eq!(response.status(), StatusCode::Success);
        assert_eq!(response.num_attr(), 2);
        assert_eq!(response.attribute_values()[0], "Song 1");

        let missing = registry
            .item_attributes(99, &AttributeSelection::All)
            .unwrap();
        assert_eq!(missing.status(), StatusCode::DoesNotExist);
    }
}
