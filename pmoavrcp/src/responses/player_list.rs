use std::sync::Arc;

use serde::Serialize;

use crate::directory::{MediaController, MediaPlayerInfo};
use crate::errors::Result;
use crate::feature_mask::FeatureMaskCodec;
use crate::responses::ensure_len;
use crate::types::{FEATURE_MASK_SIZE, ItemType, StatusCode};

const BUNDLE: &str = "player list";

/// GetFolderItems response for the media player list scope.
///
/// All per-player arrays have `num_items` entries, except
/// `feature_masks` which holds `num_items * FEATURE_MASK_SIZE` chunks.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerDirectoryResponse {
    status: StatusCode,
    uid_counter: u16,
    num_items: usize,
    item_type: ItemType,
    player_types: Vec<u8>,
    player_sub_types: Vec<u32>,
    play_status: Vec<u8>,
    feature_masks: Vec<u16>,
    player_names: Vec<String>,
    package_names: Vec<String>,
    /// Live handles, `None` for players that are not addressable right now.
    #[serde(skip)]
    controllers: Vec<Option<Arc<dyn MediaController>>>,
}

impl PlayerDirectoryResponse {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        status: StatusCode,
        uid_counter: u16,
        num_items: usize,
        player_types: Vec<u8>,
        player_sub_types: Vec<u32>,
        play_status: Vec<u8>,
        feature_masks: Vec<u16>,
        player_names: Vec<String>,
        package_names: Vec<String>,
        controllers: Vec<Option<Arc<dyn MediaController>>>,
    ) -> Result<Self> {
        ensure_len(BUNDLE, "player types", num_items, player_types.len())?;
        ensure_len(BUNDLE, "player sub types", num_items, player_sub_types.len())?;
        ensure_len(BUNDLE, "play status", num_items, play_status.len())?;
        ensure_len(
            BUNDLE,
            "feature masks",
            num_items * FEATURE_MASK_SIZE,
            feature_masks.len(),
        )?;
        ensure_len(BUNDLE, "player names", num_items, player_names.len())?;
        ensure_len(BUNDLE, "package names", num_items, package_names.len())?;
        ensure_len(BUNDLE, "controllers", num_items, controllers.len())?;

        Ok(Self {
            status,
            uid_counter,
            num_items,
            item_type: ItemType::Player,
            player_types,
            player_sub_types,
            play_status,
            feature_masks,
            player_names,
            package_names,
            controllers,
        })
    }

    /// Assembles the response from directory records, in the given order.
    pub fn from_players(
        status: StatusCode,
        uid_counter: u16,
        players: &[Arc<MediaPlayerInfo>],
    ) -> Result<Self> {
        let masks: Vec<_> = players.iter().map(|p| *p.feature_mask()).collect();
        Self::new(
            status,
            uid_counter,
            players.len(),
            players.iter().map(|p| p.major_type()).collect(),
            players.iter().map(|p| p.sub_type()).collect(),
            players.iter().map(|p| u8::from(p.play_status())).collect(),
            FeatureMaskCodec::encode_all(&masks)?,
            players.iter().map(|p| p.display_name().to_string()).collect(),
            players.iter().map(|p| p.package_name().to_string()).collect(),
            players.iter().map(|p| p.media_controller()).collect(),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn uid_counter(&self) -> u16 {
        self.uid_counter
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn player_types(&self) -> &[u8] {
        &self.player_types
    }

    pub fn player_sub_types(&self) -> &[u32] {
        &self.player_sub_types
    }

    pub fn play_status(&self) -> &[u8] {
        &self.play_status
    }

    pub fn feature_masks(&self) -> &[u16] {
        &self.feature_masks
    }

    /// The mask chunks of player `index`.
    pub fn feature_mask(&self, index: usize) -> Option<&[u16]> {
        let start = index.checked_mul(FEATURE_MASK_SIZE)?;
        self.feature_masks.get(start..start + FEATURE_MASK_SIZE)
    }

    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    pub fn package_names(&self) -> &[String] {
        &self.package_names
    }

    pub fn controllers(&self) -> &[Option<Arc<dyn MediaController>>] {
        &self.controllers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BrowseError;

    fn build(num_items: usize, names: usize) -> Result<PlayerDirectoryResponse> {
        PlayerDirectoryResponse::new(
            StatusCode::Success,
            1,
            num_items,
            vec![1; num_items],
            vec![0; num_items],
            vec![0; num_items],
            vec![0; num_items * FEATURE_MASK_SIZE],
            vec!["Player".to_string(); names],
            vec!["org.example.player".to_string(); num_items],
            vec![None; num_items],
        )
    }

    #[test]
    fn test_consistent_bundle_is_accepted() {
        let response = build(2, 2).unwrap();
        assert_eq!(response.num_items(), 2);
        assert_eq!(response.item_type(), ItemType::Player);
        assert_eq!(response.feature_masks().len(), 2 * FEATURE_MASK_SIZE);
        assert_eq!(response.feature_mask(1).unwrap().len(), FEATURE_MASK_SIZE);
        assert!(response.feature_mask(2).is_none());
    }

    #[test]
    fn test_short_names_are_rejected() {
        assert_eq!(
            build(3, 2).unwrap_err(),
            BrowseError::inconsistent(BUNDLE, "player names", 3, 2)
        );
    }

    #[test]
    fn test_wrong_mask_length_is_rejected() {
        let err = PlayerDirectoryResponse::new(
            StatusCode::Success,
            0,
            1,
            vec![1],
            vec![0],
            vec![0],
            vec![0; FEATURE_MASK_SIZE - 1],
            vec!["a".into()],
            vec!["a".into()],
            vec![None],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BrowseError::InconsistentBundleSize {
                field: "feature masks",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_list() {
        let response = build(0, 0).unwrap();
        assert_eq!(response.num_items(), 0);
        assert!(response.feature_masks().is_empty());
    }
}
