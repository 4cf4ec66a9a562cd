//! In-memory directory of known media players.
//!
//! The directory owns two tables keyed by package name: addressable players
//! ([`MediaPlayerInfo`]) and browsable players ([`BrowsePlayerInfo`]).
//! Records are immutable once stored; any change replaces the record, so a
//! reader holding an `Arc` from an earlier snapshot always sees a whole
//! entry.
//!
//! A player's [`MediaController`] handle is shared, not owned. The session
//! layer must call [`PlayerDirectory::set_media_controller`] or
//! [`PlayerDirectory::unregister_player`] when a handle goes stale; the
//! directory has no way to notice on its own.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::commands::item_window;
use crate::errors::{BrowseError, Result};
use crate::feature_mask::FeatureMask;
use crate::responses::PlayerDirectoryResponse;
use crate::settings::BrowseSettings;
use crate::types::{PlayStatus, StatusCode};

/// Live control surface of a playing application, owned by the session layer.
pub trait MediaController: Send + Sync + fmt::Debug {
    /// Package of the application behind this session.
    fn package_name(&self) -> &str;
}

/// An addressable media player.
#[derive(Clone, Debug, Serialize)]
pub struct MediaPlayerInfo {
    package_name: String,
    major_type: u8,
    sub_type: u32,
    play_status: PlayStatus,
    feature_mask: FeatureMask,
    display_name: String,
    #[serde(skip)]
    media_controller: Option<Arc<dyn MediaController>>,
}

impl MediaPlayerInfo {
    /// Builds a record, copying `feature_mask` which must hold exactly
    /// `FEATURE_MASK_SIZE` chunks.
    pub fn new(
        package_name: impl Into<String>,
        major_type: u8,
        sub_type: u32,
        play_status: PlayStatus,
        feature_mask: &[u16],
        display_name: impl Into<String>,
        media_controller: Option<Arc<dyn MediaController>>,
    ) -> Result<Self> {
        Ok(Self {
            package_name: package_name.into(),
            major_type,
            sub_type,
            play_status,
            feature_mask: FeatureMask::from_chunks(feature_mask)?,
            display_name: display_name.into(),
            media_controller,
        })
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn major_type(&self) -> u8 {
        self.major_type
    }

    pub fn sub_type(&self) -> u32 {
        self.sub_type
    }

    pub fn play_status(&self) -> PlayStatus {
        self.play_status
    }

    pub fn feature_mask(&self) -> &FeatureMask {
        &self.feature_mask
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn media_controller(&self) -> Option<Arc<dyn MediaController>> {
        self.media_controller.clone()
    }

    pub fn with_play_status(&self, play_status: PlayStatus) -> Self {
        Self {
            play_status,
            ..self.clone()
        }
    }

    pub fn with_media_controller(
        &self,
        media_controller: Option<Arc<dyn MediaController>>,
    ) -> Self {
        Self {
            media_controller,
            ..self.clone()
        }
    }
}

impl PartialEq for MediaPlayerInfo {
    fn eq(&self, other: &Self) -> bool {
        let same_controller = match (&self.media_controller, &other.media_controller) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_controller
            && self.package_name == other.package_name
            && self.major_type == other.major_type
            && self.sub_type == other.sub_type
            && self.play_status == other.play_status
            && self.feature_mask == other.feature_mask
            && self.display_name == other.display_name
    }
}

impl fmt::Display for MediaPlayerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+++ MediaPlayerInfo: +++")?;
        writeln!(f, "Player Package Name = {}", self.package_name)?;
        writeln!(f, "Major Player Type = {:#04x}", self.major_type)?;
        writeln!(f, "Player SubType = {:#010x}", self.sub_type)?;
        writeln!(f, "Play Status = {:?}", self.play_status)?;
        for (i, chunk) in self.feature_mask.chunks().iter().enumerate() {
            writeln!(f, "Feature BitMask[{i}] = {chunk:#04x}")?;
        }
        writeln!(f, "Displayable Name = {}", self.display_name)?;
        match &self.media_controller {
            Some(controller) => write!(f, "Media Controller = {}", controller.package_name()),
            None => write!(f, "Media Controller = none"),
        }
    }
}

/// A player exposing a browsing service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BrowsePlayerInfo {
    pub package_name: String,
    pub display_name: String,
    pub service_class: String,
}

impl BrowsePlayerInfo {
    pub fn new(
        package_name: impl Into<String>,
        display_name: impl Into<String>,
        service_class: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            display_name: display_name.into(),
            service_class: service_class.into(),
        }
    }
}

impl fmt::Display for BrowsePlayerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+++ BrowsePlayerInfo: +++")?;
        writeln!(f, "Package Name = {}", self.package_name)?;
        writeln!(f, "Displayable Name = {}", self.display_name)?;
        write!(f, "Service Class = {}", self.service_class)
    }
}

/// Generation marker the remote side uses to detect directory changes.
///
/// A database-unaware directory always reports 0. A database-aware one
/// never reports 0 and skips it when wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct UidCounter {
    value: u16,
    database_aware: bool,
}

impl UidCounter {
    pub fn new(start: u16, database_aware: bool) -> Self {
        let value = match (database_aware, start) {
            (false, _) => 0,
            (true, 0) => 1,
            (true, v) => v,
        };
        Self {
            value,
            database_aware,
        }
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn bump(&mut self) {
        if !self.database_aware {
            return;
        }
        self.value = match self.value.wrapping_add(1) {
            0 => 1,
            v => v,
        };
    }
}

impl Default for UidCounter {
    fn default() -> Self {
        UidCounter::new(0, true)
    }
}

#[derive(Debug, Default)]
struct DirectoryState {
    players: BTreeMap<String, Arc<MediaPlayerInfo>>,
    browsable: BTreeMap<String, Arc<BrowsePlayerInfo>>,
    uid_counter: UidCounter,
}

/// Registry of addressable and browsable players.
///
/// Writes are serialized by one lock; lookups hand out `Arc` snapshots of
/// immutable records.
#[derive(Debug)]
pub struct PlayerDirectory {
    state: RwLock<DirectoryState>,
    max_items: usize,
}

impl Default for PlayerDirectory {
    fn default() -> Self {
        Self::with_settings(&BrowseSettings::default())
    }
}

impl PlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &BrowseSettings) -> Self {
        Self {
            state: RwLock::new(DirectoryState {
                uid_counter: UidCounter::new(settings.uid_counter_start, settings.database_aware),
                ..DirectoryState::default()
            }),
            max_items: settings.max_items(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, DirectoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers or replaces a player; returns the record it replaced.
    pub fn register_player(&self, info: MediaPlayerInfo) -> Option<Arc<MediaPlayerInfo>> {
        if let Some(controller) = &info.media_controller {
            if controller.package_name() != info.package_name {
                warn!(
                    package = info.package_name.as_str(),
                    controller = controller.package_name(),
                    "controller belongs to another package"
                );
            }
        }

        let mut state = self.write();
        let package = info.package_name.clone();
        let previous = state.players.insert(package.clone(), Arc::new(info));
        if previous.is_none() {
            state.uid_counter.bump();
            info!(package = package.as_str(), "media player registered");
        } else {
            debug!(package = package.as_str(), "media player updated");
        }
        previous
    }

    /// Replaces an existing player record.
    pub fn update_player(&self, info: MediaPlayerInfo) -> Result<()> {
        let mut state = self.write();
        match state.players.get_mut(&info.package_name) {
            Some(slot) => {
                debug!(package = info.package_name.as_str(), "media player updated");
                *slot = Arc::new(info);
                Ok(())
            }
            None => Err(BrowseError::NotFound(info.package_name)),
        }
    }

    pub fn set_play_status(&self, package_name: &str, play_status: PlayStatus) -> Result<()> {
        self.replace_player(package_name, |info| info.with_play_status(play_status))
    }

    /// Installs or clears the live handle of a player.
    pub fn set_media_controller(
        &self,
        package_name: &str,
        controller: Option<Arc<dyn MediaController>>,
    ) -> Result<()> {
        self.replace_player(package_name, move |info| {
            info.with_media_controller(controller)
        })
    }

    fn replace_player<F>(&self, package_name: &str, change: F) -> Result<()>
    where
        F: FnOnce(&MediaPlayerInfo) -> MediaPlayerInfo,
    {
        let mut state = self.write();
        let slot = state
            .players
            .get_mut(package_name)
            .ok_or_else(|| BrowseError::NotFound(package_name.to_string()))?;
        *slot = Arc::new(change(slot));
        Ok(())
    }

    pub fn unregister_player(&self, package_name: &str) -> Result<Arc<MediaPlayerInfo>> {
        let mut state = self.write();
        let removed = state
            .players
            .remove(package_name)
            .ok_or_else(|| BrowseError::NotFound(package_name.to_string()))?;
        state.uid_counter.bump();
        info!(package = package_name, "media player unregistered");
        Ok(removed)
    }

    pub fn get_player(&self, package_name: &str) -> Result<Arc<MediaPlayerInfo>> {
        self.read()
            .players
            .get(package_name)
            .cloned()
            .ok_or_else(|| BrowseError::NotFound(package_name.to_string()))
    }

    /// Snapshot of every player, ordered by package name.
    pub fn list_players(&self) -> Vec<Arc<MediaPlayerInfo>> {
        self.read().players.values().cloned().collect()
    }

    /// Registers or replaces a browsable player; returns the record it replaced.
    pub fn register_browsable(&self, info: BrowsePlayerInfo) -> Option<Arc<BrowsePlayerInfo>> {
        let mut state = self.write();
        let package = info.package_name.clone();
        let previous = state.browsable.insert(package.clone(), Arc::new(info));
        if previous.is_none() {
            state.uid_counter.bump();
            info!(package = package.as_str(), "browsable player registered");
        }
        previous
    }

    pub fn unregister_browsable(&self, package_name: &str) -> Result<Arc<BrowsePlayerInfo>> {
        let mut state = self.write();
        let removed = state
            .browsable
            .remove(package_name)
            .ok_or_else(|| BrowseError::NotFound(package_name.to_string()))?;
        state.uid_counter.bump();
        info!(package = package_name, "browsable player unregistered");
        Ok(removed)
    }

    pub fn get_browsable(&self, package_name: &str) -> Result<Arc<BrowsePlayerInfo>> {
        self.read()
            .browsable
            .get(package_name)
            .cloned()
            .ok_or_else(|| BrowseError::NotFound(package_name.to_string()))
    }

    pub fn list_browsable(&self) -> Vec<Arc<BrowsePlayerInfo>> {
        self.read().browsable.values().cloned().collect()
    }

    pub fn is_browsable(&self, package_name: &str) -> bool {
        self.read().browsable.contains_key(package_name)
    }

    pub fn uid_counter(&self) -> u16 {
        self.read().uid_counter.value()
    }

    /// Builds the media player list response for `start_item..=end_item`
    /// from one consistent snapshot.
    ///
    /// The range is capped at the configured maximum. An empty directory
    /// answers `NoAvailablePlayers` and a start past the end answers
    /// `RangeOutOfBounds`; both carry no items.
    pub fn player_list_response(
        &self,
        start_item: u32,
        end_item: u32,
    ) -> Result<PlayerDirectoryResponse> {
        let (players, uid_counter) = {
            let state = self.read();
            let players: Vec<_> = state.players.values().cloned().collect();
            (players, state.uid_counter.value())
        };

        if players.is_empty() {
            return PlayerDirectoryResponse::from_players(
                StatusCode::NoAvailablePlayers,
                uid_counter,
                &[],
            );
        }

        match item_window(start_item, end_item, players.len(), self.max_items) {
            Some(window) => PlayerDirectoryResponse::from_players(
                StatusCode::Success,
                uid_counter,
                &players[window],
            ),
            None => {
                debug!(
                    start_item,
                    end_item,
                    players = players.len(),
                    "player list range out of bounds"
                );
                PlayerDirectoryResponse::from_players(
                    StatusCode::RangeOutOfBounds,
                    uid_counter,
                    &[],
                )
            }
        }
    }
}
