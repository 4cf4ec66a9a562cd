//! AVRCP browsing constants and enumerations.
//!
//! Values follow the AVRCP 1.6 browsing tables. Every enum converts to its
//! raw wire representation with `From` and back with `TryFrom`.

use serde::Serialize;

use crate::errors::BrowseError;

/// Size in bytes of an item UID.
pub const UID_SIZE: usize = 8;

/// Number of chunks in a player feature bitmask.
pub const FEATURE_MASK_SIZE: usize = 16;

/// Playable flag values carried per folder item.
pub const ITEM_NOT_PLAYABLE: u8 = 0x00;
pub const ITEM_PLAYABLE: u8 = 0x01;

/// Attribute count sentinel meaning "all attributes".
pub const ATTRIBUTE_COUNT_ALL: u8 = 0x00;
/// Attribute count sentinel meaning "no attributes".
pub const ATTRIBUTE_COUNT_NONE: u8 = 0xFF;

/// Major player type bits (AVRCP 1.6, section 6.10.2.1).
pub mod major_player_type {
    pub const AUDIO: u8 = 0x01;
    pub const VIDEO: u8 = 0x02;
    pub const BROADCASTING_AUDIO: u8 = 0x04;
    pub const BROADCASTING_VIDEO: u8 = 0x08;
}

/// Player sub type bits (AVRCP 1.6, section 6.10.2.1).
pub mod player_sub_type {
    pub const NONE: u32 = 0x0000_0000;
    pub const AUDIO_BOOK: u32 = 0x0000_0001;
    pub const PODCAST: u32 = 0x0000_0002;
}

macro_rules! protocol_enum {
    (
        $(#[$meta:meta])*
        $name:ident : $repr:ty, $kind:literal {
            $($variant:ident = $value:expr,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const VARIANTS: &'static [$name] = &[$($name::$variant,)+];
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> $repr {
                match value {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl TryFrom<$repr> for $name {
            type Error = BrowseError;

            fn try_from(value: $repr) -> Result<Self, BrowseError> {
                match value {
                    $(x if x == $value => Ok($name::$variant),)+
                    _ => Err(BrowseError::UnknownValue {
                        kind: $kind,
                        value: u32::from(value),
                    }),
                }
            }
        }
    };
}

protocol_enum! {
    /// Which browsing tree a query targets.
    Scope: u8, "scope" {
        MediaPlayerList = 0x00,
        VirtualFilesystem = 0x01,
        Search = 0x02,
        NowPlaying = 0x03,
    }
}

protocol_enum! {
    ItemType: u8, "item type" {
        Player = 0x01,
        Folder = 0x02,
        Media = 0x03,
    }
}

protocol_enum! {
    FolderType: u8, "folder type" {
        Mixed = 0x00,
        Titles = 0x01,
        Albums = 0x02,
        Artists = 0x03,
        Genres = 0x04,
        Playlists = 0x05,
        Years = 0x06,
    }
}

protocol_enum! {
    PlayStatus: u8, "play status" {
        Stopped = 0x00,
        Playing = 0x01,
        Paused = 0x02,
        FwdSeek = 0x03,
        RevSeek = 0x04,
        Error = 0xFF,
    }
}

protocol_enum! {
    /// Media element attribute ids (AVRCP 1.6, Appendix E).
    MediaAttributeId: u32, "media attribute" {
        Title = 0x01,
        ArtistName = 0x02,
        AlbumName = 0x03,
        TrackNumber = 0x04,
        TotalNumberOfTracks = 0x05,
        Genre = 0x06,
        PlayingTime = 0x07,
        DefaultCoverArt = 0x08,
    }
}

protocol_enum! {
    /// Response status codes used by browsing commands.
    StatusCode: u8, "status code" {
        InvalidCommand = 0x00,
        InvalidParameter = 0x01,
        ParameterContentError = 0x02,
        InternalError = 0x03,
        Success = 0x04,
        UidChanged = 0x05,
        InvalidDirection = 0x07,
        NotADirectory = 0x08,
        DoesNotExist = 0x09,
        InvalidScope = 0x0A,
        RangeOutOfBounds = 0x0B,
        FolderItemNotPlayable = 0x0C,
        MediaInUse = 0x0D,
        NowPlayingListFull = 0x0E,
        SearchNotSupported = 0x0F,
        SearchInProgress = 0x10,
        InvalidPlayerId = 0x11,
        PlayerNotBrowsable = 0x12,
        PlayerNotAddressed = 0x13,
        NoValidSearchResults = 0x14,
        NoAvailablePlayers = 0x15,
        AddressedPlayerChanged = 0x16,
    }
}

impl Default for FolderType {
    fn default() -> Self {
        FolderType::Mixed
    }
}

impl Default for ItemType {
    fn default() -> Self {
        ItemType::Media
    }
}

/// Bluetooth address of the remote controller issuing a command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PeerAddress(pub [u8; 6]);

impl PeerAddress {
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl std::fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}
