//! Player feature bitmask encoding.
//!
//! The AVRCP player feature bitmask is 128 bits wide. It is carried to the
//! native side as [`FEATURE_MASK_SIZE`] chunks, each chunk holding one octet
//! of the mask (octet `n` covers feature bits `8n..8n+7`).

use serde::Serialize;

use crate::errors::{BrowseError, Result};
use crate::types::FEATURE_MASK_SIZE;

/// Bit positions of the player feature bitmask (AVRCP 1.6, section 6.10.2.1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerFeature {
    Select = 0,
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
    RootMenu = 9,
    Power = 36,
    VolumeUp = 37,
    VolumeDown = 38,
    Mute = 39,
    Play = 40,
    Stop = 41,
    Pause = 42,
    Record = 43,
    Rewind = 44,
    FastForward = 45,
    Eject = 46,
    Forward = 47,
    Backward = 48,
    VendorUnique = 56,
    BasicGroupNavigation = 57,
    AdvancedControlPlayer = 58,
    Browsing = 59,
    Searching = 60,
    AddToNowPlaying = 61,
    UidsUniqueInPlayerBrowseTree = 62,
    OnlyBrowsableWhenAddressed = 63,
    OnlySearchableWhenAddressed = 64,
    NowPlaying = 65,
    UidPersistency = 66,
    NumberOfItems = 67,
    CoverArt = 68,
}

impl PlayerFeature {
    fn position(self) -> (usize, u16) {
        let bit = self as usize;
        (bit / 8, 1 << (bit % 8))
    }
}

/// One player's feature bitmask, always exactly `FEATURE_MASK_SIZE` chunks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureMask([u16; FEATURE_MASK_SIZE]);

impl FeatureMask {
    /// Copies `chunks` into a new mask; the slice must hold exactly
    /// `FEATURE_MASK_SIZE` values.
    pub fn from_chunks(chunks: &[u16]) -> Result<Self> {
        FeatureMaskCodec::encode(chunks).map(FeatureMask)
    }

    pub fn from_features(features: &[PlayerFeature]) -> Self {
        let mut mask = FeatureMask::default();
        for feature in features {
            mask.set(*feature);
        }
        mask
    }

    pub fn set(&mut self, feature: PlayerFeature) {
        let (chunk, bit) = feature.position();
        self.0[chunk] |= bit;
    }

    pub fn has_feature(&self, feature: PlayerFeature) -> bool {
        let (chunk, bit) = feature.position();
        self.0[chunk] & bit != 0
    }

    pub fn chunks(&self) -> &[u16; FEATURE_MASK_SIZE] {
        &self.0
    }
}

impl AsRef<[u16]> for FeatureMask {
    fn as_ref(&self) -> &[u16] {
        &self.0
    }
}

pub struct FeatureMaskCodec;

impl FeatureMaskCodec {
    /// Encodes one item's mask. Short or long input is a caller error and is
    /// never padded or truncated.
    pub fn encode(mask: &[u16]) -> Result<[u16; FEATURE_MASK_SIZE]> {
        mask.try_into().map_err(|_| BrowseError::InvalidMaskSize {
            expected: FEATURE_MASK_SIZE,
            actual: mask.len(),
        })
    }

    /// Concatenates one fixed block per item, in item order.
    pub fn encode_all<M: AsRef<[u16]>>(masks: &[M]) -> Result<Vec<u16>> {
        let mut out = Vec::with_capacity(masks.len() * FEATURE_MASK_SIZE);
        for mask in masks {
            out.extend_from_slice(&Self::encode(mask.as_ref())?);
        }
        Ok(out)
    }
}
