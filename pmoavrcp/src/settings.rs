//! Tunables of the browsing layer.

use serde::Serialize;

pub const DEFAULT_MAX_FOLDER_ITEMS: usize = 255;

/// Values the directory and the now-playing listing read at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrowseSettings {
    /// Upper bound applied to every requested item range.
    pub max_folder_items: usize,
    pub uid_counter_start: u16,
    /// When unset the UID counter stays at 0.
    pub database_aware: bool,
}

impl BrowseSettings {
    /// The range cap actually applied: a zero cap is read as one item.
    pub fn max_items(&self) -> usize {
        self.max_folder_items.max(1)
    }
}

impl Default for BrowseSettings {
    fn default() -> Self {
        Self {
            max_folder_items: DEFAULT_MAX_FOLDER_ITEMS,
            uid_counter_start: 0,
            database_aware: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_cap_is_clamped() {
        let settings = BrowseSettings {
            max_folder_items: 0,
            ..BrowseSettings::default()
        };
        assert_eq!(settings.max_items(), 1);
        assert_eq!(BrowseSettings::default().max_items(), DEFAULT_MAX_FOLDER_ITEMS);
    }
}
