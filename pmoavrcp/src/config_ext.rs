//! Extension de pmoconfig pour la navigation AVRCP

use tracing::warn;

use crate::settings::BrowseSettings;

/// Trait d'extension pour pmoconfig::Config
pub trait BrowseConfigExt {
    /// Lit la section `avrcp.browse`, en retombant sur les valeurs par défaut
    fn browse_settings(&self) -> BrowseSettings;
}

impl BrowseConfigExt for pmoconfig::Config {
    fn browse_settings(&self) -> BrowseSettings {
        let defaults = BrowseSettings::default();

        let max_folder_items = match self.get_max_folder_items() {
            Ok(0) => {
                warn!("max_folder_items is 0, using default");
                defaults.max_folder_items
            }
            Ok(max) => max,
            Err(_) => defaults.max_folder_items,
        };

        let uid_counter_start = match self.get_uid_counter_start() {
            Ok(start) => u16::try_from(start).unwrap_or_else(|_| {
                warn!(start, "uid_counter_start does not fit in 16 bits, using default");
                defaults.uid_counter_start
            }),
            Err(_) => defaults.uid_counter_start,
        };

        let database_aware = self.get_database_aware().unwrap_or(defaults.database_aware);

        BrowseSettings {
            max_folder_items,
            uid_counter_start,
            database_aware,
        }
    }
}
