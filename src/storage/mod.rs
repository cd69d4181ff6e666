//! Link persistence
//!
//! The registry keeps the authoritative state in memory; a `LinkStore`
//! only knows how to read the whole state back and rewrite it in full.

use tracing::{error, info};

use crate::errors::Result;

pub mod file_store;
pub mod models;

pub use file_store::{JsonFileStore, STATS_FILE_NAME, URL_FILE_NAME};
pub use models::{ClickMap, LinkRecord, LinkStats, StoreSnapshot, UrlMap};

pub trait LinkStore: Send + Sync {
    /// Read both maps. A missing file is an empty map, not an error.
    fn load(&self) -> Result<StoreSnapshot>;

    /// Overwrite the persisted state with the given maps.
    fn save(&self, urls: &UrlMap, clicks: &ClickMap) -> Result<()>;

    /// Human readable location, for logs
    fn describe(&self) -> String;

    /// Load, logging failures and falling back to empty maps.
    fn load_or_default(&self) -> StoreSnapshot {
        match self.load() {
            Ok(snapshot) => {
                info!(
                    "Loaded {} short links from {}",
                    snapshot.urls.len(),
                    self.describe()
                );
                snapshot
            }
            Err(e) => {
                error!("Error loading data from {}: {}", self.describe(), e);
                StoreSnapshot::default()
            }
        }
    }
}
