use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use super::{ClickMap, LinkStore, StoreSnapshot, UrlMap};
use crate::errors::{QuicklinkError, Result};

pub const URL_FILE_NAME: &str = "url_data.json";
pub const STATS_FILE_NAME: &str = "stats_data.json";

/// Two JSON object files under one data directory.
///
/// `url_data.json` holds `{code: url}` and `stats_data.json` holds
/// `{code: clicks}`. Every save rewrites both files in place, so a crash
/// in the middle of a write can leave a truncated file behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    data_file: PathBuf,
    stats_file: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            data_file: data_dir.join(URL_FILE_NAME),
            stats_file: data_dir.join(STATS_FILE_NAME),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn stats_file(&self) -> &Path {
        &self.stats_file
    }

    fn read_map<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
        if !path.exists() {
            debug!("{} not found, starting empty", path.display());
            return Ok(T::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            QuicklinkError::file_operation(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            QuicklinkError::serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn write_map<T: Serialize>(path: &Path, map: &T) -> Result<()> {
        let json = serde_json::to_string(map)?;
        fs::write(path, json).map_err(|e| {
            QuicklinkError::file_operation(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Read one map, logging a failure and treating it as empty.
    fn read_map_lossy<T: DeserializeOwned + Default>(path: &Path) -> T {
        match Self::read_map(path) {
            Ok(map) => map,
            Err(e) => {
                error!("Error loading data: {}", e);
                T::default()
            }
        }
    }
}

impl LinkStore for JsonFileStore {
    fn load(&self) -> Result<StoreSnapshot> {
        let urls: UrlMap = Self::read_map(&self.data_file)?;
        let clicks: ClickMap = Self::read_map(&self.stats_file)?;
        Ok(StoreSnapshot::new(urls, clicks))
    }

    fn save(&self, urls: &UrlMap, clicks: &ClickMap) -> Result<()> {
        if !self.data_dir.as_os_str().is_empty() && !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(|e| {
                QuicklinkError::file_operation(format!(
                    "Failed to create data directory {}: {}",
                    self.data_dir.display(),
                    e
                ))
            })?;
            info!("Created data directory: {}", self.data_dir.display());
        }

        Self::write_map(&self.data_file, urls)?;
        Self::write_map(&self.stats_file, clicks)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json files in {}", self.data_dir.display())
    }

    // 每个文件单独容错：一个文件损坏不影响另一个
    fn load_or_default(&self) -> StoreSnapshot {
        let urls: UrlMap = Self::read_map_lossy(&self.data_file);
        let clicks: ClickMap = Self::read_map_lossy(&self.stats_file);
        info!("Loaded {} short links from {}", urls.len(), self.describe());
        StoreSnapshot::new(urls, clicks)
    }
}
