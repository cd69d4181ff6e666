use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// code → 目标 URL
pub type UrlMap = HashMap<String, String>;
/// code → 点击次数
pub type ClickMap = HashMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub code: String,
    pub target_url: String,
    #[serde(default)]
    pub click_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    pub total_urls: usize,
    pub total_clicks: u64,
}

/// Both persisted maps, as read from or written to a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub urls: UrlMap,
    pub clicks: ClickMap,
}

impl StoreSnapshot {
    pub fn new(urls: UrlMap, clicks: ClickMap) -> Self {
        Self { urls, clicks }
    }
}
