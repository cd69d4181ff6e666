use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::services::{LinkRegistry, PersistPolicy};
use crate::storage::{JsonFileStore, LinkStore};

pub struct StartupContext {
    pub registry: Arc<LinkRegistry>,
    pub store: Arc<JsonFileStore>,
}

/// Open the data files under `config.storage.data_dir` and build the registry.
pub fn open_registry(config: &StaticConfig) -> (Arc<LinkRegistry>, Arc<JsonFileStore>) {
    let store = Arc::new(JsonFileStore::new(&config.storage.data_dir));
    let registry = Arc::new(LinkRegistry::open(
        store.clone(),
        PersistPolicy::LogAndContinue,
    ));
    (registry, store)
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let (registry, store) = open_registry(config);
    info!(
        "Using storage: {} ({} links)",
        store.describe(),
        registry.total_urls()
    );

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { registry, store })
}
