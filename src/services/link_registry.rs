//! Link registry
//!
//! In-memory authoritative state for short links. Every mutation is written
//! through to the configured [`LinkStore`] while the write lock is held, so
//! the files on disk always reflect the order of in-memory updates.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::errors::{QuicklinkError, Result};
use crate::storage::{ClickMap, LinkRecord, LinkStats, LinkStore, StoreSnapshot, UrlMap};
use crate::utils::{DEFAULT_CODE_LENGTH, generate_random_code, is_valid_custom_code, is_valid_url};

/// Attempts to find an unused generated code before giving up
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Produces a candidate short code of the requested length
pub type CodeGenerator = fn(usize) -> String;

/// What to do when writing to the store fails after a mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistPolicy {
    /// Log the failure; the in-memory change stands and the call succeeds
    #[default]
    LogAndContinue,
    /// Return the failure to the caller; the in-memory change still stands
    Escalate,
}

#[derive(Debug, Default)]
struct RegistryState {
    urls: UrlMap,
    clicks: ClickMap,
}

impl RegistryState {
    /// Bring the two maps back in line after loading possibly damaged files.
    fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let StoreSnapshot { urls, mut clicks } = snapshot;

        let orphaned: Vec<String> = clicks
            .keys()
            .filter(|code| !urls.contains_key(*code))
            .cloned()
            .collect();
        for code in &orphaned {
            clicks.remove(code);
        }
        if !orphaned.is_empty() {
            warn!(
                "Dropped click counts for {} codes without a target URL",
                orphaned.len()
            );
        }

        let mut missing = 0usize;
        for code in urls.keys() {
            if !clicks.contains_key(code) {
                clicks.insert(code.clone(), 0);
                missing += 1;
            }
        }
        if missing > 0 {
            warn!("Reset click counts to 0 for {} codes", missing);
        }

        Self { urls, clicks }
    }

    fn record(&self, code: &str) -> Option<LinkRecord> {
        self.urls.get(code).map(|target| LinkRecord {
            code: code.to_string(),
            target_url: target.clone(),
            click_count: self.clicks.get(code).copied().unwrap_or(0),
        })
    }
}

/// Shared registry of short links
///
/// Constructed once by the composition root and handed to the HTTP layer as
/// `web::Data<Arc<LinkRegistry>>`.
pub struct LinkRegistry {
    state: RwLock<RegistryState>,
    store: Arc<dyn LinkStore>,
    policy: PersistPolicy,
    generator: CodeGenerator,
}

impl LinkRegistry {
    pub fn new(store: Arc<dyn LinkStore>, snapshot: StoreSnapshot, policy: PersistPolicy) -> Self {
        Self {
            state: RwLock::new(RegistryState::from_snapshot(snapshot)),
            store,
            policy,
            generator: generate_random_code,
        }
    }

    /// Load the initial state from `store` and build a registry on top of it.
    pub fn open(store: Arc<dyn LinkStore>, policy: PersistPolicy) -> Self {
        let snapshot = store.load_or_default();
        Self::new(store, snapshot, policy)
    }

    /// Replace the code generator, mainly useful to make tests deterministic.
    pub fn with_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn policy(&self) -> PersistPolicy {
        self.policy
    }

    /// Create a short link for `target_url`.
    ///
    /// An empty `custom_code` is treated as absent.
    pub fn create_short_link(
        &self,
        target_url: &str,
        custom_code: Option<&str>,
    ) -> Result<LinkRecord> {
        if !is_valid_url(target_url) {
            return Err(QuicklinkError::invalid_url("Invalid URL format"));
        }

        let custom_code = custom_code.filter(|c| !c.is_empty());
        if let Some(code) = custom_code
            && !is_valid_custom_code(code)
        {
            return Err(QuicklinkError::invalid_code("Invalid custom code format"));
        }

        let mut state = self.state.write();

        let code = match custom_code {
            Some(code) => {
                if state.urls.contains_key(code) {
                    debug!("Custom code already taken: {}", code);
                    return Err(QuicklinkError::code_taken("Custom code already exists"));
                }
                code.to_string()
            }
            None => self.next_free_code(&state.urls)?,
        };

        state.urls.insert(code.clone(), target_url.to_string());
        state.clicks.insert(code.clone(), 0);
        info!("Created short link: {} -> {}", code, target_url);

        self.persist(&state)?;

        Ok(LinkRecord {
            code,
            target_url: target_url.to_string(),
            click_count: 0,
        })
    }

    /// Look up `code`, count the click and return its target URL.
    pub fn resolve(&self, code: &str) -> Result<String> {
        let mut state = self.state.write();

        let Some(target) = state.urls.get(code).cloned() else {
            return Err(QuicklinkError::not_found("Short URL not found"));
        };

        let clicks = state.clicks.entry(code.to_string()).or_insert(0);
        *clicks += 1;
        debug!("Redirect {} -> {} (clicks: {})", code, target, *clicks);

        self.persist(&state)?;
        Ok(target)
    }

    pub fn stats(&self) -> LinkStats {
        let state = self.state.read();
        LinkStats {
            total_urls: state.urls.len(),
            total_clicks: state.clicks.values().sum(),
        }
    }

    pub fn total_urls(&self) -> usize {
        self.state.read().urls.len()
    }

    pub fn get(&self, code: &str) -> Option<LinkRecord> {
        self.state.read().record(code)
    }

    /// All links ordered by code
    pub fn list(&self) -> Vec<LinkRecord> {
        let state = self.state.read();
        let mut codes: Vec<&String> = state.urls.keys().collect();
        codes.sort();
        codes
            .into_iter()
            .filter_map(|code| state.record(code))
            .collect()
    }

    /// Write the current state to the store regardless of policy.
    pub fn flush(&self) -> Result<()> {
        let state = self.state.read();
        self.store.save(&state.urls, &state.clicks)
    }

    fn next_free_code(&self, urls: &UrlMap) -> Result<String> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = (self.generator)(DEFAULT_CODE_LENGTH);
            if !urls.contains_key(&candidate) {
                return Ok(candidate);
            }
            warn!(
                "Generated code {} collides with an existing link (attempt {}/{})",
                candidate, attempt, MAX_GENERATION_ATTEMPTS
            );
        }
        error!(
            "No free short code found after {} attempts",
            MAX_GENERATION_ATTEMPTS
        );
        Err(QuicklinkError::generation_exhausted(format!(
            "No free short code after {} attempts",
            MAX_GENERATION_ATTEMPTS
        )))
    }

    fn persist(&self, state: &RegistryState) -> Result<()> {
        match self.store.save(&state.urls, &state.clicks) {
            Ok(()) => Ok(()),
            Err(e) => match self.policy {
                PersistPolicy::LogAndContinue => {
                    error!("Error saving data to {}: {}", self.store.describe(), e);
                    Ok(())
                }
                PersistPolicy::Escalate => Err(QuicklinkError::persistence(e.to_string())),
            },
        }
    }
}
