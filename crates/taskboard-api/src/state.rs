//! Application state shared across handlers

use crate::auth::JwtConfig;
use crate::store::{MemoryAccountStore, MemoryTaskStore};
use std::sync::Arc;
use std::time::Instant;
use taskboard_core::{AccountStore, AppConfig, TaskStore};

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Token signing configuration, derived from `config.auth` at startup
    pub jwt: JwtConfig,
    /// Account storage
    pub accounts: Arc<dyn AccountStore>,
    /// Task record storage
    pub tasks: Arc<dyn TaskStore>,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create application state with in-memory storage.
    ///
    /// The signing config is derived here, once; nothing downstream reads
    /// the secret from the environment again.
    pub fn new(config: AppConfig) -> Self {
        let jwt = JwtConfig::from(&config.auth);
        Self {
            config,
            jwt,
            accounts: Arc::new(MemoryAccountStore::new()),
            tasks: Arc::new(MemoryTaskStore::new()),
            start_time: Instant::now(),
        }
    }

    /// Uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
