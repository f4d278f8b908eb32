//! Wiring: database, shared store, transport stack and shell.

use crate::config::Config;
use crate::core::shell::Shell;
use crate::db::initialize::open_db;
use crate::db::kv::KvStore;
use crate::errors::AppResult;
use crate::gateway::fallback::SharedStore;
use crate::gateway::{Failover, Gateway, MockServer, RemoteTransport};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Remote API first with the local store behind it, or the local store
/// alone when no API is configured.
pub fn build_gateway(cfg: &Config, store: &SharedStore) -> AppResult<Gateway> {
    let local = MockServer::new(store.clone());
    match cfg.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => {
            tracing::debug!(url, "using remote API with local fallback");
            Ok(Gateway::new(Failover::new(RemoteTransport::new(url)?, local)))
        }
        None => {
            tracing::debug!("using local store only");
            Ok(Gateway::new(local))
        }
    }
}

pub fn build_shell(cfg: &Config) -> AppResult<Shell> {
    let pool = open_db(&cfg.database)?;
    let store: SharedStore = Arc::new(Mutex::new(KvStore::new(pool)));
    let gateway = build_gateway(cfg, &store)?;
    let mut shell = Shell::new(gateway, store, Duration::from_millis(cfg.toast_ms))?;
    shell.restore_session()?;
    Ok(shell)
}
