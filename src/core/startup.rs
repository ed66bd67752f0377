use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::keys::KeyPair;
use crate::core::config::{Config, StoreBackend};
use crate::core::state::AppState;
use crate::stores::{memory::MemoryStore, postgres::PgStore, AccountStore};

/// Load the key pair and open the configured store; both failures are fatal
pub async fn build_state(config: &Config) -> Result<AppState> {
    let keys = KeyPair::load(&config.keys).context("Failed to load signing keys")?;

    info!(
        dir = %config.keys.dir.display(),
        token_ttl_seconds = config.keys.token_ttl,
        "Signing keys loaded"
    );

    let store = open_store(config).await?;

    Ok(AppState::new(store, Arc::new(keys), config.keys.token_ttl()))
}

pub async fn open_store(config: &Config) -> Result<Arc<dyn AccountStore>> {
    match config.database.backend {
        StoreBackend::Postgres => {
            let store = PgStore::connect(&config.database)
                .await
                .context("Failed to open Postgres account store")?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory account store, accounts are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
