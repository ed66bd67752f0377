// Application state (AppState)

use crate::auth::issuer::TokenIssuer;
use crate::auth::keys::KeyPair;
use crate::auth::verifier::TokenVerifier;
use crate::stores::AccountStore;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
///
/// Handlers keep no state of their own between requests; everything they
/// share lives here and is read-only apart from the store.
#[derive(Clone)]
pub struct AppState {
    /// Account store adapter
    pub store: Arc<dyn AccountStore>,

    /// Signs tokens on login
    pub issuer: TokenIssuer,

    /// Checks tokens in the auth gate
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(store: Arc<dyn AccountStore>, keys: Arc<KeyPair>, token_ttl: Duration) -> Self {
        Self {
            store,
            issuer: TokenIssuer::new(Arc::clone(&keys), token_ttl),
            verifier: TokenVerifier::new(keys),
        }
    }
}
