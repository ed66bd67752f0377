use crate::auth::keys::KeyPair;
use crate::models::claims::TokenClaims;
use crate::utils::time::current_timestamp;
use jsonwebtoken::{encode, Algorithm, Header};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default token lifetime: 15 minutes
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Issues RS256 signed account tokens
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<KeyPair>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(keys: Arc<KeyPair>, ttl: Duration) -> Self {
        Self { keys, ttl }
    }

    /// Issue a token for `account`, valid from now for the configured lifetime
    pub fn issue(&self, account: &str) -> Result<String, TokenError> {
        self.issue_at(account, current_timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds)
    pub fn issue_at(&self, account: &str, now: i64) -> Result<String, TokenError> {
        let claims = TokenClaims::new(account, now + self.ttl.as_secs() as i64);
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        Ok(encode(
            &Header::new(Algorithm::RS256),
            claims,
            &self.keys.encoding,
        )?)
    }
}
