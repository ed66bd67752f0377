// Token verification for the auth gate

use crate::auth::keys::KeyPair;
use crate::models::claims::TokenClaims;
use crate::utils::time::{current_timestamp, is_expired, is_not_yet_valid};
use jsonwebtoken::{decode, Algorithm, Validation};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Reasons a bearer token is refused
///
/// All of them answer "not authorized"; the message tells them apart.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingBearer,

    #[error("Unknown JWT error")]
    Unknown,

    #[error("JWT is not active yet")]
    NotActive,

    #[error("JWT is expired")]
    Expired,

    #[error("The account is not matched")]
    AcctNotMatch,

    #[error("Not authorized JWT")]
    NotAuthorized,
}

#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<KeyPair>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: Arc<KeyPair>) -> Self {
        // Time windows are checked here, after the signature, so the checks
        // run in a fixed order against an injectable clock.
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self { keys, validation }
    }

    /// Check that `token` authorizes operations on `account`
    pub fn verify(&self, token: &str, account: &str) -> Result<(), AuthError> {
        self.verify_at(token, account, current_timestamp())
    }

    pub fn verify_at(&self, token: &str, account: &str, now: i64) -> Result<(), AuthError> {
        let claims = self.checked_claims(token, now)?;

        if claims.acct != account {
            return Err(AuthError::AcctNotMatch);
        }
        if !claims.authorized {
            return Err(AuthError::NotAuthorized);
        }

        Ok(())
    }

    /// Check a token that is not bound to a path account; returns its `acct`
    pub fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        self.authenticate_at(token, current_timestamp())
    }

    pub fn authenticate_at(&self, token: &str, now: i64) -> Result<String, AuthError> {
        let claims = self.checked_claims(token, now)?;

        if !claims.authorized {
            return Err(AuthError::NotAuthorized);
        }

        Ok(claims.acct)
    }

    /// Signature and structure first, then not-before, then expiry
    fn checked_claims(&self, token: &str, now: i64) -> Result<TokenClaims, AuthError> {
        let claims = decode::<TokenClaims>(token, &self.keys.decoding, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token failed structural validation");
                AuthError::Unknown
            })?
            .claims;

        if let Some(nbf) = claims.nbf {
            if is_not_yet_valid(nbf, now) {
                return Err(AuthError::NotActive);
            }
        }

        if is_expired(claims.exp, now) {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}
