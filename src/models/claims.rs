use serde::{Deserialize, Serialize};

/// Claims carried by an account token
///
/// `acct` and `authorized` default when absent so that a token missing them
/// fails the claim checks rather than the structural ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub acct: String,
    #[serde(default)]
    pub authorized: bool,
    /// Expiry, unix seconds
    pub exp: i64,
    /// Not-before, unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
}

impl TokenClaims {
    pub fn new(acct: impl Into<String>, exp: i64) -> Self {
        Self {
            acct: acct.into(),
            authorized: true,
            exp,
            nbf: None,
        }
    }
}
