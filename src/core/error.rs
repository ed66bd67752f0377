// Error taxonomy of the account endpoints and its mapping to responses

use crate::auth::issuer::TokenError;
use crate::auth::verifier::AuthError;
use crate::models::response::{json_response, ApiStatus};
use crate::stores::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

/// Everything a handler or the auth gate can fail with
///
/// Client-facing variants carry the `data` payload of the envelope.
/// `DataIntegrity`, `Store` and `Token` are logged and answered with a bare 500.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid content: {0}")]
    InvalidContent(Value),

    #[error("User already exists: {0}")]
    UserExisted(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Wrong password for account {0}")]
    WrongPassword(String),

    #[error("Not authorized: {0}")]
    NoAuth(Value),

    #[error("{count} records were found for account {account}")]
    DataIntegrity { account: String, count: usize },

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Token failure: {0}")]
    Token(#[from] TokenError),
}

impl ApiError {
    pub fn malformed_body(err: serde_json::Error) -> Self {
        ApiError::InvalidContent(json!({ "error": err.to_string() }))
    }

    pub fn missing_field(field: &str) -> Self {
        ApiError::InvalidContent(json!({ "missing_field": field }))
    }

    pub fn invalid_field(field: &str, value: &str) -> Self {
        ApiError::InvalidContent(json!({ "invalid": { "field": field, "value": value } }))
    }

    pub fn rejected_token(err: AuthError) -> Self {
        ApiError::NoAuth(json!({ "error": err.to_string() }))
    }

    /// Status kind for client-facing errors; `None` for internal failures
    pub fn status(&self) -> Option<ApiStatus> {
        match self {
            ApiError::InvalidContent(_) => Some(ApiStatus::InvalidContent),
            ApiError::UserExisted(_) => Some(ApiStatus::UserExisted),
            ApiError::UserNotFound(_) => Some(ApiStatus::UserNotFound),
            ApiError::WrongPassword(_) => Some(ApiStatus::WrongPassword),
            ApiError::NoAuth(_) => Some(ApiStatus::NoAuth),
            ApiError::DataIntegrity { .. } | ApiError::Store(_) | ApiError::Token(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Some(status) = self.status() else {
            match &self {
                ApiError::DataIntegrity { account, count } => {
                    error!(account = %account, count, "Data integrity violation: duplicate account rows")
                }
                ApiError::Store(e) => error!(error = %e, "Account store failure"),
                ApiError::Token(e) => error!(error = %e, "Token issuance failure"),
                _ => {}
            }
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };

        let data = match self {
            ApiError::InvalidContent(data) | ApiError::NoAuth(data) => data,
            ApiError::UserExisted(account) => json!({ "user": account }),
            ApiError::UserNotFound(account) | ApiError::WrongPassword(account) => {
                json!({ "account": account })
            }
            ApiError::DataIntegrity { .. } | ApiError::Store(_) | ApiError::Token(_) => Value::Null,
        };

        json_response(status, data)
    }
}
