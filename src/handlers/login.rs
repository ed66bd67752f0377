use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::account::{decode_body, LoginRequest, LoginResponse, FIELD_ACCOUNT, FIELD_PASSWORD};
use crate::models::response::{json_response, ApiStatus};
use crate::utils::auth::secrets_match;
use crate::validation::credentials::{is_valid_account, is_valid_password};
use axum::{body::Bytes, extract::State, response::Response};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Exchange account and password for a bearer token
///
/// POST /ui/v1/login {"account", "password"}
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body = decode_body(&body).map_err(|e| {
        debug!(error = %e, "Malformed login body");
        ApiError::malformed_body(e)
    })?;
    let req = LoginRequest::from_body(&body);

    let account = req.account.ok_or_else(|| ApiError::missing_field(FIELD_ACCOUNT))?;
    let password = req.password.ok_or_else(|| ApiError::missing_field(FIELD_PASSWORD))?;

    if !is_valid_account(&account) {
        return Err(ApiError::invalid_field(FIELD_ACCOUNT, &account));
    }
    if !is_valid_password(&password) {
        return Err(ApiError::invalid_field(FIELD_PASSWORD, &password));
    }

    let rows = state.store.find_by_account(&account).await?;

    let stored = match rows.as_slice() {
        [] => {
            info!(account = %account, "Login for unknown account");
            return Err(ApiError::UserNotFound(account));
        }
        [user] => user,
        _ => {
            return Err(ApiError::DataIntegrity {
                account,
                count: rows.len(),
            })
        }
    };

    // Clear-text comparison against the stored value
    if !secrets_match(&password, &stored.password) {
        warn!(account = %account, "Login with wrong password");
        return Err(ApiError::WrongPassword(account));
    }

    let token = state.issuer.issue(&account)?;

    info!(account = %account, "User logged in");

    Ok(json_response(
        ApiStatus::Ok,
        LoginResponse {
            user: account,
            token,
        },
    ))
}
