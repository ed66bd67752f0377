// Handlers for /ui/v1/user/{account}; the auth gate has already matched the token to the path

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::account::{decode_body, UpdateRequest, UserAck, FIELD_FULLNAME, FIELD_PASSWORD};
use crate::models::response::{json_response, ApiStatus};
use crate::models::user::UserChanges;
use crate::validation::credentials::{is_valid_fullname, is_valid_password};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Full record of one account; an unknown account is an empty 200
///
/// GET /ui/v1/user/{account}
pub async fn fetch_user_handler(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<Response, ApiError> {
    let mut rows = state.store.find_by_account(&account).await?;

    match rows.len() {
        0 => {
            debug!(account = %account, "No record for account");
            Ok(StatusCode::OK.into_response())
        }
        1 => Ok(json_response(ApiStatus::Ok, rows.remove(0))),
        count => Err(ApiError::DataIntegrity { account, count }),
    }
}

/// Only fields present in the body are checked and written
pub fn validate_update(req: UpdateRequest) -> Result<UserChanges, ApiError> {
    if let Some(password) = &req.password {
        if !is_valid_password(password) {
            return Err(ApiError::invalid_field(FIELD_PASSWORD, password));
        }
    }
    if let Some(fullname) = &req.fullname {
        if !is_valid_fullname(fullname) {
            return Err(ApiError::invalid_field(FIELD_FULLNAME, fullname));
        }
    }

    Ok(UserChanges {
        password: req.password,
        fullname: req.fullname,
    })
}

/// Change password and/or fullname
///
/// PUT /ui/v1/user/{account} {"password"?, "fullname"?}
pub async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body = decode_body(&body).map_err(|e| {
        debug!(error = %e, "Malformed update body");
        ApiError::malformed_body(e)
    })?;
    let req = UpdateRequest::from_body(&body);

    let changes = validate_update(req)?;

    if changes.is_empty() {
        debug!(account = %account, "Nothing to update");
        return Ok(json_response(ApiStatus::Ok, ()));
    }

    state.store.update_fields(&account, &changes).await?;

    info!(
        account = %account,
        password_changed = changes.password.is_some(),
        fullname_changed = changes.fullname.is_some(),
        "User updated"
    );

    Ok(json_response(ApiStatus::Ok, ()))
}

/// Remove the account; removing an absent account also succeeds
///
/// DELETE /ui/v1/user/{account}
pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<Response, ApiError> {
    state.store.delete_by_account(&account).await?;

    info!(account = %account, "User deleted");

    Ok(json_response(ApiStatus::Ok, UserAck { user: account }))
}
