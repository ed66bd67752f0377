use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::account::{decode_body, SignupRequest, UserAck, FIELD_ACCOUNT, FIELD_FULLNAME, FIELD_PASSWORD};
use crate::models::response::{json_response, ApiStatus};
use crate::models::user::NewUser;
use crate::stores::StoreError;
use crate::validation::credentials::{is_valid_account, is_valid_fullname, is_valid_password};
use axum::{body::Bytes, extract::State, response::Response};
use std::sync::Arc;
use tracing::{debug, info};

/// Check a signup body: presence first, then shape, field by field
pub fn validate_signup(req: SignupRequest) -> Result<NewUser, ApiError> {
    let account = req.account.ok_or_else(|| ApiError::missing_field(FIELD_ACCOUNT))?;
    let password = req.password.ok_or_else(|| ApiError::missing_field(FIELD_PASSWORD))?;
    let fullname = req.fullname.ok_or_else(|| ApiError::missing_field(FIELD_FULLNAME))?;

    if !is_valid_account(&account) {
        return Err(ApiError::invalid_field(FIELD_ACCOUNT, &account));
    }
    if !is_valid_password(&password) {
        return Err(ApiError::invalid_field(FIELD_PASSWORD, &password));
    }
    if !is_valid_fullname(&fullname) {
        return Err(ApiError::invalid_field(FIELD_FULLNAME, &fullname));
    }

    Ok(NewUser::new(account, password, fullname))
}

/// Create an account
///
/// POST /ui/v1/signup {"account", "password", "fullname"}
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body = decode_body(&body).map_err(|e| {
        debug!(error = %e, "Malformed signup body");
        ApiError::malformed_body(e)
    })?;
    let req = SignupRequest::from_body(&body);

    let user = validate_signup(req)?;

    match state.store.insert(&user).await {
        Ok(()) => {}
        Err(StoreError::DuplicateAccount(_)) => {
            info!(account = %user.account, "Signup for existing account");
            return Err(ApiError::UserExisted(user.account));
        }
        Err(e) => return Err(e.into()),
    }

    info!(account = %user.account, "User signed up");

    Ok(json_response(ApiStatus::Ok, UserAck { user: user.account }))
}
