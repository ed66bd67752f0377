// Auth gate in front of every account-scoped route

use crate::auth::verifier::AuthError;
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::fallback::fallback_handler;
use crate::validation::credentials::is_valid_account;
use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

const BEARER_PREFIX: &str = "Bearer ";

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

/// Gate for `/user/{account}`: the token must be valid for the path account
///
/// A path segment that is not an account name is answered like an unknown route.
pub async fn require_account_token(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
    request: Request,
    next: Next,
) -> Response {
    if !is_valid_account(&account) {
        return fallback_handler().await.into_response();
    }

    let Some(token) = bearer_token(request.headers()) else {
        warn!(account = %account, "Request without bearer token");
        return ApiError::NoAuth(json!({ "account": account })).into_response();
    };

    if let Err(e) = state.verifier.verify(token, &account) {
        warn!(account = %account, error = %e, "Token rejected");
        return ApiError::rejected_token(e).into_response();
    }

    debug!(account = %account, "Token accepted");
    next.run(request).await
}

/// Gate for collection routes, which carry no path account
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        warn!("Request without bearer token");
        return ApiError::rejected_token(AuthError::MissingBearer).into_response();
    };

    match state.verifier.authenticate(token) {
        Ok(account) => {
            debug!(account = %account, "Token accepted");
            next.run(request).await
        }
        Err(e) => {
            warn!(error = %e, "Token rejected");
            ApiError::rejected_token(e).into_response()
        }
    }
}
