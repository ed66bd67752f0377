use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::account::{FullnameQuery, FullnameResponse, UserListResponse, FIELD_FULLNAME};
use crate::models::response::{json_response, ApiStatus};
use crate::models::user::User;
use axum::{
    extract::{Query, State},
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

fn accounts(rows: Vec<User>) -> Vec<String> {
    rows.into_iter().map(|user| user.account).collect()
}

/// List every account name
///
/// GET /ui/v1/users
pub async fn list_users_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let users = accounts(state.store.list_all().await?);

    debug!(count = users.len(), "Listed users");

    Ok(json_response(ApiStatus::Ok, UserListResponse { users }))
}

/// Account names whose fullname matches exactly
///
/// GET /ui/v1/user?fullname=<name>
pub async fn fullname_query_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FullnameQuery>,
) -> Result<Response, ApiError> {
    let fullname = params
        .fullname
        .ok_or_else(|| ApiError::missing_field(FIELD_FULLNAME))?;

    let users = accounts(state.store.find_by_fullname(&fullname).await?);

    debug!(fullname = %fullname, count = users.len(), "Fullname query");

    Ok(json_response(
        ApiStatus::Ok,
        FullnameResponse { fullname, users },
    ))
}
