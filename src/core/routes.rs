// HTTP routes configuration

use crate::auth::gate::{require_account_token, require_token};
use crate::core::state::AppState;
use crate::handlers::{
    account::{delete_user_handler, fetch_user_handler, update_user_handler},
    fallback::{account_method_fallback, fallback_handler},
    health::health_handler,
    index::index_handler,
    login::login_handler,
    signup::signup_handler,
    users::{fullname_query_handler, list_users_handler},
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub const API_PREFIX: &str = "/ui/v1";

pub fn build_router(state: Arc<AppState>) -> Router {
    // Token must belong to the account in the path
    let account_routes = Router::new()
        .route(
            "/user/{account}",
            get(fetch_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler)
                .fallback(account_method_fallback),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_account_token,
        ));

    // Any valid token
    let collection_routes = Router::new()
        .route("/users", get(list_users_handler))
        .route("/user", get(fullname_query_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    let v1 = Router::new()
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .merge(collection_routes)
        .merge(account_routes);

    Router::new()
        .route("/ui", get(index_handler).post(index_handler))
        .nest(API_PREFIX, v1)
        .route("/health", get(health_handler))
        .fallback(fallback_handler)
        .with_state(state)
}
