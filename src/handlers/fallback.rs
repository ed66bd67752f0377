use crate::validation::credentials::is_valid_account;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub const NOT_FOUND_BODY: &str = "404 page not found";

/// Unmatched routes, and account paths that are not account names
pub async fn fallback_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Unserved methods on `/user/{account}`: 405 for an account name, 404 otherwise
pub async fn account_method_fallback(Path(account): Path<String>) -> Response {
    if is_valid_account(&account) {
        StatusCode::METHOD_NOT_ALLOWED.into_response()
    } else {
        fallback_handler().await.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::body_bytes;

    #[tokio::test]
    async fn test_account_method_fallback() {
        let response = account_method_fallback(Path("ABCDEFGH".to_string())).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = account_method_fallback(Path("short".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_bytes(response).await, NOT_FOUND_BODY.as_bytes());
    }
}
