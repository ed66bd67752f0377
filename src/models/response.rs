// JSON response envelope shared by every account endpoint

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer};
use tracing::error;

/// Outcome kind reported in `info.status`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiStatus {
    Ok,
    InvalidContent,
    UserExisted,
    UserNotFound,
    WrongPassword,
    NoAuth,
}

impl ApiStatus {
    pub fn code(self) -> i32 {
        match self {
            ApiStatus::Ok => 0,
            ApiStatus::InvalidContent => 1,
            ApiStatus::UserExisted => 2,
            ApiStatus::UserNotFound => 3,
            ApiStatus::WrongPassword => 4,
            ApiStatus::NoAuth => 5,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiStatus::Ok => "Success",
            ApiStatus::InvalidContent => "Invalid content",
            ApiStatus::UserExisted => "User existed",
            ApiStatus::UserNotFound => "User not found",
            ApiStatus::WrongPassword => "Wrong password",
            ApiStatus::NoAuth => "Not authorized",
        }
    }

    pub fn http_status(self) -> StatusCode {
        match self {
            ApiStatus::Ok => StatusCode::OK,
            ApiStatus::InvalidContent => StatusCode::BAD_REQUEST,
            ApiStatus::UserExisted => StatusCode::CONFLICT,
            ApiStatus::UserNotFound => StatusCode::NOT_FOUND,
            ApiStatus::WrongPassword => StatusCode::UNAUTHORIZED,
            ApiStatus::NoAuth => StatusCode::UNAUTHORIZED,
        }
    }
}

impl Serialize for ApiStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

#[derive(Debug, Serialize)]
pub struct Info {
    pub status: ApiStatus,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub info: Info,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(status: ApiStatus, data: T) -> Self {
        Self {
            info: Info {
                status,
                message: status.message().to_string(),
            },
            data,
        }
    }

    /// Serialize with four-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(128);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

/// Build the enveloped JSON response for `status`
///
/// A serialization failure degrades to a bare 500 with no body.
pub fn json_response<T: Serialize>(status: ApiStatus, data: T) -> Response {
    match Envelope::new(status, data).to_pretty_json() {
        Ok(body) => (
            status.http_status(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize response envelope");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let env = Envelope::new(
            ApiStatus::Ok,
            json!({"fullname": "James", "users": ["kobe", "jason"]}),
        );
        let bytes = env.to_pretty_json().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("\n    \"info\": {"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["info"]["status"], 0);
        assert_eq!(value["info"]["message"], "Success");
        assert_eq!(value["data"]["users"][1], "jason");
    }

    #[test]
    fn test_status_codes_are_distinct() {
        let all = [
            ApiStatus::Ok,
            ApiStatus::InvalidContent,
            ApiStatus::UserExisted,
            ApiStatus::UserNotFound,
            ApiStatus::WrongPassword,
            ApiStatus::NoAuth,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.code(), b.code());
                assert_ne!(a.message(), b.message());
            }
        }
    }

    #[tokio::test]
    async fn test_json_response_headers_and_status() {
        let response = json_response(ApiStatus::UserExisted, json!({"user": "ABCDEFGH"}));
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["info"]["status"], 2);
        assert_eq!(value["data"]["user"], "ABCDEFGH");
    }
}
