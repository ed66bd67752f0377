use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FIELD_ACCOUNT: &str = "account";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_FULLNAME: &str = "fullname";

/// Decoded request body; anything other than a JSON object is rejected
pub type JsonObject = Map<String, Value>;

/// String field of a body; a field of any other type reads as absent
fn string_field(body: &JsonObject, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_string)
}

/// POST /ui/v1/signup body
#[derive(Debug, Default)]
pub struct SignupRequest {
    pub account: Option<String>,
    pub password: Option<String>,
    pub fullname: Option<String>,
}

impl SignupRequest {
    pub fn from_body(body: &JsonObject) -> Self {
        Self {
            account: string_field(body, FIELD_ACCOUNT),
            password: string_field(body, FIELD_PASSWORD),
            fullname: string_field(body, FIELD_FULLNAME),
        }
    }
}

/// POST /ui/v1/login body
#[derive(Debug, Default)]
pub struct LoginRequest {
    pub account: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn from_body(body: &JsonObject) -> Self {
        Self {
            account: string_field(body, FIELD_ACCOUNT),
            password: string_field(body, FIELD_PASSWORD),
        }
    }
}

/// PUT /ui/v1/user/{account} body; every field is optional
#[derive(Debug, Default)]
pub struct UpdateRequest {
    pub password: Option<String>,
    pub fullname: Option<String>,
}

impl UpdateRequest {
    pub fn from_body(body: &JsonObject) -> Self {
        Self {
            password: string_field(body, FIELD_PASSWORD),
            fullname: string_field(body, FIELD_FULLNAME),
        }
    }
}

/// GET /ui/v1/user?fullname=<name>
#[derive(Debug, Default, Deserialize)]
pub struct FullnameQuery {
    pub fullname: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserAck {
    pub user: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: String,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FullnameResponse {
    pub fullname: String,
    pub users: Vec<String>,
}

/// Decode a JSON object request body. A blank body reads as `{}`.
pub fn decode_body(body: &[u8]) -> Result<JsonObject, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonObject::new());
    }
    serde_json::from_slice(body)
}
