use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// True once `now` is strictly past `expires_at`
pub fn is_expired(expires_at: i64, now: i64) -> bool {
    now > expires_at
}

/// True while `now` is strictly before `not_before`
pub fn is_not_yet_valid(not_before: i64, now: i64) -> bool {
    now < not_before
}
