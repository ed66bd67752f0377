// Shape rules for client-supplied account fields

pub const CREDENTIAL_MIN_LEN: usize = 8;
pub const CREDENTIAL_MAX_LEN: usize = 20;
pub const FULLNAME_MAX_LEN: usize = 50;

/// `^[A-Za-z0-9_]{8,20}$`, anchored on the whole string
fn is_credential(value: &str) -> bool {
    let bytes = value.as_bytes();

    (CREDENTIAL_MIN_LEN..=CREDENTIAL_MAX_LEN).contains(&bytes.len())
        && bytes.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'_')
}

pub fn is_valid_account(account: &str) -> bool {
    is_credential(account)
}

pub fn is_valid_password(password: &str) -> bool {
    is_credential(password)
}

/// Non-empty and at most 50 characters
pub fn is_valid_fullname(fullname: &str) -> bool {
    !fullname.is_empty() && fullname.chars().count() <= FULLNAME_MAX_LEN
}
