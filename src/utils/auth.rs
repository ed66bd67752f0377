/// Supplied password equals the stored one; equal-length inputs are compared in full
pub fn secrets_match(provided: &str, stored: &str) -> bool {
    let (provided, stored) = (provided.as_bytes(), stored.as_bytes());
    if provided.len() != stored.len() {
        return false;
    }

    let diff = provided
        .iter()
        .zip(stored)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));
    diff == 0
}
