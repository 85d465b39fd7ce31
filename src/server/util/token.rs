use rand::Rng;

/// Random 40 character hex key for an API token
pub fn generate_token_key() -> String {
    let mut bytes = [0u8; 20];
    rand::rng().fill(&mut bytes);

    hex::encode(bytes)
}

/// Random 64 character hex value for a session CSRF token
pub fn generate_csrf_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);

    hex::encode(bytes)
}
