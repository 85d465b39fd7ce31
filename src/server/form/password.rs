//! Password strength validators applied when a password is set.

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Passwords rejected outright, compared case-insensitively
const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "12345678",
    "123456789",
    "1234567890",
    "111111",
    "abc123",
    "admin123",
    "baseball",
    "dragon",
    "football",
    "iloveyou",
    "letmein",
    "master",
    "monkey",
    "passw0rd",
    "password",
    "password1",
    "password123",
    "qwerty",
    "qwerty123",
    "qwertyuiop",
    "shadow",
    "sunshine",
    "superman",
    "trustno1",
    "welcome",
    "welcome1",
];

/// Every validator message that applies to `password`, empty when it is acceptable.
///
/// # Arguments
/// - `password` - Candidate password in plain text
/// - `username` - Account username, used for the similarity check
pub fn validate_password(password: &str, username: &str) -> Vec<String> {
    let mut messages = Vec::new();
    let lowered = password.to_lowercase();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        messages.push(format!(
            "This password is too short. It must contain at least {} characters.",
            MIN_PASSWORD_LENGTH
        ));
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        messages.push("This password is entirely numeric.".to_string());
    }

    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        messages.push("This password is too common.".to_string());
    }

    if is_similar(&lowered, &username.to_lowercase()) {
        messages.push("The password is too similar to the username.".to_string());
    }

    messages
}

/// Either value contains the other; usernames shorter than 3 characters are ignored.
fn is_similar(password: &str, username: &str) -> bool {
    if username.chars().count() < 3 || password.is_empty() {
        return false;
    }

    password.contains(username) || username.contains(password)
}
