//! Shared credentials for user fixtures.
//!
//! Placeholder values, never used outside of tests.

/// Username given to the default fixture user.
pub static TEST_USERNAME: &str = "testuser";

/// Plain text password for every fixture user.
///
/// Long enough and varied enough to pass the password validators so the same
/// value can be submitted through registration and login forms.
pub static TEST_PASSWORD: &str = "correct-horse-battery";
