//! Password hashing with Argon2id.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;
use serde_json::json;
use std::sync::LazyLock;

use crate::error::AppError;

/// Hashes a password into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the hasher rejects its parameters.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal("Could not hash password", json!({ "reason": e.to_string() })))
}

/// Checks a password against a stored PHC string.
///
/// Returns `false` for a wrong or empty password and for a malformed hash.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    if password.is_empty() {
        return false;
    }

    let Ok(parsed) = PasswordHash::new(password_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    let password = generate_password();
    hash_password(&password).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Could not build dummy password hash");
        String::new()
    })
});

/// A valid Argon2 PHC string that no submitted password matches.
///
/// Verified against when a login names an unknown user so the response
/// takes as long as a wrong password.
pub fn dummy_hash() -> &'static str {
    &DUMMY_HASH
}

/// Generates a random password that satisfies the registration policy.
///
/// # Format
///
/// - Length: 16 characters
/// - Always contains an uppercase letter, a lowercase letter, a digit and one of `!@#$%^&*`
pub fn generate_password() -> String {
    const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
    const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
    const DIGITS: &[u8] = b"23456789";
    const SPECIAL: &[u8] = b"!@#$%^&*";
    const LEN: usize = 16;

    let mut rng = rand::rng();
    let all: Vec<u8> = [UPPER, LOWER, DIGITS, SPECIAL].concat();

    let mut chars: Vec<u8> = [UPPER, LOWER, DIGITS, SPECIAL]
        .iter()
        .map(|set| set[rng.random_range(0..set.len())])
        .collect();

    while chars.len() < LEN {
        chars.push(all[rng.random_range(0..all.len())]);
    }

    // Fisher-Yates so the guaranteed classes are not always at the front.
    for i in (1..chars.len()).rev() {
        let j = rng.random_range(0..=i);
        chars.swap(i, j);
    }

    chars.into_iter().map(char::from).collect()
}
