//! Custom `validator` rules shared by request DTOs.

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Usernames: letters, digits, underscore and hyphen.
pub static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex is valid"));

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>_-+=~`[]\\/;'";

/// Requires an uppercase letter, a lowercase letter, a digit and a special character.
pub fn check_password_strength(password: &str) -> Result<(), ValidationError> {
    let checks: [(&str, &'static str, fn(char) -> bool); 4] = [
        (
            "password_uppercase",
            "Password must contain at least one uppercase letter",
            |c| c.is_ascii_uppercase(),
        ),
        (
            "password_lowercase",
            "Password must contain at least one lowercase letter",
            |c| c.is_ascii_lowercase(),
        ),
        (
            "password_digit",
            "Password must contain at least one digit",
            |c| c.is_ascii_digit(),
        ),
        (
            "password_special",
            "Password must contain at least one special character",
            |c| SPECIAL_CHARS.contains(c),
        ),
    ];

    for (code, message, predicate) in checks {
        if !password.chars().any(predicate) {
            return Err(ValidationError::new(code).with_message(message.into()));
        }
    }

    Ok(())
}

/// Rejects NaN and infinite operands.
pub fn check_finite_inputs(inputs: &[f64]) -> Result<(), ValidationError> {
    if inputs.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ValidationError::new("finite").with_message("Inputs must be finite numbers".into()))
    }
}
