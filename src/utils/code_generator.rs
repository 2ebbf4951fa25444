//! Short code generation and custom code sanitizing.
//!
//! Codes double as DNS labels (`{code}.{domain}`), so they are lower-case
//! ASCII letters, digits and hyphens only.

use rand::Rng;
use serde_json::json;

use crate::error::AppError;

/// Alphabet for generated codes. Omits `l`, `o`, `0` and `1`, which are easy to misread.
pub const CODE_ALPHABET: &[u8] = b"abcdefghijkmnpqrstuvwxyz23456789";

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 8;

/// Maximum length of a custom code after sanitizing.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 20;

/// Codes that would shadow a system host or route.
pub const RESERVED_CODES: &[&str] = &["www", "api", "admin", "health"];

/// Generates a random short code from [`CODE_ALPHABET`].
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..GENERATED_CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Normalizes a user-provided custom code.
///
/// The input is lower-cased, every character outside `[a-z0-9-]` is dropped,
/// and the result is truncated to [`MAX_CUSTOM_CODE_LENGTH`] characters.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if nothing is left after sanitizing or if
/// the result is one of [`RESERVED_CODES`].
pub fn sanitize_custom_code(input: &str) -> Result<String, AppError> {
    let code: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .take(MAX_CUSTOM_CODE_LENGTH)
        .collect();

    if code.is_empty() {
        return Err(AppError::bad_request(
            "Custom code must contain letters, digits or hyphens",
            json!({ "customCode": input }),
        ));
    }

    if RESERVED_CODES.contains(&code.as_str()) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(code)
}
