//! Admin key authentication for the management API.

use hmac::{Hmac, Mac};
use rand::Rng;
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Authenticates management requests against the configured admin key.
///
/// The key itself is not retained. At startup the service draws a random
/// per-process secret and stores only the HMAC-SHA256 tag of the admin key;
/// presented tokens are tagged with the same secret and compared with
/// [`Mac::verify_slice`], which runs in constant time.
pub struct AuthService {
    secret: [u8; 32],
    expected_tag: Vec<u8>,
}

impl AuthService {
    pub fn new(admin_key: &str) -> Self {
        let mut secret = [0u8; 32];
        rand::rng().fill(&mut secret);

        let expected_tag = Self::mac(&secret, admin_key).finalize().into_bytes().to_vec();

        Self {
            secret,
            expected_tag,
        }
    }

    fn mac(secret: &[u8], token: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        mac
    }

    /// Checks a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is empty or does not
    /// match the admin key.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if token.is_empty() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Empty token"}),
            ));
        }

        Self::mac(&self.secret, token)
            .verify_slice(&self.expected_tag)
            .map_err(|_| {
                AppError::unauthorized("Unauthorized", json!({"reason": "Invalid token"}))
            })
    }
}
