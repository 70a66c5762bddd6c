//! Gemini payload signing and nonces.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha384;

use super::PROVIDER;
use crate::error::ProviderError;

/// API key and secret.
#[derive(Clone)]
pub struct GeminiCredentials {
    pub key: String,
    pub secret: String,
}

impl fmt::Debug for GeminiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Hex HMAC-SHA384 of the base64 payload, keyed by the raw secret.
pub fn sign(secret: &str, payload: &str) -> Result<String, ProviderError> {
    let mut mac =
        Hmac::<Sha384>::new_from_slice(secret.as_bytes()).map_err(|e| ProviderError::Signing {
            provider: PROVIDER,
            reason: e.to_string(),
        })?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Strictly increasing request nonces based on wall-clock milliseconds.
///
/// Gemini rejects a nonce that does not exceed the previous one, which
/// millisecond timestamps alone cannot guarantee for back-to-back pages.
#[derive(Debug, Default)]
pub struct Nonce {
    last: AtomicI64,
}

impl Nonce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce: the current time, or one past the previous nonce.
    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut previous = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(previous + 1);
            match self.last.compare_exchange_weak(
                previous,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_reference_vector() {
        let signature = sign(
            "gemini-secret",
            "eyJyZXF1ZXN0IjoiL3YxL29yZGVycy9oaXN0b3J5In0=",
        )
        .unwrap();

        assert_eq!(
            signature,
            "a4683a59aaca9a10c407600163e5948d58d35d9c21521bea4da4913bb2295a39cddb13ce69463d2b0ec3bbbc46d242d6"
        );
    }

    #[test]
    fn nonces_strictly_increase() {
        let nonce = Nonce::new();
        let first = nonce.next();
        let second = nonce.next();
        let third = nonce.next();

        assert!(second > first);
        assert!(third > second);
    }
}
