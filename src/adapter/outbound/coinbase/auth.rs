//! Coinbase request signing.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::PROVIDER;
use crate::error::ProviderError;

/// API key, base64 secret and passphrase.
#[derive(Clone)]
pub struct CoinbaseCredentials {
    pub key: String,
    pub secret: String,
    pub passphrase: String,
}

impl fmt::Debug for CoinbaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinbaseCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

/// Sign a request: base64(HMAC-SHA256(decoded secret, ts + method + path + body)).
pub fn sign(
    secret: &str,
    timestamp: i64,
    method: &str,
    path: &str,
    body: &str,
) -> Result<String, ProviderError> {
    let key = STANDARD.decode(secret.trim()).map_err(|e| ProviderError::Signing {
        provider: PROVIDER,
        reason: format!("secret is not base64: {e}"),
    })?;

    let mut mac = Hmac::<Sha256>::new_from_slice(&key).map_err(|e| ProviderError::Signing {
        provider: PROVIDER,
        reason: e.to_string(),
    })?;
    mac.update(format!("{timestamp}{method}{path}{body}").as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_reference_vector() {
        let signature = sign(
            "Y29pbmJhc2Utc2VjcmV0",
            1_700_000_000,
            "GET",
            "/orders?status=done&product_id=BAT-USD&limit=100",
            "",
        )
        .unwrap();

        assert_eq!(signature, "DhO4Pahc+OLuHfGZzFETPwiBjUY5r+Gj+BnzLed97Ss=");
    }

    #[test]
    fn non_base64_secret_is_rejected() {
        assert!(matches!(
            sign("not base64!", 1, "GET", "/", ""),
            Err(ProviderError::Signing { .. })
        ));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = CoinbaseCredentials {
            key: "k".into(),
            secret: "s3cr3t".into(),
            passphrase: "pass".into(),
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("s3cr3t"));
        assert!(!debug.contains("pass\""));
    }
}
