use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::{DecodingKey, EncodingKey};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt::Display;
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Where the signing secret lives
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SecretRef {
    pub namespace: String,
    pub name: String,
    pub key: String,
}

impl Default for SecretRef {
    fn default() -> Self {
        SecretRef {
            namespace: "liveclasses".to_string(),
            name: "jitsi-jwt-secret".to_string(),
            key: "JITSI_JWT_SECRET".to_string(),
        }
    }
}

impl Display for SecretRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}[{}]", self.namespace, self.name, self.key)
    }
}

//--------------------------------------------------------------------------------------------------
// Errors
//--------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("could not read secret {secret}: {reason}")]
    Access { secret: SecretRef, reason: String },

    #[error("secret {secret} not found or empty")]
    Empty { secret: SecretRef },

    #[error("secret {secret} could not be decoded: {reason}")]
    Decode { secret: SecretRef, reason: String },
}

//--------------------------------------------------------------------------------------------------
// Trait for anything able to look up a secret's stored (base64) value
//--------------------------------------------------------------------------------------------------

pub trait SecretProvider {
    /// Returns the field exactly as stored, still base64 encoded.
    fn fetch(&self, secret: &SecretRef) -> Result<Vec<u8>, SecretError>;
}

impl<T: SecretProvider + ?Sized> SecretProvider for &T {
    fn fetch(&self, secret: &SecretRef) -> Result<Vec<u8>, SecretError> {
        (**self).fetch(secret)
    }
}

//--------------------------------------------------------------------------------------------------
// Signing secret
//--------------------------------------------------------------------------------------------------

#[derive(Debug)]
pub struct SigningSecret(SecretString);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        SigningSecret(SecretString::from(secret.into()))
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.0.expose_secret().as_bytes())
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.0.expose_secret().as_bytes())
    }
}

/// Fetch the secret and decode it. Whitespace is trimmed on both sides of the decode, a stray
/// trailing newline in the stored value would otherwise change every signature.
pub fn fetch_signing_secret<P>(provider: &P, secret: &SecretRef) -> Result<SigningSecret, SecretError>
where
    P: SecretProvider + ?Sized,
{
    debug!("Fetching signing secret {}", secret);
    let raw = provider.fetch(secret)?;

    let decode_error = |reason: String| {
        warn!("Signing secret {} failed to decode: {}", secret, reason);
        SecretError::Decode {
            secret: secret.clone(),
            reason,
        }
    };

    let encoded = std::str::from_utf8(&raw)
        .map_err(|e| decode_error(e.to_string()))?
        .trim();
    if encoded.is_empty() {
        return Err(SecretError::Empty {
            secret: secret.clone(),
        });
    }

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|e| decode_error(e.to_string()))?;
    let decoded = String::from_utf8(decoded).map_err(|e| decode_error(e.to_string()))?;

    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        return Err(SecretError::Empty {
            secret: secret.clone(),
        });
    }

    Ok(SigningSecret::new(trimmed))
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticSecretProvider;

    fn exposed(secret: &SigningSecret) -> String {
        secret.0.expose_secret().to_string()
    }

    #[test]
    fn test_decodes_and_trims() {
        let provider = StaticSecretProvider::with_raw(format!(
            "  {}\n",
            STANDARD.encode("shared-secret\n")
        ));
        let secret = fetch_signing_secret(&provider, &SecretRef::default()).unwrap();
        assert_eq!(exposed(&secret), "shared-secret");
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_empty_encoded_value() {
        let provider = StaticSecretProvider::with_raw("\n");
        let err = fetch_signing_secret(&provider, &SecretRef::default()).unwrap_err();
        assert!(matches!(err, SecretError::Empty { .. }));
    }

    #[test]
    fn test_value_that_decodes_to_whitespace_is_empty() {
        let provider = StaticSecretProvider::with_raw(STANDARD.encode(" \n"));
        let err = fetch_signing_secret(&provider, &SecretRef::default()).unwrap_err();
        assert!(matches!(err, SecretError::Empty { .. }));
    }

    #[test]
    fn test_invalid_base64() {
        let provider = StaticSecretProvider::with_raw("not base64!!");
        let err = fetch_signing_secret(&provider, &SecretRef::default()).unwrap_err();
        assert!(matches!(err, SecretError::Decode { .. }));
    }

    #[test]
    fn test_non_utf8_secret() {
        let provider = StaticSecretProvider::with_raw(STANDARD.encode([0xff, 0xfe, 0xfd]));
        let err = fetch_signing_secret(&provider, &SecretRef::default()).unwrap_err();
        assert!(matches!(err, SecretError::Decode { .. }));
    }

    #[test]
    fn test_access_error_passes_through() {
        let provider = StaticSecretProvider::failing("forbidden");
        let err = fetch_signing_secret(&provider, &SecretRef::default()).unwrap_err();
        assert!(matches!(err, SecretError::Access { reason, .. } if reason == "forbidden"));
    }

    #[test]
    fn test_debug_does_not_leak() {
        let secret = SigningSecret::new("hunter2");
        assert!(!format!("{:?}", secret).contains("hunter2"));
    }
}
