use crate::secret::{SecretError, SecretProvider, SecretRef};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::atomic::{AtomicUsize, Ordering};

//--------------------------------------------------------------------------------------------------
// In-memory secret provider that counts lookups
//--------------------------------------------------------------------------------------------------

pub struct StaticSecretProvider {
    value: Result<Vec<u8>, String>,
    calls: AtomicUsize,
}

impl StaticSecretProvider {
    /// Stores `secret` base64 encoded, the way the cluster does.
    pub fn with_plain(secret: &str) -> Self {
        Self::with_raw(STANDARD.encode(secret))
    }

    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        StaticSecretProvider {
            value: Ok(raw.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        StaticSecretProvider {
            value: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SecretProvider for StaticSecretProvider {
    fn fetch(&self, secret: &SecretRef) -> Result<Vec<u8>, SecretError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.value {
            Ok(raw) => Ok(raw.clone()),
            Err(reason) => Err(SecretError::Access {
                secret: secret.clone(),
                reason: reason.clone(),
            }),
        }
    }
}
