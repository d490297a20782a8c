use crate::internal::claims::SessionClaims;
use crate::secret::SigningSecret;
use jsonwebtoken::{encode, Algorithm, Header};
use serde::Serialize;
use std::fmt::Display;

//--------------------------------------------------------------------------------------------------
// Access Token Type
//--------------------------------------------------------------------------------------------------

pub(crate) const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn encode_new(
        claims: &SessionClaims,
        secret: &SigningSecret,
    ) -> jsonwebtoken::errors::Result<Self> {
        let token = encode(&Header::new(ALGORITHM), claims, &secret.encoding_key())?;

        Ok(AccessToken(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        AccessToken(token)
    }
}

impl Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
