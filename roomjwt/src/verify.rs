use crate::internal::claims::SessionClaims;
use crate::internal::unixtime::{Clock, ONE_HOUR};
use crate::profile::IssuerProfile;
use crate::secret::SigningSecret;
use crate::token::ALGORITHM;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Validation};
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Verify Error
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("token is not a JWT")]
    Malformed,
    #[error("token failed validation")]
    BadToken,
    #[error("token is not valid yet")]
    NotYetValid,
    #[error("token has expired")]
    Expired,
    #[error("token validity window is longer than allowed")]
    SuspiciousWindow,
}

//--------------------------------------------------------------------------------------------------
// Decoding and validation function
//--------------------------------------------------------------------------------------------------

/// Check a token the way the conferencing server would: HS256 only, trusted issuer and
/// audience, then the time window against `clock`.
pub fn verify_token<C: Clock>(
    token: &str,
    secret: &SigningSecret,
    profile: &IssuerProfile,
    clock: &C,
) -> Result<SessionClaims, VerifyError> {
    let mut validation = Validation::new(ALGORITHM);
    validation.set_issuer(&[&profile.issuer]);
    validation.set_audience(&[&profile.audience]);
    // Times are checked below against the injected clock
    validation.validate_exp = false;
    validation.validate_nbf = false;

    let claims = match decode::<SessionClaims>(token, &secret.decoding_key(), &validation) {
        Ok(data) => data.claims,
        Err(err) => {
            return if *err.kind() == ErrorKind::InvalidToken {
                warn!("Token wasn't a JWT: {:?}", err);
                Err(VerifyError::Malformed)
            } else {
                warn!("Token failed validation: {:?}", err);
                Err(VerifyError::BadToken)
            }
        }
    };

    let now = clock.now();
    if claims.nbf() > now {
        warn!("Token used before its 'not before' time");
        return Err(VerifyError::NotYetValid);
    }
    if claims.exp() <= now {
        warn!("Token used after expiry");
        return Err(VerifyError::Expired);
    }
    if claims.iat().seconds_until(claims.exp()) > i64::from(ONE_HOUR.get()) {
        warn!("Token valid for longer than one hour");
        return Err(VerifyError::SuspiciousWindow);
    }

    debug!("Token validated for room {}", claims.room());

    Ok(claims)
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::unixtime::FixedClock;
    use crate::issuer::{IssueRequest, IssuedToken, TokenIssuer};
    use crate::secret::SecretRef;
    use crate::testing::StaticSecretProvider;
    use crate::types::RoomId;

    const NOW: i64 = 1_700_000_000;

    fn issue(profile: IssuerProfile) -> IssuedToken {
        let provider = StaticSecretProvider::with_plain("s3cret");
        TokenIssuer::new(
            &provider,
            FixedClock::at_unix(NOW).unwrap(),
            profile,
            SecretRef::default(),
        )
        .issue(IssueRequest::new(RoomId::new("room-1").unwrap()).moderator(true))
        .unwrap()
    }

    fn at(seconds: i64) -> FixedClock {
        FixedClock::at_unix(seconds).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let issued = issue(IssuerProfile::default());
        let claims = verify_token(
            issued.token().as_str(),
            &SigningSecret::new("s3cret"),
            &IssuerProfile::default(),
            &at(NOW + 60),
        )
        .unwrap();
        assert_eq!(&claims, issued.claims());
    }

    #[test]
    fn test_wrong_secret() {
        let issued = issue(IssuerProfile::default());
        let err = verify_token(
            issued.token().as_str(),
            &SigningSecret::new("other"),
            &IssuerProfile::default(),
            &at(NOW),
        )
        .unwrap_err();
        assert_eq!(err, VerifyError::BadToken);
    }

    #[test]
    fn test_wrong_audience() {
        let issued = issue(IssuerProfile {
            audience: "someone-else".to_string(),
            ..IssuerProfile::default()
        });
        let err = verify_token(
            issued.token().as_str(),
            &SigningSecret::new("s3cret"),
            &IssuerProfile::default(),
            &at(NOW),
        )
        .unwrap_err();
        assert_eq!(err, VerifyError::BadToken);
    }

    #[test]
    fn test_wrong_issuer() {
        let issued = issue(IssuerProfile {
            issuer: "someone-else".to_string(),
            ..IssuerProfile::default()
        });
        let err = verify_token(
            issued.token().as_str(),
            &SigningSecret::new("s3cret"),
            &IssuerProfile::default(),
            &at(NOW),
        )
        .unwrap_err();
        assert_eq!(err, VerifyError::BadToken);
    }

    #[test]
    fn test_time_window() {
        let issued = issue(IssuerProfile::default());
        let check = |seconds| {
            verify_token(
                issued.token().as_str(),
                &SigningSecret::new("s3cret"),
                &IssuerProfile::default(),
                &at(seconds),
            )
        };
        assert_eq!(check(NOW - 1).unwrap_err(), VerifyError::NotYetValid);
        assert!(check(NOW).is_ok());
        assert!(check(NOW + 3599).is_ok());
        assert_eq!(check(NOW + 3600).unwrap_err(), VerifyError::Expired);
    }

    #[test]
    fn test_overlong_window() {
        let issued = issue(IssuerProfile::default());
        let mut value = serde_json::to_value(issued.claims()).unwrap();
        value["exp"] = serde_json::json!(NOW + 7200);
        let claims: SessionClaims = serde_json::from_value(value).unwrap();

        let secret = SigningSecret::new("s3cret");
        let token = crate::token::AccessToken::encode_new(&claims, &secret).unwrap();
        let err = verify_token(
            token.as_str(),
            &secret,
            &IssuerProfile::default(),
            &at(NOW + 60),
        )
        .unwrap_err();
        assert_eq!(err, VerifyError::SuspiciousWindow);
    }

    #[test]
    fn test_not_a_jwt() {
        let err = verify_token(
            "definitely-not-a-token",
            &SigningSecret::new("s3cret"),
            &IssuerProfile::default(),
            &at(NOW),
        )
        .unwrap_err();
        assert_eq!(err, VerifyError::Malformed);
    }
}
