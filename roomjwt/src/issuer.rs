use crate::internal::claims::SessionClaims;
use crate::internal::unixtime::Clock;
use crate::join::join_url;
use crate::profile::IssuerProfile;
use crate::secret::{fetch_signing_secret, SecretError, SecretProvider, SecretRef, SigningSecret};
use crate::token::AccessToken;
use crate::types::{DisplayName, RoomId, UserId};
use tracing::{debug, error};

//--------------------------------------------------------------------------------------------------
// Request
//--------------------------------------------------------------------------------------------------

/// A single token request. Unset fields fall back to `test-user` / `Test User`, and the
/// participant is not a moderator unless asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueRequest {
    room: RoomId,
    user_id: Option<UserId>,
    display_name: Option<DisplayName>,
    moderator: bool,
}

impl IssueRequest {
    pub fn new(room: RoomId) -> Self {
        IssueRequest {
            room,
            user_id: None,
            display_name: None,
            moderator: false,
        }
    }

    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn display_name(mut self, display_name: DisplayName) -> Self {
        self.display_name = Some(display_name);
        self
    }

    pub fn moderator(mut self, moderator: bool) -> Self {
        self.moderator = moderator;
        self
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn effective_user_id(&self) -> UserId {
        self.user_id.clone().unwrap_or_default()
    }

    pub fn effective_display_name(&self) -> DisplayName {
        self.display_name.clone().unwrap_or_default()
    }

    pub fn is_moderator(&self) -> bool {
        self.moderator
    }
}

//--------------------------------------------------------------------------------------------------
// Result and errors
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct IssuedToken {
    claims: SessionClaims,
    token: AccessToken,
    join_url: String,
}

impl IssuedToken {
    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn join_url(&self) -> &str {
        &self.join_url
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

//--------------------------------------------------------------------------------------------------
// Issuer
//--------------------------------------------------------------------------------------------------

pub struct TokenIssuer<P, C> {
    provider: P,
    clock: C,
    profile: IssuerProfile,
    secret: SecretRef,
}

impl<P, C> TokenIssuer<P, C>
where
    P: SecretProvider,
    C: Clock,
{
    pub fn new(provider: P, clock: C, profile: IssuerProfile, secret: SecretRef) -> Self {
        Self {
            provider,
            clock,
            profile,
            secret,
        }
    }

    pub fn profile(&self) -> &IssuerProfile {
        &self.profile
    }

    /// Fetch the signing secret and issue one token. Every call reads the secret store once.
    pub fn issue(&self, request: IssueRequest) -> Result<IssuedToken, IssueError> {
        let secret = self.fetch_secret()?;
        self.sign(request, &secret)
    }

    pub(crate) fn fetch_secret(&self) -> Result<SigningSecret, SecretError> {
        fetch_signing_secret(&self.provider, &self.secret)
    }

    pub(crate) fn sign(
        &self,
        request: IssueRequest,
        secret: &SigningSecret,
    ) -> Result<IssuedToken, IssueError> {
        let user_id = request.effective_user_id();
        let display_name = request.effective_display_name();
        debug!(
            "Issuing token for room {} user {} (moderator: {})",
            request.room, user_id, request.moderator
        );

        let claims = SessionClaims::new(
            &self.profile,
            request.room,
            user_id,
            display_name,
            request.moderator,
            self.clock.now(),
        );

        let token = AccessToken::encode_new(&claims, secret).map_err(|e| {
            error!("Error signing token: {:?}", e);
            IssueError::Signing(e)
        })?;
        let join_url = join_url(&self.profile.join_host, claims.room(), &token);

        Ok(IssuedToken {
            claims,
            token,
            join_url,
        })
    }
}

//--------------------------------------------------------------------------------------------------
