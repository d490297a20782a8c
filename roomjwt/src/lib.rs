//! Room-scoped test tokens for the conferencing server.
//!
//! A [`TokenIssuer`] reads the shared HS256 secret through a [`SecretProvider`] (kubectl in
//! production), stamps a one hour [`SessionClaims`] set for a room and signs it. Tokens can be
//! issued one at a time or for a simulated batch of participants.

//--------------------------------------------------------------------------------------------------

pub mod batch;
pub mod internal;
pub mod issuer;
pub mod join;
pub mod kubectl;
pub mod profile;
pub mod secret;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod token;
mod types;
pub mod verify;

pub use batch::{
    BatchRequest, InvalidParticipantCount, Participant, ParticipantCount, MAX_PARTICIPANTS,
};
pub use internal::claims::SessionClaims;
pub use internal::unixtime::{Clock, FixedClock, SystemClock, UnixTimestamp};
pub use issuer::{IssueError, IssueRequest, IssuedToken, TokenIssuer};
pub use profile::IssuerProfile;
pub use secret::{SecretError, SecretProvider, SecretRef, SigningSecret};
pub use token::AccessToken;
pub use types::*;

//--------------------------------------------------------------------------------------------------
