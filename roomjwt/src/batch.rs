use crate::internal::unixtime::Clock;
use crate::issuer::{IssueError, IssueRequest, TokenIssuer};
use crate::secret::SecretProvider;
use crate::token::AccessToken;
use crate::types::{DisplayName, RoomId, UserId};
use std::fmt::Display;
use std::num::NonZeroU32;
use std::str::FromStr;
use tracing::info;

//--------------------------------------------------------------------------------------------------
// Participant count
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParticipantCount(NonZeroU32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid participant count '{0}', expected an integer from 1 to {max}", max = MAX_PARTICIPANTS)]
pub struct InvalidParticipantCount(pub String);

pub const MAX_PARTICIPANTS: u32 = 100;

impl ParticipantCount {
    pub fn new(count: u32) -> Option<Self> {
        if count > MAX_PARTICIPANTS {
            return None;
        }
        NonZeroU32::new(count).map(ParticipantCount)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for ParticipantCount {
    fn default() -> Self {
        ParticipantCount(NonZeroU32::MIN.saturating_add(2))
    }
}

impl FromStr for ParticipantCount {
    type Err = InvalidParticipantCount;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .ok()
            .and_then(ParticipantCount::new)
            .ok_or_else(|| InvalidParticipantCount(s.to_string()))
    }
}

impl Display for ParticipantCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------------------------------------------------------------------
// Request and result types
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRequest {
    pub room: RoomId,
    pub count: ParticipantCount,
    pub moderator_first: bool,
}

impl BatchRequest {
    pub fn new(room: RoomId) -> Self {
        BatchRequest {
            room,
            count: ParticipantCount::default(),
            moderator_first: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Participant {
    pub index: u32,
    pub user_id: UserId,
    pub display_name: DisplayName,
    pub moderator: bool,
    pub token: AccessToken,
    pub join_url: String,
}

//--------------------------------------------------------------------------------------------------
// Batch issuance
//--------------------------------------------------------------------------------------------------

impl<P, C> TokenIssuer<P, C>
where
    P: SecretProvider,
    C: Clock,
{
    /// Issue one token per simulated participant, in participant order. Only participant 1 can
    /// be a moderator, and only when `moderator_first` is set. The secret is read once for the
    /// whole batch; any failure aborts it.
    pub fn issue_batch(&self, request: &BatchRequest) -> Result<Vec<Participant>, IssueError> {
        let secret = self.fetch_secret()?;

        let mut participants = Vec::with_capacity(request.count.get() as usize);
        for index in 1..=request.count.get() {
            let moderator = request.moderator_first && index == 1;
            let user_id = UserId::participant(index);
            let display_name = DisplayName::participant(index, moderator);

            let issued = self.sign(
                IssueRequest::new(request.room.clone())
                    .user_id(user_id.clone())
                    .display_name(display_name.clone())
                    .moderator(moderator),
                &secret,
            )?;

            participants.push(Participant {
                index,
                user_id,
                display_name,
                moderator,
                join_url: issued.join_url().to_string(),
                token: issued.token().clone(),
            });
        }

        info!(
            "Issued {} tokens for room {}",
            participants.len(),
            request.room
        );
        Ok(participants)
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::unixtime::FixedClock;
    use crate::profile::IssuerProfile;
    use crate::secret::SecretRef;
    use crate::testing::StaticSecretProvider;

    fn issuer(provider: &StaticSecretProvider) -> TokenIssuer<&StaticSecretProvider, FixedClock> {
        TokenIssuer::new(
            provider,
            FixedClock::at_unix(1_700_000_000).unwrap(),
            IssuerProfile::default(),
            SecretRef::default(),
        )
    }

    fn request(count: u32, moderator_first: bool) -> BatchRequest {
        BatchRequest {
            room: RoomId::new("SolarRealmsPushToo").unwrap(),
            count: ParticipantCount::new(count).unwrap(),
            moderator_first,
        }
    }

    #[test]
    fn test_count_parsing() {
        assert_eq!("5".parse::<ParticipantCount>().unwrap().get(), 5);
        assert!("0".parse::<ParticipantCount>().is_err());
        assert!("-1".parse::<ParticipantCount>().is_err());
        assert!("three".parse::<ParticipantCount>().is_err());
        assert!("".parse::<ParticipantCount>().is_err());
        assert_eq!("100".parse::<ParticipantCount>().unwrap().get(), MAX_PARTICIPANTS);
        assert!("101".parse::<ParticipantCount>().is_err());
        assert!("4000000000".parse::<ParticipantCount>().is_err());
        assert!(ParticipantCount::new(u32::MAX).is_none());
    }

    #[test]
    fn test_default_count_is_three() {
        assert_eq!(ParticipantCount::default().get(), 3);
    }

    #[test]
    fn test_moderator_first() {
        let provider = StaticSecretProvider::with_plain("s3cret");
        let participants = issuer(&provider).issue_batch(&request(5, true)).unwrap();

        assert_eq!(participants.len(), 5);
        let first = &participants[0];
        assert!(first.moderator);
        assert_eq!(first.user_id.as_str(), "user1");
        assert!(first.display_name.as_str().contains("Moderator"));

        for (i, p) in participants.iter().enumerate().skip(1) {
            let index = i as u32 + 1;
            assert_eq!(p.index, index);
            assert!(!p.moderator);
            assert_eq!(p.user_id.as_str(), format!("user{index}"));
            assert_eq!(p.display_name.as_str(), format!("User {index}"));
        }
    }

    #[test]
    fn test_no_moderator() {
        let provider = StaticSecretProvider::with_plain("s3cret");
        let participants = issuer(&provider).issue_batch(&request(3, false)).unwrap();

        assert_eq!(participants.len(), 3);
        assert!(participants.iter().all(|p| !p.moderator));
        assert_eq!(participants[0].display_name.as_str(), "User 1");
    }

    #[test]
    fn test_secret_read_once_per_batch() {
        let provider = StaticSecretProvider::with_plain("s3cret");
        issuer(&provider).issue_batch(&request(4, true)).unwrap();
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_tokens_match_single_issuance() {
        let provider = StaticSecretProvider::with_plain("s3cret");
        let issuer = issuer(&provider);
        let participants = issuer.issue_batch(&request(2, true)).unwrap();

        let single = issuer
            .issue(
                IssueRequest::new(RoomId::new("SolarRealmsPushToo").unwrap())
                    .user_id(UserId::new("user2"))
                    .display_name(DisplayName::new("User 2")),
            )
            .unwrap();
        assert_eq!(&participants[1].token, single.token());
        assert_eq!(participants[1].join_url, single.join_url());
    }

    #[test]
    fn test_failure_aborts_batch() {
        let provider = StaticSecretProvider::failing("forbidden");
        assert!(issuer(&provider).issue_batch(&request(3, true)).is_err());
    }
}
