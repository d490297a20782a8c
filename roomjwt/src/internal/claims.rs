use crate::internal::unixtime::UnixTimestamp;
use crate::profile::IssuerProfile;
use crate::types::{DisplayName, RoomId, UserId};
use serde::{Deserialize, Serialize};

//--------------------------------------------------------------------------------------------------
// JWT Claims object
//--------------------------------------------------------------------------------------------------

// Field order is the serialization order, keep it stable so tokens are reproducible

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionClaims {
    iss: String,
    aud: String,
    sub: String,
    room: RoomId,
    exp: UnixTimestamp,
    iat: UnixTimestamp,
    nbf: UnixTimestamp,
    context: Context,
    moderator: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Context {
    pub user: UserContext,
    pub features: Features,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct UserContext {
    pub id: UserId,
    pub name: DisplayName,
    pub email: String,
    pub avatar: String,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Features {
    pub livestreaming: bool,
    pub recording: bool,
    pub transcription: bool,
}

impl Features {
    fn for_moderator(moderator: bool) -> Self {
        Features {
            livestreaming: moderator,
            recording: moderator,
            transcription: true,
        }
    }
}

// Make sure we only assemble it here, so we can be sure it's valid
impl SessionClaims {
    pub(crate) fn new(
        profile: &IssuerProfile,
        room: RoomId,
        user_id: UserId,
        name: DisplayName,
        moderator: bool,
        now: UnixTimestamp,
    ) -> Self {
        let user = UserContext {
            email: profile.email_for(&user_id),
            avatar: profile.avatar_for(&name),
            id: user_id,
            name,
        };

        SessionClaims {
            iss: profile.issuer.clone(),
            aud: profile.audience.clone(),
            sub: profile.subject.clone(),
            room,
            exp: now.add_one_hour(),
            iat: now,
            nbf: now,
            context: Context {
                user,
                features: Features::for_moderator(moderator),
            },
            moderator,
        }
    }

    pub fn iss(&self) -> &str {
        &self.iss
    }

    pub fn aud(&self) -> &str {
        &self.aud
    }

    pub fn sub(&self) -> &str {
        &self.sub
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn exp(&self) -> UnixTimestamp {
        self.exp
    }

    pub fn iat(&self) -> UnixTimestamp {
        self.iat
    }

    pub fn nbf(&self) -> UnixTimestamp {
        self.nbf
    }

    pub fn user(&self) -> &UserContext {
        &self.context.user
    }

    pub fn features(&self) -> Features {
        self.context.features
    }

    pub fn moderator(&self) -> bool {
        self.moderator
    }
}

//--------------------------------------------------------------------------------------------------
