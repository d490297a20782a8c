use serde::{Deserialize, Serialize};
use std::fmt::Display;

//--------------------------------------------------------------------------------------------------
// New types
//--------------------------------------------------------------------------------------------------

const DEFAULT_USER_ID: &str = "test-user";
const DEFAULT_DISPLAY_NAME: &str = "Test User";

/// Room identifier. Opaque: copied into the claim and the join URL unchanged.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoomId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("room identifier must not be empty")]
pub struct EmptyRoomId;

impl RoomId {
    pub fn new(room: impl Into<String>) -> Result<Self, EmptyRoomId> {
        let room = room.into();
        if room.is_empty() {
            return Err(EmptyRoomId);
        }
        Ok(RoomId(room))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    /// Synthesized id for participant `index` of a batch, e.g. `user3`
    pub fn participant(index: u32) -> Self {
        UserId(format!("user{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        UserId(DEFAULT_USER_ID.to_string())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> Self {
        DisplayName(name.into())
    }

    pub fn participant(index: u32, moderator: bool) -> Self {
        if moderator {
            DisplayName(format!("User {index} (Moderator)"))
        } else {
            DisplayName(format!("User {index}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DisplayName {
    fn default() -> Self {
        DisplayName(DEFAULT_DISPLAY_NAME.to_string())
    }
}

impl Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------------------------------------------------------------------
