use crate::token::AccessToken;
use crate::types::RoomId;

/// Join link understood by the conferencing front end. Nothing is escaped.
pub fn join_url(host: &str, room: &RoomId, token: &AccessToken) -> String {
    format!("https://{host}/{room}?jwt={token}")
}
