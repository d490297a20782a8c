use crate::types::{DisplayName, UserId};
use serde::Deserialize;

//--------------------------------------------------------------------------------------------------
// Fixed identities stamped into every claim
//--------------------------------------------------------------------------------------------------

/// The issuer and audience must match the trusted issuer and audience configured on the
/// conferencing server's token verifier, otherwise every token is rejected.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct IssuerProfile {
    pub issuer: String,
    pub audience: String,
    pub subject: String,
    pub email_domain: String,
    pub avatar_base_url: String,
    pub join_host: String,
}

impl Default for IssuerProfile {
    fn default() -> Self {
        IssuerProfile {
            issuer: "darey-io".to_string(),
            audience: "jitsi".to_string(),
            subject: "streaming-api.infra.darey.io".to_string(),
            email_domain: "darey.io".to_string(),
            avatar_base_url: "https://api.dicebear.com/7.x/initials/svg?seed=".to_string(),
            join_host: "streaming-stg.talentos.darey.io".to_string(),
        }
    }
}

impl IssuerProfile {
    pub fn email_for(&self, user_id: &UserId) -> String {
        format!("{}@test.{}", user_id, self.email_domain)
    }

    // The name goes in as-is, matching what the front end already renders
    pub fn avatar_for(&self, name: &DisplayName) -> String {
        format!("{}{}", self.avatar_base_url, name)
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_uses_test_subdomain() {
        let profile = IssuerProfile::default();
        assert_eq!(
            profile.email_for(&UserId::default()),
            "test-user@test.darey.io"
        );
        assert_eq!(
            profile.email_for(&UserId::new("user123")),
            "user123@test.darey.io"
        );
    }

    #[test]
    fn test_avatar_seeded_with_display_name() {
        let profile = IssuerProfile::default();
        assert_eq!(
            profile.avatar_for(&DisplayName::new("John Doe")),
            "https://api.dicebear.com/7.x/initials/svg?seed=John Doe"
        );
    }
}
