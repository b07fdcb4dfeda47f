use serde::{Deserialize, Serialize};

/// Claims of the signed-in user as issued by the auth service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Auth service user identifier.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Inspection company the user works for.
    pub account_id: i32,
    pub roles: Vec<String>,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
