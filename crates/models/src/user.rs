use serde::{Deserialize, Serialize};

/// The signed-in user, as reported by the authentication provider
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub mail: String,
}
