/// User domain type
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// The signed-in administrator, as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Unique user identifier
    pub id: UserId,

    /// Login email
    pub email: String,
}

impl AuthUser {
    /// Create a new authenticated user value
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
