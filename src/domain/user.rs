use serde::{Deserialize, Serialize};

/// Authenticated dashboard user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Response from `/auth/login`. The access token goes straight into the
/// injected token store and is never held anywhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}
