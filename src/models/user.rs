use serde::Serialize;

/// Verified identity attached to a request after authentication.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub email: String,
    pub name: String,
    pub city: String,
}
