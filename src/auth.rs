//! Authentication collaborator.
//!
//! Verification is behind a trait so the demo authenticator can be swapped
//! for a real identity provider without touching the extractor or the
//! controllers.

use crate::models::AuthUser;

pub trait Authenticator: Send + Sync {
    /// Verify credentials, returning the identity on success.
    fn authenticate(&self, email: &str, password: &str) -> Option<AuthUser>;
}

/// A demo user record with its plain password. Demo only; a real provider
/// would live behind the same trait.
#[derive(Debug, Clone)]
pub struct DemoUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub city: String,
}

/// Accepts exactly the configured demo accounts.
pub struct DemoAuthenticator {
    users: Vec<DemoUser>,
}

impl DemoAuthenticator {
    pub fn new(users: Vec<DemoUser>) -> Self {
        Self { users }
    }
}

impl Authenticator for DemoAuthenticator {
    fn authenticate(&self, email: &str, password: &str) -> Option<AuthUser> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.password == password)
            .map(|u| AuthUser {
                email: u.email.clone(),
                name: u.name.clone(),
                city: u.city.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> DemoAuthenticator {
        DemoAuthenticator::new(vec![DemoUser {
            email: "john.doe@example.com".into(),
            password: "password123".into(),
            name: "John Doe".into(),
            city: "Mumbai".into(),
        }])
    }

    #[test]
    fn accepts_known_credentials_case_insensitive_email() {
        let user = demo().authenticate("John.Doe@Example.com", "password123");
        assert_eq!(user.unwrap().name, "John Doe");
    }

    #[test]
    fn rejects_bad_password_and_unknown_user() {
        assert!(demo().authenticate("john.doe@example.com", "wrong").is_none());
        assert!(demo().authenticate("nobody@example.com", "password123").is_none());
        assert!(demo().authenticate("", "").is_none());
    }
}
