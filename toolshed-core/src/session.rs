/// Authenticated session handle
///
/// A successful [`User::login`](crate::models::user::User::login) is the
/// only way to obtain an `AuthenticatedSession`. Every owner-scoped
/// registry operation takes one by reference, so "who is acting" is an
/// explicit argument rather than ambient state, and code paths that never
/// saw a login cannot reach the registries at all.
///
/// The session carries only the username — never the password.
use serde::Serialize;

/// Proof that a login succeeded, naming the user it succeeded for.
///
/// Immutable; cloning is cheap and fine. There is no logout state to
/// track — dropping the value ends the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedSession {
    username: String,
}

impl AuthenticatedSession {
    /// Constructed only by the account directory on successful login.
    pub(crate) fn new(username: String) -> Self {
        Self { username }
    }

    /// The authenticated username this session acts as
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_exposes_username() {
        let session = AuthenticatedSession::new("alice".to_string());
        assert_eq!(session.username(), "alice");
    }

    #[test]
    fn test_session_equality() {
        let a = AuthenticatedSession::new("alice".to_string());
        let b = AuthenticatedSession::new("alice".to_string());
        assert_eq!(a, b);
    }
}
