//! User session credentials.
//!
//! Replaces the process-wide mutable singleton of the original app with an
//! explicit value: created on login, held by the listing engine, dropped on
//! logout.

use std::fmt;

/// An authenticated user session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token issued by the backend. Never logged.
    token: String,
    pub user_id: String,
    pub is_admin: bool,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>, is_admin: bool) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
            is_admin,
        }
    }

    /// The `Authorization` header value for admin calls.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_value() {
        let session = Session::new("abc123", "user-1", false);
        assert_eq!(session.bearer(), "Bearer abc123");
    }

    #[test]
    fn debug_redacts_the_token() {
        let session = Session::new("secret-token", "user-1", true);
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
