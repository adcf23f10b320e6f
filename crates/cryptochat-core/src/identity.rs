//! Identity collaborator.
//!
//! The hosted identity service owns accounts and sessions. The client asks it
//! once at startup whether a session exists, and otherwise drives it from the
//! login and registration screens.

use async_trait::async_trait;

use crate::{IdentityError, Session};

/// Minimum password length accepted on registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Account and session management.
#[async_trait]
pub trait Identity: Send + Sync + 'static {
    /// Session restored at startup, if the user is already signed in.
    fn current_session(&self) -> Option<Session>;

    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    /// Create an account and sign it in.
    ///
    /// An empty `display_name` falls back to the local part of the email.
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, IdentityError>;

    /// End the current session. Signing out twice is a no-op.
    async fn sign_out(&self);
}

/// Syntactic email check: one `@` with non-empty text on both sides and a dot
/// in the domain.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
        && !email.chars().any(char::is_whitespace)
}
