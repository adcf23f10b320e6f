//! Login and registration form state.

use cryptochat_core::{IdentityError, Session};

/// State shared by the login and registration screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthScreen {
    pending: bool,
    error: Option<String>,
}

impl AuthScreen {
    /// Idle form with no error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sign-in or registration is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Last failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mark a submission in flight. Returns `false` if one already is.
    pub fn submit(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.error = None;
        true
    }

    /// Apply an identity result and return the session on success.
    pub fn finish(&mut self, result: Result<Session, IdentityError>) -> Option<Session> {
        self.pending = false;
        match result {
            Ok(session) => {
                self.error = None;
                Some(session)
            },
            Err(err) => {
                self.error = Some(err.to_string());
                None
            },
        }
    }

    /// Forget any error and pending flag, e.g. when switching screens.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
