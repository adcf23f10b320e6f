//! The authenticated user.

/// An authenticated session handed out by the identity collaborator.
///
/// Passed explicitly wherever the current user matters (for example as the
/// creator of a new room) instead of being looked up from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Stable user identifier assigned by the identity service.
    pub user_id: String,
    /// Email used to sign in.
    pub email: String,
    /// Name shown to other users.
    pub display_name: String,
}

impl Session {
    /// Create a session.
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self { user_id: user_id.into(), email: email.into(), display_name: display_name.into() }
    }
}
