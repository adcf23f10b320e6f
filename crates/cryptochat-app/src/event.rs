//! Events fed into the App state machine.
//!
//! Frontends translate raw input into these; the runtime adds observations
//! and async completions.

use cryptochat_core::{IdentityError, Session};

use crate::screen::RoomListEvent;

/// Input to [`crate::App::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Room list screen input or observation.
    RoomList(RoomListEvent),

    /// Go to the registration screen from the authentication choice.
    ChooseRegister,

    /// Go to the login screen from the authentication choice.
    ChooseLogin,

    /// Submit the login form.
    SubmitLogin {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },

    /// Submit the registration form.
    SubmitRegister {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
        /// Name shown to other users.
        display_name: String,
    },

    /// Outcome of a sign-in or registration.
    AuthFinished(Result<Session, IdentityError>),

    /// Sign out of the current session.
    SignOut,

    /// Back navigation.
    Back,

    /// Show a transient message in the status line.
    Notice(String),

    /// Quit the application.
    Quit,
}

impl From<RoomListEvent> for AppEvent {
    fn from(event: RoomListEvent) -> Self {
        Self::RoomList(event)
    }
}
