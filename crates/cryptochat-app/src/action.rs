//! UI actions
//!
//! Actions produced by the App state machine for the runtime to execute.

use cryptochat_core::Session;

use crate::dialog::RequestId;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Create a room through the provider.
    CreateRoom {
        /// Request the result must be reported against.
        request: RequestId,
        /// Room name as typed.
        name: String,
        /// User the room is created on behalf of.
        session: Session,
    },

    /// Sign in with the identity collaborator.
    SignIn {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },

    /// Register a new account.
    Register {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
        /// Name shown to other users; empty picks a default.
        display_name: String,
    },

    /// End the current session.
    SignOut,
}
