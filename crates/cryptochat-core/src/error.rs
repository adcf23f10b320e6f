//! Error types for the collaborators and the room list provider.

use thiserror::Error;

/// Failures reported by a [`crate::RoomDirectory`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// A room with this name already exists.
    #[error("room already exists: {0}")]
    Conflict(String),

    /// The directory could not be reached or refused the request.
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Failures reported by an [`crate::Identity`] collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The email address is malformed.
    #[error("The email address is badly formatted")]
    InvalidEmail,

    /// The password does not meet the minimum length.
    #[error("Password should be at least {min} characters")]
    WeakPassword {
        /// Minimum accepted length.
        min: usize,
    },

    /// An account with this email already exists.
    #[error("The email address is already in use by another account")]
    EmailInUse,

    /// Unknown email or wrong password.
    #[error("The email or password is incorrect")]
    InvalidCredentials,

    /// The identity service could not be reached.
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

/// A failed create-room attempt.
///
/// Deliberately flat: validation failures, name collisions and transport
/// failures all collapse into one human-readable message that the room list
/// screen shows inline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CreateRoomError {
    message: String,
}

impl CreateRoomError {
    /// Create an error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Human-readable message. Never empty.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DirectoryError> for CreateRoomError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Conflict(name) => {
                Self::new(format!("A room named \"{name}\" already exists"))
            },
            DirectoryError::Unavailable(reason) => {
                Self::new(format!("Could not create room: {reason}"))
            },
        }
    }
}
