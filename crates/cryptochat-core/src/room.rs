//! Room records and room-name validation.

use crate::CreateRoomError;

/// Longest accepted room name, in characters, after trimming.
pub const MAX_ROOM_NAME_LEN: usize = 64;

/// A named chat channel with its recorded creator.
///
/// The name doubles as the identifier: it is unique within the directory and
/// is what the router carries to the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Room {
    /// Identifier and display label.
    pub name: String,
    /// Display name of the user who created the room.
    pub creator: String,
}

impl Room {
    /// Create a room record.
    pub fn new(name: impl Into<String>, creator: impl Into<String>) -> Self {
        Self { name: name.into(), creator: creator.into() }
    }
}

/// Validate a user-entered room name and return the name to store.
///
/// Surrounding whitespace is dropped. The rest must be non-empty, at most
/// [`MAX_ROOM_NAME_LEN`] characters, and free of control characters.
pub fn validate_room_name(raw: &str) -> Result<String, CreateRoomError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(CreateRoomError::new("Room name cannot be empty"));
    }

    if name.chars().count() > MAX_ROOM_NAME_LEN {
        return Err(CreateRoomError::new(format!(
            "Room name must be at most {MAX_ROOM_NAME_LEN} characters"
        )));
    }

    if name.chars().any(char::is_control) {
        return Err(CreateRoomError::new("Room name cannot contain control characters"));
    }

    Ok(name.to_string())
}
