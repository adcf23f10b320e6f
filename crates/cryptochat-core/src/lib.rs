//! Cryptochat core
//!
//! Room data model and the collaborators the client talks to, completely
//! decoupled from any UI. The room directory and the identity service are
//! external managed services; this crate only sees them through traits, so
//! the same provider logic runs against a hosted backend, the in-memory
//! doubles in [`memory`], or a fault-injecting wrapper in tests.
//!
//! # Components
//!
//! - [`room`]: `Room` record and room-name validation
//! - [`session`]: the authenticated user, passed explicitly
//! - [`directory`]: room directory collaborator (list, insert, revisions)
//! - [`identity`]: identity collaborator (session, sign in, register)
//! - [`provider`]: observable room list and the create operation
//! - [`memory`]: in-memory collaborators
//! - [`error`]: error types

pub mod directory;
pub mod error;
pub mod identity;
pub mod memory;
pub mod provider;
pub mod room;
pub mod session;

pub use directory::RoomDirectory;
pub use error::{CreateRoomError, DirectoryError, IdentityError};
pub use identity::Identity;
pub use memory::{MemoryDirectory, MemoryIdentity};
pub use provider::RoomListProvider;
pub use room::{MAX_ROOM_NAME_LEN, Room, validate_room_name};
pub use session::Session;
