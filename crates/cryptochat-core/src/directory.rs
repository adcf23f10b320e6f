//! Room directory abstraction.
//!
//! Abstracts over the remote collection of room records. Production binds
//! this to a hosted data store, tests use [`crate::MemoryDirectory`] or wrap
//! it with fault injection.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::{DirectoryError, Room};

/// Remote collection of [`Room`] records.
///
/// Only the surface the client needs: list everything, insert one record,
/// and learn when the collection changed. There is no update or delete.
#[async_trait]
pub trait RoomDirectory: Send + Sync + 'static {
    /// Fetch every room currently in the directory, in insertion order.
    async fn list(&self) -> Result<Vec<Room>, DirectoryError>;

    /// Insert a new room record.
    ///
    /// Returns [`DirectoryError::Conflict`] if the directory enforces unique
    /// names and one is already taken.
    async fn insert(&self, room: Room) -> Result<(), DirectoryError>;

    /// Change counter for the collection.
    ///
    /// The value increases every time the collection changes. Observers only
    /// care that it changed, not by how much.
    fn revisions(&self) -> watch::Receiver<u64>;
}
