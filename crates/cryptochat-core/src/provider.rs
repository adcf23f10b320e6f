//! Room list provider.
//!
//! Mediates between UI state and the room directory. The provider is the
//! single writer of the observable room list; any number of screens may hold
//! a receiver and read the current value or wait for the next change.
//!
//! # Lifecycle
//!
//! ```text
//! observe_rooms() ──> sync() ──┬── directory revision ──> refresh() ──> send
//!                              └── all receivers dropped ──> return
//! ```
//!
//! `sync` must be started after at least one receiver exists, otherwise it
//! returns immediately because nobody is watching.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{CreateRoomError, DirectoryError, Room, RoomDirectory, Session, validate_room_name};

/// Holds the current room list and performs room creation.
#[derive(Debug)]
pub struct RoomListProvider<D> {
    directory: Arc<D>,
    rooms: watch::Sender<Vec<Room>>,
}

impl<D: RoomDirectory> RoomListProvider<D> {
    /// Create a provider over `directory`. The list starts empty until the
    /// first refresh.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory, rooms: watch::Sender::new(Vec::new()) }
    }

    /// The directory this provider writes to.
    pub fn directory(&self) -> &Arc<D> {
        &self.directory
    }

    /// Subscribe to the room list.
    ///
    /// The receiver sees the current value immediately and is notified on
    /// every subsequent change.
    pub fn observe_rooms(&self) -> watch::Receiver<Vec<Room>> {
        self.rooms.subscribe()
    }

    /// Current room list.
    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.borrow().clone()
    }

    /// Reload the list from the directory and publish it.
    pub async fn refresh(&self) -> Result<(), DirectoryError> {
        let rooms = self.directory.list().await?;
        debug!(count = rooms.len(), "room list refreshed");
        // Always notify, so observers learn the first load finished even when
        // the directory is empty.
        self.rooms.send_replace(rooms);
        Ok(())
    }

    /// Keep the observable list in step with the directory.
    ///
    /// Refreshes once, then again after every directory revision. Returns when
    /// every receiver has been dropped or the directory stops publishing
    /// revisions. Refresh failures are logged and the previous list is kept.
    pub async fn sync(&self) {
        let mut revisions = self.directory.revisions();

        loop {
            let _ = revisions.borrow_and_update();
            if let Err(err) = self.refresh().await {
                warn!(error = %err, "room list refresh failed");
            }

            tokio::select! {
                () = self.rooms.closed() => {
                    debug!("room list has no observers, stopping sync");
                    return;
                },
                changed = revisions.changed() => {
                    if changed.is_err() {
                        debug!("directory closed, stopping sync");
                        return;
                    }
                },
            }
        }
    }

    /// Create a room named `name` on behalf of `session`.
    ///
    /// Exactly one outcome per call and no retry. On success the new room is
    /// merged into the observable list straight away; the next directory
    /// refresh confirms it.
    pub async fn create_room(&self, session: &Session, name: &str) -> Result<Room, CreateRoomError> {
        let name = validate_room_name(name).inspect_err(|err| {
            debug!(error = %err, "room name rejected");
        })?;

        let room = Room::new(name, session.display_name.clone());
        self.directory.insert(room.clone()).await.map_err(|err| {
            warn!(room = %room.name, error = %err, "room insert failed");
            CreateRoomError::from(err)
        })?;

        info!(room = %room.name, creator = %room.creator, "room created");
        self.rooms.send_if_modified(|rooms| {
            if rooms.iter().any(|r| r.name == room.name) {
                false
            } else {
                rooms.push(room.clone());
                true
            }
        });

        Ok(room)
    }
}
