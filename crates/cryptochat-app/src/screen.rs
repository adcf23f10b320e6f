//! Room list screen.
//!
//! Owns the rooms last observed from the provider and the create dialog.
//! Room selection is reported outwards and never touches the dialog.

use cryptochat_core::{CreateRoomError, Room};
use tracing::{debug, info};

use crate::dialog::{CreateRequest, CreateRoomDialog, RequestId};

/// Input to the room list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomListEvent {
    /// A new room list was observed.
    RoomsChanged(Vec<Room>),
    /// Create affordance activated.
    OpenDialog,
    /// Room-name field edited.
    EditDraft(String),
    /// Create confirmed.
    Confirm,
    /// Dialog dismissed.
    Cancel,
    /// A room was picked from the list.
    Select(String),
    /// Outcome of a create request.
    CreateFinished {
        /// The request this result belongs to.
        request: RequestId,
        /// Created room or failure message.
        result: Result<Room, CreateRoomError>,
    },
}

/// What the screen asks of the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomListEffect {
    /// Nothing visible changed.
    None,
    /// State changed; redraw.
    Redraw,
    /// Run a create request, then redraw.
    Create(CreateRequest),
    /// Navigate to the named room.
    Selected(String),
}

/// Room list plus create dialog.
#[derive(Debug, Clone, Default)]
pub struct RoomListScreen {
    rooms: Vec<Room>,
    loaded: bool,
    dialog: CreateRoomDialog,
}

impl RoomListScreen {
    /// Create an empty screen with the dialog closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rooms in display order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Whether any observation has arrived yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Look up a room by name.
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name == name)
    }

    /// The create dialog.
    pub fn dialog(&self) -> &CreateRoomDialog {
        &self.dialog
    }

    /// Process one event.
    pub fn handle(&mut self, event: RoomListEvent) -> RoomListEffect {
        match event {
            RoomListEvent::RoomsChanged(rooms) => {
                let first_load = !self.loaded;
                self.loaded = true;
                if self.rooms == rooms && !first_load {
                    return RoomListEffect::None;
                }
                debug!(count = rooms.len(), "room list updated");
                self.rooms = rooms;
                RoomListEffect::Redraw
            },
            RoomListEvent::OpenDialog => redraw_if(self.dialog.open()),
            RoomListEvent::EditDraft(text) => redraw_if(self.dialog.edit(text)),
            RoomListEvent::Cancel => redraw_if(self.dialog.cancel()),
            RoomListEvent::Confirm => match self.dialog.confirm() {
                Some(request) => {
                    debug!(request = request.id.0, name = %request.name, "create confirmed");
                    RoomListEffect::Create(request)
                },
                None => RoomListEffect::None,
            },
            RoomListEvent::Select(name) => {
                if self.room(&name).is_some() {
                    RoomListEffect::Selected(name)
                } else {
                    debug!(%name, "selected room is not listed");
                    RoomListEffect::None
                }
            },
            RoomListEvent::CreateFinished { request, result } => {
                if let Ok(room) = &result {
                    info!(room = %room.name, "room creation confirmed");
                    if self.room(&room.name).is_none() {
                        self.rooms.push(room.clone());
                    }
                }
                let applied = self.dialog.finish(request, &result);
                if !applied {
                    debug!(request = request.0, "stale create result ignored by dialog");
                }
                RoomListEffect::Redraw
            },
        }
    }
}

fn redraw_if(changed: bool) -> RoomListEffect {
    if changed { RoomListEffect::Redraw } else { RoomListEffect::None }
}
