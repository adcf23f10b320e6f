//! Navigation destinations and the back stack.
//!
//! The destination set is closed: every screen the client can show is a
//! [`Destination`] variant, so navigating somewhere unknown cannot be
//! expressed. Route strings exist for logging and for frontends that address
//! screens by name; parsing an unknown route yields `None`.

use std::fmt;

use cryptochat_core::Session;
use tracing::debug;

/// A screen the client can show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Choose between registering and logging in.
    AuthenticationOption,
    /// Account registration.
    Register,
    /// Email/password login.
    Login,
    /// Room list with the create dialog.
    ChatRoomList,
    /// A single room.
    ChatRoom {
        /// Name of the selected room.
        room_id: String,
    },
}

impl Destination {
    const CHATROOM_PREFIX: &'static str = "chatroom/";

    /// Route string for this destination.
    pub fn route(&self) -> String {
        match self {
            Self::AuthenticationOption => "authentication_option".to_string(),
            Self::Register => "register".to_string(),
            Self::Login => "login".to_string(),
            Self::ChatRoomList => "chatroom_list".to_string(),
            Self::ChatRoom { room_id } => format!("{}{room_id}", Self::CHATROOM_PREFIX),
        }
    }

    /// Parse a route string produced by [`Destination::route`].
    pub fn from_route(route: &str) -> Option<Self> {
        match route {
            "authentication_option" => Some(Self::AuthenticationOption),
            "register" => Some(Self::Register),
            "login" => Some(Self::Login),
            "chatroom_list" => Some(Self::ChatRoomList),
            other => other
                .strip_prefix(Self::CHATROOM_PREFIX)
                .filter(|room_id| !room_id.is_empty())
                .map(|room_id| Self::ChatRoom { room_id: room_id.to_string() }),
        }
    }

    /// Whether the screen needs a signed-in user.
    pub fn requires_session(&self) -> bool {
        matches!(self, Self::ChatRoomList | Self::ChatRoom { .. })
    }

    /// Startup destination: the room list if a session was restored,
    /// registration otherwise.
    pub fn initial(session: Option<&Session>) -> Self {
        if session.is_some() { Self::ChatRoomList } else { Self::Register }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route())
    }
}

/// Options for a forward navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavOptions {
    /// Drop the whole back stack so back cannot return to earlier screens.
    pub clear_history: bool,
}

impl NavOptions {
    /// Navigate and forget the history.
    pub const CLEAR: Self = Self { clear_history: true };
}

/// Current destination plus the screens to return to.
#[derive(Debug, Clone)]
pub struct Router {
    current: Destination,
    back_stack: Vec<Destination>,
}

impl Router {
    /// Create a router showing `start`.
    pub fn new(start: Destination) -> Self {
        Self { current: start, back_stack: Vec::new() }
    }

    /// Screen currently shown.
    pub fn current(&self) -> &Destination {
        &self.current
    }

    /// Screens [`Router::back`] returns to, oldest first.
    pub fn back_stack(&self) -> &[Destination] {
        &self.back_stack
    }

    /// Full history, oldest first; the last entry is the current screen.
    pub fn history(&self) -> Vec<Destination> {
        self.back_stack.iter().chain([&self.current]).cloned().collect()
    }

    /// Whether [`Router::back`] would do anything.
    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    /// Show `dest`. Navigating to the screen already shown is a no-op.
    pub fn navigate(&mut self, dest: Destination, options: NavOptions) {
        if options.clear_history {
            debug!(to = %dest, "navigate, clearing history");
            self.back_stack.clear();
            self.current = dest;
            return;
        }

        if self.current == dest {
            return;
        }

        debug!(from = %self.current, to = %dest, "navigate");
        let previous = std::mem::replace(&mut self.current, dest);
        self.back_stack.push(previous);
    }

    /// Return to the previous screen. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.back_stack.pop() else {
            return false;
        };
        self.current = previous;
        debug!(to = %self.current, "navigate back");
        true
    }
}
