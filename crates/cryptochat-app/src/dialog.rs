//! Create-room dialog state machine.
//!
//! ```text
//!            open                       confirm
//! ┌────────┐ ─────> ┌──────────────────┐ ─────> ┌────────────────────────┐
//! │ Closed │        │ Open(draft, err) │        │ Open(draft, err, req)  │
//! └────────┘ <───── └──────────────────┘ <───── └────────────────────────┘
//!     ^      cancel          ^            failure(req): err = message
//!     │                      │
//!     └──────────────────────┴──── cancel, or success(req)
//! ```
//!
//! Only a failed create sets the error, and leaving the dialog always drops
//! both draft and error. While a request is in flight further confirmations
//! are ignored. Results are matched by [`RequestId`]; a result for any other
//! request (because the dialog was cancelled or reopened meanwhile) leaves
//! the dialog untouched.

use cryptochat_core::{CreateRoomError, Room};

/// Ties a create result to the confirmation that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// A confirmed create, to be executed against the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    /// Request identifier.
    pub id: RequestId,
    /// Room name exactly as typed; the provider validates it.
    pub name: String,
}

/// Dialog state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    /// Not shown.
    #[default]
    Closed,
    /// Shown, with the user's text and the last failure message.
    Open {
        /// Text in the room-name field.
        draft: String,
        /// Last create failure. Empty means no error.
        error: String,
        /// In-flight create request, if any.
        pending: Option<RequestId>,
    },
}

/// The create-room dialog owned by the room list screen.
#[derive(Debug, Clone, Default)]
pub struct CreateRoomDialog {
    state: DialogState,
    next_request: u64,
}

impl CreateRoomDialog {
    /// Create a closed dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DialogState {
        &self.state
    }

    /// Whether the dialog is shown.
    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    /// Draft text, if open.
    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            DialogState::Open { draft, .. } => Some(draft),
            DialogState::Closed => None,
        }
    }

    /// Error message, if open. Empty means no error.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            DialogState::Open { error, .. } => Some(error),
            DialogState::Closed => None,
        }
    }

    /// In-flight request, if any.
    pub fn pending(&self) -> Option<RequestId> {
        match &self.state {
            DialogState::Open { pending, .. } => *pending,
            DialogState::Closed => None,
        }
    }

    /// Show the dialog with an empty draft and no error.
    ///
    /// Returns `false` if it was already open, in which case nothing changes.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.state = DialogState::Open { draft: String::new(), error: String::new(), pending: None };
        true
    }

    /// Replace the draft text. Ignored while closed.
    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            DialogState::Open { draft, .. } => {
                *draft = text.into();
                true
            },
            DialogState::Closed => false,
        }
    }

    /// Dismiss the dialog, dropping draft and error.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = DialogState::Closed;
        was_open
    }

    /// Confirm the current draft.
    ///
    /// Returns the request to execute, or `None` if the dialog is closed or a
    /// request is already in flight.
    pub fn confirm(&mut self) -> Option<CreateRequest> {
        let DialogState::Open { draft, pending, .. } = &mut self.state else {
            return None;
        };
        if pending.is_some() {
            return None;
        }

        self.next_request += 1;
        let id = RequestId(self.next_request);
        *pending = Some(id);

        Some(CreateRequest { id, name: draft.clone() })
    }

    /// Apply the outcome of `request`.
    ///
    /// Success closes the dialog. Failure keeps it open with the draft intact
    /// and the message replacing any previous error. Returns `false` when the
    /// result does not belong to the in-flight request.
    pub fn finish(&mut self, request: RequestId, result: &Result<Room, CreateRoomError>) -> bool {
        let DialogState::Open { error, pending, .. } = &mut self.state else {
            return false;
        };
        if *pending != Some(request) {
            return false;
        }

        match result {
            Ok(_) => self.state = DialogState::Closed,
            Err(err) => {
                *error = err.message().to_string();
                *pending = None;
            },
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with(draft: &str) -> CreateRoomDialog {
        let mut dialog = CreateRoomDialog::new();
        dialog.open();
        dialog.edit(draft);
        dialog
    }

    #[test]
    fn starts_closed() {
        let dialog = CreateRoomDialog::new();
        assert_eq!(dialog.state(), &DialogState::Closed);
        assert_eq!(dialog.draft(), None);
    }

    #[test]
    fn open_starts_empty() {
        let mut dialog = CreateRoomDialog::new();
        assert!(dialog.open());
        assert_eq!(dialog.draft(), Some(""));
        assert_eq!(dialog.error(), Some(""));
        assert_eq!(dialog.pending(), None);
    }

    #[test]
    fn open_twice_keeps_draft() {
        let mut dialog = open_with("Team");
        assert!(!dialog.open());
        assert_eq!(dialog.draft(), Some("Team"));
    }

    #[test]
    fn edit_ignored_while_closed() {
        let mut dialog = CreateRoomDialog::new();
        assert!(!dialog.edit("x"));
        assert_eq!(dialog.state(), &DialogState::Closed);
    }

    #[test]
    fn confirm_emits_request_with_draft() {
        let mut dialog = open_with("Team Sync");
        let request = dialog.confirm().unwrap();
        assert_eq!(request.name, "Team Sync");
        assert_eq!(dialog.pending(), Some(request.id));
    }

    #[test]
    fn confirm_while_pending_is_ignored() {
        let mut dialog = open_with("Team Sync");
        assert!(dialog.confirm().is_some());
        assert!(dialog.confirm().is_none());
    }

    #[test]
    fn confirm_while_closed_is_ignored() {
        let mut dialog = CreateRoomDialog::new();
        assert!(dialog.confirm().is_none());
    }

    #[test]
    fn success_closes_and_resets() {
        let mut dialog = open_with("Team Sync");
        let request = dialog.confirm().unwrap();

        assert!(dialog.finish(request.id, &Ok(Room::new("Team Sync", "alice"))));
        assert_eq!(dialog.state(), &DialogState::Closed);

        dialog.open();
        assert_eq!(dialog.draft(), Some(""));
        assert_eq!(dialog.error(), Some(""));
    }

    #[test]
    fn failure_keeps_draft_and_sets_error() {
        let mut dialog = open_with("Team Sync");
        let request = dialog.confirm().unwrap();

        let err = CreateRoomError::new("A room named \"Team Sync\" already exists");
        assert!(dialog.finish(request.id, &Err(err)));

        assert_eq!(dialog.draft(), Some("Team Sync"));
        assert_eq!(dialog.error(), Some("A room named \"Team Sync\" already exists"));
        assert_eq!(dialog.pending(), None);
    }

    #[test]
    fn new_failure_replaces_previous_error() {
        let mut dialog = open_with("");
        let first = dialog.confirm().unwrap();
        dialog.finish(first.id, &Err(CreateRoomError::new("first")));

        let second = dialog.confirm().unwrap();
        assert_ne!(first.id, second.id);
        dialog.finish(second.id, &Err(CreateRoomError::new("second")));

        assert_eq!(dialog.error(), Some("second"));
    }

    #[test]
    fn cancel_resets_everything() {
        let mut dialog = open_with("draft");
        let request = dialog.confirm().unwrap();
        dialog.finish(request.id, &Err(CreateRoomError::new("boom")));

        assert!(dialog.cancel());
        assert_eq!(dialog.state(), &DialogState::Closed);
        assert!(!dialog.cancel());
    }

    #[test]
    fn stale_result_after_cancel_is_ignored() {
        let mut dialog = open_with("Team Sync");
        let request = dialog.confirm().unwrap();
        dialog.cancel();

        assert!(!dialog.finish(request.id, &Err(CreateRoomError::new("late"))));
        assert_eq!(dialog.state(), &DialogState::Closed);

        dialog.open();
        assert!(!dialog.finish(request.id, &Err(CreateRoomError::new("late"))));
        assert_eq!(dialog.error(), Some(""));
    }
}
