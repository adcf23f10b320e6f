//! Keyboard handling.
//!
//! Turns key presses into [`AppEvent`]s. The terminal owns only the command
//! line and the room list cursor; everything else is read from the [`App`].
//! While the create-room dialog is open, keys edit the dialog draft instead
//! of the command line: Enter confirms and Esc cancels.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cryptochat_app::{App, AppEvent, Destination, RoomListEvent};

use crate::commands::{self, Command};

/// Key presses the client reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Delete the last character.
    Backspace,
    /// Submit.
    Enter,
    /// Cancel or go back.
    Esc,
    /// Move the room cursor up.
    Up,
    /// Move the room cursor down.
    Down,
    /// Ctrl-C.
    Interrupt,
    /// Anything else.
    Other,
}

impl From<KeyEvent> for KeyInput {
    fn from(key: KeyEvent) -> Self {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'd') => Self::Interrupt,
                _ => Self::Other,
            };
        }
        match key.code {
            KeyCode::Char(c) => Self::Char(c),
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Enter => Self::Enter,
            KeyCode::Esc => Self::Esc,
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            _ => Self::Other,
        }
    }
}

/// Command line and room cursor.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    line: String,
    selected: usize,
}

impl InputState {
    /// Empty command line, cursor on the first room.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text typed on the command line.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Index of the highlighted room, clamped to the listed rooms.
    pub fn selected(&self, app: &App) -> Option<usize> {
        let len = app.room_list().rooms().len();
        (len > 0).then(|| self.selected.min(len - 1))
    }

    /// Apply one key press.
    ///
    /// Returns the events to hand to the app; an empty result means only the
    /// local input state changed.
    pub fn handle_key(&mut self, key: KeyInput, app: &App) -> Vec<AppEvent> {
        if key == KeyInput::Interrupt {
            return vec![AppEvent::Quit];
        }

        if *app.current() == Destination::ChatRoomList && app.room_list().dialog().is_open() {
            return Self::dialog_key(key, app);
        }

        match key {
            KeyInput::Char(c) => {
                self.line.push(c);
                vec![]
            },
            KeyInput::Backspace => {
                self.line.pop();
                vec![]
            },
            KeyInput::Esc => {
                if self.line.is_empty() {
                    return vec![AppEvent::Back];
                }
                self.line.clear();
                vec![]
            },
            KeyInput::Up => {
                self.selected = self.selected(app).unwrap_or(0).saturating_sub(1);
                vec![]
            },
            KeyInput::Down => {
                if let Some(current) = self.selected(app) {
                    let last = app.room_list().rooms().len().saturating_sub(1);
                    self.selected = (current + 1).min(last);
                }
                vec![]
            },
            KeyInput::Enter => {
                let line = std::mem::take(&mut self.line);
                if line.trim().is_empty() {
                    return self.open_selected(app);
                }
                Self::submit(&line, app)
            },
            KeyInput::Interrupt | KeyInput::Other => vec![],
        }
    }

    fn dialog_key(key: KeyInput, app: &App) -> Vec<AppEvent> {
        let draft = app.room_list().dialog().draft().unwrap_or_default();
        let event = match key {
            KeyInput::Char(c) => {
                let mut draft = draft.to_string();
                draft.push(c);
                RoomListEvent::EditDraft(draft)
            },
            KeyInput::Backspace => {
                let mut draft = draft.to_string();
                draft.pop();
                RoomListEvent::EditDraft(draft)
            },
            KeyInput::Enter => RoomListEvent::Confirm,
            KeyInput::Esc => RoomListEvent::Cancel,
            KeyInput::Up | KeyInput::Down | KeyInput::Interrupt | KeyInput::Other => {
                return vec![];
            },
        };
        vec![event.into()]
    }

    fn open_selected(&self, app: &App) -> Vec<AppEvent> {
        if *app.current() != Destination::ChatRoomList {
            return vec![];
        }
        self.selected(app)
            .and_then(|index| app.room_list().rooms().get(index))
            .map(|room| vec![RoomListEvent::Select(room.name.clone()).into()])
            .unwrap_or_default()
    }

    fn submit(line: &str, app: &App) -> Vec<AppEvent> {
        match commands::parse(line) {
            Command::Create { name } => {
                if let Some(notice) = Self::require_room_list(app) {
                    return vec![notice];
                }
                let mut events = vec![RoomListEvent::OpenDialog.into()];
                if let Some(name) = name {
                    events.push(RoomListEvent::EditDraft(name).into());
                }
                events
            },
            Command::Open { name } => {
                if let Some(notice) = Self::require_room_list(app) {
                    return vec![notice];
                }
                if app.room_list().room(&name).is_none() {
                    return vec![AppEvent::Notice(format!("No room named \"{name}\""))];
                }
                vec![RoomListEvent::Select(name).into()]
            },
            Command::Back => vec![AppEvent::Back],
            Command::Login { email, password } => {
                if app.session().is_some() {
                    return vec![AppEvent::Notice("Already signed in".into())];
                }
                vec![AppEvent::ChooseLogin, AppEvent::SubmitLogin { email, password }]
            },
            Command::Register { email, password, display_name } => {
                if app.session().is_some() {
                    return vec![AppEvent::Notice("Already signed in".into())];
                }
                vec![
                    AppEvent::ChooseRegister,
                    AppEvent::SubmitRegister { email, password, display_name },
                ]
            },
            Command::Logout => {
                if app.session().is_none() {
                    return vec![AppEvent::Notice("Not signed in".into())];
                }
                vec![AppEvent::SignOut]
            },
            Command::Help => vec![AppEvent::Notice(commands::HELP.into())],
            Command::Quit => vec![AppEvent::Quit],
            Command::Text { .. } => {
                vec![AppEvent::Notice("Messaging is not available here; try /help".into())]
            },
            Command::Unknown { input } => {
                vec![AppEvent::Notice(format!("Unknown command: {input}"))]
            },
            Command::InvalidArgs { error, .. } => vec![AppEvent::Notice(error)],
        }
    }

    fn require_room_list(app: &App) -> Option<AppEvent> {
        if app.session().is_none() {
            return Some(AppEvent::Notice("Sign in to see rooms".into()));
        }
        if *app.current() != Destination::ChatRoomList {
            return Some(AppEvent::Notice("Go /back to the room list first".into()));
        }
        None
    }
}
