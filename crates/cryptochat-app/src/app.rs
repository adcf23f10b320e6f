//! Application state machine.
//!
//! Composes the router, the session, the room list screen and the auth form.
//! [`App::handle`] is pure: it mutates state and returns actions, and never
//! performs I/O. The runtime executes the actions and feeds results back as
//! events.

use cryptochat_core::{CreateRoomError, Room, Session};
use tracing::{debug, info};

use crate::{
    AppAction, AppEvent,
    auth::AuthScreen,
    route::{Destination, NavOptions, Router},
    screen::{RoomListEffect, RoomListEvent, RoomListScreen},
};

/// Application state.
#[derive(Debug, Clone)]
pub struct App {
    router: Router,
    session: Option<Session>,
    room_list: RoomListScreen,
    auth: AuthScreen,
    status: Option<String>,
}

impl App {
    /// Create the app. The start screen follows from whether a session was
    /// restored.
    pub fn new(session: Option<Session>) -> Self {
        let start = Destination::initial(session.as_ref());
        info!(start = %start, signed_in = session.is_some(), "app started");
        Self {
            router: Router::new(start),
            session,
            room_list: RoomListScreen::new(),
            auth: AuthScreen::new(),
            status: None,
        }
    }

    /// Navigation state.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Screen currently shown.
    pub fn current(&self) -> &Destination {
        self.router.current()
    }

    /// Signed-in user, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Room list screen state.
    pub fn room_list(&self) -> &RoomListScreen {
        &self.room_list
    }

    /// Login/registration form state.
    pub fn auth(&self) -> &AuthScreen {
        &self.auth
    }

    /// Transient status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Room shown by the detail screen, if it is listed.
    pub fn current_room(&self) -> Option<&Room> {
        match self.router.current() {
            Destination::ChatRoom { room_id } => self.room_list.room(room_id),
            _ => None,
        }
    }

    /// Process one event and return the actions to execute.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::RoomList(event) => self.handle_room_list(event),
            AppEvent::ChooseRegister => self.choose(Destination::Register),
            AppEvent::ChooseLogin => self.choose(Destination::Login),
            AppEvent::SubmitLogin { email, password } => {
                if *self.current() != Destination::Login || !self.auth.submit() {
                    return vec![];
                }
                debug!(%email, "login submitted");
                vec![AppAction::SignIn { email, password }, AppAction::Render]
            },
            AppEvent::SubmitRegister { email, password, display_name } => {
                if *self.current() != Destination::Register || !self.auth.submit() {
                    return vec![];
                }
                debug!(%email, "registration submitted");
                vec![AppAction::Register { email, password, display_name }, AppAction::Render]
            },
            AppEvent::AuthFinished(result) => {
                let Some(session) = self.auth.finish(result) else {
                    return vec![AppAction::Render];
                };
                info!(user = %session.display_name, "signed in");
                self.session = Some(session);
                self.navigate(Destination::ChatRoomList, NavOptions::CLEAR);
                vec![AppAction::Render]
            },
            AppEvent::SignOut => {
                let Some(session) = self.session.take() else {
                    return vec![];
                };
                info!(user = %session.display_name, "signed out");
                self.room_list.handle(RoomListEvent::Cancel);
                self.auth.reset();
                self.navigate(Destination::AuthenticationOption, NavOptions::CLEAR);
                vec![AppAction::SignOut, AppAction::Render]
            },
            AppEvent::Back => self.back(),
            AppEvent::Notice(message) => {
                self.status = Some(message);
                vec![AppAction::Render]
            },
            AppEvent::Quit => vec![AppAction::Quit],
        }
    }

    fn handle_room_list(&mut self, event: RoomListEvent) -> Vec<AppAction> {
        let is_input = matches!(
            event,
            RoomListEvent::OpenDialog
                | RoomListEvent::EditDraft(_)
                | RoomListEvent::Confirm
                | RoomListEvent::Cancel
                | RoomListEvent::Select(_)
        );
        if is_input && *self.current() != Destination::ChatRoomList {
            return vec![];
        }

        match self.room_list.handle(event) {
            RoomListEffect::None => vec![],
            RoomListEffect::Redraw => vec![AppAction::Render],
            RoomListEffect::Create(request) => {
                if let Some(session) = self.session.clone() {
                    return vec![
                        AppAction::CreateRoom { request: request.id, name: request.name, session },
                        AppAction::Render,
                    ];
                }
                self.room_list.handle(RoomListEvent::CreateFinished {
                    request: request.id,
                    result: Err(CreateRoomError::new("You must be signed in to create a room")),
                });
                vec![AppAction::Render]
            },
            RoomListEffect::Selected(room_id) => {
                self.navigate(Destination::ChatRoom { room_id }, NavOptions::default());
                vec![AppAction::Render]
            },
        }
    }

    fn choose(&mut self, dest: Destination) -> Vec<AppAction> {
        if self.session.is_some() || self.auth.is_pending() || *self.current() == dest {
            return vec![];
        }
        self.auth.reset();
        self.navigate(dest, NavOptions::default());
        vec![AppAction::Render]
    }

    fn back(&mut self) -> Vec<AppAction> {
        if *self.current() == Destination::ChatRoomList && self.room_list.dialog().is_open() {
            self.room_list.handle(RoomListEvent::Cancel);
            return vec![AppAction::Render];
        }
        if self.auth.is_pending() {
            return vec![];
        }
        if !self.router.back() {
            return vec![];
        }
        self.auth.reset();
        self.status = None;
        vec![AppAction::Render]
    }

    fn navigate(&mut self, dest: Destination, options: NavOptions) {
        self.status = None;
        self.router.navigate(dest, options);
    }
}
