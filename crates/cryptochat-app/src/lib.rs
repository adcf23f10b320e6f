//! Application layer for Cryptochat
//!
//! Pure state machines and a generic runtime for screens, navigation and
//! collaborator orchestration, so that scripted tests exercise the same code
//! that runs behind the terminal frontend.
//!
//! # Components
//!
//! - [`App`]: application state (router, session, screens)
//! - [`CreateRoomDialog`]: create-room dialog state machine
//! - [`RoomListScreen`]: observed rooms plus the dialog
//! - [`Router`]: destinations and back stack
//! - [`Driver`]: trait for frontend I/O abstraction
//! - [`Runtime`]: generic orchestration loop using Driver

mod action;
mod app;
mod auth;
mod dialog;
mod driver;
mod event;
mod route;
mod runtime;
mod screen;

pub use action::AppAction;
pub use app::App;
pub use auth::AuthScreen;
pub use dialog::{CreateRequest, CreateRoomDialog, DialogState, RequestId};
pub use driver::Driver;
pub use event::AppEvent;
pub use route::{Destination, NavOptions, Router};
pub use runtime::Runtime;
pub use screen::{RoomListEffect, RoomListEvent, RoomListScreen};
