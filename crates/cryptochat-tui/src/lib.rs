//! Cryptochat terminal client
//!
//! Keyboard handling, rendering and the [`TerminalDriver`] that plugs them
//! into [`cryptochat_app::Runtime`]. Screen state and collaborator calls stay
//! in the app crate; this crate only turns keys into events and state into
//! frames.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod input;
pub mod terminal;
pub mod ui;

pub use commands::Command;
pub use cryptochat_app::{App, AppAction, AppEvent, Driver, Runtime};
pub use input::{InputState, KeyInput};
pub use terminal::{TerminalDriver, TerminalError};
