//! Deterministic test harness for the Cryptochat client.
//!
//! Test doubles that plug into the [`cryptochat_app::Runtime`] seams: a
//! scripted [`cryptochat_app::Driver`] standing in for the user and the
//! screen, and a fault-injecting [`cryptochat_core::RoomDirectory`] wrapper
//! standing in for an unreliable backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod faulty_directory;
pub mod scripted_driver;

pub use faulty_directory::{DirectoryFault, FaultyDirectory};
pub use scripted_driver::{RenderedFrame, ScriptError, ScriptedDriver};
