//! Driver trait for abstracting frontend I/O.
//!
//! The [`Driver`] trait decouples the application runtime from a specific
//! frontend. Each frontend implements the trait to provide input and
//! rendering, while the generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, AppEvent};

/// Abstracts frontend I/O for the application runtime.
///
/// Implementations provide platform-specific input and output while the
/// generic [`crate::Runtime`] handles orchestration. This ensures the same
/// orchestration code runs in the terminal frontend and in scripted tests.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for input and return the events it produced.
    ///
    /// The runtime races this against other sources and may drop the future
    /// before it completes, so it must be cancel-safe. Returns an empty vector
    /// if the input produced no event.
    fn poll_event(
        &mut self,
        app: &App,
    ) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release frontend resources. Called once when the runtime exits.
    fn stop(&mut self);
}
