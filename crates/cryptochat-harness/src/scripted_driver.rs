//! Scripted driver.
//!
//! Replays a fixed script of user input and records every render. A script
//! is a queue of steps:
//!
//! - `send`: hand a batch of events to the runtime
//! - `wait_until`: hold further input until a predicate on the app holds
//!
//! While waiting, `poll_event` stays pending; the runtime re-polls after any
//! other source (room list change, collaborator completion) wakes it, so the
//! predicate is re-checked after every state change. An exhausted script
//! quits the app.
//!
//! Nothing is consumed until the `poll_event` future is polled, so the
//! runtime may drop it in `select!` without losing input.

use std::{collections::VecDeque, fmt, future::Future};

use cryptochat_app::{App, AppEvent, Destination, DialogState, Driver};
use cryptochat_core::Room;
use thiserror::Error;
use tracing::debug;

type Predicate = Box<dyn Fn(&App) -> bool + Send>;

enum Step {
    Send(Vec<AppEvent>),
    WaitUntil { label: &'static str, predicate: Predicate },
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Send(events) => f.debug_tuple("Send").field(events).finish(),
            Self::WaitUntil { label, .. } => f.debug_tuple("WaitUntil").field(label).finish(),
        }
    }
}

/// Errors raised by the scripted driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Rendering was configured to fail.
    #[error("render failed at frame {0}")]
    RenderFailed(usize),
}

/// What a render would have shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    /// Screen shown.
    pub destination: Destination,
    /// Rooms listed.
    pub rooms: Vec<Room>,
    /// Create dialog state.
    pub dialog: DialogState,
    /// Status line.
    pub status: Option<String>,
}

impl RenderedFrame {
    fn capture(app: &App) -> Self {
        Self {
            destination: app.current().clone(),
            rooms: app.room_list().rooms().to_vec(),
            dialog: app.room_list().dialog().state().clone(),
            status: app.status().map(str::to_string),
        }
    }
}

/// Driver that replays a script and records renders.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    steps: VecDeque<Step>,
    frames: Vec<RenderedFrame>,
    fail_render_at: Option<usize>,
    stopped: bool,
}

impl ScriptedDriver {
    /// Empty script; the app quits on the first poll.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event.
    #[must_use]
    pub fn send(self, event: impl Into<AppEvent>) -> Self {
        self.send_all([event.into()])
    }

    /// Append a batch of events delivered together.
    #[must_use]
    pub fn send_all(mut self, events: impl IntoIterator<Item = AppEvent>) -> Self {
        self.steps.push_back(Step::Send(events.into_iter().collect()));
        self
    }

    /// Append a wait for `predicate` to hold.
    #[must_use]
    pub fn wait_until(
        mut self,
        label: &'static str,
        predicate: impl Fn(&App) -> bool + Send + 'static,
    ) -> Self {
        self.steps.push_back(Step::WaitUntil { label, predicate: Box::new(predicate) });
        self
    }

    /// Make the `n`th render (zero-based) fail.
    #[must_use]
    pub fn fail_render_at(mut self, n: usize) -> Self {
        self.fail_render_at = Some(n);
        self
    }

    /// Every successful render so far.
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// Last successful render.
    pub fn last_frame(&self) -> Option<&RenderedFrame> {
        self.frames.last()
    }

    /// Whether [`Driver::stop`] was called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Steps not yet consumed.
    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }

    fn next_events(&mut self, app: &App) -> Option<Vec<AppEvent>> {
        loop {
            match self.steps.front() {
                None => return Some(vec![AppEvent::Quit]),
                Some(Step::WaitUntil { label, predicate }) => {
                    if !predicate(app) {
                        return None;
                    }
                    debug!(label, "script condition met");
                    self.steps.pop_front();
                },
                Some(Step::Send(_)) => {
                    if let Some(Step::Send(events)) = self.steps.pop_front() {
                        return Some(events);
                    }
                },
            }
        }
    }
}

impl Driver for ScriptedDriver {
    type Error = ScriptError;

    fn poll_event(
        &mut self,
        app: &App,
    ) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send {
        async move {
            // Steps are consumed on the first poll, which completes without
            // yielding, so a future dropped unpolled leaves the script intact.
            match self.next_events(app) {
                Some(events) => Ok(events),
                None => std::future::pending().await,
            }
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let index = self.frames.len();
        if self.fail_render_at == Some(index) {
            return Err(ScriptError::RenderFailed(index));
        }
        self.frames.push(RenderedFrame::capture(app));
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
