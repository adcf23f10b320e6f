//! Terminal driver.
//!
//! Implements [`Driver`] on top of crossterm's async event stream and a
//! ratatui terminal in raw mode on the alternate screen.

use std::{
    future::Future,
    io::{self, Stdout},
};

use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use cryptochat_app::{App, AppEvent, Driver};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    input::{InputState, KeyInput},
    ui,
};

/// Terminal I/O failures.
#[derive(Error, Debug)]
pub enum TerminalError {
    /// Reading input or drawing failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Driver for an interactive terminal.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventStream,
    input: InputState,
    stopped: bool,
}

impl TerminalDriver {
    /// Switch the terminal to raw mode and the alternate screen.
    ///
    /// The terminal is restored by [`Driver::stop`], or on drop.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal, events: EventStream::new(), input: InputState::new(), stopped: false })
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    fn poll_event(
        &mut self,
        app: &App,
    ) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send {
        async move {
            loop {
                let Some(event) = self.events.next().await else {
                    debug!("input stream closed");
                    return Ok(vec![AppEvent::Quit]);
                };

                match event? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let events = self.input.handle_key(KeyInput::from(key), app);
                        if !events.is_empty() {
                            return Ok(events);
                        }
                        // Only the command line or cursor changed.
                        self.render(app)?;
                    },
                    Event::Resize(..) => self.render(app)?,
                    _ => {},
                }
            }
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let input = &self.input;
        self.terminal.draw(|frame| ui::draw(frame, app, input))?;
        Ok(())
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Err(err) = self.restore() {
            warn!(error = %err, "failed to restore terminal");
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
