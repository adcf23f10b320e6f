//! Generic runtime.
//!
//! Owns the [`App`] and is the only place its state is mutated. Three sources
//! feed the loop:
//!
//! - frontend input from the [`Driver`]
//! - room list observations from the [`RoomListProvider`]
//! - completions of spawned collaborator calls (create room, sign in)
//!
//! Collaborator calls run as tokio tasks and report back over a channel, so
//! their results are applied on the loop like any other event.

use std::{future::Future, sync::Arc};

use cryptochat_core::{Identity, Room, RoomDirectory, RoomListProvider, Session};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::{App, AppAction, AppEvent, Driver, RequestId, screen::RoomListEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Orchestration loop binding a driver to the collaborators.
pub struct Runtime<D, R, I> {
    driver: D,
    app: App,
    provider: Arc<RoomListProvider<R>>,
    identity: Arc<I>,
    completions_tx: mpsc::UnboundedSender<AppEvent>,
    completions: mpsc::UnboundedReceiver<AppEvent>,
}

impl<D, R, I> Runtime<D, R, I>
where
    D: Driver,
    R: RoomDirectory,
    I: Identity,
{
    /// Create a runtime. The identity collaborator is asked once for a
    /// restored session, which decides the start screen.
    pub fn new(driver: D, provider: Arc<RoomListProvider<R>>, identity: Arc<I>) -> Self {
        let app = App::new(identity.current_session());
        let (completions_tx, completions) = mpsc::unbounded_channel();
        Self { driver, app, provider, identity, completions_tx, completions }
    }

    /// Application state.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// The frontend driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run until the app quits or the driver fails.
    ///
    /// Must be called from within a tokio runtime. The room list sync task is
    /// started here and stops with the loop.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        let mut rooms = self.provider.observe_rooms();
        let sync = tokio::spawn({
            let provider = Arc::clone(&self.provider);
            async move { provider.sync().await }
        });

        let result = self.run_loop(&mut rooms).await;

        sync.abort();
        self.driver.stop();
        info!(ok = result.is_ok(), "runtime stopped");
        result
    }

    async fn run_loop(&mut self, rooms: &mut watch::Receiver<Vec<Room>>) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        loop {
            let events = tokio::select! {
                events = self.driver.poll_event(&self.app) => events?,
                changed = rooms.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                    let rooms = rooms.borrow_and_update().clone();
                    vec![RoomListEvent::RoomsChanged(rooms).into()]
                },
                Some(event) = self.completions.recv() => vec![event],
            };

            for event in events {
                let actions = self.app.handle(event);
                if self.execute(actions).await? == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }

    async fn execute(&mut self, actions: Vec<AppAction>) -> Result<Flow, D::Error> {
        let mut render = false;

        for action in actions {
            match action {
                AppAction::Render => render = true,
                AppAction::Quit => return Ok(Flow::Quit),
                AppAction::CreateRoom { request, name, session } => {
                    self.create_room(request, name, session);
                },
                AppAction::SignIn { email, password } => {
                    let identity = Arc::clone(&self.identity);
                    self.spawn(async move {
                        AppEvent::AuthFinished(identity.sign_in(&email, &password).await)
                    });
                },
                AppAction::Register { email, password, display_name } => {
                    let identity = Arc::clone(&self.identity);
                    self.spawn(async move {
                        AppEvent::AuthFinished(
                            identity.register(&email, &password, &display_name).await,
                        )
                    });
                },
                AppAction::SignOut => self.identity.sign_out().await,
            }
        }

        if render {
            self.driver.render(&self.app)?;
        }
        Ok(Flow::Continue)
    }

    fn create_room(&self, request: RequestId, name: String, session: Session) {
        debug!(request = request.0, %name, "creating room");
        let provider = Arc::clone(&self.provider);
        self.spawn(async move {
            let result = provider.create_room(&session, &name).await;
            RoomListEvent::CreateFinished { request, result }.into()
        });
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            // The loop may already have exited; the result is moot then.
            let _ = tx.send(task.await);
        });
    }
}
