//! In-memory collaborators.
//!
//! Stand-ins for the hosted directory and identity services. They behave like
//! the real services from the client's point of view (unique room names,
//! change notifications, account validation) and back both the tests and the
//! offline terminal frontend.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use crate::{
    DirectoryError, Identity, IdentityError, Room, RoomDirectory, Session,
    identity::{MIN_PASSWORD_LEN, is_valid_email},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Room directory held in memory with unique room names.
#[derive(Debug)]
pub struct MemoryDirectory {
    rooms: Mutex<Vec<Room>>,
    revision: watch::Sender<u64>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::with_rooms([])
    }

    /// Create a directory pre-populated with `rooms`.
    ///
    /// Later duplicates of an earlier name are dropped.
    pub fn with_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let mut unique: Vec<Room> = Vec::new();
        for room in rooms {
            if !unique.iter().any(|r| r.name == room.name) {
                unique.push(room);
            }
        }

        Self { rooms: Mutex::new(unique), revision: watch::Sender::new(0) }
    }

    /// Copy of the stored rooms.
    pub fn snapshot(&self) -> Vec<Room> {
        lock(&self.rooms).clone()
    }

    /// Current change counter.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomDirectory for MemoryDirectory {
    async fn list(&self) -> Result<Vec<Room>, DirectoryError> {
        Ok(self.snapshot())
    }

    async fn insert(&self, room: Room) -> Result<(), DirectoryError> {
        {
            let mut rooms = lock(&self.rooms);
            if rooms.iter().any(|r| r.name == room.name) {
                return Err(DirectoryError::Conflict(room.name));
            }
            debug!(room = %room.name, creator = %room.creator, "room stored");
            rooms.push(room);
        }

        self.revision.send_modify(|rev| *rev += 1);
        Ok(())
    }

    fn revisions(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[derive(Debug, Clone)]
struct Account {
    user_id: String,
    password: String,
    display_name: String,
}

#[derive(Debug, Default)]
struct IdentityState {
    accounts: HashMap<String, Account>,
    current: Option<Session>,
    next_user: u64,
}

impl IdentityState {
    fn create_account(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, IdentityError> {
        if !is_valid_email(email) {
            return Err(IdentityError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::WeakPassword { min: MIN_PASSWORD_LEN });
        }
        if self.accounts.contains_key(email) {
            return Err(IdentityError::EmailInUse);
        }

        let display_name = match display_name.trim() {
            "" => email.split('@').next().unwrap_or(email).to_string(),
            name => name.to_string(),
        };

        self.next_user += 1;
        let account = Account {
            user_id: format!("user-{}", self.next_user),
            password: password.to_string(),
            display_name,
        };
        let session = Session::new(&account.user_id, email, &account.display_name);
        self.accounts.insert(email.to_string(), account);

        Ok(session)
    }
}

/// Identity service held in memory.
///
/// Accounts are keyed by email. Suitable for tests and offline demos only.
#[derive(Debug, Default)]
pub struct MemoryIdentity {
    state: Mutex<IdentityState>,
}

impl MemoryIdentity {
    /// Create a service with no accounts and no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account up front. Invalid accounts are rejected with the
    /// same errors [`Identity::register`] would return.
    pub fn with_account(
        self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Self, IdentityError> {
        lock(&self.state).create_account(email, password, display_name)?;
        Ok(self)
    }

    /// Start with `email` already signed in, as if a session had been
    /// restored from a previous run.
    pub fn signed_in(self, email: &str) -> Result<Self, IdentityError> {
        {
            let mut state = lock(&self.state);
            let account =
                state.accounts.get(email).cloned().ok_or(IdentityError::InvalidCredentials)?;
            state.current = Some(Session::new(account.user_id, email, account.display_name));
        }
        Ok(self)
    }
}

#[async_trait]
impl Identity for MemoryIdentity {
    fn current_session(&self) -> Option<Session> {
        lock(&self.state).current.clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let mut state = lock(&self.state);
        let account = state
            .accounts
            .get(email)
            .filter(|account| account.password == password)
            .cloned()
            .ok_or(IdentityError::InvalidCredentials)?;

        let session = Session::new(account.user_id, email, account.display_name);
        state.current = Some(session.clone());
        Ok(session)
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, IdentityError> {
        let mut state = lock(&self.state);
        let session = state.create_account(email, password, display_name)?;
        state.current = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) {
        lock(&self.state).current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directory_rejects_duplicate_names() {
        let directory = MemoryDirectory::new();
        directory.insert(Room::new("Team Sync", "alice")).await.unwrap();

        let result = directory.insert(Room::new("Team Sync", "bob")).await;
        assert_eq!(result, Err(DirectoryError::Conflict("Team Sync".into())));
        assert_eq!(directory.snapshot(), vec![Room::new("Team Sync", "alice")]);
    }

    #[tokio::test]
    async fn directory_bumps_revision_on_insert_only() {
        let directory = MemoryDirectory::new();
        let mut revisions = directory.revisions();
        assert_eq!(*revisions.borrow_and_update(), 0);

        directory.insert(Room::new("a", "alice")).await.unwrap();
        assert!(revisions.has_changed().unwrap());
        assert_eq!(*revisions.borrow_and_update(), 1);

        let _ = directory.insert(Room::new("a", "alice")).await;
        assert!(!revisions.has_changed().unwrap());
        assert_eq!(directory.revision(), 1);
    }

    #[test]
    fn seeded_directory_drops_duplicates() {
        let directory =
            MemoryDirectory::with_rooms([Room::new("a", "x"), Room::new("b", "y"), Room::new("a", "z")]);
        assert_eq!(directory.snapshot(), vec![Room::new("a", "x"), Room::new("b", "y")]);
    }

    #[tokio::test]
    async fn register_signs_in() {
        let identity = MemoryIdentity::new();
        assert_eq!(identity.current_session(), None);

        let session = identity.register("alice@example.com", "secret1", "Alice").await.unwrap();
        assert_eq!(session.display_name, "Alice");
        assert_eq!(identity.current_session(), Some(session));
    }

    #[tokio::test]
    async fn register_defaults_display_name_to_local_part() {
        let identity = MemoryIdentity::new();
        let session = identity.register("bob@example.com", "secret1", "  ").await.unwrap();
        assert_eq!(session.display_name, "bob");
    }

    #[tokio::test]
    async fn register_validates_input() {
        let identity = MemoryIdentity::new();
        assert_eq!(
            identity.register("nope", "secret1", "").await,
            Err(IdentityError::InvalidEmail)
        );
        assert_eq!(
            identity.register("a@example.com", "123", "").await,
            Err(IdentityError::WeakPassword { min: MIN_PASSWORD_LEN })
        );

        identity.register("a@example.com", "secret1", "").await.unwrap();
        assert_eq!(
            identity.register("a@example.com", "secret2", "").await,
            Err(IdentityError::EmailInUse)
        );
    }

    #[tokio::test]
    async fn sign_in_checks_password() {
        let identity = MemoryIdentity::new().with_account("a@example.com", "secret1", "A").unwrap();

        assert_eq!(
            identity.sign_in("a@example.com", "wrong").await,
            Err(IdentityError::InvalidCredentials)
        );
        assert_eq!(identity.current_session(), None);

        let session = identity.sign_in("a@example.com", "secret1").await.unwrap();
        assert_eq!(session.email, "a@example.com");

        identity.sign_out().await;
        identity.sign_out().await;
        assert_eq!(identity.current_session(), None);
    }

    #[test]
    fn signed_in_requires_known_account() {
        assert!(MemoryIdentity::new().signed_in("ghost@example.com").is_err());

        let identity = MemoryIdentity::new()
            .with_account("a@example.com", "secret1", "A")
            .and_then(|identity| identity.signed_in("a@example.com"))
            .unwrap();
        assert_eq!(identity.current_session().map(|s| s.display_name), Some("A".to_string()));
    }
}
