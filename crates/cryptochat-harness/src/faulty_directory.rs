//! Fault-injecting room directory.
//!
//! Wraps any [`RoomDirectory`] and fails queued operations on demand, adds
//! latency, and counts calls so tests can assert that nothing was retried or
//! sent twice.

use std::{
    collections::VecDeque,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use cryptochat_core::{DirectoryError, Room, RoomDirectory};
use tokio::sync::watch;
use tracing::debug;

/// A failure to inject into the next matching call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryFault {
    /// Fail the next `list` with `Unavailable(reason)`.
    List(String),
    /// Fail the next `insert` with `Unavailable(reason)`.
    Insert(String),
}

/// Directory wrapper with fault injection.
#[derive(Debug)]
pub struct FaultyDirectory<D> {
    inner: D,
    faults: Mutex<VecDeque<DirectoryFault>>,
    latency: Option<Duration>,
    list_calls: AtomicUsize,
    insert_calls: AtomicUsize,
}

impl<D: RoomDirectory> FaultyDirectory<D> {
    /// Wrap `inner` with no faults queued.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            faults: Mutex::new(VecDeque::new()),
            latency: None,
            list_calls: AtomicUsize::new(0),
            insert_calls: AtomicUsize::new(0),
        }
    }

    /// Delay every call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue a fault. Faults of each kind fire in the order queued.
    pub fn inject(&self, fault: DirectoryFault) {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner).push_back(fault);
    }

    /// The wrapped directory.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Number of `list` calls seen, failed ones included.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `insert` calls seen, failed ones included.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    fn take_fault(&self, want_insert: bool) -> Option<String> {
        let mut faults = self.faults.lock().unwrap_or_else(PoisonError::into_inner);
        let index = faults.iter().position(|fault| {
            matches!(
                (fault, want_insert),
                (DirectoryFault::Insert(_), true) | (DirectoryFault::List(_), false)
            )
        })?;
        match faults.remove(index)? {
            DirectoryFault::List(reason) | DirectoryFault::Insert(reason) => Some(reason),
        }
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl<D: RoomDirectory> RoomDirectory for FaultyDirectory<D> {
    async fn list(&self) -> Result<Vec<Room>, DirectoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        if let Some(reason) = self.take_fault(false) {
            debug!(%reason, "injected list failure");
            return Err(DirectoryError::Unavailable(reason));
        }
        self.inner.list().await
    }

    async fn insert(&self, room: Room) -> Result<(), DirectoryError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.delay().await;
        if let Some(reason) = self.take_fault(true) {
            debug!(%reason, room = %room.name, "injected insert failure");
            return Err(DirectoryError::Unavailable(reason));
        }
        self.inner.insert(room).await
    }

    fn revisions(&self) -> watch::Receiver<u64> {
        self.inner.revisions()
    }
}
