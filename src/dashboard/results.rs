//! Last-request-wins holder for listing results.
//!
//! Every request takes a [`RequestTicket`] before it is sent. A completion is
//! applied only if its ticket is still the newest one issued, so a slow
//! response can never overwrite the result of a request made after it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::external::players::{FetchError, FetchResult};
use crate::pagination::PageResult;

/// Sequence number handed out by [`ResultStream::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Success(Arc<PageResult<T>>),
    Failed(FetchError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Shared, cloneable result holder. Clones observe the same state.
#[derive(Debug)]
pub struct ResultStream<T> {
    inner: Arc<Mutex<Inner<T>>>,
    revision: Arc<watch::Sender<u64>>,
}

#[derive(Debug)]
struct Inner<T> {
    issued: u64,
    state: LoadState<T>,
    latest: Option<Arc<PageResult<T>>>,
}

impl<T> Clone for ResultStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            revision: self.revision.clone(),
        }
    }
}

impl<T> Default for ResultStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResultStream<T> {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                issued: 0,
                state: LoadState::Idle,
                latest: None,
            })),
            revision: Arc::new(revision),
        }
    }

    /// Register a new request; it supersedes every earlier ticket.
    pub fn begin(&self) -> RequestTicket {
        let ticket = {
            let mut inner = self.lock();
            inner.issued += 1;
            inner.state = LoadState::Loading;
            RequestTicket(inner.issued)
        };
        self.bump();
        ticket
    }

    /// Apply `result` if `ticket` is still the newest. Returns whether it was applied.
    pub fn complete(&self, ticket: RequestTicket, result: FetchResult<PageResult<T>>) -> bool {
        {
            let mut inner = self.lock();
            if ticket.0 != inner.issued {
                tracing::debug!(
                    ticket = ticket.0,
                    newest = inner.issued,
                    "Dropping stale listing response"
                );
                return false;
            }
            inner.state = match result {
                Ok(page) => {
                    let page = Arc::new(page);
                    inner.latest = Some(page.clone());
                    LoadState::Success(page)
                }
                Err(error) => LoadState::Failed(error),
            };
        }
        self.bump();
        true
    }

    /// Last successfully applied page; survives later loads and failures.
    pub fn latest(&self) -> Option<Arc<PageResult<T>>> {
        self.lock().latest.clone()
    }

    /// Receiver that changes whenever the state does.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> ResultStream<T> {
    pub fn state(&self) -> LoadState<T> {
        self.lock().state.clone()
    }

    /// Wait until no request is in flight and return the resulting state.
    pub async fn settled(&self) -> LoadState<T> {
        let mut changes = self.subscribe();
        loop {
            let state = self.state();
            if !state.is_loading() {
                return state;
            }
            if changes.changed().await.is_err() {
                return self.state();
            }
        }
    }
}
