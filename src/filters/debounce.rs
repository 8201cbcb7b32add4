//! Commit-on-quiescence timer.
//!
//! A [`QuiescenceTimer`] runs a callback once no new schedule request has
//! arrived for a fixed delay. Every `schedule` call cancels the previous one,
//! so a burst of requests collapses into a single callback.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to one scheduled callback.
#[derive(Debug)]
pub struct TimerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True until the callback has run or the handle was cancelled.
    pub fn is_pending(&self) -> bool {
        !self.token.is_cancelled() && !self.task.is_finished()
    }
}

/// Restartable single-shot timer. Must be used from within a tokio runtime.
#[derive(Debug, Default)]
pub struct QuiescenceTimer {
    current: Option<TimerHandle>,
}

impl QuiescenceTimer {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Cancel whatever is pending and run `on_quiet` after `delay`.
    pub fn schedule<F>(&mut self, delay: Duration, on_quiet: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = tokio::time::sleep(delay) => on_quiet(),
            }
        });

        self.current = Some(TimerHandle { token, task });
    }

    /// Cancel the pending callback. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some(handle) => {
                let was_pending = handle.is_pending();
                handle.cancel();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.current.as_ref().is_some_and(TimerHandle::is_pending)
    }
}

impl Drop for QuiescenceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
