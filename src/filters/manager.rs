use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use super::criteria::{FilterCriteria, FilterEdit, FilterField, FilterInputError};
use super::debounce::QuiescenceTimer;
use crate::models::HeightUnit;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Observer invoked with every committed snapshot.
pub type CommitCallback = Arc<dyn Fn(&FilterCriteria) + Send + Sync>;

/// Owns the editable filter state and decides when an edit is final.
///
/// Edits made through [`update`](Self::update) are committed once no further
/// edit has arrived for the debounce delay, and only if the result differs
/// from the last committed snapshot. [`apply_now`](Self::apply_now) and
/// [`reset`](Self::reset) commit immediately.
///
/// Timers run on the tokio runtime, so the debounced methods must be called
/// from within one. Cloning the manager yields another handle to the same
/// state.
///
/// Observers see commits in the order they were made, one commit at a time.
/// An observer must not call back into the manager.
#[derive(Clone)]
pub struct FilterStateManager {
    inner: Arc<Shared>,
    defaults: Arc<FilterCriteria>,
    delay: Duration,
}

struct Shared {
    state: Mutex<Inner>,
    // Held while observers run; taken before the state lock is released.
    delivery: Mutex<()>,
}

struct Inner {
    current: Arc<FilterCriteria>,
    committed: Arc<FilterCriteria>,
    generation: u64,
    timer: QuiescenceTimer,
    observers: Vec<CommitCallback>,
}

type Commit = (Arc<FilterCriteria>, Vec<CommitCallback>);

impl FilterStateManager {
    /// Start from `defaults`, which count as already committed.
    pub fn new(defaults: FilterCriteria, delay: Duration) -> Self {
        let initial = defaults.clone();
        Self::with_initial(defaults, initial, delay)
    }

    /// Start from a rehydrated snapshot. `initial` counts as already
    /// committed; `defaults` is what [`reset`](Self::reset) restores.
    pub fn with_initial(defaults: FilterCriteria, initial: FilterCriteria, delay: Duration) -> Self {
        let initial = Arc::new(initial);
        Self {
            inner: Arc::new(Shared {
                state: Mutex::new(Inner {
                    current: initial.clone(),
                    committed: initial,
                    generation: 0,
                    timer: QuiescenceTimer::new(),
                    observers: Vec::new(),
                }),
                delivery: Mutex::new(()),
            }),
            defaults: Arc::new(defaults),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn current(&self) -> Arc<FilterCriteria> {
        self.lock().current.clone()
    }

    pub fn committed(&self) -> Arc<FilterCriteria> {
        self.lock().committed.clone()
    }

    pub fn has_pending(&self) -> bool {
        self.lock().timer.is_pending()
    }

    pub fn observe_committed<F>(&self, callback: F)
    where
        F: Fn(&FilterCriteria) + Send + Sync + 'static,
    {
        self.lock().observers.push(Arc::new(callback));
    }

    /// Merge `edit` into the current snapshot and restart the quiescence window.
    pub fn update(&self, edit: FilterEdit) {
        let mut inner = self.lock();
        let field = edit.field();
        inner.current = Arc::new(inner.current.with_edit(edit));
        inner.generation += 1;

        let generation = inner.generation;
        let weak = Arc::downgrade(&self.inner);
        inner
            .timer
            .schedule(self.delay, move || Self::on_quiet(weak, generation));

        tracing::trace!(field = %field, generation, "Filter edit scheduled");
    }

    /// Parse raw input and apply it as a debounced edit.
    ///
    /// Input that does not parse is discarded; the state is left untouched.
    pub fn update_raw(
        &self,
        field: FilterField,
        raw: &str,
        unit: HeightUnit,
    ) -> Result<(), FilterInputError> {
        match FilterEdit::parse(field, raw, unit) {
            Ok(edit) => {
                self.update(edit);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(field = %field, input = raw, error = %e, "Discarding filter edit");
                Err(e)
            }
        }
    }

    /// Merge `edit` and commit right away, superseding any pending commit.
    ///
    /// Returns whether a commit fired.
    pub fn apply_now(&self, edit: FilterEdit) -> bool {
        Self::commit_with(&self.inner, |inner| {
            inner.current = Arc::new(inner.current.with_edit(edit));
            Self::commit_immediately(inner)
        })
    }

    /// Commit a pending debounced edit now instead of waiting for quiescence.
    ///
    /// Returns whether a commit fired.
    pub fn flush(&self) -> bool {
        Self::commit_with(&self.inner, Self::commit_immediately)
    }

    /// Restore the default criteria and commit immediately.
    ///
    /// Returns whether a commit fired; a second reset in a row never does.
    pub fn reset(&self) -> bool {
        let defaults = self.defaults.clone();
        let committed = Self::commit_with(&self.inner, |inner| {
            inner.current = defaults;
            Self::commit_immediately(inner)
        });
        tracing::debug!(committed, "Filters reset");
        committed
    }

    fn commit_immediately(inner: &mut Inner) -> Option<Commit> {
        inner.timer.cancel();
        inner.generation += 1;
        Self::try_commit(inner)
    }

    fn on_quiet(weak: Weak<Shared>, generation: u64) {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        Self::commit_with(&shared, |inner| {
            // A newer edit or an immediate commit superseded this timer.
            if inner.generation != generation {
                return None;
            }
            Self::try_commit(inner)
        });
    }

    /// Run `decide` under the state lock and deliver its commit, if any.
    fn commit_with(shared: &Shared, decide: impl FnOnce(&mut Inner) -> Option<Commit>) -> bool {
        let mut inner = shared.state.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(commit) = decide(&mut *inner) else {
            return false;
        };
        let _delivery = shared.delivery.lock().unwrap_or_else(PoisonError::into_inner);
        drop(inner);
        Self::notify(commit);
        true
    }

    fn try_commit(inner: &mut Inner) -> Option<Commit> {
        if *inner.current == *inner.committed {
            return None;
        }
        inner.committed = inner.current.clone();
        Some((inner.committed.clone(), inner.observers.clone()))
    }

    fn notify((snapshot, observers): Commit) {
        tracing::debug!(
            page = snapshot.page,
            page_size = snapshot.page_size,
            filtered = snapshot.is_filtered(),
            "Filters committed"
        );
        for observer in &observers {
            observer(&snapshot);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for FilterStateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("FilterStateManager")
            .field("current", &inner.current)
            .field("committed", &inner.committed)
            .field("delay", &self.delay)
            .finish()
    }
}
