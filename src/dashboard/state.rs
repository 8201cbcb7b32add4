//! Persisted dashboard preferences.
//!
//! The browse session remembers theme, height unit and the last filters
//! between runs. Storage sits behind [`StateStore`] so the dashboard never
//! touches the filesystem directly.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::filters::FilterCriteria;
use crate::models::HeightUnit;

/// Bumped whenever the persisted shape changes; older snapshots are dropped.
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub version: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub filters: FilterCriteria,
    #[serde(default)]
    pub units: HeightUnit,
}

impl DashboardState {
    pub fn new(filters: FilterCriteria, units: HeightUnit) -> Self {
        Self {
            version: STATE_VERSION,
            theme: Theme::default(),
            filters,
            units,
        }
    }

    pub fn is_current(&self) -> bool {
        self.version == STATE_VERSION
    }
}

/// Persistence port for [`DashboardState`].
pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing usable is stored.
    fn load(&self) -> AppResult<Option<DashboardState>>;

    fn save(&self, state: &DashboardState) -> AppResult<()>;
}

/// Load the stored state, or `fallback` when there is none, it is from
/// another version, or it cannot be read.
pub fn load_or(store: &dyn StateStore, fallback: DashboardState) -> DashboardState {
    match store.load() {
        Ok(Some(state)) if state.is_current() => state,
        Ok(Some(state)) => {
            tracing::info!(
                found = state.version,
                expected = STATE_VERSION,
                "Discarding dashboard state from another version"
            );
            fallback
        }
        Ok(None) => fallback,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read dashboard state, using defaults");
            fallback
        }
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> AppResult<Option<DashboardState>> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::io(self.display(), e)),
        };

        match serde_json::from_slice(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                tracing::warn!(path = %self.display(), error = %e, "Ignoring unreadable dashboard state");
                Ok(None)
            }
        }
    }

    /// Written to a sibling temp file first, then renamed into place.
    fn save(&self, state: &DashboardState) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AppError::io(parent.display().to_string(), e))?;
        }

        let json = serde_json::to_vec_pretty(state).map_err(|e| AppError::Internal { source: e.into() })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| AppError::io(tmp.display().to_string(), e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| AppError::io(self.display(), e))?;

        tracing::debug!(path = %self.display(), "Dashboard state saved");
        Ok(())
    }
}

/// In-memory store, for sessions that should not persist anything.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<DashboardState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> AppResult<Option<DashboardState>> {
        Ok(self.state.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, state: &DashboardState) -> AppResult<()> {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        Ok(())
    }
}
