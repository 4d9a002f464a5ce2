//! Durable storage for the notification state.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::AlertError;
use crate::state::NotificationState;

/// Stores the notification state as a JSON file.
///
/// Loading never fails: a missing or unreadable file yields the all-false
/// default so a corrupt write from a crash cannot take the process down.
/// Saving is best-effort; a failed save means the next successful cycle
/// writes again.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state, falling back to the all-false default on any problem.
    #[must_use]
    pub fn load(&self) -> NotificationState {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file, starting from defaults");
                return NotificationState::default();
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read state file, starting from defaults"
                );
                return NotificationState::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => {
                debug!(path = %self.path.display(), ?state, "Loaded notification state");
                state
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "State file is corrupt, starting from defaults"
                );
                NotificationState::default()
            }
        }
    }

    /// Save the state to the backing file.
    pub fn save(&self, state: &NotificationState) -> Result<(), AlertError> {
        let content = serde_json::to_string_pretty(state)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Clear all flags, persist the cleared state, and return it.
    ///
    /// A failed write is logged but does not fail the reset; the in-memory
    /// cycle still restarts.
    pub fn reset(&self) -> NotificationState {
        let state = NotificationState::default();
        if let Err(e) = self.save(&state) {
            warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to persist reset state"
            );
        }
        state
    }
}
