#![forbid(unsafe_code)]

//! Window snapshots: survive a view reload without losing position.
//!
//! A snapshot is the resident block-index interval plus a copy of the
//! flat mirror. Restoration re-chunks the flat items into pages and
//! blocks under the current template, so an equivalent window comes back
//! without re-fetching anything.
//!
//! # Feature Gates
//!
//! - `state-persistence`: enables JSON file save/load for snapshots.
//!   Without it, snapshots are in-memory values only.

use std::fmt;

use pagewin_core::WindowRange;

use crate::pager::Pager;
use crate::traits::{Mirror, PageLoader, ViewAdapter};

/// A restorable copy of the paging window's externally visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct WindowSnapshot<T> {
    /// Half-open interval of resident block indices.
    pub range: WindowRange,
    /// Copy of the flat mirror, placeholders included.
    pub items: Vec<T>,
}

impl<T, M, V, L> Pager<T, M, V, L>
where
    T: Clone,
    M: Mirror<T>,
    V: ViewAdapter,
    L: PageLoader,
{
    /// Capture the window range and a copy of the mirror.
    #[must_use]
    pub fn snapshot(&self) -> WindowSnapshot<T> {
        let mirror = self.mirror();
        let items = (0..mirror.len())
            .filter_map(|i| mirror.get(i).cloned())
            .collect();
        WindowSnapshot {
            range: self.save_window_range(),
            items,
        }
    }

    /// Restore a previously captured snapshot.
    pub fn restore_snapshot(&mut self, snapshot: WindowSnapshot<T>) {
        self.restore_window(snapshot.range, snapshot.items);
    }
}

/// Errors from snapshot persistence.
#[derive(Debug)]
pub enum SnapshotError {
    /// I/O failure reading or writing the snapshot file.
    Io(std::io::Error),
    /// Snapshot (de)serialization failed.
    Serialization(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "I/O error: {e}"),
            SnapshotError::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(e) => Some(e),
            SnapshotError::Serialization(_) => None,
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

/// Write a snapshot to a JSON file.
#[cfg(feature = "state-persistence")]
pub fn save_snapshot<T: serde::Serialize>(
    snapshot: &WindowSnapshot<T>,
    path: &std::path::Path,
) -> Result<(), SnapshotError> {
    let json = serde_json::to_vec(snapshot)
        .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a snapshot back from a JSON file.
#[cfg(feature = "state-persistence")]
pub fn load_snapshot<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<WindowSnapshot<T>, SnapshotError> {
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| SnapshotError::Serialization(e.to_string()))
}
