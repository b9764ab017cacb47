//! Read-only access to previously collected command output.
//!
//! The collector leaves one file per (device, command) pair behind; checks
//! only ever see it through [`SnapshotStore`].

pub mod fields;
pub mod store;

use crate::utils::{AuditError, Result};

pub use fields::Fields;
pub use store::DirSnapshotStore;
#[cfg(test)]
pub use store::MemorySnapshotStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandFormat {
    /// `<command> | json`
    Json,
    /// plain CLI output
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Json(serde_json::Value),
    Text(String),
}

pub trait SnapshotStore: Send + Sync {
    /// Fails with `SnapshotNotFound` when the pair was never collected.
    fn snapshot(&self, device: &str, command: &str, format: CommandFormat) -> Result<Snapshot>;

    fn json(&self, device: &str, command: &str) -> Result<serde_json::Value> {
        match self.snapshot(device, command, CommandFormat::Json)? {
            Snapshot::Json(value) => Ok(value),
            Snapshot::Text(_) => Err(AuditError::malformed(device, command, "<json document>")),
        }
    }

    fn text(&self, device: &str, command: &str) -> Result<String> {
        match self.snapshot(device, command, CommandFormat::Text)? {
            Snapshot::Text(text) => Ok(text),
            Snapshot::Json(value) => Ok(value.to_string()),
        }
    }
}
