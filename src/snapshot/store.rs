//! Snapshot stores: the on-disk layout written by the collector, and an
//! in-memory map for tests.

use std::path::{Path, PathBuf};

use crate::snapshot::{CommandFormat, Snapshot, SnapshotStore};
use crate::utils::{AuditError, Result};

// ── directory layout ────────────────────────────────────────────────────────

/// `<root>/<device>/eos_commands/{json,text}/<command>.{json,txt}`
#[derive(Debug, Clone)]
pub struct DirSnapshotStore {
    root: PathBuf,
}

impl DirSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn commands_dir(&self, device: &str) -> PathBuf {
        self.root.join(device).join("eos_commands")
    }

    pub fn path_for(&self, device: &str, command: &str, format: CommandFormat) -> PathBuf {
        let dir = self.commands_dir(device);
        match format {
            CommandFormat::Json => dir.join("json").join(format!("{}.json", command)),
            CommandFormat::Text => dir.join("text").join(format!("{}.txt", command)),
        }
    }
}

impl SnapshotStore for DirSnapshotStore {
    fn snapshot(&self, device: &str, command: &str, format: CommandFormat) -> Result<Snapshot> {
        let path = self.path_for(device, command, format);
        let raw = read_collected(&path, device, command)?;
        tracing::trace!(device, command, path = %path.display(), "snapshot loaded");

        match format {
            CommandFormat::Text => Ok(Snapshot::Text(raw)),
            CommandFormat::Json => serde_json::from_str(&raw)
                .map(Snapshot::Json)
                .map_err(|source| AuditError::SnapshotDecode {
                    device: device.to_string(),
                    command: command.to_string(),
                    source,
                }),
        }
    }
}

fn read_collected(path: &Path, device: &str, command: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AuditError::SnapshotNotFound {
            device: device.to_string(),
            command: command.to_string(),
        },
        _ => AuditError::Io(e),
    })
}

// ── in memory ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshotStore {
    entries: std::collections::HashMap<(String, String, bool), Snapshot>,
}

#[cfg(test)]
impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, device: &str, command: &str, value: serde_json::Value) -> Self {
        self.entries
            .insert((device.to_string(), command.to_string(), true), Snapshot::Json(value));
        self
    }

    pub fn with_text(mut self, device: &str, command: &str, text: &str) -> Self {
        self.entries.insert(
            (device.to_string(), command.to_string(), false),
            Snapshot::Text(text.to_string()),
        );
        self
    }
}

#[cfg(test)]
impl SnapshotStore for MemorySnapshotStore {
    fn snapshot(&self, device: &str, command: &str, format: CommandFormat) -> Result<Snapshot> {
        let key = (
            device.to_string(),
            command.to_string(),
            format == CommandFormat::Json,
        );
        self.entries
            .get(&key)
            .cloned()
            .ok_or_else(|| AuditError::SnapshotNotFound {
                device: device.to_string(),
                command: command.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_collector_layout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DirSnapshotStore::new(dir.path());

        let json_path = store.path_for("leaf1", "show hostname", CommandFormat::Json);
        std::fs::create_dir_all(json_path.parent().unwrap()).unwrap();
        std::fs::write(&json_path, r#"{"hostname": "leaf1", "fqdn": "leaf1.lab"}"#).unwrap();

        let text_path = store.path_for("leaf1", "show clock", CommandFormat::Text);
        std::fs::create_dir_all(text_path.parent().unwrap()).unwrap();
        std::fs::write(&text_path, "Mon Oct 19 10:00:00 2026\n").unwrap();

        let value = store.json("leaf1", "show hostname").unwrap();
        assert_eq!(value["fqdn"], "leaf1.lab");
        assert_eq!(store.text("leaf1", "show clock").unwrap(), "Mon Oct 19 10:00:00 2026\n");
        assert!(json_path.ends_with("leaf1/eos_commands/json/show hostname.json"));
    }

    #[test]
    fn missing_command_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DirSnapshotStore::new(dir.path());
        let err = store.json("leaf1", "show mlag detail").unwrap_err();
        assert!(matches!(
            err,
            AuditError::SnapshotNotFound { ref device, ref command }
                if device == "leaf1" && command == "show mlag detail"
        ));
    }

    #[test]
    fn garbage_json_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DirSnapshotStore::new(dir.path());
        let path = store.path_for("leaf1", "show version", CommandFormat::Json);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "% Invalid input").unwrap();

        let err = store.json("leaf1", "show version").unwrap_err();
        assert!(matches!(err, AuditError::SnapshotDecode { .. }));
    }
}
