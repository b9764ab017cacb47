//! Custom "show tech-support": the collected text outputs a support case
//! usually asks for, stitched into one file per device.

use crate::snapshot::{DirSnapshotStore, SnapshotStore};
use crate::utils::Result;

pub const TECH_SUPPORT_FILE: &str = "custom show tech-support.txt";

pub fn assemble(device: &str, commands: &[String], store: &dyn SnapshotStore) -> Result<String> {
    let mut out = String::new();
    for command in commands {
        let text = store.text(device, command)?;
        out.push_str(&format!("{dashes} {command} {dashes}\n\n", dashes = "-".repeat(13)));
        out.push_str(&text);
        out.push_str("\n\n");
    }
    Ok(out)
}

/// Writes `<device>/eos_commands/text/custom show tech-support.txt` for
/// each device and returns the devices that could not be assembled.
pub fn write_all(devices: &[String], commands: &[String], store: &DirSnapshotStore) -> Vec<String> {
    let mut failed = Vec::new();
    for device in devices {
        let written = assemble(device, commands, store).and_then(|body| {
            let path = store.commands_dir(device).join("text").join(TECH_SUPPORT_FILE);
            std::fs::write(&path, body)?;
            Ok(path)
        });
        match written {
            Ok(path) => tracing::info!(%device, path = %path.display(), "tech-support assembled"),
            Err(e) => {
                tracing::error!(%device, error = %e, "tech-support not assembled");
                failed.push(device.clone());
            }
        }
    }
    failed
}
