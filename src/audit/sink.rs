//! Where rendered reports end up.
//!
//! Reports are fully assembled in memory before the sink sees them, so a
//! device whose audit failed never leaves a truncated file behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::assemble::{DeviceReport, FleetReport};
use crate::utils::{AuditError, Result};

pub const MAIN_FILE: &str = "main.txt";
pub const FAILURES_ONLY_FILE: &str = "failures_only.txt";
const INIT_FILE: &str = "init.txt";

pub trait ReportSink: Send + Sync {
    /// Replace everything previously written for `report.device`.
    fn write_device(&self, report: &DeviceReport) -> Result<()>;

    /// Drop any earlier report for a device that could not be audited.
    fn clear_device(&self, device: &str) -> Result<()>;

    fn write_fleet(&self, report: &FleetReport) -> Result<()>;
}

// ── filesystem ──────────────────────────────────────────────────────────────

/// ```text
/// <root>/main.txt
/// <root>/failures_only.txt
/// <root>/<device>/reports/{main,failures_only}.txt
/// <root>/<device>/reports/{main,failures_only}/{init,<check alias>}.txt
/// ```
#[derive(Debug, Clone)]
pub struct FsReportSink {
    root: PathBuf,
}

impl FsReportSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn reports_dir(&self, device: &str) -> PathBuf {
        self.root.join(device).join("reports")
    }
}

fn remove_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| AuditError::write(dir, e))?;
    }
    Ok(())
}

fn reset_dir(dir: &Path) -> Result<()> {
    remove_dir(dir)?;
    fs::create_dir_all(dir).map_err(|e| AuditError::write(dir, e))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| AuditError::write(path, e))
}

impl ReportSink for FsReportSink {
    fn write_device(&self, report: &DeviceReport) -> Result<()> {
        let reports = self.reports_dir(&report.device);
        let main_dir = reports.join("main");
        let failures_dir = reports.join("failures_only");
        reset_dir(&main_dir)?;
        reset_dir(&failures_dir)?;

        write_file(&main_dir.join(INIT_FILE), &report.banner)?;
        write_file(&failures_dir.join(INIT_FILE), &report.banner)?;
        for check in &report.checks {
            let file = format!("{}.txt", check.artifact);
            write_file(&main_dir.join(&file), &check.rendering.main)?;
            write_file(&failures_dir.join(&file), &check.rendering.failures_only)?;
        }

        write_file(&reports.join(MAIN_FILE), &report.main)?;
        write_file(&reports.join(FAILURES_ONLY_FILE), &report.failures_only)?;
        tracing::debug!(device = %report.device, dir = %reports.display(), "device reports written");
        Ok(())
    }

    fn clear_device(&self, device: &str) -> Result<()> {
        let reports = self.reports_dir(device);
        remove_dir(&reports)?;
        tracing::debug!(%device, dir = %reports.display(), "stale device reports removed");
        Ok(())
    }

    fn write_fleet(&self, report: &FleetReport) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| AuditError::write(&self.root, e))?;
        write_file(&self.root.join(MAIN_FILE), &report.main)?;
        write_file(&self.root.join(FAILURES_ONLY_FILE), &report.failures_only)?;
        tracing::debug!(dir = %self.root.display(), "fleet reports written");
        Ok(())
    }
}

// ── in memory ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryReportSink {
    pub devices: std::sync::Mutex<Vec<(String, String, String)>>,
    pub cleared: std::sync::Mutex<Vec<String>>,
    pub fleet: std::sync::Mutex<Option<(String, String)>>,
}

#[cfg(test)]
impl ReportSink for MemoryReportSink {
    fn write_device(&self, report: &DeviceReport) -> Result<()> {
        if let Ok(mut devices) = self.devices.lock() {
            devices.push((report.device.clone(), report.main.clone(), report.failures_only.clone()));
        }
        Ok(())
    }

    fn clear_device(&self, device: &str) -> Result<()> {
        if let Ok(mut cleared) = self.cleared.lock() {
            cleared.push(device.to_string());
        }
        Ok(())
    }

    fn write_fleet(&self, report: &FleetReport) -> Result<()> {
        if let Ok(mut fleet) = self.fleet.lock() {
            *fleet = Some((report.main.clone(), report.failures_only.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::assemble::{assemble_device, assemble_fleet};
    use crate::audit::checks::{Check, Hostname, Power};
    use crate::snapshot::MemorySnapshotStore;
    use serde_json::json;

    #[test]
    fn writes_device_and_fleet_layout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = FsReportSink::new(dir.path());
        let store = MemorySnapshotStore::new()
            .with_json("leaf1", "show hostname", json!({"hostname": "leaf1", "fqdn": "leaf1.lab"}))
            .with_json("leaf1", "show system environment power", json!({"powerSupplies": {"1": {"state": "ok"}}}));
        let checks: Vec<&dyn Check> = vec![&Hostname, &Power];

        let report = assemble_device("leaf1", &checks, &store).unwrap();
        sink.write_device(&report).unwrap();

        let reports = dir.path().join("leaf1").join("reports");
        assert_eq!(fs::read_to_string(reports.join("main.txt")).unwrap(), report.main);
        assert_eq!(fs::read_to_string(reports.join("failures_only.txt")).unwrap(), report.failures_only);
        assert_eq!(fs::read_to_string(reports.join("main/init.txt")).unwrap(), report.banner);
        assert_eq!(
            fs::read_to_string(reports.join("failures_only/check_power.txt")).unwrap(),
            report.checks[1].rendering.failures_only
        );

        let fleet = assemble_fleet(chrono::Local::now(), &["leaf1".to_string()], &["hostname", "power"], &[Ok(report)]);
        sink.write_fleet(&fleet).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("main.txt")).unwrap(), fleet.main);
        assert_eq!(fs::read_to_string(dir.path().join("failures_only.txt")).unwrap(), fleet.failures_only);
    }

    #[test]
    fn rewrite_drops_stale_check_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = FsReportSink::new(dir.path());
        let stale = sink.reports_dir("leaf1").join("main").join("bgp.txt");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        let store = MemorySnapshotStore::new()
            .with_json("leaf1", "show hostname", json!({"hostname": "leaf1", "fqdn": "leaf1.lab"}));
        let checks: Vec<&dyn Check> = vec![&Hostname];
        sink.write_device(&assemble_device("leaf1", &checks, &store).unwrap()).unwrap();

        assert!(!stale.exists());
        assert!(sink.reports_dir("leaf1").join("main").join("print_hostname.txt").exists());
    }

    #[test]
    fn check_files_use_function_style_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = FsReportSink::new(dir.path());
        let store = MemorySnapshotStore::new()
            .with_json("leaf1", "show hostname", json!({"hostname": "leaf1", "fqdn": "leaf1.lab"}))
            .with_json("leaf1", "show system environment power", json!({"powerSupplies": {}}));
        let checks: Vec<&dyn Check> = vec![&Hostname, &Power];
        sink.write_device(&assemble_device("leaf1", &checks, &store).unwrap()).unwrap();

        let mut names: Vec<String> = fs::read_dir(sink.reports_dir("leaf1").join("main"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["check_power.txt", "init.txt", "print_hostname.txt"]);
    }

    #[test]
    fn clearing_removes_previous_reports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = FsReportSink::new(dir.path());
        let store = MemorySnapshotStore::new()
            .with_json("leaf2", "show hostname", json!({"hostname": "leaf2", "fqdn": "leaf2.lab"}));
        let checks: Vec<&dyn Check> = vec![&Hostname];
        sink.write_device(&assemble_device("leaf2", &checks, &store).unwrap()).unwrap();
        assert!(sink.reports_dir("leaf2").join(FAILURES_ONLY_FILE).exists());

        sink.clear_device("leaf2").unwrap();
        assert!(!sink.reports_dir("leaf2").exists());
        // nothing to clear is fine too
        sink.clear_device("leaf9").unwrap();
    }

    #[test]
    fn write_error_names_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        // a plain file where the device directory should be
        fs::write(dir.path().join("leaf1"), "not a directory").unwrap();
        let sink = FsReportSink::new(dir.path());
        let store = MemorySnapshotStore::new()
            .with_json("leaf1", "show hostname", json!({"hostname": "leaf1", "fqdn": "leaf1.lab"}));
        let checks: Vec<&dyn Check> = vec![&Hostname];

        let err = sink.write_device(&assemble_device("leaf1", &checks, &store).unwrap()).unwrap_err();
        assert!(matches!(err, AuditError::Write { .. }));
        assert!(err.to_string().contains("leaf1"));
        assert!(err.to_string().contains("reports"));
    }
}
