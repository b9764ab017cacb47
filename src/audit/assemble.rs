//! Per-device and fleet-wide report assembly.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::audit::checks::Check;
use crate::audit::engine::run_check;
use crate::audit::render::{render, Rendering};
use crate::audit::result::CheckResult;
use crate::snapshot::SnapshotStore;
use crate::utils::{Result, Verdict};

#[derive(Debug, Clone)]
pub struct CheckReport {
    /// File stem of the per-check artifacts (the check's function-style name).
    pub artifact: &'static str,
    pub result: CheckResult,
    pub rendering: Rendering,
}

#[derive(Debug, Clone)]
pub struct DeviceReport {
    pub device: String,
    pub banner: String,
    pub checks: Vec<CheckReport>,
    pub main: String,
    pub failures_only: String,
}

impl DeviceReport {
    pub fn status(&self) -> Verdict {
        if self.checks.iter().any(|c| c.result.status().is_fail()) {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    pub fn failed_checks(&self) -> Vec<&'static str> {
        self.checks
            .iter()
            .filter(|c| c.result.status().is_fail())
            .map(|c| c.result.check)
            .collect()
    }
}

pub fn banner(device: &str) -> String {
    format!("{dashes} Report for device {device} {dashes}\n\n", dashes = "-".repeat(13))
}

/// Run every check in configured order. The first failing check aborts the
/// whole device; the error carries the device and check names.
pub fn assemble_device(
    device: &str,
    checks: &[&dyn Check],
    store: &dyn SnapshotStore,
) -> Result<DeviceReport> {
    let banner = banner(device);
    let mut main = banner.clone();
    let mut failures_only = banner.clone();
    let mut reports = Vec::with_capacity(checks.len());

    for check in checks {
        let result = run_check(*check, device, store).map_err(|e| e.in_check(device, check.name()))?;
        let rendering = render(&result);
        main.push_str(&rendering.main);
        failures_only.push_str(&rendering.failures_only);
        reports.push(CheckReport { artifact: check.alias(), result, rendering });
    }

    Ok(DeviceReport {
        device: device.to_string(),
        banner,
        checks: reports,
        main,
        failures_only,
    })
}

// ── fleet ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedDevice {
    pub device: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct FleetReport {
    pub generated_at: String,
    pub devices: Vec<String>,
    pub checks: Vec<String>,
    pub excluded: Vec<ExcludedDevice>,
    pub main: String,
    pub failures_only: String,
}

/// `outcomes[i]` belongs to `devices[i]`. Failed devices are left out of
/// the body and listed in the header instead.
pub fn assemble_fleet(
    generated_at: DateTime<Local>,
    devices: &[String],
    check_names: &[&str],
    outcomes: &[Result<DeviceReport>],
) -> FleetReport {
    let generated_at = generated_at.format("%d %b %Y at %H:%M:%S").to_string();
    let checks: Vec<String> = check_names.iter().map(|c| c.to_string()).collect();

    let excluded: Vec<ExcludedDevice> = devices
        .iter()
        .zip(outcomes)
        .filter_map(|(device, outcome)| {
            outcome.as_ref().err().map(|e| ExcludedDevice {
                device: device.clone(),
                reason: e.to_string(),
            })
        })
        .collect();

    let mut preamble = format!(
        "Report generated the {}\n\n\
         The list of devices audited is: {}\n\
         The list of checks audited is: {}\n\n",
        generated_at,
        devices.join(", "),
        checks.join(", "),
    );
    if !excluded.is_empty() {
        preamble.push_str("Devices excluded from this report:\n");
        for ex in &excluded {
            preamble.push_str(&format!("  {}: {}\n", ex.device, ex.reason));
        }
        preamble.push('\n');
    }

    const MAIN_LEGEND: &str = "The file main.txt shows the details for all the tests.\n";
    const FAILURES_LEGEND: &str = "The file failures_only.txt shows only the tests that failed.\n";

    let mut main = format!("{}{}{}\n", preamble, MAIN_LEGEND, FAILURES_LEGEND);
    let mut failures_only = format!("{}{}{}\n", preamble, FAILURES_LEGEND, MAIN_LEGEND);

    for report in outcomes.iter().filter_map(|o| o.as_ref().ok()) {
        main.push_str(&report.main);
        failures_only.push_str(&report.failures_only);
    }

    FleetReport {
        generated_at,
        devices: devices.to_vec(),
        checks,
        excluded,
        main,
        failures_only,
    }
}
