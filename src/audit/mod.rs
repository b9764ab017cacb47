pub mod assemble;
pub mod checks;
pub mod engine;
pub mod registry;
pub mod render;
pub mod result;
pub mod sink;

use rayon::prelude::*;

use crate::snapshot::SnapshotStore;
use crate::utils::{Result, Verdict};
use assemble::{assemble_device, assemble_fleet, DeviceReport, FleetReport};
use sink::ReportSink;

/// Exit status when every device was audited.
pub const EXIT_OK: i32 = 0;
/// Exit status when at least one device had to be left out.
pub const EXIT_DEVICES_EXCLUDED: i32 = 2;

#[derive(Debug)]
pub struct AuditOutcome {
    pub fleet: FleetReport,
    pub statuses: Vec<(String, Verdict)>,
}

impl AuditOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.fleet.excluded.is_empty() {
            EXIT_OK
        } else {
            EXIT_DEVICES_EXCLUDED
        }
    }
}

/// Audit `devices` with the checks named in `check_names`.
///
/// Unknown check names fail before any device is touched. Devices run on a
/// pool of `jobs` workers (0 = one per CPU); reports are then written one
/// device at a time. A device that fails is logged, has its earlier reports
/// removed, and is listed as excluded in the fleet report. The fleet
/// report always follows the configured device order.
pub fn run_audit(
    devices: &[String],
    check_names: &[String],
    store: &dyn SnapshotStore,
    sink: &dyn ReportSink,
    jobs: usize,
) -> Result<AuditOutcome> {
    let checks = registry::resolve(check_names)?;
    let names: Vec<&str> = checks.iter().map(|c| c.name()).collect();
    tracing::info!(devices = devices.len(), checks = ?names, jobs, "starting audit");

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let mut outcomes: Vec<Result<DeviceReport>> = pool.install(|| {
        devices
            .par_iter()
            .map(|device| {
                let _enter = tracing::info_span!("device", %device).entered();
                assemble_device(device, &checks, store)
            })
            .collect()
    });

    // Writes stay on this thread, in device order: a device listed twice
    // must never have two writers on its report directory.
    for (device, outcome) in devices.iter().zip(outcomes.iter_mut()) {
        let written = match outcome.as_ref() {
            Ok(report) => sink.write_device(report),
            Err(_) => sink.clear_device(device),
        };
        match written {
            Ok(()) => {
                if let Ok(report) = outcome.as_ref() {
                    tracing::info!(%device, status = %report.status(), failed = ?report.failed_checks(), "device audited");
                }
            }
            Err(e) if outcome.is_ok() => *outcome = Err(e),
            Err(e) => tracing::warn!(%device, error = %e, "stale device reports not removed"),
        }
        if let Err(e) = outcome {
            tracing::error!(%device, error = %e, "device excluded from fleet report");
        }
    }

    let fleet = assemble_fleet(chrono::Local::now(), devices, &names, &outcomes);
    sink.write_fleet(&fleet)?;

    let statuses = outcomes
        .iter()
        .filter_map(|o| o.as_ref().ok())
        .map(|r| (r.device.clone(), r.status()))
        .collect();

    tracing::info!(
        audited = devices.len() - fleet.excluded.len(),
        excluded = fleet.excluded.len(),
        "audit finished"
    );
    Ok(AuditOutcome { fleet, statuses })
}
