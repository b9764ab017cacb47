//! Runs one check against one device's snapshots.

use crate::audit::checks::Check;
use crate::audit::result::CheckResult;
use crate::snapshot::{Fields, SnapshotStore};
use crate::utils::Result;

/// Load the check's source command and evaluate it. Any lookup failure
/// aborts the check; no partial result is ever returned.
pub fn run_check(check: &dyn Check, device: &str, store: &dyn SnapshotStore) -> Result<CheckResult> {
    let header = check.header();
    let doc = store.json(device, header.command)?;
    let sections = check.evaluate(&Fields::root(&doc, device, header.command))?;
    let result = CheckResult::new(check.name(), header, sections);

    tracing::debug!(
        device,
        check = check.name(),
        status = %result.status(),
        tested = result.tested_items().count(),
        report_only = result.is_report_only(),
        "check evaluated"
    );
    Ok(result)
}
