//! Check registry - the fixed table of audit checks

use crate::audit::checks::{
    Bgp, Check, Cooling, Hostname, Inventory, Lldp, Mlag, Power, ReloadCauseFull,
    ReloadCauseHistory, Temperature, TemperatureTransceivers, Version,
};
use crate::utils::{AuditError, Result};

static REGISTRY: [&(dyn Check + 'static); 12] = [
    &Hostname,
    &Version,
    &Inventory,
    &Power,
    &Cooling,
    &Temperature,
    &TemperatureTransceivers,
    &ReloadCauseHistory,
    &ReloadCauseFull,
    &Lldp,
    &Bgp,
    &Mlag,
];

/// All registered checks, in their canonical order.
pub fn all() -> &'static [&'static dyn Check] {
    &REGISTRY
}

/// Look up a check by its name or its function-style alias.
pub fn get(name: &str) -> Option<&'static dyn Check> {
    REGISTRY
        .iter()
        .copied()
        .find(|c| c.name() == name || c.alias() == name)
}

/// Resolve configured names in order. The first unknown name aborts.
pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Vec<&'static dyn Check>> {
    names
        .iter()
        .map(|n| get(n.as_ref()).ok_or_else(|| AuditError::UnknownCheck(n.as_ref().to_string())))
        .collect()
}
