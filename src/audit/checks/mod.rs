//! The twelve audit checks.
//!
//! A check only knows which command it reads and how to turn that
//! command's JSON into sections; loading and error context live in
//! [`crate::audit::engine`].

mod environment;
mod hardware;
mod network;
mod reload;
mod system;

pub use environment::{Temperature, TemperatureTransceivers};
pub use hardware::{Cooling, Inventory, Power};
pub use network::{Bgp, Lldp, Mlag};
pub use reload::{ReloadCauseFull, ReloadCauseHistory};
pub use system::{Hostname, Version};

use crate::audit::result::{CheckHeader, Section};
use crate::snapshot::Fields;
use crate::utils::Result;

pub trait Check: Send + Sync {
    /// Registered name, used in reports and artifact file names.
    fn name(&self) -> &'static str;

    /// Function-style name accepted from older `input.yml` files.
    fn alias(&self) -> &'static str;

    fn header(&self) -> CheckHeader;

    /// Evaluate the snapshot of `header().command`.
    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>>;
}

impl std::fmt::Debug for dyn Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Check").field(&self.name()).finish()
    }
}
