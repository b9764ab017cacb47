pub mod error;
pub mod types;

pub use error::{AuditError, Result};
pub use types::{format_epoch, format_uptime, Verdict};
