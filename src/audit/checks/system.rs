use crate::audit::checks::Check;
use crate::audit::result::{CheckHeader, LineItem, Section, NO_TEST_CONDITION};
use crate::snapshot::Fields;
use crate::utils::{format_uptime, Result};

pub struct Hostname;

impl Check for Hostname {
    fn name(&self) -> &'static str {
        "hostname"
    }

    fn alias(&self) -> &'static str {
        "print_hostname"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "Device hostname",
            description: "include the device hostname and fqdn",
            command: "show hostname",
            failure_condition: NO_TEST_CONDITION,
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let items = vec![
            LineItem::info(format!("Hostname: {}", doc.str("hostname")?)),
            LineItem::info(format!("FQDN: {}", doc.str("fqdn")?)),
        ];
        Ok(vec![Section::informational(None, items)])
    }
}

pub struct Version;

impl Check for Version {
    fn name(&self) -> &'static str {
        "version"
    }

    fn alias(&self) -> &'static str {
        "print_version"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "Device details",
            description: "include some details regarding the device (HW model, SN, SW release, uptime)",
            command: "show version",
            failure_condition: NO_TEST_CONDITION,
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let uptime = doc.i64("uptime")?.max(0) as u64;
        let items = vec![
            LineItem::info(format!("Model: {}", doc.str("modelName")?)),
            LineItem::info(format!("Serial number: {}", doc.str("serialNumber")?)),
            LineItem::info(format!("Version: {}", doc.str("version")?)),
            LineItem::info(format!("Uptime: {}", format_uptime(uptime))),
        ];
        Ok(vec![Section::informational(None, items)])
    }
}
