//! Inventory, power and cooling.

use crate::audit::checks::Check;
use crate::audit::result::{CheckHeader, LineItem, Section};
use crate::snapshot::Fields;
use crate::utils::Result;

const GENUINE_VENDORS: [&str; 2] = ["Arista Networks", "Arastra, Inc"];
const NOT_PRESENT: &str = "Not Present";
const NOT_INSERTED: &str = "Not Inserted";
const FANS_UNTESTED: &str = "The script doesnt run tests about the Fans modules ...";

// ── inventory ───────────────────────────────────────────────────────────────

pub struct Inventory;

impl Check for Inventory {
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn alias(&self) -> &'static str {
        "check_inventory"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "Device inventory",
            description: "include tests report about the hardware inventory",
            command: "show inventory",
            failure_condition: "A test fails if the manufacturer of a transceiver is neither \
                \"Arista Networks\" nor \"Arastra, Inc\", or if a power supply slot has no power supply unit inserted",
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let description = doc.field("systemInformation")?.str("description")?;

        let mut power = Vec::new();
        for (slot, ps) in doc.entries("powerSupplySlots")? {
            let name = ps.str("name")?;
            let serial = ps.str("serialNum")?;
            power.push(LineItem::tested(
                format!("Slot: {} *** Model: {} *** SN: {}", slot, name, serial),
                name != NOT_INSERTED,
            ));
        }

        let mut fans = Vec::new();
        for (slot, module) in doc.entries("fanTraySlots")? {
            fans.push(LineItem::info(format!("Module: {} *** Model: {}", slot, module.str("name")?)));
        }

        // slot ids sort as text: "1", "10", "2"
        let mut slots = doc.entries("xcvrSlots")?;
        slots.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut xcvrs = Vec::new();
        for (slot, xcvr) in slots {
            let vendor = xcvr.str("mfgName")?;
            if vendor == NOT_PRESENT {
                continue;
            }
            xcvrs.push(LineItem::tested(
                format!(
                    "Port: {} *** Manufacturer: {} *** Model: {} *** SN: {}",
                    slot,
                    vendor,
                    xcvr.str("modelName")?,
                    xcvr.str("serialNum")?
                ),
                GENUINE_VENDORS.contains(&vendor),
            ));
        }

        Ok(vec![
            Section::informational(None, vec![LineItem::info(format!("Device description: {}", description))]),
            Section::tested(Some("Power Supplies: "), power),
            Section::untested(Some("Fan modules: "), fans, FANS_UNTESTED),
            Section::tested(Some("Transceivers: "), xcvrs),
        ])
    }
}

// ── power ───────────────────────────────────────────────────────────────────

pub struct Power;

impl Check for Power {
    fn name(&self) -> &'static str {
        "power"
    }

    fn alias(&self) -> &'static str {
        "check_power"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "Power supplies status",
            description: "include tests report about the power status",
            command: "show system environment power",
            failure_condition: "A test fails if the status of a power supply is not ok",
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let mut items = Vec::new();
        for (id, ps) in doc.entries("powerSupplies")? {
            let state = ps.str("state")?;
            items.push(LineItem::tested(
                format!("Power supply: {} *** Status: {}", id, state),
                state == "ok",
            ));
        }
        Ok(vec![Section::tested(None, items)])
    }
}

// ── cooling ─────────────────────────────────────────────────────────────────

pub struct Cooling;

impl Check for Cooling {
    fn name(&self) -> &'static str {
        "cooling"
    }

    fn alias(&self) -> &'static str {
        "check_cooling"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "Cooling status",
            description: "include tests report about the cooling status",
            command: "show system environment cooling",
            failure_condition: "A test fails if the status of a fan is not ok",
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        Ok(vec![
            Section::tested(Some("Power supplies: "), fan_items(doc.items("powerSupplySlots")?)?),
            Section::tested(Some("Fan modules: "), fan_items(doc.items("fanTraySlots")?)?),
        ])
    }
}

fn fan_items(housings: Vec<Fields<'_>>) -> Result<Vec<LineItem>> {
    let mut items = Vec::new();
    for housing in housings {
        for fan in housing.items("fans")? {
            let status = fan.str("status")?;
            items.push(LineItem::tested(
                format!("Fan: {} *** Status: {}", fan.str("label")?, status),
                status == "ok",
            ));
        }
    }
    Ok(items)
}
