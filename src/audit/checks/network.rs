//! LLDP, BGP and MLAG.

use crate::audit::checks::Check;
use crate::audit::result::{CheckHeader, LineItem, Section, NO_TEST_CONDITION};
use crate::snapshot::Fields;
use crate::utils::{format_epoch, Result};

pub struct Lldp;

impl Check for Lldp {
    fn name(&self) -> &'static str {
        "lldp"
    }

    fn alias(&self) -> &'static str {
        "print_lldp"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "LLDP topology",
            description: "include the lldp topology",
            command: "show lldp neighbors",
            failure_condition: NO_TEST_CONDITION,
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let mut items = Vec::new();
        for neighbor in doc.items("lldpNeighbors")? {
            items.push(LineItem::info(format!(
                "Interface: {} *** LLDP neighbor: {} *** LLDP remote port: {}",
                neighbor.str("port")?,
                neighbor.str("neighborDevice")?,
                neighbor.str("neighborPort")?
            )));
        }
        Ok(vec![Section::informational(None, items)])
    }
}

pub struct Bgp;

impl Check for Bgp {
    fn name(&self) -> &'static str {
        "bgp"
    }

    fn alias(&self) -> &'static str {
        "check_bgp"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "BGP sessions state",
            description: "include tests report about the bgp status for all configured vrf",
            command: "show ip bgp summary vrf all",
            failure_condition: "A test fails if a BGP session is not established",
        }
    }

    /// One tested section per VRF, in the order the device listed them,
    /// then an empty section for the closing blank line.
    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let mut sections = Vec::new();
        for (vrf, body) in doc.entries("vrfs")? {
            let mut items = Vec::new();
            for (peer, session) in body.entries("peers")? {
                let state = session.str("peerState")?;
                items.push(LineItem::tested(
                    format!(
                        "Peer: {} *** ASN: {} *** State: {} *** Up/Down: {}",
                        peer,
                        session.text("asn")?,
                        state,
                        format_epoch(session.f64("upDownTime")?)
                    ),
                    state == "Established",
                ));
            }
            let heading = format!("vrf: {}", vrf);
            sections.push(Section::tested(Some(heading.as_str()), items));
        }
        // closing blank line after the last vrf
        sections.push(Section::informational(None, Vec::new()));
        Ok(sections)
    }
}

pub struct Mlag;

impl Check for Mlag {
    fn name(&self) -> &'static str {
        "mlag"
    }

    fn alias(&self) -> &'static str {
        "check_mlag"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "MLAG state",
            description: "include tests report about the mlag status",
            command: "show mlag detail",
            failure_condition: "The test fails if the MLAG state is active and the negotiation status is not connected",
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let state = doc.str("state")?;
        if state != "active" {
            return Ok(vec![Section::informational(None, vec![LineItem::info(format!("MLAG is {}", state))])]);
        }

        let neg_status = doc.str("negStatus")?;
        let detail = vec![
            LineItem::info(format!("Peer: {}", doc.str("peerAddress")?)),
            LineItem::info(format!("State: {}", state)),
            LineItem::info(format!("Negotiation Status: {}", neg_status)),
            LineItem::info(format!("Config Sanity: {}", doc.str("configSanity")?)),
        ];
        Ok(vec![Section::whole(detail, neg_status == "connected")])
    }
}
