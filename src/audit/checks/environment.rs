//! Temperature sensors: system-wide and transceiver views.

use crate::audit::checks::Check;
use crate::audit::result::{CheckHeader, LineItem, Section};
use crate::snapshot::Fields;
use crate::utils::{format_epoch, Result};

const SENSOR_CONDITION: &str = "A test fails if a sensor HW status is not OK or if a sensor alert \
    count is > 0 or if a sensor is currently in alert state";

/// Prefix written before the shared sensor fields.
enum Label<'a> {
    Named,
    Card { class: &'a str, position: String },
    Anonymous,
}

fn sensor_item(sensor: &Fields<'_>, label: Label<'_>) -> Result<LineItem> {
    let hw_status = sensor.str("hwStatus")?;
    let alert_count = sensor.f64("alertCount")?;
    let alert_text = sensor.text("alertCount")?;
    let in_alert = sensor.bool("inAlertState")?;
    let max_temp = sensor.f64("maxTemperature")?.trunc() as i64;
    let last_change = format_epoch(sensor.f64("maxTemperatureLastChange")?);
    let description = sensor.str("description")?;

    let prefix = match label {
        Label::Named => format!("Sensor: {} *** Description: {}", sensor.str("name")?, description),
        Label::Card { class, position } => format!(
            "Sensor: {} *** Description: {} *** Card type: {} *** Card position: {}",
            sensor.str("name")?,
            description,
            class,
            position
        ),
        Label::Anonymous => format!("Description: {}", description),
    };

    let passed = hw_status == "ok" && alert_count == 0.0 && !in_alert;
    Ok(LineItem::tested(
        format!(
            "{} *** HW status: {} *** Alert count: {} *** In alert state: {} \
             *** Max temperature (C): {} *** Max temperature last change: {}",
            prefix,
            hw_status,
            alert_text,
            if in_alert { "True" } else { "False" },
            max_temp,
            last_change
        ),
        passed,
    ))
}

// ── temperature ─────────────────────────────────────────────────────────────

pub struct Temperature;

impl Check for Temperature {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn alias(&self) -> &'static str {
        "check_temperature"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "Temperature status",
            description: "include tests report about the temperature status",
            command: "show system environment temperature",
            failure_condition: "A test fails if a sensor HW status is not OK or if a sensor alert count \
                is > 0 or if a sensor is currently in alert state. The system temperature test fails if \
                the system status is not OK",
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let status = doc.str("systemStatus")?;
        let system_ok = status == "temperatureOk";
        let shown = if system_ok { "ok" } else { status };
        let system = vec![LineItem::tested(format!("Status: {}", shown), system_ok)];

        let mut sensors = Vec::new();
        for sensor in doc.items("tempSensors")? {
            sensors.push(sensor_item(&sensor, Label::Named)?);
        }

        let mut cards = Vec::new();
        for card in doc.items("cardSlots")? {
            let class = card.str("entPhysicalClass")?;
            let position = card.text("relPos")?;
            for sensor in card.items("tempSensors")? {
                cards.push(sensor_item(&sensor, Label::Card { class, position: position.clone() })?);
            }
        }

        let mut psus = Vec::new();
        for psu in doc.items("powerSupplySlots")? {
            for sensor in psu.items("tempSensors")? {
                psus.push(sensor_item(&sensor, Label::Named)?);
            }
        }

        Ok(vec![
            Section::tested(Some("System temperature: "), system),
            Section::tested(Some("Sensors: "), sensors),
            Section::tested(Some("Card Slot: "), cards),
            Section::tested(Some("Power Supplies: "), psus),
        ])
    }
}

// ── transceivers ────────────────────────────────────────────────────────────

pub struct TemperatureTransceivers;

impl Check for TemperatureTransceivers {
    fn name(&self) -> &'static str {
        "temperature_transceivers"
    }

    fn alias(&self) -> &'static str {
        "check_temperature_transceivers"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "transceivers temperature status",
            description: "include tests report about the transceivers temperature status",
            command: "show system environment temperature transceiver",
            failure_condition: SENSOR_CONDITION,
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let mut items = Vec::new();
        for sensor in doc.items("tempSensors")? {
            items.push(sensor_item(&sensor, Label::Anonymous)?);
        }
        for card in doc.items("cardSlots")? {
            if card.str("entPhysicalClass")? != "Linecard" {
                continue;
            }
            for sensor in card.items("tempSensors")? {
                items.push(sensor_item(&sensor, Label::Anonymous)?);
            }
        }
        Ok(vec![Section::tested(None, items)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::checks::testing::{evaluate, messages, result};
    use crate::audit::render::{render, ALL_PASSED, OTHERS_PASSED};
    use crate::utils::{AuditError, Verdict};
    use serde_json::{json, Value};

    fn sensor(name: &str, hw: &str, alerts: i64, in_alert: bool) -> Value {
        json!({
            "name": name,
            "description": format!("{} sensor", name),
            "hwStatus": hw,
            "alertCount": alerts,
            "inAlertState": in_alert,
            "maxTemperature": 47.8,
            "maxTemperatureLastChange": 1_600_000_000.25
        })
    }

    #[test]
    fn healthy_system_passes_with_only_summaries() {
        let doc = json!({
            "systemStatus": "temperatureOk",
            "tempSensors": [sensor("TempSensor1", "ok", 0, false)],
            "cardSlots": [],
            "powerSupplySlots": []
        });
        let r = result(&Temperature, doc);
        assert_eq!(r.status(), Verdict::Pass);

        let text = render(&r);
        assert!(!text.failures_only.contains(" *** Result: "));
        assert!(!text.failures_only.contains(OTHERS_PASSED));
        assert_eq!(text.failures_only.matches(ALL_PASSED).count(), 4);
        assert!(text.main.contains("System temperature: \nStatus: ok *** Result: PASS\n\nSensors: \n"));
    }

    #[test]
    fn any_bad_field_fails_a_sensor() {
        let doc = json!({
            "systemStatus": "temperatureOk",
            "tempSensors": [
                sensor("A", "ok", 0, false),
                sensor("B", "failed", 0, false),
                sensor("C", "ok", 2, false),
                sensor("D", "ok", 0, true)
            ],
            "cardSlots": [],
            "powerSupplySlots": []
        });
        let r = result(&Temperature, doc);
        let verdicts: Vec<Verdict> = r.sections[1].items.iter().map(|i| i.verdict).collect();
        assert_eq!(verdicts, vec![Verdict::Pass, Verdict::Fail, Verdict::Fail, Verdict::Fail]);
    }

    #[test]
    fn sensor_line_layout() {
        let doc = json!({
            "systemStatus": "temperatureCritical",
            "tempSensors": [],
            "cardSlots": [
                {"entPhysicalClass": "Supervisor", "relPos": "1", "tempSensors": [sensor("Sup1", "ok", 0, false)]}
            ],
            "powerSupplySlots": [{"tempSensors": [sensor("PSU1", "ok", 0, false)]}]
        });
        let r = result(&Temperature, doc);
        let stamp = format_epoch(1_600_000_000.0);

        assert_eq!(messages(&r.sections[0]), vec!["Status: temperatureCritical [FAIL]"]);
        assert_eq!(
            messages(&r.sections[2]),
            vec![format!(
                "Sensor: Sup1 *** Description: Sup1 sensor *** Card type: Supervisor *** Card position: 1 \
                 *** HW status: ok *** Alert count: 0 *** In alert state: False *** Max temperature (C): 47 \
                 *** Max temperature last change: {} [PASS]",
                stamp
            )]
        );
        assert_eq!(
            messages(&r.sections[3]),
            vec![format!(
                "Sensor: PSU1 *** Description: PSU1 sensor *** HW status: ok *** Alert count: 0 \
                 *** In alert state: False *** Max temperature (C): 47 *** Max temperature last change: {} [PASS]",
                stamp
            )]
        );
    }

    #[test]
    fn transceiver_view_includes_linecards_only() {
        let doc = json!({
            "tempSensors": [sensor("DOM1", "ok", 0, false)],
            "cardSlots": [
                {"entPhysicalClass": "Linecard", "tempSensors": [sensor("LC3", "ok", 1, false)]},
                {"entPhysicalClass": "Supervisor", "tempSensors": [sensor("SUP", "failed", 9, true)]}
            ]
        });
        let r = result(&TemperatureTransceivers, doc);
        assert_eq!(r.sections.len(), 1);
        let lines = messages(&r.sections[0]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Description: DOM1 sensor *** HW status: ok"));
        assert!(lines[1].starts_with("Description: LC3 sensor") && lines[1].ends_with("[FAIL]"));

        let text = render(&r);
        assert!(text.failures_only.contains(OTHERS_PASSED));
        assert!(!text.main.contains("SUP sensor"));
    }

    #[test]
    fn sensor_without_alert_count_is_malformed() {
        let mut broken = sensor("A", "ok", 0, false);
        broken.as_object_mut().unwrap().remove("alertCount");
        let doc = json!({"tempSensors": [broken], "cardSlots": []});
        let err = evaluate(&TemperatureTransceivers, doc).unwrap_err();
        assert!(matches!(err, AuditError::MalformedSnapshot { ref field, .. } if field == "tempSensors.0.alertCount"));
    }

    #[test]
    fn fractional_alert_count_fails_and_flags_read_capitalised() {
        let mut partial = sensor("A", "ok", 0, false);
        partial["alertCount"] = json!(0.5);
        let doc = json!({
            "tempSensors": [partial, sensor("B", "ok", 0, true)],
            "cardSlots": []
        });
        let lines = messages(&result(&TemperatureTransceivers, doc).sections[0]);
        assert!(lines[0].contains("*** Alert count: 0.5 *** In alert state: False ***"));
        assert!(lines[0].ends_with("[FAIL]"));
        assert!(lines[1].contains("*** Alert count: 0 *** In alert state: True ***"));
        assert!(lines[1].ends_with("[FAIL]"));
    }
}
