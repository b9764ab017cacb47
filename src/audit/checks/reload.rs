use crate::audit::checks::Check;
use crate::audit::result::{CheckHeader, LineItem, Section};
use crate::snapshot::Fields;
use crate::utils::{format_epoch, Result};

const USER_RELOAD: &str = "Reload requested by the user.";

/// Only the ten most recent history slots are audited.
const HISTORY_DEPTH: usize = 10;

fn reload_item(event: &Fields<'_>) -> Result<LineItem> {
    let description = event.str("description")?;
    let time = format_epoch(event.f64("timestamp")?);
    Ok(LineItem::tested(
        format!("Time: {} *** Reason: {}", time, description),
        description == USER_RELOAD,
    ))
}

pub struct ReloadCauseHistory;

impl Check for ReloadCauseHistory {
    fn name(&self) -> &'static str {
        "reload_cause_history"
    }

    fn alias(&self) -> &'static str {
        "check_reload_cause_history"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "Reload cause history",
            description: "include tests report about the cause for the last 10 reload",
            command: "show reload cause history",
            failure_condition: "A test fails if the device reload was not requested by user",
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let history = doc.field("resetHistory")?;
        let mut items = Vec::new();
        for id in 0..HISTORY_DEPTH {
            let Some(slot) = history.get(&id.to_string()) else {
                continue;
            };
            for (_, events) in slot.as_entries()? {
                items.push(reload_item(&events.first()?)?);
            }
        }
        Ok(vec![Section::tested(None, items)])
    }
}

pub struct ReloadCauseFull;

impl Check for ReloadCauseFull {
    fn name(&self) -> &'static str {
        "reload_cause_full"
    }

    fn alias(&self) -> &'static str {
        "check_reload_cause_full"
    }

    fn header(&self) -> CheckHeader {
        CheckHeader {
            title: "Reload cause full",
            description: "include tests report about the cause of the most recent reload",
            command: "show reload cause full",
            failure_condition: "The test fails if the device reload was not requested by user",
        }
    }

    fn evaluate(&self, doc: &Fields<'_>) -> Result<Vec<Section>> {
        let mut items = Vec::new();
        for cause in doc.items("resetCauses")? {
            items.push(reload_item(&cause)?);
        }
        Ok(vec![Section::tested(None, items)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::checks::testing::{messages, result};
    use crate::audit::render::{render, OTHERS_PASSED};
    use crate::utils::Verdict;
    use serde_json::json;

    #[test]
    fn full_cause_one_pass_one_fail() {
        let doc = json!({"resetCauses": [
            {"description": "Reload requested by the user.", "timestamp": 1_600_000_000.0},
            {"description": "power loss", "timestamp": 1_600_100_000.0}
        ]});
        let r = result(&ReloadCauseFull, doc);
        assert_eq!(r.status(), Verdict::Fail);

        let fail_line = format!(
            "Time: {} *** Reason: power loss *** Result: FAIL\n",
            format_epoch(1_600_100_000.0)
        );
        let text = render(&r);
        assert!(text.failures_only.ends_with(&format!("{}{}\n\n", fail_line, OTHERS_PASSED)));
        assert_eq!(text.failures_only.matches(" *** Result: ").count(), 1);
        assert_eq!(text.main.matches(" *** Result: ").count(), 2);
    }

    #[test]
    fn reload_reason_is_case_sensitive() {
        let doc = json!({"resetCauses": [
            {"description": "reload requested by the user.", "timestamp": 0}
        ]});
        assert_eq!(result(&ReloadCauseFull, doc).status(), Verdict::Fail);
    }

    #[test]
    fn history_walks_ten_most_recent_slots_in_order() {
        let mut history = serde_json::Map::new();
        for id in (0..12).rev() {
            history.insert(
                id.to_string(),
                json!({"event": [{"description": format!("cause {}", id), "timestamp": 1_600_000_000 + id}]}),
            );
        }
        history.remove("4");
        let r = result(&ReloadCauseHistory, json!({"resetHistory": history}));

        let reasons: Vec<String> = messages(&r.sections[0])
            .iter()
            .map(|m| m.split("*** Reason: ").nth(1).unwrap_or_default().to_string())
            .collect();
        assert_eq!(reasons.len(), 9);
        assert_eq!(reasons[0], "cause 0 [FAIL]");
        assert_eq!(reasons[4], "cause 5 [FAIL]");
        assert_eq!(reasons[8], "cause 9 [FAIL]");
    }
}
