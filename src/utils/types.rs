use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
    Info,
}

impl Verdict {
    pub fn from_pass(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail)
    }

    pub fn is_tested(&self) -> bool {
        !matches!(self, Verdict::Info)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
            Verdict::Info => write!(f, "INFO"),
        }
    }
}

/// Epoch seconds → local `DD Mon YYYY HH:MM:SS`. Fractional seconds are dropped.
pub fn format_epoch(epoch: f64) -> String {
    match Local.timestamp_opt(epoch.trunc() as i64, 0).earliest() {
        Some(t) => t.format("%d %b %Y %H:%M:%S").to_string(),
        None => format!("{}", epoch.trunc() as i64),
    }
}

/// Uptime in the `[N day[s], ]H:MM:SS` form.
pub fn format_uptime(seconds: u64) -> String {
    let d = seconds / 86400;
    let h = (seconds % 86400) / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    match d {
        0 => format!("{}:{:02}:{:02}", h, m, s),
        1 => format!("1 day, {}:{:02}:{:02}", h, m, s),
        _ => format!("{} days, {}:{:02}:{:02}", d, h, m, s),
    }
}
