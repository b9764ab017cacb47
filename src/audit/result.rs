//! Immutable outcome of running one check against one device.

use serde::Serialize;

use crate::utils::Verdict;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckHeader {
    pub title: &'static str,
    pub description: &'static str,
    pub command: &'static str,
    pub failure_condition: &'static str,
}

pub const NO_TEST_CONDITION: &str =
    "This is a report without any test so there is no failure/passing condition";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub message: String,
    pub verdict: Verdict,
}

impl LineItem {
    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), verdict: Verdict::Info }
    }

    pub fn tested(message: impl Into<String>, passed: bool) -> Self {
        Self { message: message.into(), verdict: Verdict::from_pass(passed) }
    }
}

/// How a section shows up in the failures-only rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Coverage {
    /// Context lines; echoed verbatim in both renderings.
    Informational,
    /// Listed in the full rendering only; the failures-only one gets `note`.
    Untested { note: &'static str },
    /// Per-item PASS/FAIL followed by a summary line.
    Tested,
    /// One verdict over the whole block. On FAIL the block is repeated in
    /// the failures-only rendering instead of being reduced to single lines.
    Whole(Verdict),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: Option<String>,
    pub items: Vec<LineItem>,
    pub coverage: Coverage,
}

impl Section {
    pub fn informational(heading: Option<&str>, items: Vec<LineItem>) -> Self {
        Self { heading: heading.map(String::from), items, coverage: Coverage::Informational }
    }

    pub fn tested(heading: Option<&str>, items: Vec<LineItem>) -> Self {
        Self { heading: heading.map(String::from), items, coverage: Coverage::Tested }
    }

    pub fn untested(heading: Option<&str>, items: Vec<LineItem>, note: &'static str) -> Self {
        Self { heading: heading.map(String::from), items, coverage: Coverage::Untested { note } }
    }

    pub fn whole(items: Vec<LineItem>, passed: bool) -> Self {
        Self { heading: None, items, coverage: Coverage::Whole(Verdict::from_pass(passed)) }
    }

    pub fn has_failure(&self) -> bool {
        match self.coverage {
            Coverage::Tested => self.items.iter().any(|i| i.verdict.is_fail()),
            Coverage::Whole(v) => v.is_fail(),
            _ => false,
        }
    }

    pub fn is_tested(&self) -> bool {
        matches!(self.coverage, Coverage::Tested | Coverage::Whole(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub check: &'static str,
    pub header: CheckHeader,
    pub sections: Vec<Section>,
}

impl CheckResult {
    pub fn new(check: &'static str, header: CheckHeader, sections: Vec<Section>) -> Self {
        Self { check, header, sections }
    }

    /// PASS unless a tested item (or whole-block verdict) failed.
    pub fn status(&self) -> Verdict {
        if self.sections.iter().any(Section::has_failure) {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    pub fn is_report_only(&self) -> bool {
        !self.sections.iter().any(Section::is_tested)
    }

    pub fn tested_items(&self) -> impl Iterator<Item = &LineItem> {
        self.sections
            .iter()
            .filter(|s| s.coverage == Coverage::Tested)
            .flat_map(|s| s.items.iter())
    }
}
