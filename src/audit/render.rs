//! Renders a [`CheckResult`] into its two text streams.
//!
//! Both streams are derived from the same value: the full rendering lists
//! every line item, the failures-only rendering keeps the header and the
//! context lines, lists only failing items and closes each tested section
//! with a summary line.

use crate::audit::result::{CheckHeader, CheckResult, Coverage, LineItem, Section};

pub const ALL_PASSED: &str = "All tests successfully passed";
pub const OTHERS_PASSED: &str = "The other tests successfully passed";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendering {
    pub main: String,
    pub failures_only: String,
}

pub fn render(result: &CheckResult) -> Rendering {
    let header = render_header(&result.header);
    let mut out = Rendering { main: header.clone(), failures_only: header };

    for section in &result.sections {
        render_section(section, &mut out);
    }
    out
}

fn render_header(h: &CheckHeader) -> String {
    format!(
        "{stars} {title} {stars}\n\n\
         Description: {description}\n\
         Required EOS command: {command} | json\n\
         Test failure conditions: {condition}\n\n",
        stars = "*".repeat(10),
        title = h.title,
        description = h.description,
        command = h.command,
        condition = h.failure_condition,
    )
}

fn item_line(item: &LineItem) -> String {
    if item.verdict.is_tested() {
        format!("{} *** Result: {}\n", item.message, item.verdict)
    } else {
        format!("{}\n", item.message)
    }
}

fn render_section(section: &Section, out: &mut Rendering) {
    if let Some(heading) = &section.heading {
        let line = format!("{}\n", heading);
        out.main.push_str(&line);
        out.failures_only.push_str(&line);
    }

    match &section.coverage {
        Coverage::Informational => {
            for item in &section.items {
                let line = item_line(item);
                out.main.push_str(&line);
                out.failures_only.push_str(&line);
            }
        }
        Coverage::Untested { note } => {
            for item in &section.items {
                out.main.push_str(&item_line(item));
            }
            out.failures_only.push_str(note);
            out.failures_only.push('\n');
        }
        Coverage::Tested => {
            let mut failed = false;
            for item in &section.items {
                let line = item_line(item);
                out.main.push_str(&line);
                if item.verdict.is_fail() {
                    failed = true;
                    out.failures_only.push_str(&line);
                }
            }
            out.failures_only.push_str(if failed { OTHERS_PASSED } else { ALL_PASSED });
            out.failures_only.push('\n');
        }
        Coverage::Whole(verdict) => {
            let mut block: String = section.items.iter().map(item_line).collect();
            block.push_str(&format!("\nTest result: {}\n", verdict));
            out.main.push_str(&block);
            if verdict.is_fail() {
                out.failures_only.push_str(&block);
            } else {
                out.failures_only.push_str(ALL_PASSED);
                out.failures_only.push('\n');
            }
        }
    }

    out.main.push('\n');
    out.failures_only.push('\n');
}
