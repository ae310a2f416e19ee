// ABOUTME: Display formatting for listings: pipe-delimited fixed-width tables or pretty JSON.
// ABOUTME: Rendering dispatches on the employee's role tag, never on type identity.

use ptlog_core::{Employee, LogEntry, SupervisorLink};
use ptlog_core::validation::DATE_FORMAT;
use serde::Serialize;

fn row(cells: &[(&str, usize)]) -> String {
    let mut line = String::from("|");
    for (i, &(cell, width)) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str(" |");
        }
        line.push_str(&format!("{cell:<width$}"));
    }
    line.push_str("|\n");
    line
}

/// Staff listing: id, name, designation.
pub fn staff_table(staff: &[Employee]) -> String {
    let mut out = row(&[("EMPLOYEE_ID", 20), ("Name", 20), ("DESIGNATION", 20)]);
    for e in staff {
        out.push_str(&row(&[
            (e.id.to_string().as_str(), 20),
            (e.name.as_str(), 20),
            (e.role.label(), 20),
        ]));
    }
    out
}

/// Supervisor links: who reports to whom, in recording order.
pub fn link_table(links: &[SupervisorLink]) -> String {
    let mut out = row(&[("EMPLOYEE_ID", 20), ("MANAGER_ID", 20)]);
    for link in links {
        out.push_str(&row(&[
            (link.employee_id.to_string().as_str(), 20),
            (link.manager_id.to_string().as_str(), 20),
        ]));
    }
    out
}

/// Single-employee log listing: log id, details, date.
pub fn log_table(logs: &[LogEntry]) -> String {
    let mut out = row(&[("PTLOG_ID", 20), ("DETAILS", 40), ("LOGGED_DATE", 20)]);
    for l in logs {
        out.push_str(&row(&[
            (l.id.to_string().as_str(), 20),
            (l.details.as_str(), 40),
            (l.logged_date.format(DATE_FORMAT).to_string().as_str(), 20),
        ]));
    }
    out
}

/// Manager-scoped log listing, which adds the owning employee id.
pub fn team_log_table(logs: &[LogEntry]) -> String {
    let mut out = row(&[
        ("EMPLOYEE_ID", 20),
        ("PTLOG_ID", 20),
        ("DETAILS", 40),
        ("LOGGED_DATE", 20),
    ]);
    for l in logs {
        out.push_str(&row(&[
            (l.employee_id.to_string().as_str(), 20),
            (l.id.to_string().as_str(), 20),
            (l.details.as_str(), 40),
            (l.logged_date.format(DATE_FORMAT).to_string().as_str(), 20),
        ]));
    }
    out
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}
