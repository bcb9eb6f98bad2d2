//! Plain-text rendering of reconciliation results for the terminal.

use autoreg_core::{ReconciliationStatus, Role, RolePayload};
use autoreg_reconciler::Outcome;

const LABEL_WIDTH: usize = 14;

/// One line per status transition, printed as it happens.
pub fn status_line(role: Role, status: ReconciliationStatus) -> String {
    let marker = match status {
        ReconciliationStatus::Checking | ReconciliationStatus::Registering => "..",
        ReconciliationStatus::Exists | ReconciliationStatus::Registered => "ok",
        ReconciliationStatus::Error => "!!",
    };
    format!("[{marker}] {role}: {status}")
}

pub fn outcome_card(outcome: &Outcome) -> String {
    let mut lines = vec![
        format!("=== {} ===", outcome.role),
        field("status", outcome.status.as_str()),
        field("message", &outcome.message),
    ];
    if let Some(failure) = &outcome.failure {
        let kind = if failure.is_input_error() { "input" } else { "remote" };
        lines.push(field("failure", kind));
    }
    lines.push(field("completed at", &outcome.completed_at.to_rfc3339()));
    lines.join("\n")
}

pub fn payload_json(payload: &RolePayload) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(payload)?)
}

pub fn flag_line(role: Role, registered: bool) -> String {
    field(
        role.as_str(),
        if registered { "registered" } else { "not registered" },
    )
}

fn field(label: &str, value: &str) -> String {
    let width = LABEL_WIDTH;
    format!("  {label:<width$} {value}")
}
