//! Overlay text for the page
//!
//! Per-arm angle, stage and reps plus the session total, one arm per line.

use wasm_bindgen::prelude::*;

use super::landmarks::COUNTER;
use crate::counter::{LimbReport, SessionReport, Side};

fn limb_line(limb: &LimbReport) -> String {
    let side = match limb.side {
        Side::Left => "L",
        Side::Right => "R",
    };
    match limb.angle_deg {
        Some(angle) => format!(
            "{}: {:.0}° {} | reps {}",
            side,
            angle,
            limb.stage.label(),
            limb.rep_count
        ),
        None => format!("{}: not visible | reps {}", side, limb.rep_count),
    }
}

/// Format a session report as overlay text
pub fn format_status(report: &SessionReport) -> String {
    format!(
        "{}  REPS: {}\n{}\n{}",
        report.exercise.to_uppercase().replace('_', " "),
        report.total_reps,
        limb_line(&report.limbs[0]),
        limb_line(&report.limbs[1]),
    )
}

/// Get formatted overlay text (called from JS to update HTML)
#[wasm_bindgen]
pub fn get_status_text() -> String {
    COUNTER.with(|store_cell| {
        let store = store_cell.borrow();
        match store.last_outcome.as_ref() {
            Some(outcome) => format_status(&outcome.report),
            None => format_status(&store.session.report()),
        }
    })
}
