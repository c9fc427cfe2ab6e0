//! Session controls and read-back for the page UI
//!
//! Exercise selection, reset, custom profiles and counter getters.

use wasm_bindgen::prelude::*;

use super::landmarks::{CounterStore, COUNTER};
use crate::counter::{Exercise, ExerciseProfile, FrameOutcome, ProfileError, Side};

impl From<ProfileError> for JsValue {
    fn from(err: ProfileError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Zero all counts and stages (exercise stays selected)
#[wasm_bindgen]
pub fn reset_counter() {
    COUNTER.with(|store_cell| {
        let mut store = store_cell.borrow_mut();
        store.session.reset();
        store.last_outcome = None;
    });
    console_log!("🔄 Counter reset");
}

/// Switch to a built-in exercise by name ("bicep_curl", "pull_up", "push_up")
#[wasm_bindgen]
pub fn select_exercise(name: &str) -> Result<(), JsValue> {
    let exercise = Exercise::from_name(name)?;
    apply_profile(exercise.profile())
}

/// Switch to a custom profile given as JSON
#[wasm_bindgen]
pub fn load_profile_json(json: &str) -> Result<(), JsValue> {
    let profile = ExerciseProfile::from_json(json)?;
    apply_profile(profile)
}

fn apply_profile(profile: ExerciseProfile) -> Result<(), JsValue> {
    COUNTER.with(|store_cell| -> Result<(), JsValue> {
        let mut store = store_cell.borrow_mut();
        store.session.select_exercise(profile)?;
        store.last_outcome = None;
        console_log!("🏋️ Exercise selected: {}", store.session.profile().name);
        Ok(())
    })
}

/// Session total under the active aggregation policy
#[wasm_bindgen]
pub fn get_total_reps() -> u32 {
    COUNTER.with(|store_cell| store_cell.borrow().session.total_reps())
}

/// Reps for one arm (0 = left, 1 = right)
#[wasm_bindgen]
pub fn get_limb_reps(side: usize) -> u32 {
    let Some(side) = Side::from_index(side) else {
        return 0;
    };
    COUNTER.with(|store_cell| store_cell.borrow().session.limb(side).rep_count)
}

/// Stage name for one arm: "unknown", "extended" or "contracted"
#[wasm_bindgen]
pub fn get_limb_stage(side: usize) -> String {
    let Some(side) = Side::from_index(side) else {
        return String::new();
    };
    COUNTER.with(|store_cell| {
        store_cell.borrow().session.limb(side).stage.as_str().to_string()
    })
}

/// Latest frame result as `FrameOutcome` JSON
///
/// Before the first frame (or after a reset) this is an empty outcome
/// carrying the current session state.
#[wasm_bindgen]
pub fn get_frame_report() -> Result<String, JsValue> {
    COUNTER.with(|store_cell| {
        frame_report_json(&store_cell.borrow())
            .map_err(|e| JsValue::from_str(&format!("Report serialization failed: {}", e)))
    })
}

fn frame_report_json(store: &CounterStore) -> serde_json::Result<String> {
    match store.last_outcome.as_ref() {
        Some(outcome) => serde_json::to_string(outcome),
        None => serde_json::to_string(&FrameOutcome {
            body_detected: false,
            events: Vec::new(),
            report: store.session.report(),
        }),
    }
}

/// Names of the built-in exercises as a JSON array
#[wasm_bindgen]
pub fn list_exercises() -> String {
    exercise_names_json()
}

/// Active profile as JSON
#[wasm_bindgen]
pub fn get_profile_json() -> Result<String, JsValue> {
    COUNTER.with(|store_cell| -> Result<String, JsValue> {
        Ok(store_cell.borrow().session.profile().to_json()?)
    })
}

fn exercise_names_json() -> String {
    let names: Vec<&str> = Exercise::ALL.iter().map(|e| e.as_str()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}
