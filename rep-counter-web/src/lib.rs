//! Rep Counter Web - camera exercise rep counting in WASM
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! The counting core lives in `counter` and has no JS dependencies;
//! `bridge` owns the page-facing session.

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}

pub mod counter;
mod bridge;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    update_landmarks, report_no_detection, reset_counter, select_exercise,
    load_profile_json, get_total_reps, get_limb_reps, get_limb_stage,
    get_frame_report, get_profile_json, list_exercises, get_status_text,
};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    console_log!("✅ Rep counter ready ({} exercises)", counter::Exercise::ALL.len());
}
