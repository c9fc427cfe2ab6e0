//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod landmarks;
mod controls;
mod status_text;

pub use landmarks::{update_landmarks, report_no_detection};

pub use controls::{
    reset_counter,
    select_exercise,
    load_profile_json,
    get_total_reps,
    get_limb_reps,
    get_limb_stage,
    get_frame_report,
    get_profile_json,
    list_exercises,
};

pub use status_text::get_status_text;
