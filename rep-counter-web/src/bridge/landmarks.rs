//! Landmark intake and the JS-owned counting session
//!
//! Receives MediaPipe Pose landmarks from JavaScript every frame, pulls out
//! the two arm triples and advances the session.

use wasm_bindgen::prelude::*;
use std::cell::RefCell;

use crate::counter::{ArmJoints, FrameOutcome, JointTriple, Landmark, RepCounterSession};

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LANDMARK_COUNT: usize = 33;
/// x, y, z, visibility
pub const VALUES_PER_LANDMARK: usize = 4;

pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;

/// (shoulder, elbow, wrist) per arm
pub const LEFT_ARM: (usize, usize, usize) = (LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST);
pub const RIGHT_ARM: (usize, usize, usize) = (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST);

// ============================================================================
// SESSION STORAGE
// ============================================================================

/// Session plus the last frame result for the getters
#[derive(Default)]
pub(crate) struct CounterStore {
    pub session: RepCounterSession,
    pub last_outcome: Option<FrameOutcome>,
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    pub(crate) static COUNTER: RefCell<CounterStore> = RefCell::new(CounterStore::default());
}

// ============================================================================
// PARSING
// ============================================================================

fn landmark_at(data: &[f32], index: usize) -> Landmark {
    let base = index * VALUES_PER_LANDMARK;
    Landmark::with_depth(data[base], data[base + 1], data[base + 2], data[base + 3])
}

fn arm_at(data: &[f32], (shoulder, elbow, wrist): (usize, usize, usize)) -> JointTriple {
    JointTriple::new(
        landmark_at(data, shoulder),
        landmark_at(data, elbow),
        landmark_at(data, wrist),
    )
}

/// Extract both arms from a flat landmark array
///
/// Returns `None` unless `data` holds exactly 33 × 4 values.
pub fn parse_arm_joints(data: &[f32]) -> Option<ArmJoints> {
    if data.len() != LANDMARK_COUNT * VALUES_PER_LANDMARK {
        return None;
    }
    Some(ArmJoints::new(arm_at(data, LEFT_ARM), arm_at(data, RIGHT_ARM)))
}

fn process(frame: Option<&ArmJoints>) {
    let now = js_sys::Date::now();

    COUNTER.with(|store_cell| {
        let mut store = store_cell.borrow_mut();
        let outcome = store.session.process_frame(frame, now);

        for event in outcome.events.iter() {
            if event.counted_in_total {
                console_log!(
                    "💪 {} rep {} (total {})",
                    event.side.as_str(),
                    event.limb_count,
                    outcome.report.total_reps
                );
            }
        }
        store.last_outcome = Some(outcome);
    });
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Called from JavaScript with flat Float32Array of 132 values
/// (33 landmarks × 4: x, y, z, visibility)
#[wasm_bindgen]
pub fn update_landmarks(data: &[f32]) {
    let joints = parse_arm_joints(data);
    if joints.is_none() {
        web_sys::console::warn_1(
            &format!(
                "Invalid landmark data length: {} (expected {})",
                data.len(),
                LANDMARK_COUNT * VALUES_PER_LANDMARK
            )
            .into(),
        );
    }
    process(joints.as_ref());
}

/// Called from JavaScript when the detector found no body this frame
#[wasm_bindgen]
pub fn report_no_detection() {
    process(None);
}
