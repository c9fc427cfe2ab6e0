//! Counter module - joint angles, per-limb stage machine, aggregation
//!
//! Re-exports only. All logic in submodules. Nothing here touches JS.

mod joints;
mod angles;
mod confidence_gate;
mod error;
mod profile;
mod limb;
mod aggregator;
mod session;

pub use joints::{Landmark, JointTriple, ArmJoints, Side};
pub use angles::{calculate_joint_angle, triple_angle};
pub use confidence_gate::ConfidenceGate;
pub use error::ProfileError;
pub use profile::{
    Exercise, ExerciseProfile, CountingDirection, AggregationPolicy, InvisibilityPolicy,
    TrackedLimbs, DEFAULT_MIN_VISIBILITY, DEFAULT_COOLDOWN_MS,
};
pub use limb::{Stage, LimbState, LimbTracker, LimbUpdate};
pub use aggregator::Aggregator;
pub use session::{RepCounterSession, FrameOutcome, SessionReport, LimbReport, RepEvent};
