//! Per-limb stage machine
//!
//! Each arm cycles EXTENDED ↔ CONTRACTED. A rep is counted on exactly one of
//! the two transitions (chosen by the profile) and only when the arm was last
//! seen on the arming side, so noise inside the hysteresis band can never
//! produce a second count.

use serde::{Deserialize, Serialize};

use super::joints::Side;
use super::profile::{CountingDirection, ExerciseProfile, InvisibilityPolicy};

/// Phase of a limb within its rep cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Unknown,
    Extended,
    Contracted,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Unknown => "unknown",
            Stage::Extended => "extended",
            Stage::Contracted => "contracted",
        }
    }

    /// Overlay label (arm hanging = DOWN, arm bent = UP)
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Unknown => "-",
            Stage::Extended => "DOWN",
            Stage::Contracted => "UP",
        }
    }
}

/// Mutable per-limb counting state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LimbState {
    pub stage: Stage,
    /// Never decreases except on reset
    pub rep_count: u32,
    /// Timestamp of the last counted rep (ms)
    pub last_rep_ms: Option<f64>,
}

/// Result of feeding one frame to a limb
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LimbUpdate {
    /// Angle used this frame, `None` when the limb was not visible
    pub angle: Option<f32>,
    pub rep_completed: bool,
    /// Completing zone reached while armed, but the cooldown held the rep back
    pub rep_pending: bool,
}

/// Owns one `LimbState` and advances it frame by frame
#[derive(Clone, Debug)]
pub struct LimbTracker {
    side: Side,
    state: LimbState,
    last_angle: Option<f32>,
}

impl LimbTracker {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            state: LimbState::default(),
            last_angle: None,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn state(&self) -> &LimbState {
        &self.state
    }

    /// Angle from the latest frame; `None` while not visible
    pub fn last_angle(&self) -> Option<f32> {
        self.last_angle
    }

    /// Advance with this frame's gated angle
    ///
    /// `None` means the limb failed the visibility gate: no transition is
    /// evaluated, and the stage is frozen or dropped per the profile.
    pub fn update(
        &mut self,
        angle: Option<f32>,
        profile: &ExerciseProfile,
        timestamp_ms: f64,
    ) -> LimbUpdate {
        self.last_angle = angle;

        let angle = match angle {
            Some(a) => a,
            None => {
                if profile.invisibility == InvisibilityPolicy::Reset {
                    self.state.stage = Stage::Unknown;
                }
                return LimbUpdate::default();
            }
        };

        let (arming, completing) = match profile.counting_direction {
            CountingDirection::OnContraction => (Stage::Extended, Stage::Contracted),
            CountingDirection::OnExtension => (Stage::Contracted, Stage::Extended),
        };

        let zone = if angle > profile.extended_threshold_deg {
            Some(Stage::Extended)
        } else if angle < profile.contracted_threshold_deg {
            Some(Stage::Contracted)
        } else {
            None // hysteresis band
        };

        let mut rep_completed = false;
        let mut rep_pending = false;
        match zone {
            Some(z) if z == arming => {
                self.state.stage = arming;
            }
            Some(z) if z == completing && self.state.stage == arming => {
                // Blocked by cooldown: keep the stage so the rep lands on a later frame
                if self.cooldown_elapsed(profile, timestamp_ms) {
                    self.state.stage = completing;
                    self.state.rep_count += 1;
                    self.state.last_rep_ms = Some(timestamp_ms);
                    rep_completed = true;
                } else {
                    rep_pending = true;
                }
            }
            _ => {}
        }

        LimbUpdate {
            angle: Some(angle),
            rep_completed,
            rep_pending,
        }
    }

    fn cooldown_elapsed(&self, profile: &ExerciseProfile, timestamp_ms: f64) -> bool {
        match (profile.cooldown_ms, self.state.last_rep_ms) {
            (Some(cooldown), Some(last)) => {
                let elapsed = timestamp_ms - last;
                // Negative elapsed: the caller's clock restarted
                elapsed < 0.0 || elapsed >= cooldown
            }
            _ => true,
        }
    }

    /// Back to stage UNKNOWN with zero reps
    pub fn reset(&mut self) {
        self.state = LimbState::default();
        self.last_angle = None;
    }
}
