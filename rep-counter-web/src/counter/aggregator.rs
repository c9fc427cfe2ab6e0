//! Dual-limb aggregation - turns per-arm reps into the session total
//!
//! Independent sum: every arm rep is a session rep.
//! Bilateral: one rep per two-arm motion. The first arm to complete counts,
//! the second is swallowed, and counting re-arms only once every tracked
//! arm is seen above the extended threshold in the same frame with no rep
//! still held back by its cooldown.

use super::limb::LimbUpdate;
use super::profile::AggregationPolicy;

#[derive(Clone, Debug)]
pub struct Aggregator {
    policy: AggregationPolicy,
    total_reps: u32,
    /// Bilateral only: a rep was counted and both arms have not re-extended yet
    rep_in_progress: bool,
}

impl Aggregator {
    pub fn new(policy: AggregationPolicy) -> Self {
        Self {
            policy,
            total_reps: 0,
            rep_in_progress: false,
        }
    }

    pub fn total_reps(&self) -> u32 {
        self.total_reps
    }

    pub fn rep_in_progress(&self) -> bool {
        self.rep_in_progress
    }

    /// Record a completed limb rep; returns true if the total went up
    pub fn record_rep(&mut self) -> bool {
        match self.policy {
            AggregationPolicy::IndependentSum => {
                self.total_reps += 1;
                true
            }
            AggregationPolicy::Bilateral => {
                if self.rep_in_progress {
                    return false;
                }
                self.total_reps += 1;
                self.rep_in_progress = true;
                true
            }
        }
    }

    /// Called once per frame after every limb was updated
    ///
    /// `limbs` holds this frame's update for each tracked arm.
    pub fn end_frame(&mut self, limbs: &[LimbUpdate], extended_threshold_deg: f32) {
        if self.policy != AggregationPolicy::Bilateral || !self.rep_in_progress {
            return;
        }
        let all_settled = !limbs.is_empty()
            && limbs.iter().all(|limb| {
                !limb.rep_pending
                    && matches!(limb.angle, Some(angle) if angle > extended_threshold_deg)
            });
        if all_settled {
            self.rep_in_progress = false;
        }
    }

    pub fn reset(&mut self) {
        self.total_reps = 0;
        self.rep_in_progress = false;
    }
}
