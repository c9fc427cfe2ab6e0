//! Confidence Gate - decides whether a limb is usable this frame
//!
//! When any point of the triple is at or below the visibility threshold,
//! the limb is "not visible" and no angle is produced. Downstream state
//! stays where it was.

use super::angles::triple_angle;
use super::joints::JointTriple;
use super::profile::DEFAULT_MIN_VISIBILITY;

/// Visibility gate for one joint triple
#[derive(Clone, Debug)]
pub struct ConfidenceGate {
    /// Every point must be strictly above this to pass
    threshold: f32,
}

impl ConfidenceGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// True if all three points are visible enough and finite
    ///
    /// Each point is compared on its own so a NaN visibility never passes.
    pub fn passes(&self, triple: &JointTriple) -> bool {
        triple
            .points()
            .iter()
            .all(|point| point.visibility > self.threshold)
            && triple.is_finite()
    }

    /// Apply confidence gating
    ///
    /// Returns the joint angle when the triple passes, `None` otherwise.
    pub fn measure(&self, triple: &JointTriple) -> Option<f32> {
        if !self.passes(triple) {
            return None;
        }
        let angle = triple_angle(triple);
        angle.is_finite().then_some(angle)
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VISIBILITY)
    }
}
