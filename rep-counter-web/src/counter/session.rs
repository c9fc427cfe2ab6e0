//! Rep counter session - owns every piece of counting state
//!
//! One session = one selected exercise + two limb trackers + the aggregator.
//! `process_frame` is the only per-frame entry point and is fully synchronous.

use serde::Serialize;

use super::aggregator::Aggregator;
use super::confidence_gate::ConfidenceGate;
use super::error::ProfileError;
use super::joints::{ArmJoints, Side};
use super::limb::{LimbState, LimbTracker, LimbUpdate, Stage};
use super::profile::{Exercise, ExerciseProfile};

/// Display data for one limb
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LimbReport {
    pub side: Side,
    /// `None` = not visible this frame
    pub angle_deg: Option<f32>,
    pub visible: bool,
    pub stage: Stage,
    pub rep_count: u32,
}

/// A limb completed a rep this frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RepEvent {
    pub side: Side,
    /// That limb's count after the rep
    pub limb_count: u32,
    /// False when bilateral aggregation swallowed it
    pub counted_in_total: bool,
}

/// Session-level view for the UI
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionReport {
    pub exercise: String,
    pub limbs: [LimbReport; 2],
    pub total_reps: u32,
}

/// Everything one frame produced
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameOutcome {
    pub body_detected: bool,
    pub events: Vec<RepEvent>,
    pub report: SessionReport,
}

impl FrameOutcome {
    /// Reps added to the session total this frame
    pub fn total_delta(&self) -> u32 {
        self.events.iter().filter(|e| e.counted_in_total).count() as u32
    }
}

#[derive(Debug)]
pub struct RepCounterSession {
    profile: ExerciseProfile,
    gate: ConfidenceGate,
    limbs: [LimbTracker; 2],
    aggregator: Aggregator,
    frames_processed: u64,
}

impl RepCounterSession {
    /// Start a session, rejecting an invalid profile
    pub fn new(profile: ExerciseProfile) -> Result<Self, ProfileError> {
        profile.validate()?;
        Ok(Self::with_valid_profile(profile))
    }

    /// Start a session on a built-in exercise
    pub fn for_exercise(exercise: Exercise) -> Self {
        Self::with_valid_profile(exercise.profile())
    }

    fn with_valid_profile(profile: ExerciseProfile) -> Self {
        Self {
            gate: ConfidenceGate::new(profile.min_visibility),
            limbs: [LimbTracker::new(Side::Left), LimbTracker::new(Side::Right)],
            aggregator: Aggregator::new(profile.aggregation),
            frames_processed: 0,
            profile,
        }
    }

    pub fn profile(&self) -> &ExerciseProfile {
        &self.profile
    }

    pub fn limb(&self, side: Side) -> &LimbState {
        self.limbs[side.index()].state()
    }

    pub fn total_reps(&self) -> u32 {
        self.aggregator.total_reps()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Swap the exercise and start counting from zero
    ///
    /// An invalid profile is rejected and the running session is untouched.
    pub fn select_exercise(&mut self, profile: ExerciseProfile) -> Result<(), ProfileError> {
        profile.validate()?;
        *self = Self::with_valid_profile(profile);
        Ok(())
    }

    /// Zero all counts and stages; the exercise stays selected
    pub fn reset(&mut self) {
        for limb in self.limbs.iter_mut() {
            limb.reset();
        }
        self.aggregator.reset();
        self.frames_processed = 0;
    }

    /// Advance the session by one detector frame
    ///
    /// `None` means no body was found: nothing transitions and every limb
    /// reports not visible.
    pub fn process_frame(&mut self, frame: Option<&ArmJoints>, timestamp_ms: f64) -> FrameOutcome {
        self.frames_processed += 1;

        let mut events = Vec::new();
        let mut tracked_updates: Vec<LimbUpdate> = Vec::with_capacity(2);

        for side in Side::ALL {
            let tracked = self.profile.tracked_limbs.includes(side);
            let angle = match frame {
                Some(joints) if tracked => self.gate.measure(joints.get(side)),
                _ => None,
            };

            let limb = &mut self.limbs[side.index()];
            let update = limb.update(angle, &self.profile, timestamp_ms);

            if update.rep_completed {
                let counted_in_total = self.aggregator.record_rep();
                events.push(RepEvent {
                    side,
                    limb_count: limb.state().rep_count,
                    counted_in_total,
                });
            }
            if tracked {
                tracked_updates.push(update);
            }
        }

        self.aggregator
            .end_frame(&tracked_updates, self.profile.extended_threshold_deg);

        FrameOutcome {
            body_detected: frame.is_some(),
            events,
            report: self.report(),
        }
    }

    /// Current state for display, without advancing
    pub fn report(&self) -> SessionReport {
        let limb_report = |tracker: &LimbTracker| {
            let state = tracker.state();
            LimbReport {
                side: tracker.side(),
                angle_deg: tracker.last_angle(),
                visible: tracker.last_angle().is_some(),
                stage: state.stage,
                rep_count: state.rep_count,
            }
        };
        SessionReport {
            exercise: self.profile.name.clone(),
            limbs: [limb_report(&self.limbs[0]), limb_report(&self.limbs[1])],
            total_reps: self.aggregator.total_reps(),
        }
    }
}

impl Default for RepCounterSession {
    fn default() -> Self {
        Self::for_exercise(Exercise::BicepCurl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::joints::{JointTriple, Landmark};
    use crate::counter::profile::{AggregationPolicy, CountingDirection, TrackedLimbs};

    /// Arm with the given elbow angle: upper arm straight up from the elbow,
    /// forearm rotated by `angle_deg`
    fn arm_at(angle_deg: f32, visibility: f32) -> JointTriple {
        let elbow = (0.5_f32, 0.5_f32);
        let len = 0.2_f32;
        let shoulder = (elbow.0, elbow.1 - len);
        // Upper arm direction is -90°; forearm at -90° + angle
        let theta = (-90.0_f32 + angle_deg).to_radians();
        let wrist = (elbow.0 + len * theta.cos(), elbow.1 + len * theta.sin());
        JointTriple::new(
            Landmark::new(shoulder.0, shoulder.1, visibility),
            Landmark::new(elbow.0, elbow.1, visibility),
            Landmark::new(wrist.0, wrist.1, visibility),
        )
    }

    fn frame(left: Option<f32>, right: Option<f32>) -> ArmJoints {
        let to_arm = |a: Option<f32>| match a {
            Some(angle) => arm_at(angle, 0.9),
            None => arm_at(90.0, 0.1),
        };
        ArmJoints::new(to_arm(left), to_arm(right))
    }

    struct Clock(f64);

    impl Clock {
        fn tick(&mut self) -> f64 {
            self.0 += 33.0;
            self.0
        }
    }

    #[test]
    fn test_arm_fixture_angle() {
        let gate = ConfidenceGate::default();
        for angle in [20.0, 45.0, 90.0, 135.0, 170.0] {
            let measured = gate.measure(&arm_at(angle, 0.9)).unwrap();
            assert!((measured - angle).abs() < 0.05, "{angle} -> {measured}");
        }
    }

    #[test]
    fn test_noisy_single_sweep_counts_once() {
        let mut session = RepCounterSession::for_exercise(Exercise::BicepCurl);
        let mut clock = Clock(0.0);
        let sweep = [170.0, 165.0, 168.0, 150.0, 100.0, 60.0, 38.0, 42.0, 36.0, 70.0, 120.0, 170.0];
        for angle in sweep {
            session.process_frame(Some(&frame(None, Some(angle))), clock.tick());
        }
        assert_eq!(session.limb(Side::Right).rep_count, 1);
        assert_eq!(session.limb(Side::Left).rep_count, 0);
        assert_eq!(session.total_reps(), 1);
    }

    #[test]
    fn test_invisible_gap_keeps_rep_in_progress() {
        let mut session = RepCounterSession::for_exercise(Exercise::BicepCurl);
        let mut clock = Clock(0.0);
        session.process_frame(Some(&frame(Some(170.0), None)), clock.tick());
        assert_eq!(session.limb(Side::Left).stage, Stage::Extended);

        for _ in 0..5 {
            let outcome = session.process_frame(Some(&frame(None, None)), clock.tick());
            assert!(!outcome.report.limbs[0].visible);
            assert_eq!(outcome.report.limbs[0].angle_deg, None);
        }
        for _ in 0..3 {
            session.process_frame(None, clock.tick());
        }
        assert_eq!(session.limb(Side::Left).stage, Stage::Extended);

        let outcome = session.process_frame(Some(&frame(Some(35.0), None)), clock.tick());
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.total_delta(), 1);
        assert_eq!(session.total_reps(), 1);
    }

    #[test]
    fn test_no_detection_reports_all_invisible() {
        let mut session = RepCounterSession::default();
        let outcome = session.process_frame(None, 0.0);
        assert!(!outcome.body_detected);
        assert!(outcome.events.is_empty());
        assert!(outcome.report.limbs.iter().all(|l| !l.visible && l.angle_deg.is_none()));
        assert_eq!(session.frames_processed(), 1);
    }

    #[test]
    fn test_independent_sum_policy() {
        let mut session = RepCounterSession::for_exercise(Exercise::BicepCurl);
        let mut clock = Clock(0.0);
        for _ in 0..2 {
            session.process_frame(Some(&frame(Some(170.0), None)), clock.tick());
            session.process_frame(Some(&frame(Some(30.0), None)), clock.tick());
        }
        for _ in 0..3 {
            session.process_frame(Some(&frame(None, Some(170.0))), clock.tick());
            session.process_frame(Some(&frame(None, Some(30.0))), clock.tick());
        }
        assert_eq!(session.limb(Side::Left).rep_count, 2);
        assert_eq!(session.limb(Side::Right).rep_count, 3);
        assert_eq!(session.total_reps(), 5);
    }

    #[test]
    fn test_bilateral_policy() {
        let profile = Exercise::BicepCurl
            .profile()
            .with_aggregation(AggregationPolicy::Bilateral);
        let mut session = RepCounterSession::new(profile).unwrap();
        let mut clock = Clock(0.0);

        session.process_frame(Some(&frame(Some(170.0), Some(170.0))), clock.tick());

        let outcome = session.process_frame(Some(&frame(Some(30.0), Some(100.0))), clock.tick());
        assert_eq!(outcome.total_delta(), 1);
        assert_eq!(session.total_reps(), 1);

        let outcome = session.process_frame(Some(&frame(Some(30.0), Some(30.0))), clock.tick());
        assert_eq!(outcome.events.len(), 1);
        assert!(!outcome.events[0].counted_in_total);
        assert_eq!(session.total_reps(), 1);

        // Only one arm back up: still the same rep
        session.process_frame(Some(&frame(Some(170.0), Some(100.0))), clock.tick());
        session.process_frame(Some(&frame(Some(30.0), Some(100.0))), clock.tick());
        assert_eq!(session.total_reps(), 1);

        // Both extended together re-arms, next bilateral cycle counts
        session.process_frame(Some(&frame(Some(170.0), Some(170.0))), clock.tick());
        session.process_frame(Some(&frame(Some(30.0), Some(30.0))), clock.tick());
        assert_eq!(session.total_reps(), 2);
        assert_eq!(session.limb(Side::Left).rep_count, 3);
        assert_eq!(session.limb(Side::Right).rep_count, 2);
    }

    #[test]
    fn test_pull_up_counts_bilateral_motion_once() {
        let mut session = RepCounterSession::for_exercise(Exercise::PullUp);
        let mut clock = Clock(0.0);
        let cycle = [(150.0, 150.0), (60.0, 70.0), (25.0, 28.0), (80.0, 90.0), (125.0, 100.0), (140.0, 135.0)];

        for (l, r) in cycle {
            session.process_frame(Some(&frame(Some(l), Some(r))), clock.tick());
        }
        assert_eq!(session.total_reps(), 1);
        assert_eq!(session.limb(Side::Left).rep_count, 1);
        assert_eq!(session.limb(Side::Right).rep_count, 1);

        // Second pull-up after the cooldown window
        clock.0 += 2000.0;
        for (l, r) in cycle {
            session.process_frame(Some(&frame(Some(l), Some(r))), clock.tick());
        }
        assert_eq!(session.total_reps(), 2);
    }

    #[test]
    fn test_pull_up_cooldown_held_arm_stays_in_same_rep() {
        let mut session = RepCounterSession::for_exercise(Exercise::PullUp);
        let mut pull = |l: f32, r: f32, ts: f64| {
            session.process_frame(Some(&frame(Some(l), Some(r))), ts)
        };

        // First pull-up: right arm lags the left by one frame
        pull(20.0, 20.0, -200.0);
        pull(130.0, 100.0, 0.0);
        pull(130.0, 130.0, 500.0);

        // Second pull-up: both arms finish together, but the right arm is
        // still inside its cooldown and its rep lands a frame later
        pull(20.0, 20.0, 900.0);
        let outcome = pull(130.0, 130.0, 1300.0);
        assert_eq!(outcome.total_delta(), 1);
        assert_eq!(outcome.report.limbs[1].rep_count, 1);
        let outcome = pull(130.0, 130.0, 1533.0);
        assert_eq!(outcome.events.len(), 1);
        assert!(!outcome.events[0].counted_in_total);

        assert_eq!(session.limb(Side::Left).rep_count, 2);
        assert_eq!(session.limb(Side::Right).rep_count, 2);
        assert_eq!(session.total_reps(), 2);
    }

    #[test]
    fn test_single_arm_profile_ignores_other_arm() {
        let profile = Exercise::BicepCurl
            .profile()
            .with_tracked_limbs(TrackedLimbs::RightOnly);
        let mut session = RepCounterSession::new(profile).unwrap();
        let mut clock = Clock(0.0);
        for _ in 0..2 {
            session.process_frame(Some(&frame(Some(170.0), Some(170.0))), clock.tick());
            session.process_frame(Some(&frame(Some(30.0), Some(30.0))), clock.tick());
        }
        assert_eq!(session.limb(Side::Left).rep_count, 0);
        assert_eq!(session.limb(Side::Right).rep_count, 2);
        assert_eq!(session.total_reps(), 2);
        assert!(!session.report().limbs[0].visible);
    }

    #[test]
    fn test_reset_idempotent() {
        let mut session = RepCounterSession::default();
        let mut clock = Clock(0.0);
        session.process_frame(Some(&frame(Some(170.0), Some(170.0))), clock.tick());
        session.process_frame(Some(&frame(Some(30.0), Some(30.0))), clock.tick());
        assert_eq!(session.total_reps(), 2);

        session.reset();
        let once = session.report();
        session.reset();
        assert_eq!(session.report(), once);
        assert_eq!(once.total_reps, 0);
        assert!(once.limbs.iter().all(|l| l.rep_count == 0 && l.stage == Stage::Unknown));
        assert_eq!(session.profile().name, "bicep_curl");
    }

    #[test]
    fn test_select_exercise_resets() {
        let mut session = RepCounterSession::default();
        let mut clock = Clock(0.0);
        session.process_frame(Some(&frame(Some(170.0), None)), clock.tick());
        session.process_frame(Some(&frame(Some(30.0), None)), clock.tick());
        assert_eq!(session.total_reps(), 1);

        session.select_exercise(Exercise::PushUp.profile()).unwrap();
        assert_eq!(session.total_reps(), 0);
        assert_eq!(session.limb(Side::Left).stage, Stage::Unknown);
        assert_eq!(session.profile().name, "push_up");
    }

    #[test]
    fn test_rejected_profile_leaves_session_untouched() {
        let mut session = RepCounterSession::default();
        let mut clock = Clock(0.0);
        session.process_frame(Some(&frame(Some(170.0), None)), clock.tick());
        session.process_frame(Some(&frame(Some(30.0), None)), clock.tick());

        let bad = ExerciseProfile::new("bad", 40.0, 160.0, CountingDirection::OnContraction);
        assert!(session.select_exercise(bad.clone()).is_err());
        assert!(RepCounterSession::new(bad).is_err());
        assert_eq!(session.total_reps(), 1);
        assert_eq!(session.profile().name, "bicep_curl");
    }

    #[test]
    fn test_profile_visibility_threshold_used() {
        let profile = Exercise::BicepCurl.profile().with_min_visibility(0.95);
        let mut session = RepCounterSession::new(profile).unwrap();
        let outcome = session.process_frame(Some(&frame(Some(170.0), Some(170.0))), 0.0);
        assert!(outcome.report.limbs.iter().all(|l| !l.visible));
    }

    #[test]
    fn test_outcome_serializes() {
        let mut session = RepCounterSession::default();
        let outcome = session.process_frame(Some(&frame(Some(170.0), None)), 0.0);
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"stage\":\"extended\""));
        assert!(json.contains("\"side\":\"left\""));
        assert!(json.contains("\"angle_deg\":null"));
    }
}
