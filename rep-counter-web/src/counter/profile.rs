//! Exercise profiles - thresholds, counting direction and policies
//!
//! One generic stage machine reads these; built-in exercises are just
//! preset values behind the `Exercise` tag.

use serde::{Deserialize, Serialize};

use super::error::ProfileError;
use super::joints::Side;

/// Landmarks at or below this visibility are treated as missing
pub const DEFAULT_MIN_VISIBILITY: f32 = 0.3;

/// Minimum gap between counted reps on one arm (pull-up preset)
pub const DEFAULT_COOLDOWN_MS: f64 = 1000.0;

/// Which threshold crossing completes a rep
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingDirection {
    /// Extended → contracted completes the rep (curls)
    OnContraction,
    /// Contracted → extended completes the rep (pull-ups, push-ups)
    OnExtension,
}

/// How two arms combine into the session total
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Total = left reps + right reps
    #[default]
    IndependentSum,
    /// One rep per two-arm motion; re-armed once both arms are extended
    Bilateral,
}

/// What a limb's stage does while it is not visible
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvisibilityPolicy {
    /// Keep the stage; the rep in progress resumes when the arm reappears
    #[default]
    Freeze,
    /// Drop back to unknown; the rep in progress is lost
    Reset,
}

/// Arms the session evaluates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedLimbs {
    #[default]
    Both,
    LeftOnly,
    RightOnly,
}

impl TrackedLimbs {
    pub fn includes(&self, side: Side) -> bool {
        match self {
            TrackedLimbs::Both => true,
            TrackedLimbs::LeftOnly => side == Side::Left,
            TrackedLimbs::RightOnly => side == Side::Right,
        }
    }
}

/// Built-in exercises
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    BicepCurl,
    PullUp,
    PushUp,
}

impl Exercise {
    pub const ALL: [Exercise; 3] = [Exercise::BicepCurl, Exercise::PullUp, Exercise::PushUp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Exercise::BicepCurl => "bicep_curl",
            Exercise::PullUp => "pull_up",
            Exercise::PushUp => "push_up",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ProfileError> {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Exercise::ALL
            .into_iter()
            .find(|e| e.as_str() == normalized)
            .ok_or_else(|| ProfileError::UnknownExercise(name.to_string()))
    }

    /// Preset thresholds and policies for this exercise
    pub fn profile(&self) -> ExerciseProfile {
        match self {
            Exercise::BicepCurl => ExerciseProfile {
                name: self.as_str().to_string(),
                extended_threshold_deg: 160.0,
                contracted_threshold_deg: 40.0,
                counting_direction: CountingDirection::OnContraction,
                aggregation: AggregationPolicy::IndependentSum,
                ..ExerciseProfile::base()
            },
            Exercise::PullUp => ExerciseProfile {
                name: self.as_str().to_string(),
                extended_threshold_deg: 120.0,
                contracted_threshold_deg: 30.0,
                counting_direction: CountingDirection::OnExtension,
                aggregation: AggregationPolicy::Bilateral,
                cooldown_ms: Some(DEFAULT_COOLDOWN_MS),
                ..ExerciseProfile::base()
            },
            // Top of a push-up is a straight arm; the rep completes on the way back up
            Exercise::PushUp => ExerciseProfile {
                name: self.as_str().to_string(),
                extended_threshold_deg: 160.0,
                contracted_threshold_deg: 90.0,
                counting_direction: CountingDirection::OnExtension,
                aggregation: AggregationPolicy::Bilateral,
                ..ExerciseProfile::base()
            },
        }
    }
}

fn default_min_visibility() -> f32 {
    DEFAULT_MIN_VISIBILITY
}

/// Full counting configuration for one exercise
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProfile {
    #[serde(default)]
    pub name: String,
    pub extended_threshold_deg: f32,
    pub contracted_threshold_deg: f32,
    pub counting_direction: CountingDirection,
    #[serde(default)]
    pub aggregation: AggregationPolicy,
    #[serde(default)]
    pub invisibility: InvisibilityPolicy,
    #[serde(default)]
    pub cooldown_ms: Option<f64>,
    #[serde(default = "default_min_visibility")]
    pub min_visibility: f32,
    #[serde(default)]
    pub tracked_limbs: TrackedLimbs,
}

impl ExerciseProfile {
    fn base() -> Self {
        Self {
            name: String::new(),
            extended_threshold_deg: 160.0,
            contracted_threshold_deg: 40.0,
            counting_direction: CountingDirection::OnContraction,
            aggregation: AggregationPolicy::IndependentSum,
            invisibility: InvisibilityPolicy::Freeze,
            cooldown_ms: None,
            min_visibility: DEFAULT_MIN_VISIBILITY,
            tracked_limbs: TrackedLimbs::Both,
        }
    }

    /// Custom profile with default policies
    pub fn new(
        name: impl Into<String>,
        extended_threshold_deg: f32,
        contracted_threshold_deg: f32,
        counting_direction: CountingDirection,
    ) -> Self {
        Self {
            name: name.into(),
            extended_threshold_deg,
            contracted_threshold_deg,
            counting_direction,
            ..Self::base()
        }
    }

    pub fn with_aggregation(mut self, aggregation: AggregationPolicy) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_invisibility(mut self, invisibility: InvisibilityPolicy) -> Self {
        self.invisibility = invisibility;
        self
    }

    pub fn with_cooldown_ms(mut self, cooldown_ms: Option<f64>) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_min_visibility(mut self, min_visibility: f32) -> Self {
        self.min_visibility = min_visibility;
        self
    }

    pub fn with_tracked_limbs(mut self, tracked_limbs: TrackedLimbs) -> Self {
        self.tracked_limbs = tracked_limbs;
        self
    }

    /// Reject configurations that would make counting degenerate
    pub fn validate(&self) -> Result<(), ProfileError> {
        for threshold in [self.contracted_threshold_deg, self.extended_threshold_deg] {
            if !threshold.is_finite() || !(0.0..=180.0).contains(&threshold) {
                return Err(ProfileError::ThresholdOutOfRange(threshold));
            }
        }
        if self.contracted_threshold_deg >= self.extended_threshold_deg {
            return Err(ProfileError::ThresholdsInverted {
                contracted: self.contracted_threshold_deg,
                extended: self.extended_threshold_deg,
            });
        }
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(ProfileError::InvalidVisibility(self.min_visibility));
        }
        if let Some(cooldown) = self.cooldown_ms {
            if !cooldown.is_finite() || cooldown < 0.0 {
                return Err(ProfileError::InvalidCooldown(cooldown));
            }
        }
        if self.aggregation == AggregationPolicy::Bilateral
            && self.tracked_limbs != TrackedLimbs::Both
        {
            return Err(ProfileError::BilateralNeedsBothLimbs);
        }
        Ok(())
    }

    /// Parse and validate a profile from JSON
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: ExerciseProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for ExerciseProfile {
    fn default() -> Self {
        Exercise::BicepCurl.profile()
    }
}
