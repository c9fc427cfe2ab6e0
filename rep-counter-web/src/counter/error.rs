//! Profile configuration errors

use std::fmt;

/// Errors raised when an exercise profile cannot be used
#[derive(Clone, Debug, PartialEq)]
pub enum ProfileError {
    /// Contracted threshold must be strictly below the extended threshold
    ThresholdsInverted { contracted: f32, extended: f32 },
    /// Threshold outside [0, 180] degrees or not a number
    ThresholdOutOfRange(f32),
    /// Minimum visibility outside [0, 1]
    InvalidVisibility(f32),
    /// Cooldown negative or not a number
    InvalidCooldown(f64),
    /// Bilateral aggregation needs both arms tracked
    BilateralNeedsBothLimbs,
    UnknownExercise(String),
    /// Profile JSON could not be decoded
    Parse(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::ThresholdsInverted { contracted, extended } => write!(
                f,
                "contracted threshold {contracted}° must be below extended threshold {extended}°"
            ),
            ProfileError::ThresholdOutOfRange(value) => {
                write!(f, "threshold {value}° is outside 0-180°")
            }
            ProfileError::InvalidVisibility(value) => {
                write!(f, "minimum visibility {value} is outside 0-1")
            }
            ProfileError::InvalidCooldown(value) => {
                write!(f, "cooldown {value}ms must be a non-negative number")
            }
            ProfileError::BilateralNeedsBothLimbs => {
                write!(f, "bilateral aggregation requires both arms to be tracked")
            }
            ProfileError::UnknownExercise(name) => write!(f, "unknown exercise '{name}'"),
            ProfileError::Parse(msg) => write!(f, "invalid profile JSON: {msg}"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        ProfileError::Parse(err.to_string())
    }
}
