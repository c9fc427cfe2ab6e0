//! Joint input types - per-frame landmark data handed in by the pose detector
//!
//! Everything here is read-only input: the counter never mutates a landmark.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A single tracked body point (normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,          // 0-1 normalized
    pub y: f32,          // 0-1 normalized
    pub z: f32,          // Relative depth (unused by the 2D angle)
    pub visibility: f32, // 0-1 detector confidence
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, z: 0.0, visibility }
    }

    pub fn with_depth(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// Image-plane position
    pub fn position(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Three landmarks forming one joint angle: proximal → vertex → distal
/// (shoulder → elbow → wrist for an arm)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JointTriple {
    pub proximal: Landmark,
    pub vertex: Landmark,
    pub distal: Landmark,
}

impl JointTriple {
    pub fn new(proximal: Landmark, vertex: Landmark, distal: Landmark) -> Self {
        Self { proximal, vertex, distal }
    }

    /// The three points in proximal → distal order
    pub fn points(&self) -> [&Landmark; 3] {
        [&self.proximal, &self.vertex, &self.distal]
    }

    pub fn is_finite(&self) -> bool {
        self.proximal.is_finite() && self.vertex.is_finite() && self.distal.is_finite()
    }
}

/// Which arm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Array slot used by per-limb storage
    pub fn index(&self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Both arms for one detected body
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArmJoints {
    pub left: JointTriple,
    pub right: JointTriple,
}

impl ArmJoints {
    pub fn new(left: JointTriple, right: JointTriple) -> Self {
        Self { left, right }
    }

    pub fn get(&self, side: Side) -> &JointTriple {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}
