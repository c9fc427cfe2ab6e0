//! Joint angle calculation using four-quadrant arctangent
//!
//! Measures the interior angle at the vertex (elbow) between the
//! vertex→proximal (upper arm) and vertex→distal (forearm) vectors.

use nalgebra::Point2;

use super::joints::JointTriple;

/// Calculate joint angle in degrees
///
/// Takes atan2 of each limb vector, subtracts, and folds reflex angles
/// back into range. Returns:
/// - ~30° = tightly bent (fist near shoulder)
/// - 180° = fully straight
///
/// Mirroring the x axis flips both vectors symmetrically, so the result is
/// unchanged. Coincident points give a meaningless (but finite) value; the
/// visibility gate keeps those frames out.
pub fn calculate_joint_angle(
    proximal: Point2<f32>,
    vertex: Point2<f32>,
    distal: Point2<f32>,
) -> f32 {
    let forearm = distal - vertex;
    let upper_arm = proximal - vertex;

    let radians = forearm.y.atan2(forearm.x) - upper_arm.y.atan2(upper_arm.x);
    let angle = radians.to_degrees().abs();

    // Reflex correction: report the interior angle
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Angle at the vertex of a joint triple
pub fn triple_angle(triple: &JointTriple) -> f32 {
    calculate_joint_angle(
        triple.proximal.position(),
        triple.vertex.position(),
        triple.distal.position(),
    )
}
