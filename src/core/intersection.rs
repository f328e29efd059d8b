//! Intersection search - locate the sweep sample nearest a target angle
//!
//! This is a nearest-sample search, not root finding. The reported velocity is
//! one of the sweep samples, so its resolution is the sweep spacing (≈0.5 mm/s
//! for the standard sweep). When the curve never reaches the target the result
//! saturates at the first or last sample.

use serde::Serialize;

use crate::core::model::{FibreAngleCurve, VelocitySweep};

/// The sweep sample whose angle is closest to the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntersectionResult {
    /// Index of the sample in the sweep
    pub index: usize,
    /// Velocity at that sample (mm/s)
    pub velocity: f64,
    /// Fibre angle at that sample (degrees)
    pub angle: f64,
}

/// Find the sample minimising `|curve[i] - target|`
///
/// Ties resolve to the first (lowest-velocity) index. The standard sweep is never
/// empty; for an empty curve the result is index 0 at the sweep start with a NaN angle.
pub fn find_intersection(
    curve: &FibreAngleCurve,
    sweep: &VelocitySweep,
    target_angle: f64,
) -> IntersectionResult {
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;

    for (i, &angle) in curve.as_slice().iter().enumerate() {
        let distance = (angle - target_angle).abs();
        // Strict comparison keeps the first index on ties
        if distance < best_distance {
            best_distance = distance;
            best_index = i;
        }
    }

    IntersectionResult {
        index: best_index,
        velocity: sweep.as_slice().get(best_index).copied().unwrap_or(f64::NAN),
        angle: curve.as_slice().get(best_index).copied().unwrap_or(f64::NAN),
    }
}
