//! Fibre-angle model
//!
//! Maps a parameter set and a mandrel velocity to the resulting fibre angle:
//!
//! ```text
//! numerator   = π · dm · hgs
//! denominator = (n / 4) · v · 60
//! α           = atan(numerator / denominator)   [degrees]
//! ```
//!
//! - n: horn gear count
//! - dm: mandrel diameter (mm)
//! - hgs: horn gear speed (RPM)
//! - v: mandrel translational velocity (mm/s)
//!
//! A zero denominator (v = 0) is defined as the limiting angle of 90°.

use std::f64::consts::PI;

use serde::Serialize;

use crate::core::parameters::ParameterSet;

/// Number of samples in the velocity sweep
pub const SWEEP_SAMPLES: usize = 200;

/// Lowest sampled velocity (mm/s)
pub const SWEEP_START: f64 = 0.0;

/// Highest sampled velocity (mm/s)
pub const SWEEP_END: f64 = 100.0;

/// Angle reported where the denominator vanishes
pub const LIMIT_ANGLE_DEG: f64 = 90.0;

/// Ordered, evenly spaced velocity samples spanning [0, 100] mm/s inclusive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VelocitySweep(Vec<f64>);

impl VelocitySweep {
    /// Build the standard 200-sample sweep
    pub fn standard() -> Self {
        Self::linspace(SWEEP_START, SWEEP_END, SWEEP_SAMPLES)
    }

    /// Evenly spaced samples from `start` to `end` inclusive
    ///
    /// The final sample is pinned to `end` so accumulated rounding never
    /// moves the edge of the sweep.
    pub fn linspace(start: f64, end: f64, samples: usize) -> Self {
        match samples {
            0 => Self(Vec::new()),
            1 => Self(vec![start]),
            _ => {
                let step = (end - start) / (samples - 1) as f64;
                let mut values: Vec<f64> = (0..samples).map(|i| start + i as f64 * step).collect();
                values[samples - 1] = end;
                Self(values)
            }
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Spacing between neighbouring samples (mm/s)
    pub fn resolution(&self) -> f64 {
        if self.0.len() < 2 {
            return 0.0;
        }
        (self.0[self.0.len() - 1] - self.0[0]) / (self.0.len() - 1) as f64
    }
}

impl Default for VelocitySweep {
    fn default() -> Self {
        Self::standard()
    }
}

/// Fibre angles (degrees), one per sweep sample
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FibreAngleCurve(Vec<f64>);

impl FibreAngleCurve {
    /// Evaluate the model at every sample of the sweep
    pub fn evaluate(params: &ParameterSet, sweep: &VelocitySweep) -> Self {
        Self(
            sweep
                .as_slice()
                .iter()
                .map(|&v| fibre_angle(params, v))
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The π · dm · hgs term of the model
fn numerator(params: &ParameterSet) -> f64 {
    PI * params.mandrel_diameter * params.horn_gear_speed
}

/// Velocity-independent part of the denominator: (n / 4) · 60
fn denominator_per_velocity(params: &ParameterSet) -> f64 {
    (params.gear_count / 4.0) * 60.0
}

/// Fibre angle in degrees at mandrel velocity `v` (mm/s)
pub fn fibre_angle(params: &ParameterSet, velocity: f64) -> f64 {
    let denominator = denominator_per_velocity(params) * velocity;
    if denominator == 0.0 {
        return LIMIT_ANGLE_DEG;
    }
    (numerator(params) / denominator).atan().to_degrees()
}

/// Analytic velocity at which the model yields `angle_deg`
///
/// Inverts the model directly: `v = π·dm·hgs / ((n/4) · 60 · tan α)`.
/// Returns `None` outside (0°, 90°], where no finite non-negative velocity exists.
pub fn velocity_for_angle(params: &ParameterSet, angle_deg: f64) -> Option<f64> {
    if !(angle_deg > 0.0 && angle_deg <= LIMIT_ANGLE_DEG) {
        return None;
    }
    if angle_deg == LIMIT_ANGLE_DEG {
        return Some(0.0);
    }
    let per_velocity = denominator_per_velocity(params);
    if per_velocity == 0.0 {
        return None;
    }
    Some(numerator(params) / (per_velocity * angle_deg.to_radians().tan()))
}
