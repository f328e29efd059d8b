//! Parameter set - the four process inputs handed to the model

use serde::{Deserialize, Serialize};

use crate::core::bounds::ParameterName;

/// A complete set of process parameters
///
/// Values are always within bounds once they have passed through the sync engine.
/// `ParameterSet::default()` holds the default of every parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    /// Number of horn gears (n)
    pub gear_count: f64,
    /// Mandrel diameter in mm (dm)
    pub mandrel_diameter: f64,
    /// Horn gear speed in RPM (hgs)
    pub horn_gear_speed: f64,
    /// Target fibre angle in degrees
    pub target_angle: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            gear_count: ParameterName::GearCount.bounds().default,
            mandrel_diameter: ParameterName::MandrelDiameter.bounds().default,
            horn_gear_speed: ParameterName::HornGearSpeed.bounds().default,
            target_angle: ParameterName::TargetAngle.bounds().default,
        }
    }
}

impl ParameterSet {
    pub fn get(&self, name: ParameterName) -> f64 {
        match name {
            ParameterName::GearCount => self.gear_count,
            ParameterName::MandrelDiameter => self.mandrel_diameter,
            ParameterName::HornGearSpeed => self.horn_gear_speed,
            ParameterName::TargetAngle => self.target_angle,
        }
    }

    /// Set a value without clamping; use the sync engine for user input
    pub fn set(&mut self, name: ParameterName, value: f64) {
        match name {
            ParameterName::GearCount => self.gear_count = value,
            ParameterName::MandrelDiameter => self.mandrel_diameter = value,
            ParameterName::HornGearSpeed => self.horn_gear_speed = value,
            ParameterName::TargetAngle => self.target_angle = value,
        }
    }

    /// Check that every value lies within its bounds
    pub fn is_within_bounds(&self) -> bool {
        ParameterName::ALL
            .iter()
            .all(|&name| name.bounds().contains(self.get(name)))
    }
}
