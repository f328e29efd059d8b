//! Bounds table - valid range and default for each process parameter

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four operator-controlled process parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterName {
    /// Number of horn gears on the braiding/winding head
    GearCount,
    /// Mandrel diameter (mm)
    MandrelDiameter,
    /// Horn gear rotational speed (RPM)
    HornGearSpeed,
    /// Target fibre angle (degrees)
    TargetAngle,
}

/// Inclusive range and default value of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Bounds {
    const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamp a value into `[min, max]`
    ///
    /// Infinities clamp to the nearer bound. NaN is not a value here; callers
    /// treat it as absent before it reaches this point.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Check whether a value already lies within the bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

const GEAR_COUNT: Bounds = Bounds::new(1.0, 192.0, 192.0);
const MANDREL_DIAMETER: Bounds = Bounds::new(1.0, 1000.0, 100.0);
const HORN_GEAR_SPEED: Bounds = Bounds::new(25.0, 150.0, 100.0);
const TARGET_ANGLE: Bounds = Bounds::new(10.0, 80.0, 45.0);

impl ParameterName {
    /// All parameters in display order
    pub const ALL: [ParameterName; 4] = [
        ParameterName::GearCount,
        ParameterName::MandrelDiameter,
        ParameterName::HornGearSpeed,
        ParameterName::TargetAngle,
    ];

    /// Look up the bounds for this parameter
    pub const fn bounds(self) -> Bounds {
        match self {
            ParameterName::GearCount => GEAR_COUNT,
            ParameterName::MandrelDiameter => MANDREL_DIAMETER,
            ParameterName::HornGearSpeed => HORN_GEAR_SPEED,
            ParameterName::TargetAngle => TARGET_ANGLE,
        }
    }

    /// The camelCase identifier used in parameter files and JSON output
    pub const fn as_str(self) -> &'static str {
        match self {
            ParameterName::GearCount => "gearCount",
            ParameterName::MandrelDiameter => "mandrelDiameter",
            ParameterName::HornGearSpeed => "hornGearSpeed",
            ParameterName::TargetAngle => "targetAngle",
        }
    }

    /// The short name used on the command line
    pub const fn cli_name(self) -> &'static str {
        match self {
            ParameterName::GearCount => "gears",
            ParameterName::MandrelDiameter => "diameter",
            ParameterName::HornGearSpeed => "speed",
            ParameterName::TargetAngle => "angle",
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            ParameterName::GearCount => "Number of Horn Gears",
            ParameterName::MandrelDiameter => "Mandrel Diameter",
            ParameterName::HornGearSpeed => "Horn Gear Speed",
            ParameterName::TargetAngle => "Target Fibre Angle",
        }
    }

    /// Unit suffix for display ("" for the dimensionless gear count)
    pub const fn unit(self) -> &'static str {
        match self {
            ParameterName::GearCount => "",
            ParameterName::MandrelDiameter => "mm",
            ParameterName::HornGearSpeed => "RPM",
            ParameterName::TargetAngle => "°",
        }
    }

    /// Format a value with this parameter's unit
    pub fn format_value(self, value: f64) -> String {
        match self {
            ParameterName::GearCount => format!("{}", value),
            ParameterName::TargetAngle => format!("{}°", value),
            other => format!("{} {}", value, other.unit()),
        }
    }
}

impl std::fmt::Display for ParameterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a parameter name cannot be recognised
#[derive(Debug, Error, miette::Diagnostic)]
#[error("unknown parameter '{0}'")]
#[diagnostic(
    code(fac::parameter::unknown),
    help("expected one of: gears, diameter, speed, angle")
)]
pub struct ParameterNameError(pub String);

impl std::str::FromStr for ParameterName {
    type Err = ParameterNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gears" | "gearcount" | "gear-count" | "n" => Ok(ParameterName::GearCount),
            "diameter" | "mandreldiameter" | "mandrel-diameter" | "dm" => {
                Ok(ParameterName::MandrelDiameter)
            }
            "speed" | "horngearspeed" | "horn-gear-speed" | "hgs" => {
                Ok(ParameterName::HornGearSpeed)
            }
            "angle" | "targetangle" | "target-angle" | "alpha" => Ok(ParameterName::TargetAngle),
            _ => Err(ParameterNameError(s.to_string())),
        }
    }
}
