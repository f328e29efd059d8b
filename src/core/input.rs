//! Parameter input files
//!
//! A parameter file is a small YAML mapping naming any subset of the four
//! parameters:
//!
//! ```yaml
//! gearCount: 96
//! mandrelDiameter: 250
//! hornGearSpeed: "120"
//! targetAngle: 30
//! ```
//!
//! Each value is treated like text typed into that parameter's entry box:
//! numbers and numeric strings are clamped, anything else falls back to the
//! default. Unknown keys are rejected so typos do not go unnoticed.

use std::path::Path;

use serde::Deserialize;
use serde_yml::Value;

use crate::core::bounds::ParameterName;
use crate::core::sync::{parse_entry, ControlEvent, EventKind, Source};
use crate::yaml::{parse_yaml, parse_yaml_file, YamlError};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParameterFile {
    #[serde(default)]
    pub gear_count: Option<Value>,
    #[serde(default)]
    pub mandrel_diameter: Option<Value>,
    #[serde(default)]
    pub horn_gear_speed: Option<Value>,
    #[serde(default)]
    pub target_angle: Option<Value>,
}

impl ParameterFile {
    pub fn parse(content: &str, filename: &str) -> Result<Self, YamlError> {
        // An empty document deserializes as null; treat it as "no overrides"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        parse_yaml(content, filename)
    }

    pub fn load(path: &Path) -> Result<Self, YamlError> {
        if std::fs::metadata(path)?.len() == 0 {
            return Ok(Self::default());
        }
        parse_yaml_file(path)
    }

    fn raw(&self, name: ParameterName) -> Option<&Value> {
        match name {
            ParameterName::GearCount => self.gear_count.as_ref(),
            ParameterName::MandrelDiameter => self.mandrel_diameter.as_ref(),
            ParameterName::HornGearSpeed => self.horn_gear_speed.as_ref(),
            ParameterName::TargetAngle => self.target_angle.as_ref(),
        }
    }

    /// Text-entry submissions for every parameter named in the file
    pub fn events(&self) -> Vec<ControlEvent> {
        ParameterName::ALL
            .iter()
            .filter_map(|&name| {
                self.raw(name).map(|value| ControlEvent {
                    parameter: name,
                    source: Source::TextEntry,
                    kind: EventKind::Submitted,
                    candidate: coerce(value),
                })
            })
            .collect()
    }
}

/// Interpret a YAML scalar as a numeric entry; non-scalars are absent
fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| !v.is_nan()),
        Value::String(s) => parse_entry(s),
        _ => None,
    }
}
