//! Core module - parameter model, sync engine and fibre angle computation

pub mod bounds;
pub mod config;
pub mod cycle;
pub mod input;
pub mod intersection;
pub mod model;
pub mod parameters;
pub mod sync;

pub use bounds::{Bounds, ParameterName, ParameterNameError};
pub use config::{Config, ConfigError};
pub use cycle::{summary, Computation, Session};
pub use input::ParameterFile;
pub use intersection::{find_intersection, IntersectionResult};
pub use model::{
    fibre_angle, velocity_for_angle, FibreAngleCurve, VelocitySweep, SWEEP_END, SWEEP_SAMPLES,
    SWEEP_START,
};
pub use parameters::ParameterSet;
pub use sync::{
    format_entry, parse_entry, reconcile, ControlEvent, EventKind, ParameterStore, Projection,
    Source, SyncOutcome,
};
