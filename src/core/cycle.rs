//! Computation cycle - parameters in, curve and operating point out
//!
//! Every parameter change recomputes the whole cycle. The sweep is regenerated,
//! the curve is evaluated in full and the intersection is searched again; nothing
//! is cached between cycles.

use serde::Serialize;
use tracing::debug;

use crate::core::bounds::ParameterName;
use crate::core::intersection::{find_intersection, IntersectionResult};
use crate::core::model::{velocity_for_angle, FibreAngleCurve, VelocitySweep};
use crate::core::parameters::ParameterSet;
use crate::core::sync::{ControlEvent, ParameterStore, SyncOutcome};

/// Everything the presentation layer needs to render one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Computation {
    pub parameters: ParameterSet,
    pub sweep: VelocitySweep,
    pub curve: FibreAngleCurve,
    pub intersection: IntersectionResult,
    /// Exact model inversion for the target angle, for comparison only
    pub analytic_velocity: Option<f64>,
    pub summary: String,
}

impl Computation {
    /// Run a full cycle for an already-normalized parameter set
    pub fn run(parameters: &ParameterSet) -> Self {
        let sweep = VelocitySweep::standard();
        let curve = FibreAngleCurve::evaluate(parameters, &sweep);
        let intersection = find_intersection(&curve, &sweep, parameters.target_angle);
        let analytic_velocity = velocity_for_angle(parameters, parameters.target_angle);
        let summary = summary(parameters, &intersection);

        debug!(
            gear_count = parameters.gear_count,
            mandrel_diameter = parameters.mandrel_diameter,
            horn_gear_speed = parameters.horn_gear_speed,
            target_angle = parameters.target_angle,
            index = intersection.index,
            velocity = intersection.velocity,
            angle = intersection.angle,
            "computed fibre angle curve"
        );

        Self {
            parameters: *parameters,
            sweep,
            curve,
            intersection,
            analytic_velocity,
            summary,
        }
    }

    /// Gap between the sampled and the analytic velocity (mm/s)
    pub fn sampling_error(&self) -> Option<f64> {
        self.analytic_velocity
            .map(|exact| self.intersection.velocity - exact)
    }

    /// Whether the analytic solution lies outside the sweep, i.e. the
    /// intersection is pinned to an edge sample
    pub fn is_saturated(&self) -> bool {
        let samples = self.sweep.as_slice();
        match (self.analytic_velocity, samples.first(), samples.last()) {
            (Some(v), Some(&first), Some(&last)) => v < first || v > last,
            (None, _, _) => true,
            _ => false,
        }
    }
}

/// The operator-facing result sentence
pub fn summary(parameters: &ParameterSet, intersection: &IntersectionResult) -> String {
    format!(
        "To achieve {}° at {} RPM, use a mandrel velocity of approximately {:.2} mm/s",
        parameters.target_angle, parameters.horn_gear_speed, intersection.velocity
    )
}

/// A session: one parameter store and the cycle it last produced
///
/// Each interaction reconciles into the store and then recomputes the full
/// cycle, so the computation always reflects the current parameters.
#[derive(Debug, Clone)]
pub struct Session {
    store: ParameterStore,
    current: Computation,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ParameterStore::new())
    }
}

impl Session {
    pub fn new(store: ParameterStore) -> Self {
        let current = Computation::run(&store.parameters());
        Self { store, current }
    }

    /// Apply one control event and recompute
    pub fn interact(&mut self, event: &ControlEvent) -> SyncOutcome {
        let outcome = self.store.apply(event);
        self.current = Computation::run(&self.store.parameters());
        outcome
    }

    /// Reset every parameter to its default and recompute
    pub fn reset_all(&mut self) -> Vec<SyncOutcome> {
        let outcomes = self.store.reset_all();
        self.current = Computation::run(&self.store.parameters());
        outcomes
    }

    /// Reset one parameter and recompute
    pub fn reset(&mut self, name: ParameterName) -> SyncOutcome {
        let outcome = self.store.reset(name);
        self.current = Computation::run(&self.store.parameters());
        outcome
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn computation(&self) -> &Computation {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sync::EventKind;

    #[test]
    fn test_default_cycle() {
        let computation = Computation::run(&ParameterSet::default());
        assert_eq!(computation.sweep.len(), 200);
        assert_eq!(computation.curve.len(), 200);
        assert_eq!(computation.curve.as_slice()[0], 90.0);
        assert_eq!(computation.intersection.index, 22);
        assert!(!computation.is_saturated());
        assert_eq!(
            computation.summary,
            "To achieve 45° at 100 RPM, use a mandrel velocity of approximately 11.06 mm/s"
        );
    }

    #[test]
    fn test_sampling_error_within_half_step() {
        let computation = Computation::run(&ParameterSet::default());
        let error = computation.sampling_error().unwrap();
        assert!(error.abs() <= computation.sweep.resolution() / 2.0);
    }

    #[test]
    fn test_saturated_cycle() {
        let computation = Computation::run(&ParameterSet {
            gear_count: 192.0,
            mandrel_diameter: 1000.0,
            horn_gear_speed: 150.0,
            target_angle: 10.0,
        });
        assert!(computation.is_saturated());
        assert_eq!(computation.intersection.velocity, 100.0);
        assert!(computation.summary.ends_with("approximately 100.00 mm/s"));
    }

    #[test]
    fn test_session_recomputes_on_interaction() {
        let mut session = Session::default();
        let before = session.computation().intersection;

        session.interact(&ControlEvent::text(
            ParameterName::TargetAngle,
            "10",
            EventKind::Submitted,
        ));
        let after = session.computation();
        assert_eq!(after.parameters.target_angle, 10.0);
        assert!(after.intersection.velocity > before.velocity);
        assert!(after.summary.starts_with("To achieve 10° at 100 RPM"));

        session.reset_all();
        assert_eq!(session.computation().intersection, before);
    }

    #[test]
    fn test_session_output_matches_fresh_cycle() {
        let mut session = Session::default();
        session.interact(&ControlEvent::slider(ParameterName::GearCount, 96.0));
        session.interact(&ControlEvent::slider(ParameterName::MandrelDiameter, 250.0));

        let fresh = Computation::run(&session.store().parameters());
        assert_eq!(session.computation(), &fresh);
    }

    #[test]
    fn test_serializes_for_presentation() {
        let computation = Computation::run(&ParameterSet::default());
        let json = serde_json::to_value(&computation).unwrap();
        assert_eq!(json["sweep"].as_array().unwrap().len(), 200);
        assert_eq!(json["curve"][0], 90.0);
        assert_eq!(json["intersection"]["index"], 22);
        assert_eq!(json["parameters"]["targetAngle"], 45.0);
        assert!(json["analyticVelocity"].is_number());
    }
}
