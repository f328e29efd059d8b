//! Clamp/sync engine - one authoritative value per parameter
//!
//! Each parameter is shown through two controls: a slider and a text entry.
//! Neither control ever updates the other. Every control event is reconciled
//! into the [`ParameterStore`], and the store then pushes the normalized value
//! out to both projections. Echoing a projection back into the store is a no-op,
//! so the update cycle always terminates after one pass.

use serde::Serialize;
use tracing::trace;

use crate::core::bounds::ParameterName;
use crate::core::parameters::ParameterSet;

/// Which control produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    Slider,
    TextEntry,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Slider => write!(f, "slider"),
            Source::TextEntry => write!(f, "text"),
        }
    }
}

/// How the event was raised
///
/// Only UI timing differs between the two; values are reconciled identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    #[default]
    Changed,
    Submitted,
}

/// A single user interaction with one control
#[derive(Debug, Clone, PartialEq)]
pub struct ControlEvent {
    pub parameter: ParameterName,
    pub source: Source,
    pub kind: EventKind,
    /// Candidate value; `None` for a cleared or unparseable entry
    pub candidate: Option<f64>,
}

impl ControlEvent {
    /// A slider was moved to `value`
    pub fn slider(parameter: ParameterName, value: f64) -> Self {
        Self {
            parameter,
            source: Source::Slider,
            kind: EventKind::Changed,
            candidate: Some(value),
        }
    }

    /// The text entry now holds `raw`
    pub fn text(parameter: ParameterName, raw: &str, kind: EventKind) -> Self {
        Self {
            parameter,
            source: Source::TextEntry,
            kind,
            candidate: parse_entry(raw),
        }
    }
}

/// Parse the contents of a numeric text entry
///
/// Empty, non-numeric and NaN input are all absent. Infinities are kept so the
/// clamp sends them to the nearer bound.
pub fn parse_entry(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Normalize a candidate value for a parameter
///
/// Present values are clamped to the parameter's bounds; absent values (and NaN)
/// fall back to the default. The result is always within bounds, and reconciling
/// it again returns it unchanged.
pub fn reconcile(parameter: ParameterName, candidate: Option<f64>, source: Source) -> f64 {
    let bounds = parameter.bounds();
    let value = match candidate.filter(|v| !v.is_nan()) {
        Some(v) => bounds.clamp(v),
        None => bounds.default,
    };
    trace!(%parameter, %source, ?candidate, value, "reconciled");
    value
}

/// The two representations of a parameter, derived from the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub slider: f64,
    pub text: String,
}

impl Projection {
    fn of(value: f64) -> Self {
        Self {
            slider: value,
            text: format_entry(value),
        }
    }
}

/// Render a value the way the text entry displays it
///
/// Uses the shortest representation that parses back to the same `f64`, so
/// `parse_entry(&format_entry(v)) == Some(v)`.
pub fn format_entry(value: f64) -> String {
    format!("{}", value)
}

/// Result of applying one event to the store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncOutcome {
    pub parameter: ParameterName,
    pub previous: f64,
    pub value: f64,
    /// False when the event left the authoritative value untouched (e.g. an echo)
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct ParameterState {
    value: f64,
    projection: Projection,
}

impl ParameterState {
    fn new(value: f64) -> Self {
        Self {
            value,
            projection: Projection::of(value),
        }
    }
}

/// Authoritative parameter values for one session
///
/// Each session owns its own store; nothing here is shared between sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    states: [ParameterState; 4],
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore {
    /// Create a store holding every parameter's default
    pub fn new() -> Self {
        Self::from_set(&ParameterSet::default())
    }

    /// Create a store from an arbitrary set, normalizing every value
    pub fn from_set(set: &ParameterSet) -> Self {
        let states = ParameterName::ALL.map(|name| {
            ParameterState::new(reconcile(name, Some(set.get(name)), Source::TextEntry))
        });
        Self { states }
    }

    fn index(name: ParameterName) -> usize {
        match name {
            ParameterName::GearCount => 0,
            ParameterName::MandrelDiameter => 1,
            ParameterName::HornGearSpeed => 2,
            ParameterName::TargetAngle => 3,
        }
    }

    fn state(&self, name: ParameterName) -> &ParameterState {
        &self.states[Self::index(name)]
    }

    /// Reconcile an event into the store and push the result to both projections
    pub fn apply(&mut self, event: &ControlEvent) -> SyncOutcome {
        let value = reconcile(event.parameter, event.candidate, event.source);
        self.write(event.parameter, value)
    }

    fn write(&mut self, name: ParameterName, value: f64) -> SyncOutcome {
        let state = &mut self.states[Self::index(name)];
        let previous = state.value;
        let changed = previous != value;
        if changed {
            state.value = value;
        }
        // Always re-project: a text entry holding "500" must show the clamped
        // value even when the authoritative value was already at the bound.
        state.projection = Projection::of(value);
        SyncOutcome {
            parameter: name,
            previous,
            value,
            changed,
        }
    }

    /// Restore one parameter to its default
    pub fn reset(&mut self, name: ParameterName) -> SyncOutcome {
        self.write(name, name.bounds().default)
    }

    /// Restore every parameter to its default
    pub fn reset_all(&mut self) -> Vec<SyncOutcome> {
        ParameterName::ALL
            .iter()
            .map(|&name| self.reset(name))
            .collect()
    }

    /// Current authoritative value
    pub fn value(&self, name: ParameterName) -> f64 {
        self.state(name).value
    }

    /// Current projections of a parameter
    pub fn projection(&self, name: ParameterName) -> &Projection {
        &self.state(name).projection
    }

    /// Event that re-submits the slider's current position
    pub fn echo_slider(&self, name: ParameterName) -> ControlEvent {
        ControlEvent::slider(name, self.projection(name).slider)
    }

    /// Event that re-submits the text entry's current contents
    pub fn echo_text(&self, name: ParameterName) -> ControlEvent {
        ControlEvent::text(name, &self.projection(name).text, EventKind::Changed)
    }

    /// Snapshot of all four authoritative values
    pub fn parameters(&self) -> ParameterSet {
        let mut set = ParameterSet::default();
        for name in ParameterName::ALL {
            set.set(name, self.value(name));
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_clamps_to_nearer_bound() {
        assert_eq!(reconcile(ParameterName::GearCount, Some(0.0), Source::Slider), 1.0);
        assert_eq!(reconcile(ParameterName::GearCount, Some(500.0), Source::Slider), 192.0);
        assert_eq!(
            reconcile(ParameterName::HornGearSpeed, Some(-3.0), Source::TextEntry),
            25.0
        );
        assert_eq!(
            reconcile(ParameterName::TargetAngle, Some(f64::INFINITY), Source::TextEntry),
            80.0
        );
        assert_eq!(
            reconcile(ParameterName::MandrelDiameter, Some(250.0), Source::TextEntry),
            250.0
        );
    }

    #[test]
    fn test_reconcile_absent_returns_default() {
        for name in ParameterName::ALL {
            assert_eq!(reconcile(name, None, Source::TextEntry), name.bounds().default);
            assert_eq!(
                reconcile(name, Some(f64::NAN), Source::Slider),
                name.bounds().default
            );
        }
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry("42"), Some(42.0));
        assert_eq!(parse_entry("  12.5 "), Some(12.5));
        assert_eq!(parse_entry("-7"), Some(-7.0));
        assert_eq!(parse_entry("1e3"), Some(1000.0));
        assert_eq!(parse_entry(""), None);
        assert_eq!(parse_entry("   "), None);
        assert_eq!(parse_entry("abc"), None);
        assert_eq!(parse_entry("NaN"), None);
        assert_eq!(parse_entry("inf"), Some(f64::INFINITY));
    }

    #[test]
    fn test_text_event_changes_and_submit_are_equivalent() {
        let mut a = ParameterStore::new();
        let mut b = ParameterStore::new();
        a.apply(&ControlEvent::text(ParameterName::TargetAngle, "30", EventKind::Changed));
        b.apply(&ControlEvent::text(ParameterName::TargetAngle, "30", EventKind::Submitted));
        assert_eq!(a, b);
    }

    #[test]
    fn test_slider_update_pushes_to_text() {
        let mut store = ParameterStore::new();
        let outcome = store.apply(&ControlEvent::slider(ParameterName::HornGearSpeed, 120.0));
        assert!(outcome.changed);
        assert_eq!(outcome.previous, 100.0);
        assert_eq!(store.projection(ParameterName::HornGearSpeed).text, "120");
        assert_eq!(store.projection(ParameterName::HornGearSpeed).slider, 120.0);
    }

    #[test]
    fn test_out_of_range_text_is_rewritten_with_clamped_value() {
        let mut store = ParameterStore::new();
        let outcome = store.apply(&ControlEvent::text(
            ParameterName::MandrelDiameter,
            "5000",
            EventKind::Submitted,
        ));
        assert_eq!(outcome.value, 1000.0);
        let projection = store.projection(ParameterName::MandrelDiameter);
        assert_eq!(projection.slider, 1000.0);
        assert_eq!(projection.text, "1000");
    }

    #[test]
    fn test_cleared_text_falls_back_to_default() {
        let mut store = ParameterStore::new();
        store.apply(&ControlEvent::slider(ParameterName::GearCount, 48.0));
        let outcome =
            store.apply(&ControlEvent::text(ParameterName::GearCount, "", EventKind::Submitted));
        assert_eq!(outcome.value, 192.0);
        assert_eq!(store.projection(ParameterName::GearCount).text, "192");
    }

    #[test]
    fn test_echoes_are_no_ops() {
        let mut store = ParameterStore::new();
        store.apply(&ControlEvent::text(ParameterName::TargetAngle, "95", EventKind::Changed));
        let snapshot = store.clone();

        let echo = store.echo_slider(ParameterName::TargetAngle);
        assert!(!store.apply(&echo).changed);
        let echo = store.echo_text(ParameterName::TargetAngle);
        assert!(!store.apply(&echo).changed);

        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_slider_to_text_round_trip() {
        let mut store = ParameterStore::new();
        store.apply(&ControlEvent::slider(ParameterName::HornGearSpeed, 37.5));
        let text = store.projection(ParameterName::HornGearSpeed).text.clone();

        let mut other = ParameterStore::new();
        other.apply(&ControlEvent::text(ParameterName::HornGearSpeed, &text, EventKind::Changed));
        assert_eq!(
            other.value(ParameterName::HornGearSpeed),
            store.value(ParameterName::HornGearSpeed)
        );
    }

    #[test]
    fn test_text_to_slider_round_trip() {
        let mut store = ParameterStore::new();
        store.apply(&ControlEvent::text(ParameterName::GearCount, "0", EventKind::Submitted));
        let slider = store.projection(ParameterName::GearCount).slider;
        assert_eq!(slider, 1.0);

        let mut other = ParameterStore::new();
        other.apply(&ControlEvent::slider(ParameterName::GearCount, slider));
        assert_eq!(other.value(ParameterName::GearCount), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut store = ParameterStore::new();
        store.apply(&ControlEvent::slider(ParameterName::GearCount, 10.0));
        store.apply(&ControlEvent::slider(ParameterName::TargetAngle, 70.0));

        let outcome = store.reset(ParameterName::GearCount);
        assert!(outcome.changed);
        assert_eq!(store.value(ParameterName::GearCount), 192.0);

        let outcomes = store.reset_all();
        assert_eq!(outcomes.len(), 4);
        assert_eq!(store, ParameterStore::new());
    }

    #[test]
    fn test_from_set_normalizes_values() {
        let store = ParameterStore::from_set(&ParameterSet {
            gear_count: 0.0,
            mandrel_diameter: 2000.0,
            horn_gear_speed: f64::NAN,
            target_angle: 45.0,
        });
        let set = store.parameters();
        assert_eq!(set.gear_count, 1.0);
        assert_eq!(set.mandrel_diameter, 1000.0);
        assert_eq!(set.horn_gear_speed, 100.0);
        assert_eq!(set.target_angle, 45.0);
        assert!(set.is_within_bounds());
    }

    #[test]
    fn test_stores_are_independent() {
        let mut first = ParameterStore::new();
        let second = ParameterStore::new();
        first.apply(&ControlEvent::slider(ParameterName::TargetAngle, 20.0));
        assert_eq!(second.value(ParameterName::TargetAngle), 45.0);
    }
}
