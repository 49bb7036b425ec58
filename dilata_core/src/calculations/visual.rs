//! # Visual Model
//!
//! Geometry for the length bar drawn under the results. The bar track is
//! one unit wide; L₀ always ends at the middle of the track ("punto
//! original") and the change is exaggerated so millimetres stay visible.
//!
//! ```text
//! 0                 0.5              1
//! |=========L₀=======|##ΔL##|        |   expansion
//! |=========L₀====|##|               |   contraction
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::expansion::DerivedResult;
use crate::experiment::{ExperimentState, SliderBounds};

/// Scale applied to the strain ΔL/L₀ when drawing the bar
pub const VISUAL_EXAGGERATION: f64 = 50.0;

/// Track position where the original length ends
pub const ORIGINAL_END: f64 = 0.5;

/// Positions along the bar track, as fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    /// Where the unchanged part of the bar ends
    pub base_end: f64,
    /// Start of the highlighted change segment
    pub change_start: f64,
    /// End of the highlighted change segment
    pub change_end: f64,
    /// Where the final length ends (ΔL marker)
    pub final_end: f64,
    /// True when the bar grew (or did not change)
    pub expanding: bool,
}

impl BarGeometry {
    pub fn from_result(state: &ExperimentState, derived: &DerivedResult) -> Self {
        let strain = if state.initial_length_m > 0.0 {
            derived.delta_l_m / state.initial_length_m
        } else {
            0.0
        };
        let final_end = (ORIGINAL_END * (1.0 + VISUAL_EXAGGERATION * strain)).clamp(0.0, 1.0);

        BarGeometry {
            base_end: final_end.min(ORIGINAL_END),
            change_start: final_end.min(ORIGINAL_END),
            change_end: final_end.max(ORIGINAL_END),
            final_end,
            expanding: derived.delta_l_m >= 0.0,
        }
    }

    /// Width of the highlighted change segment
    pub fn change_width(&self) -> f64 {
        self.change_end - self.change_start
    }
}

/// Direction of the temperature change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureTrend {
    Rising,
    Falling,
    Unchanged,
}

impl TemperatureTrend {
    pub fn from_state(state: &ExperimentState) -> Self {
        if state.final_temp_c > state.initial_temp_c {
            TemperatureTrend::Rising
        } else if state.final_temp_c < state.initial_temp_c {
            TemperatureTrend::Falling
        } else {
            TemperatureTrend::Unchanged
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureTrend::Rising => "Aumentando",
            TemperatureTrend::Falling => "Disminuyendo",
            TemperatureTrend::Unchanged => "Sin cambio",
        }
    }
}

/// Thermometer fill in `[-1, 1]`: ΔT over the span of the final-temperature slider
pub fn thermometer_fill(state: &ExperimentState, bounds: &SliderBounds) -> f64 {
    let span = bounds.final_temp_c.span();
    if span <= 0.0 {
        return 0.0;
    }
    ((state.final_temp_c - state.initial_temp_c) / span).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::expansion::compute;
    use crate::experiment::SliderSpec;
    use crate::materials::MaterialCatalog;

    fn geometry(state: &ExperimentState) -> BarGeometry {
        let derived = compute(state, MaterialCatalog::builtin()).unwrap();
        BarGeometry::from_result(state, &derived)
    }

    #[test]
    fn test_expansion_extends_past_midpoint() {
        // steel default: strain 0.0012 -> 0.5 * (1 + 0.06) = 0.53
        let bar = geometry(&ExperimentState::default());
        assert!(bar.expanding);
        assert!((bar.final_end - 0.53).abs() < 1e-9);
        assert_eq!(bar.base_end, ORIGINAL_END);
        assert!((bar.change_width() - 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_contraction_ends_before_midpoint() {
        let mut state = ExperimentState::default();
        state.initial_temp_c = 50.0;
        state.final_temp_c = -50.0;
        let bar = geometry(&state);
        assert!(!bar.expanding);
        assert!(bar.final_end < ORIGINAL_END);
        assert_eq!(bar.base_end, bar.final_end);
        assert_eq!(bar.change_end, ORIGINAL_END);
    }

    #[test]
    fn test_no_change_has_empty_segment() {
        let mut state = ExperimentState::default();
        state.final_temp_c = state.initial_temp_c;
        let bar = geometry(&state);
        assert_eq!(bar.final_end, ORIGINAL_END);
        assert_eq!(bar.change_width(), 0.0);
    }

    #[test]
    fn test_geometry_stays_on_track() {
        let derived = DerivedResult {
            initial_length_m: 50.0,
            delta_t_c: 1.0e6,
            delta_l_m: 500.0,
            final_length_m: 550.0,
        };
        let bar = BarGeometry::from_result(&ExperimentState::default(), &derived);
        assert_eq!(bar.final_end, 1.0);
    }

    #[test]
    fn test_trend() {
        let mut state = ExperimentState::default();
        assert_eq!(TemperatureTrend::from_state(&state), TemperatureTrend::Rising);
        state.final_temp_c = -10.0;
        assert_eq!(TemperatureTrend::from_state(&state).label(), "Disminuyendo");
        state.final_temp_c = state.initial_temp_c;
        assert_eq!(TemperatureTrend::from_state(&state), TemperatureTrend::Unchanged);
    }

    #[test]
    fn test_thermometer_fill() {
        let bounds = SliderBounds::default();
        let state = ExperimentState::default();
        // 100 / 300
        assert!((thermometer_fill(&state, &bounds) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_thermometer_fill_cooling_is_negative() {
        let bounds = SliderBounds::default();
        let mut state = ExperimentState::default();
        state.initial_temp_c = 50.0;
        state.final_temp_c = -10.0;
        // -60 / 300
        assert!((thermometer_fill(&state, &bounds) + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_thermometer_fill_clamps_with_narrow_bounds() {
        let bounds = SliderBounds {
            final_temp_c: SliderSpec::new(0.0, 10.0, 0.1),
            ..SliderBounds::default()
        };
        let mut state = ExperimentState::default();
        state.initial_temp_c = 0.0;
        state.final_temp_c = 40.0;
        assert_eq!(thermometer_fill(&state, &bounds), 1.0);

        state.initial_temp_c = 40.0;
        state.final_temp_c = -40.0;
        assert_eq!(thermometer_fill(&state, &bounds), -1.0);
    }
}
