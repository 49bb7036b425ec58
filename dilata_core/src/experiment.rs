//! # Experiment State
//!
//! The inputs a student edits: material, initial length and the two
//! temperatures. Temperatures are stored in Celsius; the display unit only
//! changes how they are rendered and how slider bounds are expressed.
//!
//! Edits never fail. Values outside the slider bounds are clamped to the
//! nearest bound, and text that does not parse leaves the value unchanged.
//!
//! ## Example
//!
//! ```rust
//! use dilata_core::experiment::{ExperimentState, Field, SliderBounds};
//! use dilata_core::units::TemperatureUnit;
//!
//! let bounds = SliderBounds::default();
//! let mut state = ExperimentState::new(&bounds);
//!
//! state.set_display_unit(TemperatureUnit::Kelvin);
//! state.apply(Field::FinalTemp, 1000.0, &bounds); // clamped to 250 °C
//! assert_eq!(state.final_temp_c, 250.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{LabError, LabResult};
use crate::materials::{MaterialCatalog, DEFAULT_MATERIAL_KEY};
use crate::units::TemperatureUnit;

/// Range and step of one slider, in canonical units (m or °C).
///
/// ## TOML Example
///
/// ```toml
/// [sliders.final_temp_c]
/// min = -50.0
/// max = 250.0
/// step = 0.1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderSpec {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        SliderSpec { min, max, step }
    }

    /// Clamp a canonical value into the slider range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Width of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check the range is usable as a slider
    pub fn validate(&self, field: &str) -> LabResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(LabError::invalid_input(
                field,
                format!("{:?}", self),
                "Slider bounds must be finite numbers",
            ));
        }
        if self.min >= self.max {
            return Err(LabError::invalid_input(
                field,
                format!("min={} max={}", self.min, self.max),
                "Slider minimum must be below its maximum",
            ));
        }
        if self.step <= 0.0 {
            return Err(LabError::invalid_input(
                field,
                self.step.to_string(),
                "Slider step must be positive",
            ));
        }
        Ok(())
    }
}

/// Slider policy for the three numeric inputs.
///
/// These are presentation limits, not physical ones, so they come from
/// configuration. The defaults match the reference lab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderBounds {
    /// Initial length L₀ (m)
    pub initial_length_m: SliderSpec,
    /// Initial temperature T₀ (°C)
    pub initial_temp_c: SliderSpec,
    /// Final temperature T_f (°C)
    pub final_temp_c: SliderSpec,
}

impl Default for SliderBounds {
    fn default() -> Self {
        SliderBounds {
            initial_length_m: SliderSpec::new(1.0, 100.0, 0.1),
            initial_temp_c: SliderSpec::new(-50.0, 50.0, 0.1),
            final_temp_c: SliderSpec::new(-50.0, 250.0, 0.1),
        }
    }
}

impl SliderBounds {
    /// Slider for a field, in canonical units
    pub fn spec(&self, field: Field) -> &SliderSpec {
        match field {
            Field::InitialLength => &self.initial_length_m,
            Field::InitialTemp => &self.initial_temp_c,
            Field::FinalTemp => &self.final_temp_c,
        }
    }

    /// Slider range expressed in the display unit
    pub fn display_range(&self, field: Field, unit: TemperatureUnit) -> (f64, f64) {
        let spec = self.spec(field);
        if field.is_temperature() {
            (unit.from_celsius(spec.min), unit.from_celsius(spec.max))
        } else {
            (spec.min, spec.max)
        }
    }

    pub fn validate(&self) -> LabResult<()> {
        self.initial_length_m.validate("sliders.initial_length_m")?;
        self.initial_temp_c.validate("sliders.initial_temp_c")?;
        self.final_temp_c.validate("sliders.final_temp_c")?;
        if self.initial_length_m.min <= 0.0 {
            return Err(LabError::invalid_input(
                "sliders.initial_length_m",
                self.initial_length_m.min.to_string(),
                "Initial length must stay positive",
            ));
        }
        Ok(())
    }
}

/// Numeric inputs of the experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    InitialLength,
    InitialTemp,
    FinalTemp,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::InitialLength, Field::InitialTemp, Field::FinalTemp];

    pub fn label(&self) -> &'static str {
        match self {
            Field::InitialLength => "Longitud Inicial (L₀)",
            Field::InitialTemp => "Temperatura Inicial (T₀)",
            Field::FinalTemp => "Temperatura Final (T_f)",
        }
    }

    pub fn is_temperature(&self) -> bool {
        !matches!(self, Field::InitialLength)
    }

    /// Decimals shown for this field
    pub fn precision(&self) -> usize {
        match self {
            Field::InitialLength => 2,
            Field::InitialTemp | Field::FinalTemp => 1,
        }
    }

    pub fn unit_symbol(&self, unit: TemperatureUnit) -> &'static str {
        if self.is_temperature() {
            unit.symbol()
        } else {
            "m"
        }
    }
}

/// Current inputs of the lab session.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material_key": "steel",
///   "initial_length_m": 50.0,
///   "initial_temp_c": 20.0,
///   "final_temp_c": 120.0,
///   "display_unit": "Celsius"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentState {
    /// Key into the material catalog
    pub material_key: String,
    /// Initial length L₀ (m)
    pub initial_length_m: f64,
    /// Initial temperature T₀ (°C)
    pub initial_temp_c: f64,
    /// Final temperature T_f (°C)
    pub final_temp_c: f64,
    /// How temperatures are rendered and edited
    pub display_unit: TemperatureUnit,
}

impl ExperimentState {
    /// Session defaults (steel, 50 m, 20 °C → 120 °C, Celsius), clamped into `bounds`
    pub fn new(bounds: &SliderBounds) -> Self {
        ExperimentState {
            material_key: DEFAULT_MATERIAL_KEY.to_string(),
            initial_length_m: bounds.initial_length_m.clamp(50.0),
            initial_temp_c: bounds.initial_temp_c.clamp(20.0),
            final_temp_c: bounds.final_temp_c.clamp(120.0),
            display_unit: TemperatureUnit::Celsius,
        }
    }

    /// Select another material. Unknown keys leave the selection unchanged.
    pub fn set_material(&mut self, key: &str, catalog: &MaterialCatalog) -> LabResult<()> {
        let material = catalog.lookup(key)?;
        self.material_key = material.key.clone();
        Ok(())
    }

    /// Change how temperatures are shown. Stored values are not touched.
    pub fn set_display_unit(&mut self, unit: TemperatureUnit) {
        self.display_unit = unit;
    }

    /// Stored value of a field (m or °C)
    pub fn canonical_value(&self, field: Field) -> f64 {
        match field {
            Field::InitialLength => self.initial_length_m,
            Field::InitialTemp => self.initial_temp_c,
            Field::FinalTemp => self.final_temp_c,
        }
    }

    /// Value of a field in the current display unit
    pub fn display_value(&self, field: Field) -> f64 {
        let value = self.canonical_value(field);
        if field.is_temperature() {
            self.display_unit.from_celsius(value)
        } else {
            value
        }
    }

    /// Store a value given in the display unit, clamped into bounds.
    ///
    /// Returns the stored canonical value. Non-finite input is ignored.
    pub fn apply(&mut self, field: Field, display_value: f64, bounds: &SliderBounds) -> f64 {
        if !display_value.is_finite() {
            return self.canonical_value(field);
        }

        let canonical = if field.is_temperature() {
            self.display_unit.to_celsius(display_value)
        } else {
            display_value
        };
        let clamped = bounds.spec(field).clamp(canonical);

        match field {
            Field::InitialLength => self.initial_length_m = clamped,
            Field::InitialTemp => self.initial_temp_c = clamped,
            Field::FinalTemp => self.final_temp_c = clamped,
        }
        clamped
    }

    /// Parse a typed value (display unit) and apply it.
    ///
    /// Accepts a comma as decimal separator. Unparsable text reverts to the
    /// current value. Text equal to the rendered value is a no-op, so
    /// committing an untouched box never shifts the stored value by rounding.
    pub fn apply_text(&mut self, field: Field, input: &str, bounds: &SliderBounds) -> f64 {
        let input = input.trim();
        if input == self.display_text(field) {
            return self.canonical_value(field);
        }
        match input.replace(',', ".").parse::<f64>() {
            Ok(value) => self.apply(field, value, bounds),
            Err(_) => self.canonical_value(field),
        }
    }

    /// Display value with the field's precision and unit (e.g. `293.1 K`)
    pub fn format_display(&self, field: Field) -> String {
        format!(
            "{:.*} {}",
            field.precision(),
            self.display_value(field),
            field.unit_symbol(self.display_unit)
        )
    }

    /// Display value with the field's precision, without unit (edit buffers)
    pub fn display_text(&self, field: Field) -> String {
        format!("{:.*}", field.precision(), self.display_value(field))
    }
}

impl Default for ExperimentState {
    fn default() -> Self {
        ExperimentState::new(&SliderBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ExperimentState::default();
        assert_eq!(state.material_key, "steel");
        assert_eq!(state.initial_length_m, 50.0);
        assert_eq!(state.initial_temp_c, 20.0);
        assert_eq!(state.final_temp_c, 120.0);
        assert_eq!(state.display_unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn test_defaults_clamped_into_narrow_bounds() {
        let bounds = SliderBounds {
            final_temp_c: SliderSpec::new(0.0, 100.0, 1.0),
            ..SliderBounds::default()
        };
        let state = ExperimentState::new(&bounds);
        assert_eq!(state.final_temp_c, 100.0);
    }

    #[test]
    fn test_apply_clamps_to_bounds() {
        let bounds = SliderBounds::default();
        let mut state = ExperimentState::default();

        assert_eq!(state.apply(Field::InitialTemp, 80.0, &bounds), 50.0);
        assert_eq!(state.apply(Field::FinalTemp, -400.0, &bounds), -50.0);
        assert_eq!(state.apply(Field::InitialLength, 0.0, &bounds), 1.0);
        assert_eq!(state.initial_length_m, 1.0);
    }

    #[test]
    fn test_apply_ignores_non_finite() {
        let bounds = SliderBounds::default();
        let mut state = ExperimentState::default();
        state.apply(Field::InitialLength, f64::NAN, &bounds);
        state.apply(Field::FinalTemp, f64::INFINITY, &bounds);
        assert_eq!(state, ExperimentState::default());
    }

    #[test]
    fn test_apply_in_kelvin_stores_celsius() {
        let bounds = SliderBounds::default();
        let mut state = ExperimentState::default();
        state.set_display_unit(TemperatureUnit::Kelvin);

        let stored = state.apply(Field::FinalTemp, 373.15, &bounds);
        assert!((stored - 100.0).abs() < 1e-9);
        assert!((state.display_value(Field::FinalTemp) - 373.15).abs() < 1e-9);
    }

    #[test]
    fn test_toggling_unit_keeps_stored_values() {
        let mut state = ExperimentState::default();
        state.initial_temp_c = 19.7;
        state.final_temp_c = 123.456;
        let before = state.clone();

        state.set_display_unit(TemperatureUnit::Kelvin);
        let _ = state.display_value(Field::InitialTemp);
        state.set_display_unit(TemperatureUnit::Celsius);

        assert_eq!(state.initial_temp_c.to_bits(), before.initial_temp_c.to_bits());
        assert_eq!(state.final_temp_c.to_bits(), before.final_temp_c.to_bits());
    }

    #[test]
    fn test_display_range_follows_unit() {
        let bounds = SliderBounds::default();
        let (lo, hi) = bounds.display_range(Field::InitialTemp, TemperatureUnit::Kelvin);
        assert!((lo - 223.15).abs() < 1e-9);
        assert!((hi - 323.15).abs() < 1e-9);
        assert_eq!(
            bounds.display_range(Field::InitialLength, TemperatureUnit::Kelvin),
            (1.0, 100.0)
        );
    }

    #[test]
    fn test_apply_text() {
        let bounds = SliderBounds::default();
        let mut state = ExperimentState::default();

        assert_eq!(state.apply_text(Field::InitialLength, " 12,5 ", &bounds), 12.5);
        assert_eq!(state.apply_text(Field::InitialLength, "doce", &bounds), 12.5);
        assert_eq!(state.apply_text(Field::InitialLength, "", &bounds), 12.5);
        assert_eq!(state.apply_text(Field::InitialLength, "1e9", &bounds), 100.0);
    }

    #[test]
    fn test_apply_text_unchanged_kelvin_text_keeps_celsius() {
        let bounds = SliderBounds::default();
        let mut state = ExperimentState::default();
        state.set_display_unit(TemperatureUnit::Kelvin);

        let shown = state.display_text(Field::InitialTemp);
        assert_eq!(shown, "293.1");
        assert_eq!(state.apply_text(Field::InitialTemp, &shown, &bounds), 20.0);
        assert_eq!(state.initial_temp_c.to_bits(), 20.0f64.to_bits());

        // An explicit edit still goes through
        state.apply_text(Field::InitialTemp, "300", &bounds);
        assert!((state.initial_temp_c - 26.85).abs() < 1e-9);
    }

    #[test]
    fn test_set_material() {
        let catalog = MaterialCatalog::builtin();
        let mut state = ExperimentState::default();

        state.set_material("Copper", catalog).unwrap();
        assert_eq!(state.material_key, "copper");

        assert!(state.set_material("lead", catalog).is_err());
        assert_eq!(state.material_key, "copper");
    }

    #[test]
    fn test_format_display() {
        let mut state = ExperimentState::default();
        assert_eq!(state.format_display(Field::InitialLength), "50.00 m");
        assert_eq!(state.format_display(Field::InitialTemp), "20.0 °C");
        state.set_display_unit(TemperatureUnit::Kelvin);
        assert_eq!(state.format_display(Field::InitialTemp), "293.1 K");
        assert_eq!(state.display_text(Field::FinalTemp), "393.1");
    }

    #[test]
    fn test_bounds_validation() {
        assert!(SliderBounds::default().validate().is_ok());

        let inverted = SliderBounds {
            initial_temp_c: SliderSpec::new(50.0, -50.0, 0.1),
            ..SliderBounds::default()
        };
        assert!(inverted.validate().is_err());

        let zero_length = SliderBounds {
            initial_length_m: SliderSpec::new(0.0, 10.0, 0.1),
            ..SliderBounds::default()
        };
        assert!(zero_length.validate().is_err());

        let bad_step = SliderBounds {
            final_temp_c: SliderSpec::new(0.0, 10.0, 0.0),
            ..SliderBounds::default()
        };
        assert!(bad_step.validate().is_err());
    }
}
