//! # Unit Types
//!
//! Temperature wrappers and the Celsius/Kelvin display toggle.
//!
//! The experiment always stores temperatures in degrees Celsius. Kelvin is a
//! display unit only: values are converted on the way to the screen and back
//! on the way in. Temperature *differences* are the same number in both units.
//!
//! ## Example
//!
//! ```rust
//! use dilata_core::units::{Celsius, Kelvin, TemperatureUnit};
//!
//! let room = Celsius(20.0);
//! let room_k: Kelvin = room.into();
//! assert!((room_k.0 - 293.15).abs() < 1e-9);
//!
//! assert_eq!(TemperatureUnit::Kelvin.symbol(), "K");
//! ```

use serde::{Deserialize, Serialize};

/// Offset between the Celsius and Kelvin scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Convert degrees Celsius to kelvin
pub fn to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

/// Convert kelvin to degrees Celsius
pub fn to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(to_kelvin(c.0))
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(to_celsius(k.0))
    }
}

// ============================================================================
// Display Unit
// ============================================================================

/// Unit used to render and edit temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Kelvin,
}

impl TemperatureUnit {
    /// All display units for UI selection
    pub const ALL: [TemperatureUnit; 2] = [TemperatureUnit::Celsius, TemperatureUnit::Kelvin];

    /// Unit symbol shown next to values
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Kelvin => "K",
        }
    }

    /// Express a canonical Celsius value in this unit
    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Kelvin => to_kelvin(celsius),
        }
    }

    /// Interpret a value typed in this unit as canonical Celsius
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Kelvin => to_celsius(value),
        }
    }

    /// The other unit
    pub fn toggled(&self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Kelvin,
            TemperatureUnit::Kelvin => TemperatureUnit::Celsius,
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
