//! # Calculations
//!
//! Everything derived from an [`ExperimentState`](crate::experiment::ExperimentState).
//! Each function is pure and cheap, so callers recompute after every edit
//! instead of caching.
//!
//! - [`expansion`] - ΔT, ΔL and final length (ΔL = α·L₀·ΔT)
//! - [`visual`] - Geometry for the proportional length bar and thermometer

pub mod expansion;
pub mod visual;

pub use expansion::{compute, DerivedResult};
pub use visual::{thermometer_fill, BarGeometry, TemperatureTrend, VISUAL_EXAGGERATION};
