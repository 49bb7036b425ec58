//! # dilata_core - Linear Thermal Expansion Lab
//!
//! `dilata_core` is the model behind the Dilata GUI and CLI: a material
//! catalog, Celsius/Kelvin display conversion, the experiment inputs with
//! slider clamping, the ΔL = α·L₀·ΔT calculator, and explanation requests
//! to a language model.
//!
//! ## Design Philosophy
//!
//! - **Pure calculations**: derived values are recomputed after every edit
//! - **Celsius inside**: Kelvin only exists on screen
//! - **Explicit collaborators**: the explanation service and its credential
//!   are passed in, never read from globals
//!
//! ## Quick Start
//!
//! ```rust
//! use dilata_core::calculations::compute;
//! use dilata_core::experiment::{ExperimentState, Field, SliderBounds};
//! use dilata_core::materials::MaterialCatalog;
//!
//! let bounds = SliderBounds::default();
//! let catalog = MaterialCatalog::builtin();
//! let mut state = ExperimentState::new(&bounds);
//!
//! state.set_material("copper", catalog).unwrap();
//! state.apply(Field::InitialLength, 2.0, &bounds);
//! state.apply(Field::InitialTemp, 100.0, &bounds); // clamped to 50 °C
//!
//! let result = compute(&state, catalog).unwrap();
//! assert_eq!(result.final_length_m, state.initial_length_m + result.delta_l_m);
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Material catalog
//! - [`units`] - Temperature units and conversion
//! - [`experiment`] - Experiment inputs and slider bounds
//! - [`calculations`] - Expansion calculator and bar geometry
//! - [`explanation`] - Prompt builder, explanation service, response ordering
//! - [`config`] - Startup configuration
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod experiment;
pub mod explanation;
pub mod materials;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute, DerivedResult};
pub use config::{ApiKey, AppConfig, FileConfig};
pub use errors::{LabError, LabResult};
pub use experiment::{ExperimentState, Field, SliderBounds, SliderSpec};
pub use explanation::{ExplanationRequest, ExplanationService, ExplanationSlot, ExplanationStatus};
pub use materials::{Material, MaterialCatalog};
pub use units::TemperatureUnit;
