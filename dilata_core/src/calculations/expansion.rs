//! # Linear Expansion
//!
//! ΔL = α · L₀ · ΔT, with ΔT = T_f − T₀ in °C (equal to kelvin differences).
//!
//! ## Example
//!
//! ```rust
//! use dilata_core::calculations::expansion::compute;
//! use dilata_core::experiment::ExperimentState;
//! use dilata_core::materials::MaterialCatalog;
//!
//! // steel, 50 m, 20 °C → 120 °C
//! let state = ExperimentState::default();
//! let result = compute(&state, MaterialCatalog::builtin()).unwrap();
//!
//! assert_eq!(result.delta_t_c, 100.0);
//! assert!((result.delta_l_m - 0.06).abs() < 1e-12);
//! assert!((result.final_length_m - 50.06).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::LabResult;
use crate::experiment::ExperimentState;
use crate::materials::MaterialCatalog;

/// Values derived from the experiment inputs.
///
/// ## JSON Example
///
/// ```json
/// { "initial_length_m": 50.0, "delta_t_c": 100.0, "delta_l_m": 0.06, "final_length_m": 50.06 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedResult {
    /// L₀ the result was computed from (m)
    pub initial_length_m: f64,
    /// Temperature change ΔT = T_f − T₀ (°C, same as K)
    pub delta_t_c: f64,
    /// Length change ΔL (m), negative on contraction
    pub delta_l_m: f64,
    /// Final length L = L₀ + ΔL (m)
    pub final_length_m: f64,
}

impl DerivedResult {
    /// Strain ΔL/L₀
    pub fn relative_change(&self) -> f64 {
        if self.initial_length_m == 0.0 {
            0.0
        } else {
            self.delta_l_m / self.initial_length_m
        }
    }

    pub fn is_expansion(&self) -> bool {
        self.delta_l_m > 0.0
    }

    pub fn is_contraction(&self) -> bool {
        self.delta_l_m < 0.0
    }
}

/// Compute ΔT, ΔL and the final length for the current inputs.
///
/// # Returns
///
/// * `Ok(DerivedResult)` - always, for any key the catalog holds
/// * `Err(LabError::MaterialNotFound)` - if the state names an unknown material
pub fn compute(state: &ExperimentState, catalog: &MaterialCatalog) -> LabResult<DerivedResult> {
    let material = catalog.lookup(&state.material_key)?;

    // Equal temperatures give +0.0 here, so ΔL and L stay exact
    let delta_t_c = state.final_temp_c - state.initial_temp_c;
    let delta_l_m = material.coefficient_per_c * state.initial_length_m * delta_t_c;
    let final_length_m = state.initial_length_m + delta_l_m;

    Ok(DerivedResult {
        initial_length_m: state.initial_length_m,
        delta_t_c,
        delta_l_m,
        final_length_m,
    })
}
