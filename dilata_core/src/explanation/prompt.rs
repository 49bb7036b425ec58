//! Prompt text for explanation requests.
//!
//! Number formats are fixed so the same experiment always produces the same
//! prompt:
//!
//! | Value          | Format                    | Example     |
//! |----------------|---------------------------|-------------|
//! | α              | scientific, 2 decimals    | `1.20e-5`   |
//! | L₀, T₀, T_f, ΔT| fixed, 2 decimals         | `50.00`     |
//! | ΔL             | scientific, 4 decimals    | `6.0000e-2` |
//! | L              | fixed, 5 decimals         | `50.06000`  |
//!
//! Temperatures are always written in °C, whatever the display unit.

use crate::calculations::expansion::DerivedResult;
use crate::errors::{LabError, LabResult};
use crate::experiment::ExperimentState;
use crate::explanation::ExplanationRequest;
use crate::materials::MaterialCatalog;

/// Question pre-filled in the question field
pub const DEFAULT_QUESTION: &str = "¿Por qué este material se expande con el calor?";

/// Format the experiment context and the student's question.
///
/// Fails with `InvalidInput` for a blank question and `MaterialNotFound`
/// for an unknown material.
pub fn build_prompt(
    state: &ExperimentState,
    derived: &DerivedResult,
    catalog: &MaterialCatalog,
    question: &str,
) -> LabResult<String> {
    let question = question.trim();
    if question.is_empty() {
        return Err(LabError::invalid_input(
            "question",
            "",
            "Escribe una pregunta antes de pedir la explicación.",
        ));
    }

    let material = catalog.lookup(&state.material_key)?;

    Ok(format!(
        "Contexto del experimento de simulación de dilatación lineal:\n\
         - Material: {name}\n\
         - Coeficiente de dilatación (α): {alpha:.2e} /°C\n\
         - Longitud Inicial (L₀): {l0:.2} metros\n\
         - Temperatura Inicial (T₀): {t0:.2} °C\n\
         - Temperatura Final (T_f): {tf:.2} °C\n\
         - Cambio de Temperatura (ΔT): {dt:.2} °C\n\
         - Cambio de Longitud calculado (ΔL): {dl:.4e} metros\n\
         - Longitud Final (L): {lf:.5} metros\n\
         \n\
         Mi pregunta es: \"{question}\"\n\
         \n\
         Basado en el contexto anterior, por favor responde a mi pregunta.",
        name = material.name,
        alpha = material.coefficient_per_c,
        l0 = state.initial_length_m,
        t0 = state.initial_temp_c,
        tf = state.final_temp_c,
        dt = derived.delta_t_c,
        dl = derived.delta_l_m,
        lf = derived.final_length_m,
        question = question,
    ))
}

/// Build the full request: prompt plus system instruction
pub fn build_request(
    state: &ExperimentState,
    derived: &DerivedResult,
    catalog: &MaterialCatalog,
    question: &str,
    system_instruction: &str,
) -> LabResult<ExplanationRequest> {
    let prompt = build_prompt(state, derived, catalog, question)?;
    Ok(ExplanationRequest::new(prompt, system_instruction))
}
