//! # Dilata CLI Application
//!
//! Line-prompt front end for the linear expansion lab. Reads the material,
//! length and temperatures (empty input keeps the default), prints the
//! results and their JSON, then optionally asks the explanation service
//! one question.
//!
//! Temperatures are typed in the chosen display unit and clamped to the
//! slider bounds exactly as the GUI does.

use std::io::{self, BufRead, Write};

use serde_json::json;

use dilata_core::calculations::{compute, DerivedResult, TemperatureTrend};
use dilata_core::config::AppConfig;
use dilata_core::errors::LabError;
use dilata_core::experiment::{ExperimentState, Field};
use dilata_core::explanation::{build_request, ExplanationService, GeminiClient, DEFAULT_QUESTION};
use dilata_core::units::TemperatureUnit;

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_string(prompt: &str, default: &str) -> String {
    match read_line(prompt) {
        Some(input) if !input.is_empty() => input,
        _ => default.to_string(),
    }
}

/// Apply a typed value to `field`; empty or invalid input keeps the current one
fn prompt_field(state: &mut ExperimentState, field: Field, config: &AppConfig) {
    let (min, max) = config.sliders.display_range(field, state.display_unit);
    let prompt = format!(
        "{} [{}] ({:.1} a {:.1}): ",
        field.label(),
        state.format_display(field),
        min,
        max
    );
    if let Some(input) = read_line(&prompt) {
        if !input.is_empty() {
            state.apply_text(field, &input, &config.sliders);
        }
    }
}

fn print_error(e: &LabError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn print_report(state: &ExperimentState, derived: &DerivedResult, config: &AppConfig) {
    let material_name = config
        .catalog
        .lookup(&state.material_key)
        .map(|m| format!("{} (α = {} /°C)", m.name, m.coefficient_label()))
        .unwrap_or_else(|_| state.material_key.clone());

    println!("═══════════════════════════════════════");
    println!("  DILATACIÓN LINEAL");
    println!("═══════════════════════════════════════");
    println!();
    println!("Entrada:");
    println!("  Material: {}", material_name);
    for field in Field::ALL {
        println!("  {}: {}", field.label(), state.format_display(field));
    }
    println!();
    println!("Resultados:");
    println!("  ΔT = {:.2} °C ({})", derived.delta_t_c, TemperatureTrend::from_state(state).label());
    println!("  ΔL = {:.5} m", derived.delta_l_m);
    println!("  L  = {:.5} m", derived.final_length_m);
    println!("  ΔL/L₀ = {:.4} %", derived.relative_change() * 100.0);
    println!("═══════════════════════════════════════");

    println!();
    println!("JSON Output:");
    let output = json!({ "experiment": state, "result": derived });
    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    };

    let client = match GeminiClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    };

    println!("Dilata CLI - Experimento de Dilatación Lineal");
    println!("=============================================");
    println!();
    let keys: Vec<&str> = config.catalog.keys().collect();
    println!("Materiales: {}", keys.join(", "));

    let mut state = ExperimentState::new(&config.sliders);

    let key = prompt_string(
        &format!("Material [{}]: ", state.material_key),
        &state.material_key,
    );
    if let Err(e) = state.set_material(&key, &config.catalog) {
        eprintln!("{} (se mantiene '{}')", e, state.material_key);
    }

    let unit_input = prompt_string("Unidad de temperatura (C/K) [C]: ", "C");
    if unit_input.eq_ignore_ascii_case("k") {
        state.set_display_unit(TemperatureUnit::Kelvin);
    }

    for field in Field::ALL {
        prompt_field(&mut state, field, &config);
    }
    println!();

    let derived = match compute(&state, &config.catalog) {
        Ok(derived) => derived,
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    };
    print_report(&state, &derived, &config);

    println!();
    let question = match read_line(&format!(
        "Pregunta para la IA (vacío para salir, '?' para \"{}\"): ",
        DEFAULT_QUESTION
    )) {
        Some(q) if q == "?" => DEFAULT_QUESTION.to_string(),
        Some(q) if !q.is_empty() => q,
        _ => return,
    };

    let request = match build_request(
        &state,
        &derived,
        &config.catalog,
        &question,
        &config.explanation.system_instruction,
    ) {
        Ok(request) => request,
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    };

    println!("Consultando a {}...", config.explanation.model);
    match client.generate_explanation(request).await {
        Ok(answer) => {
            println!();
            println!("{}", answer);
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
