//! Properties of the expansion model over the whole catalog.

use dilata_core::calculations::compute;
use dilata_core::experiment::{ExperimentState, Field, SliderBounds};
use dilata_core::materials::MaterialCatalog;
use dilata_core::units::{to_celsius, to_kelvin, TemperatureUnit};

const LENGTHS_M: [f64; 6] = [1.0, 2.0, 10.0, 37.3, 50.0, 100.0];
const TEMPS_C: [f64; 7] = [-50.0, -12.5, 0.0, 20.0, 49.9, 120.0, 250.0];

fn state(material: &str, length_m: f64, t0: f64, tf: f64) -> ExperimentState {
    ExperimentState {
        material_key: material.to_string(),
        initial_length_m: length_m,
        initial_temp_c: t0,
        final_temp_c: tf,
        display_unit: TemperatureUnit::Celsius,
    }
}

#[test]
fn zero_delta_t_means_no_change() {
    let catalog = MaterialCatalog::builtin();
    for material in catalog.keys() {
        for &length in &LENGTHS_M {
            for &t in &TEMPS_C {
                let result = compute(&state(material, length, t, t), catalog).unwrap();
                assert_eq!(result.delta_l_m, 0.0, "{} {} {}", material, length, t);
                assert_eq!(result.final_length_m, length, "{} {} {}", material, length, t);
            }
        }
    }
}

#[test]
fn final_length_is_initial_plus_delta() {
    let catalog = MaterialCatalog::builtin();
    for material in catalog.keys() {
        for &length in &LENGTHS_M {
            for &t0 in &TEMPS_C {
                for &tf in &TEMPS_C {
                    let result = compute(&state(material, length, t0, tf), catalog).unwrap();
                    assert_eq!(result.final_length_m, length + result.delta_l_m);
                }
            }
        }
    }
}

#[test]
fn sign_of_delta_l_follows_temperature() {
    let catalog = MaterialCatalog::builtin();
    for material in catalog.keys() {
        for &t0 in &TEMPS_C {
            for &tf in &TEMPS_C {
                let result = compute(&state(material, 50.0, t0, tf), catalog).unwrap();
                assert_eq!(result.delta_l_m > 0.0, tf > t0, "{} {} -> {}", material, t0, tf);
                assert_eq!(result.delta_l_m < 0.0, tf < t0, "{} {} -> {}", material, t0, tf);
            }
        }
    }
}

#[test]
fn kelvin_round_trip() {
    for &x in &TEMPS_C {
        assert!((to_celsius(to_kelvin(x)) - x).abs() < 1e-9);
    }
}

#[test]
fn unit_toggle_preserves_state_bit_for_bit() {
    let bounds = SliderBounds::default();
    let mut s = ExperimentState::new(&bounds);
    s.apply(Field::InitialTemp, -7.3, &bounds);
    s.apply(Field::FinalTemp, 181.9, &bounds);
    let before = s.clone();

    for _ in 0..4 {
        let unit = s.display_unit.toggled();
        s.set_display_unit(unit);
        // Rendering in the new unit must not write anything back
        let _ = s.format_display(Field::InitialTemp);
        let _ = s.display_value(Field::FinalTemp);
    }

    assert_eq!(s.display_unit, TemperatureUnit::Celsius);
    assert_eq!(s.initial_temp_c.to_bits(), before.initial_temp_c.to_bits());
    assert_eq!(s.final_temp_c.to_bits(), before.final_temp_c.to_bits());
    assert_eq!(s.initial_length_m.to_bits(), before.initial_length_m.to_bits());
}

#[test]
fn scenario_steel_heating() {
    let result = compute(&state("steel", 50.0, 20.0, 120.0), MaterialCatalog::builtin()).unwrap();
    assert_eq!(result.delta_t_c, 100.0);
    assert!((result.delta_l_m - 0.06).abs() < 1e-12);
    assert!((result.final_length_m - 50.06).abs() < 1e-12);
}

#[test]
fn scenario_diamond_constant_temperature() {
    let result = compute(&state("diamond", 10.0, 0.0, 0.0), MaterialCatalog::builtin()).unwrap();
    assert_eq!(result.delta_l_m, 0.0);
    assert_eq!(result.final_length_m, 10.0);
}

#[test]
fn scenario_copper_cooling() {
    let result = compute(&state("copper", 2.0, 100.0, 20.0), MaterialCatalog::builtin()).unwrap();
    assert_eq!(result.delta_t_c, -80.0);
    assert!((result.delta_l_m - (-0.00264)).abs() < 1e-12);
    assert!((result.final_length_m - 1.99736).abs() < 1e-12);
}

#[test]
fn edits_in_kelvin_are_clamped_in_celsius() {
    let bounds = SliderBounds::default();
    let mut s = ExperimentState::new(&bounds);
    s.set_display_unit(TemperatureUnit::Kelvin);

    // 0 K is far below the -50 °C slider minimum
    assert_eq!(s.apply(Field::InitialTemp, 0.0, &bounds), -50.0);
    let (min_k, _) = bounds.display_range(Field::InitialTemp, TemperatureUnit::Kelvin);
    assert!((s.display_value(Field::InitialTemp) - min_k).abs() < 1e-9);
}
