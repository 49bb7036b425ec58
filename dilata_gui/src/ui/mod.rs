//! UI module for the Dilata GUI
//!
//! # Panel Structure
//! - `header` - Title and theme toggle
//! - `controls_panel` - Material, length and temperatures, display unit
//! - `results_panel` - ΔT, ΔL and final length
//! - `visualizer` - Canvas with the exaggerated bar and thermometer
//! - `explanation_panel` - Question box and the model's answer
//! - `status_bar` - Bottom status messages

pub mod header;
pub mod controls_panel;
pub mod results_panel;
pub mod visualizer;
pub mod explanation_panel;
pub mod status_bar;
