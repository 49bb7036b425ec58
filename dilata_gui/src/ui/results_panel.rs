//! Results Panel (Right Side)
//!
//! ΔT, ΔL and the final length, or the error that prevented computing them.

use iced::widget::{column, container, row, text, Column, Space};
use iced::{Alignment, Element, Length};

use dilata_core::calculations::{DerivedResult, TemperatureTrend};

use crate::{App, Message};

pub fn view(app: &App) -> Element<'_, Message> {
    let content: Column<'_, Message> = if let Some(ref error) = app.error_message {
        column![
            text("Error").size(14),
            Space::new().height(8),
            text(error).size(12).color([0.8, 0.2, 0.2]),
        ]
    } else if let Some(ref derived) = app.derived {
        view_results(derived, TemperatureTrend::from_state(&app.experiment))
    } else {
        column![text("Sin resultados").size(12)]
    };

    container(content.padding(8))
        .width(Length::FillPortion(2))
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn view_results<'a>(derived: &DerivedResult, trend: TemperatureTrend) -> Column<'a, Message> {
    let change_color = if derived.is_expansion() {
        [0.85, 0.35, 0.2]
    } else if derived.is_contraction() {
        [0.2, 0.5, 0.85]
    } else {
        [0.5, 0.5, 0.5]
    };

    column![
        text("Resultados").size(14),
        Space::new().height(8),
        result_row("Cambio de Temperatura (ΔT)", format!("{:.2} °C", derived.delta_t_c)),
        result_row("Cambio de Longitud (ΔL)", format!("{:.5} m", derived.delta_l_m)),
        result_row("Longitud Final (L)", format!("{:.5} m", derived.final_length_m)),
        Space::new().height(8),
        text(format!(
            "{} · variación relativa {:.4} %",
            trend.label(),
            derived.relative_change() * 100.0
        ))
        .size(11)
        .color(change_color),
    ]
    .spacing(4)
}

fn result_row<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![
        text(label).size(12).width(Length::Fill),
        text(value).size(13),
    ]
    .align_y(Alignment::Center)
    .into()
}
