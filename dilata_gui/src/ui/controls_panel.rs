//! Controls Panel (Left Side)
//!
//! Material picker, a slider plus an editable value box per input, and the
//! °C/K display toggle. Typed values are applied on Enter.

use iced::widget::{button, column, container, pick_list, row, rule, slider, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use dilata_core::experiment::Field;
use dilata_core::materials::Material;
use dilata_core::units::TemperatureUnit;

use crate::{App, Message};

pub fn view(app: &App) -> Element<'_, Message> {
    let selected: Option<Material> = app
        .config
        .catalog
        .lookup(&app.experiment.material_key)
        .ok()
        .cloned();

    let coefficient_caption = match &selected {
        Some(material) => format!("Coeficiente (α): {} /°C", material.coefficient_label()),
        None => String::new(),
    };

    let mut content: Column<'_, Message> = column![
        text("Material").size(14),
        Space::new().height(4),
        pick_list(app.config.catalog.materials(), selected, |m: Material| {
            Message::MaterialSelected(m.key)
        })
        .width(Length::Fill)
        .text_size(12),
        text(coefficient_caption).size(11).color([0.5, 0.5, 0.5]),
        Space::new().height(8),
        rule::horizontal(1),
        Space::new().height(8),
        view_unit_toggle(app.experiment.display_unit),
    ]
    .spacing(4);

    for field in Field::ALL {
        content = content
            .push(Space::new().height(6))
            .push(view_field(app, field));
    }

    container(content.padding(8))
        .width(Length::FillPortion(3))
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn view_unit_toggle(current: TemperatureUnit) -> Element<'static, Message> {
    let mut buttons = row![text("Unidad de temperatura:").size(11)]
        .spacing(4)
        .align_y(Alignment::Center);

    for unit in TemperatureUnit::ALL {
        buttons = buttons.push(
            button(text(unit.symbol()).size(11))
                .on_press(Message::DisplayUnitSelected(unit))
                .padding(Padding::from([2, 10]))
                .style(if unit == current { button::primary } else { button::secondary }),
        );
    }

    buttons.into()
}

/// Label, slider and value box for one input
fn view_field(app: &App, field: Field) -> Column<'_, Message> {
    let unit = app.experiment.display_unit;
    let (min, max) = app.config.sliders.display_range(field, unit);
    let step = app.config.sliders.spec(field).step;

    column![
        row![
            text(field.label()).size(12),
            Space::new().width(Length::Fill),
            text(app.experiment.format_display(field)).size(12),
        ],
        row![
            slider(min..=max, app.experiment.display_value(field), move |v| {
                Message::SliderChanged(field, v)
            })
            .step(step)
            .width(Length::Fill),
            Space::new().width(8),
            text_input("", app.field_text(field))
                .on_input(move |s| Message::FieldTextChanged(field, s))
                .on_submit(Message::FieldTextSubmitted(field))
                .width(Length::Fixed(80.0))
                .padding(4)
                .size(11),
            text(field.unit_symbol(unit)).size(11).width(Length::Fixed(24.0)),
        ]
        .spacing(4)
        .align_y(Alignment::Center),
    ]
    .spacing(2)
}
