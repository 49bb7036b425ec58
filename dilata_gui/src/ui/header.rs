//! Header
//!
//! Title and the dark/light theme toggle.

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::Message;

/// Render the application header
pub fn view_header(dark_mode: bool) -> Element<'static, Message> {
    let theme_label = if dark_mode { "Modo Claro" } else { "Modo Oscuro" };

    row![
        text("Experimento de Dilatación Lineal").size(26),
        Space::new().width(Length::Fill),
        button(text(theme_label).size(11))
            .on_press(Message::ToggleDarkMode)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
    ]
    .align_y(Alignment::Center)
    .into()
}
