//! Status Bar (Bottom)
//!
//! Displays the latest status message and a pending-request indicator.

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use crate::Message;

/// Render the status bar
pub fn view_status_bar(status: &str, waiting: bool) -> Element<'_, Message> {
    let waiting_info = if waiting { "Esperando respuesta de la IA..." } else { "" };

    row![
        text(waiting_info).size(10).color([0.6, 0.3, 0.0]),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 8]))
    .into()
}
