//! Explanation Panel
//!
//! Question box, the ask button and whatever the latest request produced.

use iced::widget::{button, column, container, row, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use dilata_core::explanation::ExplanationStatus;

use crate::{App, Message};

pub fn view(app: &App) -> Element<'_, Message> {
    // Asking while a request is pending supersedes it
    let pending = app.explanation.is_pending();
    let ask_label = if pending { "Preguntar de nuevo" } else { "Preguntar a la IA" };

    let mut ask_button = button(text(ask_label).size(12))
        .padding(Padding::from([6, 12]))
        .style(button::primary);
    if app.can_ask() {
        ask_button = ask_button.on_press(Message::AskExplanation);
    }

    let mut question_input = text_input("Escribe tu pregunta...", &app.question)
        .on_input(Message::QuestionChanged)
        .width(Length::Fill)
        .padding(6)
        .size(12);
    if app.can_ask() {
        question_input = question_input.on_submit(Message::AskExplanation);
    }

    let content: Column<'_, Message> = column![
        text("Pregúntale a la IA").size(14),
        Space::new().height(6),
        row![question_input, ask_button]
            .spacing(8)
            .align_y(Alignment::Center),
        Space::new().height(10),
        view_status(app.explanation.status()),
    ];

    container(content.padding(8))
        .width(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn view_status(status: &ExplanationStatus) -> Element<'_, Message> {
    match status {
        ExplanationStatus::Idle => text("Ajusta el experimento y haz una pregunta.")
            .size(12)
            .color([0.5, 0.5, 0.5])
            .into(),
        ExplanationStatus::Pending => text("La IA está pensando...").size(12).into(),
        ExplanationStatus::Ready(answer) => text(answer).size(13).into(),
        ExplanationStatus::Failed(message) => {
            text(message).size(12).color([0.8, 0.2, 0.2]).into()
        }
    }
}
