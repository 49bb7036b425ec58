//! Canvas drawing for the expansion bar and thermometer
//!
//! The bar is split into the unchanged part, the highlighted ΔL segment
//! and a marker at the original end. The thermometer to the right fills
//! up for heating and down for cooling.

use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::widget::{column, container, text};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use dilata_core::calculations::{thermometer_fill, BarGeometry, TemperatureTrend, VISUAL_EXAGGERATION};
use dilata_core::calculations::visual::ORIGINAL_END;

use crate::{App, Message};

const THERMOMETER_WIDTH: f32 = 70.0;

/// Data needed to draw one frame
pub struct ExpansionView {
    geometry: BarGeometry,
    trend: TemperatureTrend,
    /// In `[-1, 1]`
    fill: f64,
    delta_l_label: String,
    delta_t_label: String,
}

impl canvas::Program<Message> for ExpansionView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let text_color = theme.extended_palette().background.base.text;

        let margin = 20.0;
        let track_x = margin;
        let track_width = (bounds.width - 2.0 * margin - THERMOMETER_WIDTH).max(10.0);
        let bar_y = bounds.height * 0.45;
        let bar_height = 26.0;

        self.draw_bar(&mut frame, track_x, bar_y, track_width, bar_height, text_color);

        // Formula
        frame.fill_text(Text {
            content: "ΔL = α · L₀ · ΔT".to_string(),
            position: Point::new(track_x, 8.0),
            color: text_color,
            size: iced::Pixels(14.0),
            ..Text::default()
        });
        frame.fill_text(Text {
            content: format!(
                "ΔT = {}   ΔL = {}   (escala visual x{})",
                self.delta_t_label, self.delta_l_label, VISUAL_EXAGGERATION
            ),
            position: Point::new(track_x, bounds.height - 22.0),
            color: Color::from_rgb(0.5, 0.5, 0.5),
            size: iced::Pixels(11.0),
            ..Text::default()
        });

        let thermo_x = bounds.width - margin - THERMOMETER_WIDTH / 2.0;
        self.draw_thermometer(&mut frame, thermo_x, 10.0, bounds.height - 20.0, text_color);

        vec![frame.into_geometry()]
    }
}

impl ExpansionView {
    pub fn new(
        geometry: BarGeometry,
        trend: TemperatureTrend,
        fill: f64,
        delta_l_label: String,
        delta_t_label: String,
    ) -> Self {
        Self { geometry, trend, fill, delta_l_label, delta_t_label }
    }

    fn draw_bar(&self, frame: &mut Frame, x: f32, y: f32, width: f32, height: f32, text_color: Color) {
        let base_color = Color::from_rgb(0.55, 0.58, 0.62);
        let change_color = if self.geometry.expanding {
            Color::from_rgb(0.9, 0.4, 0.2)
        } else {
            Color::from_rgb(0.2, 0.5, 0.9)
        };

        let to_x = |fraction: f64| x + fraction as f32 * width;

        // Unchanged part of the bar
        let base = Path::rectangle(
            Point::new(x, y),
            Size::new(to_x(self.geometry.base_end) - x, height),
        );
        frame.fill(&base, base_color);

        // ΔL segment, drawn lighter when the bar shrank
        let change_width = self.geometry.change_width() as f32 * width;
        if change_width > 0.0 {
            let change = Path::rectangle(
                Point::new(to_x(self.geometry.change_start), y),
                Size::new(change_width, height),
            );
            if self.geometry.expanding {
                frame.fill(&change, change_color);
            } else {
                frame.stroke(&change, Stroke::default().with_color(change_color).with_width(2.0));
            }
        }

        // Original end marker
        let marker_x = to_x(ORIGINAL_END);
        let marker = Path::line(
            Point::new(marker_x, y - 14.0),
            Point::new(marker_x, y + height + 14.0),
        );
        frame.stroke(&marker, Stroke::default().with_color(text_color).with_width(1.0));
        frame.fill_text(Text {
            content: "Punto Original".to_string(),
            position: Point::new(marker_x, y + height + 16.0),
            color: text_color,
            size: iced::Pixels(11.0),
            align_x: iced::alignment::Horizontal::Center.into(),
            ..Text::default()
        });

        // Final end marker
        let final_x = to_x(self.geometry.final_end);
        let final_marker = Path::line(
            Point::new(final_x, y - 8.0),
            Point::new(final_x, y + height + 8.0),
        );
        frame.stroke(&final_marker, Stroke::default().with_color(change_color).with_width(2.0));
        frame.fill_text(Text {
            content: "L".to_string(),
            position: Point::new(final_x, y - 26.0),
            color: change_color,
            size: iced::Pixels(12.0),
            align_x: iced::alignment::Horizontal::Center.into(),
            ..Text::default()
        });
    }

    fn draw_thermometer(&self, frame: &mut Frame, center_x: f32, top: f32, height: f32, text_color: Color) {
        let tube_width = 14.0;
        let tube_height = (height - 20.0).max(10.0);
        let zero_y = top + tube_height / 2.0;

        let tube = Path::rectangle(
            Point::new(center_x - tube_width / 2.0, top),
            Size::new(tube_width, tube_height),
        );
        frame.stroke(&tube, Stroke::default().with_color(text_color).with_width(1.0));

        let fill_height = (self.fill.abs() as f32) * tube_height / 2.0;
        if fill_height > 0.0 {
            let (fill_top, color) = if self.fill > 0.0 {
                (zero_y - fill_height, Color::from_rgb(0.9, 0.25, 0.2))
            } else {
                (zero_y, Color::from_rgb(0.2, 0.45, 0.9))
            };
            let mercury = Path::rectangle(
                Point::new(center_x - tube_width / 2.0 + 2.0, fill_top),
                Size::new(tube_width - 4.0, fill_height),
            );
            frame.fill(&mercury, color);
        }

        let zero_line = Path::line(
            Point::new(center_x - tube_width, zero_y),
            Point::new(center_x + tube_width, zero_y),
        );
        frame.stroke(&zero_line, Stroke::default().with_color(text_color).with_width(1.0));

        frame.fill_text(Text {
            content: self.trend.label().to_string(),
            position: Point::new(center_x, top + tube_height + 4.0),
            color: text_color,
            size: iced::Pixels(10.0),
            align_x: iced::alignment::Horizontal::Center.into(),
            ..Text::default()
        });
    }
}

pub fn view(app: &App) -> Element<'_, Message> {
    let Some(derived) = app.derived else {
        return container(text("Sin visualización").size(12))
            .padding(8)
            .width(Length::Fill)
            .style(container::bordered_box)
            .into();
    };

    let program = ExpansionView::new(
        BarGeometry::from_result(&app.experiment, &derived),
        TemperatureTrend::from_state(&app.experiment),
        thermometer_fill(&app.experiment, &app.config.sliders),
        format!("{:.5} m", derived.delta_l_m),
        format!("{:.2} °C", derived.delta_t_c),
    );

    let canvas_widget: Element<'_, Message> = Canvas::new(program)
        .width(Length::Fill)
        .height(Length::Fixed(200.0))
        .into();

    container(column![text("Visualización").size(14), canvas_widget].spacing(6).padding(8))
        .width(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}
