//! # Dilata GUI Application
//!
//! Virtual lab for linear thermal expansion, built with Iced.
//!
//! ## Flow
//!
//! Every input event mutates [`ExperimentState`] and then calls
//! [`App::recompute`] explicitly. Explanation requests run as background
//! tasks; each carries a [`RequestTicket`] and only the latest one is shown.
//!
//! ## Startup
//!
//! The explanation credential (`API_KEY`) is required. Without it the
//! application prints the configuration error and exits with status 1.

mod ui;

use std::sync::Arc;

use iced::task::Handle;
use iced::widget::{column, container, row, scrollable, Space};
use iced::{Element, Length, Task, Theme};

use dilata_core::calculations::{compute, DerivedResult};
use dilata_core::config::AppConfig;
use dilata_core::errors::LabResult;
use dilata_core::experiment::{ExperimentState, Field};
use dilata_core::explanation::{
    build_request, ExplanationService, ExplanationSlot, ExplanationStatus, GeminiClient,
    RequestTicket, DEFAULT_QUESTION,
};
use dilata_core::units::TemperatureUnit;

fn main() -> iced::Result {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let service: Arc<dyn ExplanationService> = match GeminiClient::from_config(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    iced::application(
        move || App::new(config.clone(), Arc::clone(&service)),
        App::update,
        App::view,
    )
    .title(App::title)
    .theme(App::theme)
    .window_size((980.0, 860.0))
    .run()
}

/// Messages produced by the UI and by background tasks
#[derive(Debug, Clone)]
pub enum Message {
    // Experiment inputs
    MaterialSelected(String),
    SliderChanged(Field, f64),
    FieldTextChanged(Field, String),
    FieldTextSubmitted(Field),
    DisplayUnitSelected(TemperatureUnit),

    // Explanation
    QuestionChanged(String),
    AskExplanation,
    ExplanationReceived(RequestTicket, LabResult<String>),

    // Appearance
    ToggleDarkMode,
}

/// Application state
pub struct App {
    pub config: AppConfig,
    service: Arc<dyn ExplanationService>,

    pub experiment: ExperimentState,
    /// Recomputed after every edit
    pub derived: Option<DerivedResult>,
    pub error_message: Option<String>,

    /// Text shown in the editable value boxes, indexed like `Field::ALL`
    pub field_texts: [String; 3],

    pub question: String,
    pub explanation: ExplanationSlot,
    /// Latest request still running; asking again aborts it
    in_flight: Option<(RequestTicket, Handle)>,

    pub status: String,
    pub dark_mode: bool,
}

impl App {
    fn new(config: AppConfig, service: Arc<dyn ExplanationService>) -> Self {
        let experiment = ExperimentState::new(&config.sliders);
        let mut app = App {
            config,
            service,
            experiment,
            derived: None,
            error_message: None,
            field_texts: Default::default(),
            question: DEFAULT_QUESTION.to_string(),
            explanation: ExplanationSlot::new(),
            in_flight: None,
            status: "Listo".to_string(),
            dark_mode: true,
        };
        app.refresh_all_field_text();
        app.recompute();
        app
    }

    fn title(&self) -> String {
        "Dilata - Experimento de Dilatación Lineal".to_string()
    }

    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Recompute derived values from the current inputs
    fn recompute(&mut self) {
        match compute(&self.experiment, &self.config.catalog) {
            Ok(derived) => {
                self.derived = Some(derived);
                self.error_message = None;
            }
            Err(e) => {
                self.derived = None;
                self.error_message = Some(e.to_string());
            }
        }
    }

    pub fn field_text(&self, field: Field) -> &str {
        &self.field_texts[field_index(field)]
    }

    fn refresh_field_text(&mut self, field: Field) {
        self.field_texts[field_index(field)] = self.experiment.display_text(field);
    }

    fn refresh_all_field_text(&mut self) {
        for field in Field::ALL {
            self.refresh_field_text(field);
        }
    }

    /// Status bar text with a local timestamp
    fn set_status(&mut self, message: &str) {
        self.status = format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), message);
    }

    pub fn can_ask(&self) -> bool {
        self.derived.is_some() && !self.question.trim().is_empty()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::MaterialSelected(key) => {
                if let Err(e) = self.experiment.set_material(&key, &self.config.catalog) {
                    self.set_status(&e.to_string());
                }
                self.recompute();
            }
            Message::SliderChanged(field, value) => {
                self.experiment.apply(field, value, &self.config.sliders);
                self.refresh_field_text(field);
                self.recompute();
            }
            Message::FieldTextChanged(field, text) => {
                self.field_texts[field_index(field)] = text;
            }
            Message::FieldTextSubmitted(field) => {
                // Rendered text is rounded; committing it unchanged must not move the value
                let text = self.field_text(field).to_string();
                self.experiment.apply_text(field, &text, &self.config.sliders);
                self.refresh_field_text(field);
                self.recompute();
            }
            Message::DisplayUnitSelected(unit) => {
                self.experiment.set_display_unit(unit);
                self.refresh_all_field_text();
            }
            Message::QuestionChanged(question) => {
                self.question = question;
            }
            Message::AskExplanation => {
                return self.ask_explanation();
            }
            Message::ExplanationReceived(ticket, result) => {
                self.receive_explanation(ticket, result);
            }
            Message::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
            }
        }
        Task::none()
    }

    /// Start a request for the current experiment, superseding any other
    fn ask_explanation(&mut self) -> Task<Message> {
        let Some(derived) = self.derived else {
            return Task::none();
        };

        let request = match build_request(
            &self.experiment,
            &derived,
            &self.config.catalog,
            &self.question,
            &self.config.explanation.system_instruction,
        ) {
            Ok(request) => request,
            Err(e) => {
                self.set_status(&e.user_message());
                return Task::none();
            }
        };

        if let Some((_, previous)) = self.in_flight.take() {
            previous.abort();
        }

        let ticket = self.explanation.begin();
        let (task, handle) = Task::perform(
            self.service.generate_explanation(request),
            move |result| Message::ExplanationReceived(ticket, result),
        )
        .abortable();
        self.in_flight = Some((ticket, handle));
        self.set_status(&format!(
            "Pregunta enviada a {} (#{})",
            self.config.explanation.model,
            ticket.generation()
        ));

        task
    }

    fn receive_explanation(&mut self, ticket: RequestTicket, result: LabResult<String>) {
        if let Err(e) = &result {
            eprintln!("Explanation request #{} failed: {}", ticket.generation(), e);
        }

        if !self.explanation.resolve(ticket, result) {
            self.set_status(&format!("Respuesta #{} descartada (hay una pregunta más reciente)", ticket.generation()));
            return;
        }

        self.in_flight = None;
        match self.explanation.status() {
            ExplanationStatus::Failed(_) => self.set_status("La IA no pudo responder"),
            _ => self.set_status(&format!("Respuesta #{} recibida", ticket.generation())),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let top = row![
            ui::controls_panel::view(self),
            ui::results_panel::view(self),
        ]
        .spacing(12);

        let content = column![
            ui::header::view_header(self.dark_mode),
            Space::new().height(10),
            top,
            Space::new().height(12),
            ui::visualizer::view(self),
            Space::new().height(12),
            ui::explanation_panel::view(self),
        ]
        .padding(16)
        .max_width(960);

        column![
            container(scrollable(content))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill),
            ui::status_bar::view_status_bar(&self.status, self.explanation.is_pending()),
        ]
        .padding(4)
        .into()
    }
}

fn field_index(field: Field) -> usize {
    match field {
        Field::InitialLength => 0,
        Field::InitialTemp => 1,
        Field::FinalTemp => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilata_core::config::FileConfig;
    use dilata_core::explanation::{ExplanationFuture, ExplanationRequest};

    struct SilentService;

    impl ExplanationService for SilentService {
        fn generate_explanation(&self, _request: ExplanationRequest) -> ExplanationFuture {
            Box::pin(async { Ok(String::new()) })
        }
    }

    fn app() -> App {
        let config = AppConfig::from_parts(FileConfig::default(), Some("k".to_string())).unwrap();
        App::new(config, Arc::new(SilentService))
    }

    #[test]
    fn test_starts_with_steel_scenario() {
        let app = app();
        let derived = app.derived.unwrap();
        assert!((derived.delta_l_m - 0.06).abs() < 1e-12);
        assert_eq!(app.field_text(Field::InitialLength), "50.00");
        assert_eq!(app.question, DEFAULT_QUESTION);
    }

    #[test]
    fn test_typed_value_applies_on_submit() {
        let mut app = app();
        let _ = app.update(Message::FieldTextChanged(Field::InitialLength, "2,5".to_string()));
        assert_eq!(app.experiment.initial_length_m, 50.0);

        let _ = app.update(Message::FieldTextSubmitted(Field::InitialLength));
        assert_eq!(app.experiment.initial_length_m, 2.5);
        assert_eq!(app.field_text(Field::InitialLength), "2.50");
    }

    #[test]
    fn test_unit_toggle_rewrites_value_boxes() {
        let mut app = app();
        let _ = app.update(Message::DisplayUnitSelected(TemperatureUnit::Kelvin));
        assert_eq!(app.field_text(Field::InitialTemp), "293.1");
        assert_eq!(app.experiment.initial_temp_c, 20.0);
    }

    fn in_flight_ticket(app: &App) -> Option<RequestTicket> {
        app.in_flight.as_ref().map(|(ticket, _)| *ticket)
    }

    #[test]
    fn test_unchanged_kelvin_box_commit_keeps_celsius() {
        let mut app = app();
        let _ = app.update(Message::DisplayUnitSelected(TemperatureUnit::Kelvin));
        for field in Field::ALL {
            let _ = app.update(Message::FieldTextSubmitted(field));
        }
        assert_eq!(app.experiment.initial_temp_c.to_bits(), 20.0f64.to_bits());
        assert_eq!(app.experiment.final_temp_c.to_bits(), 120.0f64.to_bits());
        assert_eq!(app.experiment.initial_length_m, 50.0);
    }

    #[test]
    fn test_asking_again_while_pending_supersedes_first_request() {
        let mut app = app();
        let _ = app.update(Message::AskExplanation);
        let first = in_flight_ticket(&app).unwrap();
        assert!(app.explanation.is_pending());
        assert!(app.can_ask());

        let _ = app.update(Message::QuestionChanged("¿Y si fuera cobre?".to_string()));
        let _ = app.update(Message::AskExplanation);
        let second = in_flight_ticket(&app).unwrap();
        assert_ne!(first, second);
        assert!(app.explanation.is_current(second));
        assert!(!app.explanation.is_current(first));

        // First answer arrives last and is dropped
        let _ = app.update(Message::ExplanationReceived(second, Ok("nueva".to_string())));
        assert_eq!(in_flight_ticket(&app), None);
        let _ = app.update(Message::ExplanationReceived(first, Ok("vieja".to_string())));
        assert_eq!(app.explanation.status(), &ExplanationStatus::Ready("nueva".to_string()));
    }

    #[test]
    fn test_stale_failure_keeps_latest_request_in_flight() {
        let mut app = app();
        let _ = app.update(Message::AskExplanation);
        let first = in_flight_ticket(&app).unwrap();
        let _ = app.update(Message::AskExplanation);
        let second = in_flight_ticket(&app).unwrap();

        let _ = app.update(Message::ExplanationReceived(
            first,
            Err(dilata_core::errors::LabError::external_service("timeout")),
        ));
        assert!(app.explanation.is_pending());
        assert_eq!(in_flight_ticket(&app), Some(second));
    }

    #[test]
    fn test_blank_question_cannot_be_asked() {
        let mut app = app();
        let _ = app.update(Message::QuestionChanged("   ".to_string()));
        assert!(!app.can_ask());
    }
}
