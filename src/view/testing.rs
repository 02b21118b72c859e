//! Bindings that record what the controller asked the page to do.

use crate::render::{Download, ExportFormat};

use super::bindings::{BindingError, Diagram, ViewBindings};
use super::scenarios::Scenario;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShownDiagram {
    Svg(String),
    Image(ExportFormat, Vec<u8>),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBindings {
    pub title: String,
    pub description: String,
    pub placeholders: Option<Scenario>,
    pub focused: bool,
    pub loading: bool,
    pub loading_calls: usize,
    pub error: Option<String>,
    pub results: Option<String>,
    pub diagram: Option<ShownDiagram>,
    pub format: Option<ExportFormat>,
    pub login_screen: bool,
    pub user_name: Option<String>,
    pub downloads: Vec<Download>,
    pub fail_downloads: bool,
    pub redirects: Vec<(String, u32)>,
    pub navigations: Vec<String>,
}

impl RecordingBindings {
    pub(crate) fn with_form(title: &str, description: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            ..Default::default()
        }
    }
}

impl ViewBindings for RecordingBindings {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn set_form_values(&mut self, title: &str, description: &str) {
        self.title = title.to_owned();
        self.description = description.to_owned();
    }

    fn set_placeholders(&mut self, scenario: &Scenario) {
        self.placeholders = Some(*scenario);
    }

    fn reset_form(&mut self) {
        self.title.clear();
        self.description.clear();
    }

    fn focus_title(&mut self) {
        self.focused = true;
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_calls += 1;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_owned());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn show_results(&mut self, json: &str) {
        self.results = Some(json.to_owned());
    }

    fn hide_results(&mut self) {
        self.results = None;
        self.diagram = None;
    }

    fn show_diagram(&mut self, diagram: &Diagram<'_>) {
        self.diagram = Some(match *diagram {
            Diagram::Svg(svg) => ShownDiagram::Svg(svg.to_owned()),
            Diagram::Image { format, bytes } => ShownDiagram::Image(format, bytes.to_vec()),
        });
    }

    fn set_format(&mut self, format: ExportFormat) {
        self.format = Some(format);
    }

    fn show_login_screen(&mut self) {
        self.login_screen = true;
        self.user_name = None;
    }

    fn show_main_app(&mut self, user_name: &str) {
        self.login_screen = false;
        self.user_name = Some(user_name.to_owned());
    }

    fn download(&mut self, download: &Download) -> Result<(), BindingError> {
        if self.fail_downloads {
            return Err(BindingError("blob URLs are disabled".into()));
        }
        self.downloads.push(download.clone());
        Ok(())
    }

    fn schedule_redirect(&mut self, url: &str, delay_ms: u32) {
        self.redirects.push((url.to_owned(), delay_ms));
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_owned());
    }
}
