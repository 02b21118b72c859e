use crate::render::{Download, ExportFormat};

use super::scenarios::Scenario;

/// Failure reported by the page while performing a side effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct BindingError(pub String);

/// Diagram handed to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagram<'a> {
    /// Inline SVG markup from the local renderer.
    Svg(&'a str),
    /// Image bytes from the server renderer.
    Image {
        format: ExportFormat,
        bytes: &'a [u8],
    },
}

/// Everything the controller needs from the page.
///
/// The browser implementation talks to the DOM; tests record calls.
pub trait ViewBindings {
    fn title(&self) -> String;
    fn description(&self) -> String;
    fn set_form_values(&mut self, title: &str, description: &str);
    fn set_placeholders(&mut self, scenario: &Scenario);
    fn reset_form(&mut self);
    fn focus_title(&mut self);

    /// Show or hide the spinner and disable or enable the submit button.
    fn set_loading(&mut self, loading: bool);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    /// Reveal the results section with the raw tree JSON.
    fn show_results(&mut self, json: &str);
    fn hide_results(&mut self);
    fn show_diagram(&mut self, diagram: &Diagram<'_>);
    /// Mark the active format toggle and relabel the download button.
    fn set_format(&mut self, format: ExportFormat);

    fn show_login_screen(&mut self);
    fn show_main_app(&mut self, user_name: &str);

    /// Save a file. Any object URL must be released before returning.
    fn download(&mut self, download: &Download) -> Result<(), BindingError>;
    fn schedule_redirect(&mut self, url: &str, delay_ms: u32);
    fn navigate(&mut self, url: &str);
}
