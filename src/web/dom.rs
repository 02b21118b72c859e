//! `ViewBindings` over the generator page's DOM.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use js_sys::{Array, Uint8Array};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlButtonElement,
    HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, Url, Window,
};

use crate::render::{Download, ExportFormat};
use crate::view::{BindingError, Diagram, Scenario, ViewBindings};

pub(crate) fn js_error(err: JsValue) -> BindingError {
    BindingError(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// DOM bindings keyed by the page's element ids.
pub struct DomBindings {
    window: Window,
    document: Document,
}

impl DomBindings {
    pub fn new() -> Result<Self, BindingError> {
        let window = web_sys::window().ok_or_else(|| BindingError("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| BindingError("no document".into()))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            warn!(id, "element not found");
        }
        element
    }

    fn html(&self, id: &str) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn set_visible(&self, id: &str, visible: bool) {
        if let Some(el) = self.html(id) {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn field_value(&self, id: &str) -> String {
        let Some(el) = self.element(id) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_field(&self, id: &str, value: Option<&str>, placeholder: Option<&str>) {
        let Some(el) = self.element(id) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            if let Some(value) = value {
                input.set_value(value);
            }
            if let Some(placeholder) = placeholder {
                input.set_placeholder(placeholder);
            }
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            if let Some(value) = value {
                area.set_value(value);
            }
            if let Some(placeholder) = placeholder {
                area.set_placeholder(placeholder);
            }
        }
    }

    fn click_link(&self, url: &str, file_name: &str) -> Result<(), BindingError> {
        let anchor: HtmlAnchorElement = self
            .document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| BindingError("anchor is not an HtmlAnchorElement".into()))?;
        anchor.set_href(url);
        anchor.set_download(file_name);

        let body = self
            .document
            .body()
            .ok_or_else(|| BindingError("no document body".into()))?;
        body.append_child(&anchor).map_err(js_error)?;
        anchor.click();
        body.remove_child(&anchor).map_err(js_error)?;
        Ok(())
    }
}

impl ViewBindings for DomBindings {
    fn title(&self) -> String {
        self.field_value("title")
    }

    fn description(&self) -> String {
        self.field_value("description")
    }

    fn set_form_values(&mut self, title: &str, description: &str) {
        self.set_field("title", Some(title), None);
        self.set_field("description", Some(description), None);
    }

    fn set_placeholders(&mut self, scenario: &Scenario) {
        self.set_field("title", None, Some(scenario.title));
        self.set_field("description", None, Some(scenario.description));
    }

    fn reset_form(&mut self) {
        if let Some(form) = self
            .element("scenarioForm")
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn focus_title(&mut self) {
        if let Some(el) = self.html("title") {
            let _ = el.focus();
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.set_visible("loadingState", loading);
        if let Some(button) = self
            .element("generateBtn")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            button.set_disabled(loading);
        }
    }

    fn show_error(&mut self, message: &str) {
        self.set_text("errorMessage", message);
        self.set_visible("errorState", true);
    }

    fn hide_error(&mut self) {
        self.set_visible("errorState", false);
    }

    fn show_results(&mut self, json: &str) {
        self.set_text("jsonOutput", json);
        self.set_visible("resultsSection", true);
        if let Some(el) = self.element("resultsSection") {
            el.scroll_into_view();
        }
    }

    fn hide_results(&mut self) {
        self.set_visible("resultsSection", false);
    }

    fn show_diagram(&mut self, diagram: &Diagram<'_>) {
        let Some(container) = self.element("treeVisualization") else {
            return;
        };
        let markup = match *diagram {
            Diagram::Svg(svg) => svg.to_owned(),
            Diagram::Image {
                format: ExportFormat::Svg,
                bytes,
            } => String::from_utf8_lossy(bytes).into_owned(),
            Diagram::Image { format, bytes } => format!(
                r#"<img alt="Attack tree" src="data:{};base64,{}">"#,
                format.mime(),
                STANDARD.encode(bytes)
            ),
        };
        container.set_inner_html(&markup);
    }

    fn set_format(&mut self, format: ExportFormat) {
        if let Ok(buttons) = self.document.query_selector_all(".toggle-btn") {
            for i in 0..buttons.length() {
                let Some(button) = buttons
                    .item(i)
                    .and_then(|node| node.dyn_into::<HtmlElement>().ok())
                else {
                    continue;
                };
                let active = button.dataset().get("format").as_deref() == Some(format.as_str());
                let _ = button.class_list().toggle_with_force("active", active);
            }
        }
        self.set_text("downloadBtnText", format.label());
    }

    fn show_login_screen(&mut self) {
        self.set_visible("loginScreen", true);
        self.set_visible("mainApp", false);
    }

    fn show_main_app(&mut self, user_name: &str) {
        self.set_visible("loginScreen", false);
        self.set_visible("mainApp", true);
        self.set_text("userName", user_name);
    }

    fn download(&mut self, download: &Download) -> Result<(), BindingError> {
        let parts = Array::of1(&Uint8Array::from(download.bytes.as_slice()));
        let options = BlobPropertyBag::new();
        options.set_type(download.mime);
        let blob =
            Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;

        let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;
        let clicked = self.click_link(&url, download.file_name);
        // released whether or not the click went through
        let _ = Url::revoke_object_url(&url);
        clicked
    }

    fn schedule_redirect(&mut self, url: &str, delay_ms: u32) {
        let target = url.to_owned();
        let callback = Closure::once_into_js(move || {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(&target);
            }
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            warn!(error = ?err, "failed to schedule redirect");
        }
    }

    fn navigate(&mut self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            warn!(error = ?err, "navigation failed");
        }
    }
}
