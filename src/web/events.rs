//! DOM event wiring for the generator page.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::api::ApiClient;
use crate::render::ExportFormat;
use crate::view::driver::{run_generate, run_switch_format};
use crate::view::{BindingError, ViewController};

use super::dom::{DomBindings, js_error};
use super::fetch::FetchTransport;

pub(crate) type SharedController = Rc<RefCell<ViewController<DomBindings>>>;
pub(crate) type SharedClient = Rc<ApiClient<FetchTransport>>;

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), BindingError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // the page owns its listeners for its whole lifetime
    closure.forget();
    Ok(())
}

/// Listen on the element with `id` if the page has one.
fn on_click(
    document: &Document,
    id: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), BindingError> {
    match document.get_element_by_id(id) {
        Some(el) => listen(&el, "click", handler),
        None => {
            debug!(id, "optional control missing");
            Ok(())
        }
    }
}

/// Hook the form, buttons and keyboard shortcut up to the controller.
pub fn attach(controller: &SharedController, api: &SharedClient) -> Result<(), BindingError> {
    let document = controller.borrow().bindings().document().clone();

    if let Some(form) = document.get_element_by_id("scenarioForm") {
        let (c, a) = (controller.clone(), api.clone());
        listen(&form, "submit", move |event| {
            event.prevent_default();
            let (c, a) = (c.clone(), a.clone());
            spawn_local(async move { run_generate(&c, &a).await });
        })?;
    }

    let c = controller.clone();
    on_click(&document, "clearBtn", move |_| c.borrow_mut().clear())?;
    let c = controller.clone();
    on_click(&document, "loginBtn", move |_| c.borrow_mut().login())?;
    let c = controller.clone();
    on_click(&document, "logoutBtn", move |_| c.borrow_mut().logout())?;
    let c = controller.clone();
    on_click(&document, "downloadBtn", move |_| c.borrow_mut().download_image())?;
    let c = controller.clone();
    on_click(&document, "downloadJsonBtn", move |_| {
        c.borrow_mut().download_json()
    })?;
    let c = controller.clone();
    on_click(&document, "newTreeBtn", move |_| c.borrow_mut().generate_new())?;

    let toggles = document
        .query_selector_all(".toggle-btn")
        .map_err(js_error)?;
    for i in 0..toggles.length() {
        let Some(button) = toggles
            .item(i)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let format = button
            .dataset()
            .get("format")
            .and_then(|f| f.parse::<ExportFormat>().ok());
        let Some(format) = format else {
            debug!(index = i, "toggle button without a known data-format");
            continue;
        };
        let (c, a) = (controller.clone(), api.clone());
        listen(&button, "click", move |_| {
            let (c, a) = (c.clone(), a.clone());
            spawn_local(async move { run_switch_format(&c, &a, format).await });
        })?;
    }

    let c = controller.clone();
    listen(&document, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if key.ctrl_key() && key.shift_key() && key.key().eq_ignore_ascii_case("s") {
            key.prevent_default();
            c.borrow_mut().fill_sample_data();
        }
    })?;

    Ok(())
}
