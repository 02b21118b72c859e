//! Async glue between the controller and the API client.
//!
//! The controller lives in a `RefCell` shared with DOM event handlers. Each
//! function borrows it only between awaits, so a click that lands while a
//! request is pending sees a consistent (`Loading`) state.

use std::cell::RefCell;

use crate::api::{ApiClient, Transport};
use crate::render::ExportFormat;

use super::bindings::ViewBindings;
use super::controller::{RenderRequest, ViewController};

/// Submit the form and show the result.
pub async fn run_generate<B, T>(controller: &RefCell<ViewController<B>>, api: &ApiClient<T>)
where
    B: ViewBindings,
    T: Transport,
{
    let request = controller.borrow_mut().begin_generate();
    let Some(request) = request else {
        return;
    };

    let result = api.generate(&request).await;
    let render = controller.borrow_mut().finish_generate(result);
    if let Some(render) = render {
        run_render(controller, api, render).await;
    }
}

/// Select an export format, fetching a new image when rendering server-side.
pub async fn run_switch_format<B, T>(
    controller: &RefCell<ViewController<B>>,
    api: &ApiClient<T>,
    format: ExportFormat,
) where
    B: ViewBindings,
    T: Transport,
{
    let render = controller.borrow_mut().begin_switch_format(format);
    if let Some(render) = render {
        run_render(controller, api, render).await;
    }
}

/// Decide between the login screen and the app.
pub async fn run_check_auth<B, T>(controller: &RefCell<ViewController<B>>, api: &ApiClient<T>)
where
    B: ViewBindings,
    T: Transport,
{
    let result = api.auth_status().await;
    controller.borrow_mut().finish_check_auth(result);
}

async fn run_render<B, T>(
    controller: &RefCell<ViewController<B>>,
    api: &ApiClient<T>,
    request: RenderRequest,
) where
    B: ViewBindings,
    T: Transport,
{
    let result = api.render(&request.tree, request.format).await;
    controller.borrow_mut().finish_render(request.format, result);
}
