use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::api::{ClientError, HttpRequest, HttpResponse, Result, Transport};

fn network(err: JsValue) -> ClientError {
    ClientError::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// `Transport` over `window.fetch`. Cookies follow the browser's
/// same-origin default.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.url, &init).map_err(network)?;
        if request.body.is_some() {
            js_request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(network)?;
        }

        let window =
            web_sys::window().ok_or_else(|| ClientError::Network("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(network)?;

        let content_type = response.headers().get("content-type").ok().flatten();
        let buffer = JsFuture::from(response.array_buffer().map_err(network)?)
            .await
            .map_err(network)?;

        Ok(HttpResponse {
            status: response.status(),
            content_type,
            body: Uint8Array::new(&buffer).to_vec(),
        })
    }
}
