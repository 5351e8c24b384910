//! HTTP Command Wrappers
//!
//! Frontend bindings to the storefront's JSON endpoints, over `fetch`.

mod cart;

use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::error::{describe_js, CartError, CartResult};

pub use cart::*;

fn build_request(method: &str, url: &str, json_body: Option<&str>) -> CartResult<Request> {
    let init = RequestInit::new();
    init.set_method(method);
    if let Some(body) = json_body {
        init.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|e| CartError::Transport(describe_js(&e)))?;
    let headers = request.headers();
    headers
        .set("Accept", "application/json")
        .map_err(|e| CartError::Transport(describe_js(&e)))?;
    if json_body.is_some() {
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| CartError::Transport(describe_js(&e)))?;
    }
    Ok(request)
}

async fn send(request: &Request) -> CartResult<Response> {
    let window = web_sys::window().ok_or_else(|| CartError::Transport("no window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| CartError::Transport(describe_js(&e)))?;
    value
        .dyn_into::<Response>()
        .map_err(|_| CartError::Decode("fetch did not resolve to a Response".to_string()))
}

async fn read_json<T: DeserializeOwned>(response: &Response) -> CartResult<T> {
    let promise = response
        .json()
        .map_err(|e| CartError::Decode(describe_js(&e)))?;
    let body = JsFuture::from(promise)
        .await
        .map_err(|e| CartError::Decode(describe_js(&e)))?;
    serde_wasm_bindgen::from_value(body).map_err(|e| CartError::Decode(e.to_string()))
}
