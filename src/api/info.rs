//! Server information reads: inference endpoint and engine version.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response;
use super::types::{InferenceAddress, StatusResponse};
use crate::config::Settings;

/// Report the inference endpoint together with whether the configured CORS
/// rules let the console POST to it.
pub fn inference_address(settings: &Settings) -> Response<Full<Bytes>> {
    let console = &settings.console;
    let allowed = cors_allowed(
        &console.cors_allowed_origin,
        &console.cors_allowed_methods,
        &console.cors_allowed_headers,
    );
    response::json_response(
        StatusCode::OK,
        &InferenceAddress {
            inference_address: console.inference_address.clone(),
            cors_allowed: if allowed { "1" } else { "0" }.to_string(),
        },
    )
}

/// Report the engine specification version.
pub fn version(settings: &Settings) -> Response<Full<Bytes>> {
    response::json_response(
        StatusCode::OK,
        &StatusResponse::new(settings.console.engine_version.clone()),
    )
}

/// CORS is considered open for the console when origin, methods and headers
/// are all configured and the methods cover POST.
fn cors_allowed(origin: &str, methods: &str, headers: &str) -> bool {
    if origin.is_empty() || methods.is_empty() || headers.is_empty() {
        return false;
    }
    methods == "*" || methods.to_uppercase().contains("POST")
}
