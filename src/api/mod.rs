// Console API module entry
// Dispatches accepted requests through the route table to exactly one operation

mod config_file;
mod dependency;
mod info;
mod logs;
mod response;
mod types;
mod upload;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::error::ConsoleError;
use crate::http::{multipart, query_param_usize};
use crate::http::multipart::MultipartForm;
use crate::logger;
use crate::routing::{matcher, table, Operation};

/// Console route handler.
///
/// Resolves the request against the declarative route table and invokes
/// exactly one operation; all I/O happens inside the operations, and every
/// failure is surfaced once as a structured error body.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if state.settings.logging.access_log {
        logger::log_request(req.method(), req.uri());
    }

    // A URI outside the console's pattern set is declined; in the standalone
    // server there is no further handler, so it reports as missing.
    let result = if matcher::accepts(&path) {
        match table::resolve(&method, &path) {
            Some((op, params)) => run_operation(op, &params, req, &state).await,
            None => Err(ConsoleError::NotFound(format!(
                "No route for {method} {path}"
            ))),
        }
    } else {
        Err(ConsoleError::NotFound(format!("No handler for {path}")))
    };

    let resp = result.unwrap_or_else(|err| response::error_response(&err));
    logger::log_api_request(method.as_str(), &path, resp.status().as_u16());
    Ok(resp)
}

async fn run_operation(
    op: Operation,
    params: &[&str],
    req: Request<hyper::body::Incoming>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ConsoleError> {
    let settings = &state.settings;
    match op {
        Operation::ListLogs => logs::list_logs(&settings.logs_dir()),
        Operation::TailLog => {
            let lines = query_param_usize(req.uri().query(), "lines", 200);
            logs::show_log(&settings.logs_dir(), params[0], lines)
        }
        Operation::DownloadLog => logs::download_log(&settings.logs_dir(), params[0]),
        Operation::InferenceAddress => Ok(info::inference_address(settings)),
        Operation::Version => Ok(info::version(settings)),
        Operation::GetConfig => config_file::get_config(settings),
        Operation::ModifyConfig => config_file::modify_config(settings, req).await,
        Operation::Upload => upload::upload(settings, req).await,
        Operation::ListDependencies => dependency::list_dependencies(&settings.deps_dir()),
        Operation::AddDependency => dependency::add_dependency(state, req).await,
        Operation::DeleteDependency => {
            dependency::delete_dependency(&settings.deps_dir(), params[0])
        }
    }
}

/// Collect the request body and decode it as a multipart form.
async fn read_form(
    req: Request<hyper::body::Incoming>,
) -> Result<MultipartForm, ConsoleError> {
    let content_type = req
        .headers()
        .get(hyper::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
        .ok_or_else(|| ConsoleError::BadRequest("Missing Content-Type header".to_string()))?;
    let boundary = multipart::boundary(&content_type)
        .ok_or_else(|| {
            ConsoleError::BadRequest("Expected a multipart/form-data request".to_string())
        })?
        .to_string();
    let body = req
        .collect()
        .await
        .map_err(|e| ConsoleError::internal("Failed to read request body", &e))?
        .to_bytes();
    multipart::parse(&boundary, &body)
}
