//! Declarative console route table.
//!
//! Each route binds an HTTP method and a URI pattern to a single operation.
//! Routes are matched in table order, so exactly one route resolves for any
//! request the console accepts; anything else is left unresolved for the
//! dispatcher to report as missing.

use hyper::Method;

use super::matcher;

/// Operations the console dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListLogs,
    DownloadLog,
    TailLog,
    InferenceAddress,
    Upload,
    Version,
    GetConfig,
    ModifyConfig,
    ListDependencies,
    AddDependency,
    DeleteDependency,
}

/// Immutable binding of method and URI pattern to an operation.
pub struct Route {
    pub method: Method,
    pub pattern: &'static str,
    pub op: Operation,
}

/// Console routing surface. `/logs/download/{name}` precedes `/logs/{name}`
/// so the download prefix is never captured as a log name.
static ROUTES: &[Route] = &[
    Route {
        method: Method::GET,
        pattern: "/logs",
        op: Operation::ListLogs,
    },
    Route {
        method: Method::GET,
        pattern: "/logs/download/{name}",
        op: Operation::DownloadLog,
    },
    Route {
        method: Method::GET,
        pattern: "/logs/{name}",
        op: Operation::TailLog,
    },
    Route {
        method: Method::GET,
        pattern: "/inferenceAddress",
        op: Operation::InferenceAddress,
    },
    Route {
        method: Method::POST,
        pattern: "/upload",
        op: Operation::Upload,
    },
    Route {
        method: Method::GET,
        pattern: "/version",
        op: Operation::Version,
    },
    Route {
        method: Method::GET,
        pattern: "/config",
        op: Operation::GetConfig,
    },
    Route {
        method: Method::POST,
        pattern: "/config",
        op: Operation::ModifyConfig,
    },
    Route {
        method: Method::GET,
        pattern: "/dependency",
        op: Operation::ListDependencies,
    },
    Route {
        method: Method::POST,
        pattern: "/dependency",
        op: Operation::AddDependency,
    },
    Route {
        method: Method::DELETE,
        pattern: "/dependency/{name}",
        op: Operation::DeleteDependency,
    },
];

/// Resolve a request to the first matching route, capturing `{name}`
/// parameters from the path.
pub fn resolve<'p>(method: &Method, path: &'p str) -> Option<(Operation, Vec<&'p str>)> {
    ROUTES.iter().find_map(|route| {
        if route.method != *method {
            return None;
        }
        matcher::match_pattern(route.pattern, path).map(|params| (route.op, params))
    })
}
