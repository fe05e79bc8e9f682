//! Log file operations: listing, tailing, download.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::response;
use super::types::{LogEntry, StatusResponse};
use crate::error::ConsoleError;
use crate::files;
use crate::tail;

/// List `.log` files under the log directory.
pub fn list_logs(dir: &Path) -> Result<Response<Full<Bytes>>, ConsoleError> {
    let entries = collect_entries(dir)?;
    Ok(response::json_response(StatusCode::OK, &entries))
}

/// Gather log metadata. A missing directory is an empty listing, not an
/// error; any other walk failure surfaces as internal.
fn collect_entries(dir: &Path) -> Result<Vec<LogEntry>, ConsoleError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let paths = files::walk_with_suffix(dir, ".log")
        .map_err(|e| ConsoleError::internal("Failed to list log files", &e))?;

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let meta = fs::metadata(&path)
            .map_err(|e| ConsoleError::internal("Failed to stat log file", &e))?;
        let last_modified = meta
            .modified()
            .map(|t| DateTime::<Utc>::from(t).timestamp_millis())
            .unwrap_or(0);
        entries.push(LogEntry {
            name: file_name(&path),
            size_bytes: meta.len(),
            last_modified,
        });
    }
    Ok(entries)
}

/// Tail a log file; `lines` counts newline-delimited lines from the end.
pub fn show_log(
    dir: &Path,
    name: &str,
    lines: usize,
) -> Result<Response<Full<Bytes>>, ConsoleError> {
    let file = resolve_log_file(dir, name)?;
    let text = tail::read_last_lines(&file, lines)?;
    Ok(response::json_response(
        StatusCode::OK,
        &StatusResponse::new(text),
    ))
}

/// Serve the full log file as a download attachment.
pub fn download_log(dir: &Path, name: &str) -> Result<Response<Full<Bytes>>, ConsoleError> {
    let file = resolve_log_file(dir, name)?;
    let data =
        fs::read(&file).map_err(|e| ConsoleError::internal("Failed to read log file", &e))?;
    Ok(response::attachment_response(name, data))
}

/// Validate the name against traversal and resolve it inside the log
/// directory; the target must be an existing regular file.
fn resolve_log_file(dir: &Path, name: &str) -> Result<PathBuf, ConsoleError> {
    files::validate_file_name(name)?;
    let file = dir.join(name);
    if !file.is_file() {
        return Err(ConsoleError::NotFound(format!(
            "Log file does not exist: {name}"
        )));
    }
    Ok(file)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_log_dir_is_an_empty_listing() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("logs");
        assert!(collect_entries(&missing).unwrap().is_empty());
    }

    #[test]
    fn test_listing_keeps_only_log_files() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("app.log"), "hello\n").unwrap();
        fs::write(dir.path().join("server.pid"), "42").unwrap();

        let entries = collect_entries(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "app.log");
        assert_eq!(entries[0].size_bytes, 6);
        assert!(entries[0].last_modified > 0);
    }

    #[test]
    fn test_traversal_name_is_rejected_before_access() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            show_log(dir.path(), "../secret.log", 10),
            Err(ConsoleError::BadRequest(_))
        ));
        assert!(matches!(
            download_log(dir.path(), "..%2fsecret.log"),
            Err(ConsoleError::BadRequest(_))
        ));
    }

    #[test]
    fn test_missing_log_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            show_log(dir.path(), "absent.log", 10),
            Err(ConsoleError::NotFound(_))
        ));
        assert!(matches!(
            download_log(dir.path(), "absent.log"),
            Err(ConsoleError::NotFound(_))
        ));
    }

    #[test]
    fn test_download_serves_the_whole_file() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("app.log"), "full content").unwrap();
        let resp = download_log(dir.path(), "app.log").unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "12");
    }
}
