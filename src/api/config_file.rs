//! Configuration file pass-through.
//!
//! The console reads and overwrites the serving configuration as an opaque
//! blob; parsing and validation stay with the server that owns the file.

use std::fs;
use std::path::{Path, PathBuf};

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use serde::Deserialize;

use super::response;
use super::types::StatusResponse;
use crate::config::Settings;
use crate::error::ConsoleError;

/// Body of a configuration update.
#[derive(Debug, Deserialize)]
struct ConfigUpdate {
    prop: String,
}

/// Return the configuration file contents.
pub fn get_config(settings: &Settings) -> Result<Response<Full<Bytes>>, ConsoleError> {
    let path = config_path(settings)?;
    let content = read_document(&path)?;
    Ok(response::json_response(
        StatusCode::OK,
        &StatusResponse::new(content),
    ))
}

/// Overwrite the configuration file with the submitted `prop` blob.
pub async fn modify_config(
    settings: &Settings,
    req: Request<hyper::body::Incoming>,
) -> Result<Response<Full<Bytes>>, ConsoleError> {
    let path = config_path(settings)?;
    let body = req
        .collect()
        .await
        .map_err(|e| ConsoleError::internal("Failed to read request body", &e))?
        .to_bytes();
    let update: ConfigUpdate = serde_json::from_slice(&body)
        .map_err(|e| ConsoleError::BadRequest(format!("Invalid configuration body: {e}")))?;
    write_document(&path, &update.prop)?;
    Ok(response::json_response(
        StatusCode::OK,
        &StatusResponse::new("Configuration modification succeeded"),
    ))
}

fn config_path(settings: &Settings) -> Result<PathBuf, ConsoleError> {
    settings
        .console
        .config_file
        .as_ref()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| {
            ConsoleError::NotFound("No configuration file is configured".to_string())
        })
}

fn read_document(path: &Path) -> Result<String, ConsoleError> {
    fs::read_to_string(path)
        .map_err(|e| ConsoleError::internal("Failed to read configuration file", &e))
}

fn write_document(path: &Path, content: &str) -> Result<(), ConsoleError> {
    fs::write(path, content)
        .map_err(|e| ConsoleError::internal("Failed to write configuration file", &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_config(path: Option<String>) -> Settings {
        let mut settings = Settings::load_from("no-such-settings-file").unwrap();
        settings.console.config_file = path;
        settings
    }

    #[test]
    fn test_unconfigured_path_is_not_found() {
        assert!(matches!(
            config_path(&settings_with_config(None)),
            Err(ConsoleError::NotFound(_))
        ));
        assert!(matches!(
            config_path(&settings_with_config(Some(String::new()))),
            Err(ConsoleError::NotFound(_))
        ));
    }

    #[test]
    fn test_document_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.properties");
        let blob = "inference_address=http://0.0.0.0:8080\n# comment\n";

        write_document(&path, blob).unwrap();
        assert_eq!(read_document(&path).unwrap(), blob);

        // Overwrite replaces the previous content entirely.
        write_document(&path, "short").unwrap();
        assert_eq!(read_document(&path).unwrap(), "short");
    }

    #[test]
    fn test_missing_document_is_internal() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            read_document(&dir.path().join("absent")),
            Err(ConsoleError::Internal(_))
        ));
    }
}
