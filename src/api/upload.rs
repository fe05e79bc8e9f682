//! Multipart file upload into the upload directory.

use std::fs;
use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};

use super::response;
use super::types::StatusResponse;
use crate::config::Settings;
use crate::error::ConsoleError;
use crate::files;
use crate::http::multipart::MultipartForm;

/// Store the first uploaded file under the upload directory and answer with
/// its stored location.
pub async fn upload(
    settings: &Settings,
    req: Request<hyper::body::Incoming>,
) -> Result<Response<Full<Bytes>>, ConsoleError> {
    let form = super::read_form(req).await?;
    let stored = store_first_file(&settings.upload_dir(), form)?;
    Ok(response::json_response(
        StatusCode::OK,
        &StatusResponse::new(stored.display().to_string()),
    ))
}

/// Write the form's first file part under `dir`, creating the directory on
/// first use. Overwrites any previous file of the same name.
fn store_first_file(dir: &Path, form: MultipartForm) -> Result<PathBuf, ConsoleError> {
    let file = form
        .files
        .into_iter()
        .next()
        .ok_or_else(|| ConsoleError::BadRequest("No file in upload request".to_string()))?;
    files::validate_file_name(&file.file_name)?;

    fs::create_dir_all(dir)
        .map_err(|e| ConsoleError::internal("Failed to create upload directory", &e))?;
    let target = dir.join(&file.file_name);
    fs::write(&target, &file.data)
        .map_err(|e| ConsoleError::internal("Failed to store uploaded file", &e))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::multipart::FilePart;

    fn form_with(files: Vec<FilePart>) -> MultipartForm {
        MultipartForm {
            fields: std::collections::HashMap::new(),
            files,
        }
    }

    #[test]
    fn test_stores_bytes_under_declared_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let upload_dir = dir.path().join("upload");
        let form = form_with(vec![FilePart {
            file_name: "model.tar".to_string(),
            data: b"payload".to_vec(),
        }]);

        let stored = store_first_file(&upload_dir, form).unwrap();
        assert_eq!(stored, upload_dir.join("model.tar"));
        assert_eq!(fs::read(stored).unwrap(), b"payload");
    }

    #[test]
    fn test_empty_form_is_a_bad_request() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            store_first_file(dir.path(), form_with(Vec::new())),
            Err(ConsoleError::BadRequest(_))
        ));
    }

    #[test]
    fn test_traversal_file_name_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let form = form_with(vec![FilePart {
            file_name: "../outside".to_string(),
            data: b"x".to_vec(),
        }]);
        assert!(matches!(
            store_first_file(dir.path(), form),
            Err(ConsoleError::BadRequest(_))
        ));
    }
}
