//! Dependency artifact management: listing, installation, deletion.
//!
//! Installation is not transactional: the dependency directory is the single
//! source of truth, and files written before a failure stay installed.

use std::fs;
use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};

use super::response;
use super::types::{DependencyRecord, StatusResponse};
use crate::config::AppState;
use crate::deps::{CodeRegistry, DependencyManager};
use crate::error::ConsoleError;
use crate::files;
use crate::http::multipart::{FilePart, MultipartForm};

/// List installed `.jar` artifacts with coordinates derived from their file
/// names.
pub fn list_dependencies(dir: &Path) -> Result<Response<Full<Bytes>>, ConsoleError> {
    let records = collect_records(dir)?;
    Ok(response::json_response(StatusCode::OK, &records))
}

/// Gather dependency records. Unlike log listing, a missing dependency
/// directory is an internal error, not an empty listing.
fn collect_records(dir: &Path) -> Result<Vec<DependencyRecord>, ConsoleError> {
    let paths = files::walk_with_suffix(dir, ".jar")
        .map_err(|e| ConsoleError::internal("Failed to list dependency files", &e))?;
    Ok(paths
        .iter()
        .map(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            DependencyRecord::from_file_name(name)
        })
        .collect())
}

/// Install a dependency. The mode is selected by the submitted form fields:
/// a named engine, a registry coordinate, or uploaded artifact files.
pub async fn add_dependency(
    state: &AppState,
    req: Request<hyper::body::Incoming>,
) -> Result<Response<Full<Bytes>>, ConsoleError> {
    let form = super::read_form(req).await?;
    install_from_form(
        state.manager.as_ref(),
        state.registry.as_ref(),
        &state.settings.deps_dir(),
        form,
    )?;
    Ok(response::json_response(
        StatusCode::OK,
        &StatusResponse::new("Dependency added successfully"),
    ))
}

fn install_from_form(
    manager: &dyn DependencyManager,
    registry: &dyn CodeRegistry,
    deps_dir: &Path,
    form: MultipartForm,
) -> Result<(), ConsoleError> {
    if form.field("type") == "engine" {
        return manager.install_engine(form.field("engine"));
    }
    if form.field("from") == "maven" {
        let coordinate = format!(
            "{}:{}:{}",
            form.field("groupId"),
            form.field("artifactId"),
            form.field("version")
        );
        return manager.install_package(&coordinate);
    }
    install_uploaded(deps_dir, registry, form.files)
}

/// Write uploaded artifacts under the dependency directory, overwriting any
/// previous file of the same name, and register each with the code registry.
fn install_uploaded(
    dir: &Path,
    registry: &dyn CodeRegistry,
    uploaded: Vec<FilePart>,
) -> Result<(), ConsoleError> {
    for file in &uploaded {
        files::validate_file_name(&file.file_name)?;
    }
    fs::create_dir_all(dir)
        .map_err(|e| ConsoleError::internal("Failed to create dependency directory", &e))?;
    for file in uploaded {
        let target = dir.join(&file.file_name);
        fs::write(&target, &file.data)
            .map_err(|e| ConsoleError::internal("Failed to install dependency", &e))?;
        registry.register(&target)?;
    }
    Ok(())
}

/// Delete an installed dependency artifact by file name.
pub fn delete_dependency(dir: &Path, name: &str) -> Result<Response<Full<Bytes>>, ConsoleError> {
    files::validate_file_name(name)?;
    fs::remove_file(dir.join(name))
        .map_err(|e| ConsoleError::internal(&format!("Failed to delete {name}"), &e))?;
    Ok(response::json_response(
        StatusCode::OK,
        &StatusResponse::new("Dependency deleted successfully"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::LibraryRegistry;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records delegated install requests instead of fetching anything.
    #[derive(Default)]
    struct RecordingManager {
        engines: Mutex<Vec<String>>,
        packages: Mutex<Vec<String>>,
    }

    impl DependencyManager for RecordingManager {
        fn install_engine(&self, engine: &str) -> Result<(), ConsoleError> {
            self.engines.lock().unwrap().push(engine.to_string());
            Ok(())
        }

        fn install_package(&self, coordinate: &str) -> Result<(), ConsoleError> {
            self.packages.lock().unwrap().push(coordinate.to_string());
            Ok(())
        }
    }

    fn form(fields: &[(&str, &str)], uploaded: Vec<FilePart>) -> MultipartForm {
        MultipartForm {
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<HashMap<_, _>>(),
            files: uploaded,
        }
    }

    #[test]
    fn test_maven_install_composes_the_coordinate() {
        let dir = tempfile::TempDir::new().unwrap();
        let manager = RecordingManager::default();
        let registry = LibraryRegistry::new();

        let submitted = form(
            &[
                ("from", "maven"),
                ("groupId", "com.x"),
                ("artifactId", "y"),
                ("version", "1.0"),
            ],
            Vec::new(),
        );
        install_from_form(&manager, &registry, dir.path(), submitted).unwrap();
        assert_eq!(*manager.packages.lock().unwrap(), vec!["com.x:y:1.0"]);
        assert!(manager.engines.lock().unwrap().is_empty());
    }

    #[test]
    fn test_engine_install_takes_precedence() {
        let dir = tempfile::TempDir::new().unwrap();
        let manager = RecordingManager::default();
        let registry = LibraryRegistry::new();

        let submitted = form(
            &[("type", "engine"), ("engine", "OnnxRuntime"), ("from", "maven")],
            Vec::new(),
        );
        install_from_form(&manager, &registry, dir.path(), submitted).unwrap();
        assert_eq!(*manager.engines.lock().unwrap(), vec!["OnnxRuntime"]);
        assert!(manager.packages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_uploaded_artifacts_are_written_and_registered() {
        let dir = tempfile::TempDir::new().unwrap();
        let deps = dir.path().join("deps");
        let manager = RecordingManager::default();
        let registry = LibraryRegistry::new();

        let submitted = form(
            &[],
            vec![
                FilePart {
                    file_name: "com.x_y_1.0.jar".to_string(),
                    data: b"one".to_vec(),
                },
                FilePart {
                    file_name: "extra.jar".to_string(),
                    data: b"two".to_vec(),
                },
            ],
        );
        install_from_form(&manager, &registry, &deps, submitted).unwrap();

        assert_eq!(fs::read(deps.join("com.x_y_1.0.jar")).unwrap(), b"one");
        assert_eq!(fs::read(deps.join("extra.jar")).unwrap(), b"two");
        assert_eq!(
            registry.sources(),
            vec![deps.join("com.x_y_1.0.jar"), deps.join("extra.jar")]
        );
    }

    #[test]
    fn test_traversal_upload_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let deps = dir.path().join("deps");
        let manager = RecordingManager::default();
        let registry = LibraryRegistry::new();

        let submitted = form(
            &[],
            vec![
                FilePart {
                    file_name: "ok.jar".to_string(),
                    data: b"one".to_vec(),
                },
                FilePart {
                    file_name: "../escape.jar".to_string(),
                    data: b"two".to_vec(),
                },
            ],
        );
        let result = install_from_form(&manager, &registry, &deps, submitted);
        assert!(matches!(result, Err(ConsoleError::BadRequest(_))));
        assert!(!deps.exists());
        assert!(registry.sources().is_empty());
    }

    #[test]
    fn test_missing_deps_dir_fails_listing() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("deps");
        assert!(matches!(
            collect_records(&missing),
            Err(ConsoleError::Internal(_))
        ));
    }

    #[test]
    fn test_listing_derives_coordinates() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("com.x_y_1.0.jar"), "j").unwrap();
        fs::write(dir.path().join("weird.jar"), "j").unwrap();
        fs::write(dir.path().join("notes.txt"), "t").unwrap();

        let mut records = collect_records(dir.path()).unwrap();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].group_id.as_deref(), Some("com.x"));
        assert_eq!(records[0].version.as_deref(), Some("1.0"));
        assert!(records[1].group_id.is_none());
    }

    #[test]
    fn test_delete_missing_artifact_is_internal() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            delete_dependency(dir.path(), "absent.jar"),
            Err(ConsoleError::Internal(_))
        ));
    }

    #[test]
    fn test_delete_removes_the_artifact() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("old.jar"), "j").unwrap();
        let resp = delete_dependency(dir.path(), "old.jar").unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!dir.path().join("old.jar").exists());
    }

    #[test]
    fn test_delete_traversal_name_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            delete_dependency(dir.path(), "../old.jar"),
            Err(ConsoleError::BadRequest(_))
        ));
    }
}
