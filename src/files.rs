//! Filesystem helpers shared by the listing and file-serving operations.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConsoleError;

/// Reject file names that could escape their target directory.
///
/// Applied before any file access by every operation that takes a file name
/// from the request.
pub fn validate_file_name(name: &str) -> Result<(), ConsoleError> {
    if name.contains("..") {
        return Err(ConsoleError::BadRequest(format!(
            "Invalid file name: {name}"
        )));
    }
    Ok(())
}

/// Recursively collect regular files under `dir` whose name ends with `suffix`.
///
/// Traversal order is filesystem-dependent; callers must not rely on it.
pub fn walk_with_suffix(dir: &Path, suffix: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect(dir, suffix, &mut found)?;
    Ok(found)
}

fn collect(dir: &Path, suffix: &str, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect(&path, suffix, found)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix))
        {
            found.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_traversal() {
        assert!(validate_file_name("../etc/passwd").is_err());
        assert!(validate_file_name("a/../b.log").is_err());
        assert!(matches!(
            validate_file_name(".."),
            Err(ConsoleError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_accepts_plain_names() {
        assert!(validate_file_name("app.log").is_ok());
        assert!(validate_file_name("com.x_y_1.0.jar").is_ok());
    }

    #[test]
    fn test_walk_filters_by_suffix() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("a.log"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.log"), "c").unwrap();

        let mut names: Vec<String> = walk_with_suffix(dir.path(), ".log")
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.log", "c.log"]);
    }

    #[test]
    fn test_walk_missing_dir_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        assert!(walk_with_suffix(&missing, ".log").is_err());
    }
}
