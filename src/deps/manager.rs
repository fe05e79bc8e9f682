//! External dependency-installation collaborators.
//!
//! Engine and registry-coordinate installs are delegated to a fetcher
//! outside this process; the console only composes the request.

use std::path::PathBuf;
use std::process::Command;

use crate::error::ConsoleError;
use crate::logger;

/// Collaborator that fetches and installs dependencies the console cannot
/// produce locally: named engine runtimes and registry coordinates.
pub trait DependencyManager: Send + Sync {
    /// Install a named compute-engine runtime.
    fn install_engine(&self, engine: &str) -> Result<(), ConsoleError>;

    /// Fetch and install the artifact named by a `group:artifact:version`
    /// coordinate.
    fn install_package(&self, coordinate: &str) -> Result<(), ConsoleError>;
}

/// Installer backed by an external fetcher command.
///
/// Runs `<installer> engine <name>` or `<installer> package <coordinate>
/// <deps-dir>` and treats a non-zero exit as failure. With no installer
/// configured both delegated modes fail; binary uploads never take this
/// path.
pub struct CommandDependencyManager {
    installer: Option<String>,
    deps_dir: PathBuf,
}

impl CommandDependencyManager {
    pub const fn new(installer: Option<String>, deps_dir: PathBuf) -> Self {
        Self {
            installer,
            deps_dir,
        }
    }

    fn installer(&self) -> Result<&str, ConsoleError> {
        self.installer.as_deref().ok_or_else(|| {
            ConsoleError::Internal("No dependency installer is configured".to_string())
        })
    }

    fn run(&self, command: &mut Command) -> Result<(), ConsoleError> {
        let status = command
            .status()
            .map_err(|e| ConsoleError::internal("Failed to run dependency installer", &e))?;
        if status.success() {
            Ok(())
        } else {
            Err(ConsoleError::Internal(format!(
                "Dependency installer exited with {status}"
            )))
        }
    }
}

impl DependencyManager for CommandDependencyManager {
    fn install_engine(&self, engine: &str) -> Result<(), ConsoleError> {
        let installer = self.installer()?;
        logger::log_install_request(&format!("engine {engine}"));
        self.run(Command::new(installer).arg("engine").arg(engine))
    }

    fn install_package(&self, coordinate: &str) -> Result<(), ConsoleError> {
        let installer = self.installer()?;
        logger::log_install_request(&format!("package {coordinate}"));
        self.run(
            Command::new(installer)
                .arg("package")
                .arg(coordinate)
                .arg(&self.deps_dir),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_installer_fails_delegated_modes() {
        let manager = CommandDependencyManager::new(None, PathBuf::from("deps"));
        assert!(matches!(
            manager.install_engine("OnnxRuntime"),
            Err(ConsoleError::Internal(_))
        ));
        assert!(matches!(
            manager.install_package("com.x:y:1.0"),
            Err(ConsoleError::Internal(_))
        ));
    }
}
