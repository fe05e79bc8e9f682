// Console configuration module
// Settings load and the state shared across requests

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::deps::{CodeRegistry, CommandDependencyManager, DependencyManager, LibraryRegistry};

/// Main settings structure
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub console: ConsoleSettings,
    pub logging: LoggingSettings,
    pub performance: PerformanceSettings,
    #[serde(default)]
    pub dependency: DependencySettings,
}

/// Listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Console-specific settings: the server home the managed directories live
/// under, the configuration file the console passes through, and the
/// inference endpoint it advertises.
#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleSettings {
    pub home: String,
    pub config_file: Option<String>,
    pub inference_address: String,
    pub cors_allowed_origin: String,
    pub cors_allowed_methods: String,
    pub cors_allowed_headers: String,
    pub engine_version: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub access_log: bool,
}

/// Connection timing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceSettings {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

/// Dependency installer configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DependencySettings {
    pub installer: Option<String>,
}

impl Settings {
    /// Load settings from the default `console.toml` location.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("console")
    }

    /// Load settings from the specified file path (without extension),
    /// layered with `SERVING_`-prefixed environment variables and defaults.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVING"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8081)?
            .set_default("console.home", ".")?
            .set_default("console.inference_address", "http://127.0.0.1:8080")?
            .set_default("console.cors_allowed_origin", "")?
            .set_default("console.cors_allowed_methods", "")?
            .set_default("console.cors_allowed_headers", "")?
            .set_default("console.engine_version", env!("CARGO_PKG_VERSION"))?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Log directory under the server home.
    pub fn logs_dir(&self) -> PathBuf {
        Path::new(&self.console.home).join("logs")
    }

    /// Installed-dependency directory under the server home.
    pub fn deps_dir(&self) -> PathBuf {
        Path::new(&self.console.home).join("deps")
    }

    /// Upload directory under the server home.
    pub fn upload_dir(&self) -> PathBuf {
        Path::new(&self.console.home).join("upload")
    }
}

/// State shared by every request: settings plus the installation
/// collaborators the dependency operations delegate to.
pub struct AppState {
    pub settings: Settings,
    pub manager: Arc<dyn DependencyManager>,
    pub registry: Arc<dyn CodeRegistry>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let manager = Arc::new(CommandDependencyManager::new(
            settings.dependency.installer.clone(),
            settings.deps_dir(),
        ));
        Self {
            manager,
            registry: Arc::new(LibraryRegistry::new()),
            settings,
        }
    }

    /// Build state over explicit collaborators; used by tests and embedders.
    pub fn with_collaborators(
        settings: Settings,
        manager: Arc<dyn DependencyManager>,
        registry: Arc<dyn CodeRegistry>,
    ) -> Self {
        Self {
            settings,
            manager,
            registry,
        }
    }
}
