use folio::gateway::{AiConfig, ImageBudget};
use folio::render_core::HttpConverterConfig;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub pdf: HttpConverterConfig,
    #[serde(default)]
    pub image: ImageBudget,
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
    /// Base path for resolving relative paths (set during loading)
    #[serde(skip)]
    base_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON blob per workspace key.
    pub path: PathBuf,
    pub max_blob_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConcurrencyConfig {
    /// Cap on concurrent provider calls in batch enhancement.
    pub max_ai_in_flight: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_ai_in_flight: 4,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        let mut base_path: Option<PathBuf> = None;

        // Check for environment variable override first
        if let Ok(config_path) = std::env::var("FOLIO_SERVICE_CONFIG") {
            if !config_path.is_empty() {
                let config_file = format!("{}.toml", config_path);
                if std::path::Path::new(&config_file).exists() {
                    builder = builder.add_source(config::File::with_name(&config_path));
                    // Use parent directory of the config dir as base
                    base_path = std::path::Path::new(&config_file)
                        .parent()
                        .and_then(|p| p.parent())
                        .map(|p| p.to_path_buf());
                }
            }
        }

        if base_path.is_none() {
            for (path, base) in [("config/default", "."), ("service/config/default", "service")] {
                if std::path::Path::new(&format!("{}.toml", path)).exists() {
                    builder = builder.add_source(config::File::with_name(path));
                    base_path = Some(PathBuf::from(base));
                    break;
                }
            }
        }

        // Always layer environment variables on top, e.g. FOLIO_SERVICE__AI__API_KEY
        builder = builder.add_source(
            config::Environment::with_prefix("FOLIO_SERVICE")
                .prefix_separator("__")
                .separator("__"),
        );

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        config.base_path = base_path;
        config.resolve_paths();

        Ok(config)
    }

    /// Rejects values that deserialize but cannot work at runtime.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.image
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("[image] {}", e)))
    }

    fn resolve_paths(&mut self) {
        if let Some(ref base) = self.base_path {
            if self.storage.path.is_relative() {
                let storage_path = self
                    .storage
                    .path
                    .strip_prefix("./")
                    .unwrap_or(&self.storage.path);
                self.storage.path = base.join(storage_path);
            }
        }
    }

    pub fn max_request_bytes(&self) -> usize {
        self.server.max_request_size_mb * 1024 * 1024
    }
}
