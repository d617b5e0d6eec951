use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::Dataset;
use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT};

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Single dataset database section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatasetFileConfig {
    pub path: Option<String>,
}

/// Datasets configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatasetsFileConfig {
    pub air_quality: Option<DatasetFileConfig>,
    pub solar: Option<DatasetFileConfig>,
    pub darksky: Option<DatasetFileConfig>,
}

impl DatasetsFileConfig {
    fn path(&self, dataset: Dataset) -> Option<&str> {
        let section = match dataset {
            Dataset::AirQuality => self.air_quality.as_ref(),
            Dataset::Solar => self.solar.as_ref(),
            Dataset::Darksky => self.darksky.as_ref(),
        };
        section.and_then(|s| s.path.as_deref())
    }

    fn section_mut(&mut self, dataset: Dataset) -> &mut Option<DatasetFileConfig> {
        match dataset {
            Dataset::AirQuality => &mut self.air_quality,
            Dataset::Solar => &mut self.solar,
            Dataset::Darksky => &mut self.darksky,
        }
    }
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub datasets: Option<DatasetsFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(mut datasets) = other.datasets {
            let current = self
                .datasets
                .get_or_insert_with(DatasetsFileConfig::default);
            for dataset in Dataset::ALL {
                if let Some(section) = datasets.section_mut(dataset).take()
                    && section.path.is_some()
                {
                    tracing::trace!(
                        dataset = dataset.config_key(),
                        path = ?section.path,
                        "Merging datasets path"
                    );
                    *current.section_mut(dataset) = Some(section);
                }
            }
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Resolved SQLite file for every dataset
#[derive(Debug, Clone)]
pub struct DatasetsConfig {
    pub air_quality: PathBuf,
    pub solar: PathBuf,
    pub darksky: PathBuf,
}

impl DatasetsConfig {
    pub fn path(&self, dataset: Dataset) -> &Path {
        match dataset {
            Dataset::AirQuality => &self.air_quality,
            Dataset::Solar => &self.solar,
            Dataset::Darksky => &self.darksky,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub datasets: DatasetsConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.urbanhome/urbanhome.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        Self::resolve(cli, file_config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn resolve(cli: &CliConfig, file_config: FileConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_datasets = file_config.datasets.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let dataset_path = |dataset: Dataset| -> Result<PathBuf> {
            let from_cli = match dataset {
                Dataset::AirQuality => cli.air_quality_db.as_ref(),
                Dataset::Solar => cli.solar_db.as_ref(),
                Dataset::Darksky => cli.darksky_db.as_ref(),
            };
            from_cli
                .map(|p| p.to_string_lossy().into_owned())
                .or_else(|| file_datasets.path(dataset).map(str::to_string))
                .filter(|p| !p.trim().is_empty())
                .map(|p| expand_path(&p))
                .with_context(|| {
                    format!(
                        "No database configured for {}. Set datasets.{}.path in {} or pass --{}-db",
                        dataset,
                        dataset.config_key(),
                        CONFIG_FILE_NAME,
                        dataset.slug()
                    )
                })
        };

        let datasets = DatasetsConfig {
            air_quality: dataset_path(Dataset::AirQuality)?,
            solar: dataset_path(Dataset::Solar)?,
            darksky: dataset_path(Dataset::Darksky)?,
        };

        // debug: CLI/env flag takes precedence, then file config, default false
        let debug = cli.debug || file_config.debug.unwrap_or(false);

        let config = Self {
            server: ServerConfig { host, port },
            datasets,
            debug,
        };
        tracing::debug!(config = ?config, "Configuration resolved");
        Ok(config)
    }
}

fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(json: &str) -> FileConfig {
        serde_json::from_str(json).unwrap()
    }

    const FULL_JSON: &str = r#"{
        "server": { "host": "0.0.0.0", "port": 8080 },
        "datasets": {
            "air_quality": { "path": "/data/air.db" },
            "solar": { "path": "/data/solar.db" },
            "darksky": { "path": "/data/darksky.db" }
        },
        "debug": true
    }"#;

    #[test]
    fn test_file_config_parse_full() {
        let config = file_config(FULL_JSON);

        assert_eq!(
            config.server.as_ref().unwrap().host,
            Some("0.0.0.0".to_string())
        );
        assert_eq!(config.server.as_ref().unwrap().port, Some(8080));
        let datasets = config.datasets.as_ref().unwrap();
        assert_eq!(datasets.path(Dataset::Solar), Some("/data/solar.db"));
        assert_eq!(config.debug, Some(true));
    }

    #[test]
    fn test_file_config_parse_empty() {
        let config = file_config("{}");
        assert!(config.server.is_none());
        assert!(config.datasets.is_none());
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let config = file_config(r#"{ "server": { "host": "localhost" }, "unknown_field": 123 }"#);
        assert_eq!(config.extra.get("unknown_field").unwrap(), 123);
    }

    #[test]
    fn test_file_config_merge() {
        let mut base = file_config(FULL_JSON);
        base.merge(file_config(
            r#"{
                "server": { "port": 9000 },
                "datasets": { "solar": { "path": "/other/solar.db" }, "darksky": {} }
            }"#,
        ));

        let server = base.server.as_ref().unwrap();
        assert_eq!(server.host, Some("0.0.0.0".to_string()));
        assert_eq!(server.port, Some(9000));

        let datasets = base.datasets.as_ref().unwrap();
        assert_eq!(datasets.path(Dataset::AirQuality), Some("/data/air.db"));
        assert_eq!(datasets.path(Dataset::Solar), Some("/other/solar.db"));
        // Empty section does not clear an earlier path
        assert_eq!(datasets.path(Dataset::Darksky), Some("/data/darksky.db"));
    }

    #[test]
    fn test_resolve_defaults_and_file() {
        let config = AppConfig::resolve(
            &CliConfig::default(),
            file_config(
                r#"{ "datasets": {
                    "air_quality": { "path": "/data/air.db" },
                    "solar": { "path": "/data/solar.db" },
                    "darksky": { "path": "/data/darksky.db" }
                } }"#,
            ),
        )
        .unwrap();

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(
            config.datasets.path(Dataset::Darksky),
            Path::new("/data/darksky.db")
        );
        assert!(!config.debug);
    }

    #[test]
    fn test_resolve_cli_overrides_file() {
        let cli = CliConfig {
            host: Some("10.0.0.5".to_string()),
            port: Some(7000),
            air_quality_db: Some(PathBuf::from("/cli/air.db")),
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, file_config(FULL_JSON)).unwrap();

        assert_eq!(config.server.host, "10.0.0.5");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.datasets.air_quality, PathBuf::from("/cli/air.db"));
        assert_eq!(config.datasets.solar, PathBuf::from("/data/solar.db"));
        assert!(config.debug);
    }

    #[test]
    fn test_resolve_missing_dataset_names_it() {
        let err = AppConfig::resolve(
            &CliConfig::default(),
            file_config(
                r#"{ "datasets": {
                    "air_quality": { "path": "/data/air.db" },
                    "darksky": { "path": "/data/darksky.db" }
                } }"#,
            ),
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("solar"), "{message}");
        assert!(message.contains("--solar-db"), "{message}");
    }

    #[test]
    fn test_load_from_cli_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, FULL_JSON).unwrap();

        let cli = CliConfig {
            config: Some(path),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_missing_cli_config_path() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
