use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "PRD_CONFIG_PATH";

/// Environment variable overriding the persisted document location
pub const STORAGE_PATH_ENV: &str = "PRD_STORAGE_PATH";

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

/// User configuration for the PRD builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where the working document is persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    /// Directory that exported markdown files are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            export_dir: default_export_dir(),
        }
    }
}

impl Config {
    /// Loads the config from the provided path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Save the config to the specified path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(&self)?;

        // Ensure parent directories exist
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Creates a default config file if it doesn't exist
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        if path.as_ref().exists() {
            return Ok(());
        }
        Self::default().save(path)
    }

    /// Loads the config, writing the defaults first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_default(&path)?;
        Self::load(path)
    }
}

/// Gets the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let env_path = std::env::var(CONFIG_PATH_ENV).ok();
    resolve_config_path(env_path.as_deref())
}

/// Picks the config file path; an empty environment value counts as unset
pub fn resolve_config_path(env_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    // Default to ~/.prd-builder.config
    let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

    Ok(home_dir.join(".prd-builder.config"))
}

/// Default location of the persisted document
pub fn default_storage_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .context("Failed to determine a data directory")?;

    Ok(data_dir.join("prd-builder").join("prd.yaml"))
}

/// Picks the persistence path from the available sources
///
/// Priority: command line, then environment, then config file, then the
/// default data directory.
pub fn resolve_storage_path(
    cli_path: Option<&Path>,
    env_path: Option<&str>,
    config: &Config,
) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = &config.storage_path {
        return Ok(path.clone());
    }

    default_storage_path()
}

/// Determines the persistence path using the process environment
pub fn determine_storage_path(cli_path: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let env_path = std::env::var(STORAGE_PATH_ENV).ok();
    resolve_storage_path(cli_path, env_path.as_deref(), config)
}
