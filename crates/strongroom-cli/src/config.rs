use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct StrongroomConfig {
    pub storage: StorageSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub encryption: EncryptionSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageSection {
    pub path: String,
    #[serde(default)]
    pub commit_on_error: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingSection {
    pub file: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
        }
    }
}

/// Paths to the external cryptographic toolkit, one per host family.
///
/// Strongroom never invokes the toolkit; callers that encrypt payloads read
/// the path selected for the current OS.
#[derive(Debug, Serialize, Deserialize)]
pub struct EncryptionSection {
    #[serde(default = "default_openssl_windows")]
    pub openssl_path_windows: String,
    #[serde(default = "default_openssl_unix")]
    pub openssl_path_unix: String,
}

impl Default for EncryptionSection {
    fn default() -> Self {
        Self {
            openssl_path_windows: default_openssl_windows(),
            openssl_path_unix: default_openssl_unix(),
        }
    }
}

impl EncryptionSection {
    /// Toolkit path for the OS this binary runs on.
    pub fn openssl_path(&self) -> &str {
        if cfg!(windows) {
            &self.openssl_path_windows
        } else {
            &self.openssl_path_unix
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_openssl_windows() -> String {
    r"C:\Program Files\OpenSSL-Win64\bin\openssl.exe".to_string()
}

fn default_openssl_unix() -> String {
    "/usr/bin/openssl".to_string()
}

impl StrongroomConfig {
    pub fn new(db_path: PathBuf, log_file: Option<PathBuf>) -> Self {
        Self {
            storage: StorageSection {
                path: db_path.to_string_lossy().to_string(),
                commit_on_error: false,
            },
            logging: LoggingSection {
                file: log_file.map(|path| path.to_string_lossy().to_string()),
                level: default_log_level(),
            },
            encryption: EncryptionSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("strongroom.db"))
}

pub fn default_log_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("strongroom.log"))
}

pub fn read_config(path: &Path) -> anyhow::Result<StrongroomConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &StrongroomConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("strongroom"));
        }
    }
    Ok(home_dir()?.join(".config").join("strongroom"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("strongroom"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("strongroom"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
