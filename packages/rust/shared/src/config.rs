//! Application configuration for regiontree.
//!
//! User config lives at `~/.regiontree/regiontree.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RegionTreeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "regiontree.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".regiontree";

// ---------------------------------------------------------------------------
// Config structs (matching regiontree.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// How the registry table is read.
    #[serde(default)]
    pub source: SourceConfig,

    /// Where and how region documents are written.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Header of the administrative code column.
    #[serde(default = "default_code_column")]
    pub code_column: String,

    /// Header of the full hierarchical name column.
    #[serde(default = "default_name_column")]
    pub name_column: String,

    /// Header of the exists/abolished flag column.
    #[serde(default = "default_status_column")]
    pub status_column: String,

    /// Status value marking a row as still in force.
    #[serde(default = "default_active_status")]
    pub active_status: String,

    /// Field delimiter. The full-dump `.txt` export is tab separated.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            code_column: default_code_column(),
            name_column: default_name_column(),
            status_column: default_status_column(),
            active_status: default_active_status(),
            delimiter: default_delimiter(),
        }
    }
}

impl SourceConfig {
    /// The delimiter as a single byte, as the CSV reader expects it.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(RegionTreeError::config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }
}

fn default_code_column() -> String {
    "법정동코드".into()
}
fn default_name_column() -> String {
    "법정동명".into()
}
fn default_status_column() -> String {
    "폐지여부".into()
}
fn default_active_status() -> String {
    "존재".into()
}
fn default_delimiter() -> char {
    ','
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory region documents are written into.
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// Pretty-print with two-space indentation.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            pretty: true,
        }
    }
}

fn default_output_dir() -> String {
    "output".into()
}
fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.regiontree/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| RegionTreeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.regiontree/regiontree.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| RegionTreeError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        RegionTreeError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    config.source.delimiter_byte()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| RegionTreeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| RegionTreeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| RegionTreeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
