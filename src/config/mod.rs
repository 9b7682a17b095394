mod file_config;

pub use file_config::{FileConfig, SearchConfig};

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Settings that can come from the command line.
/// Anything set in the TOML config file takes precedence.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub records_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub no_autosave: bool,
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file with the records the catalog starts from.
    pub records_path: Option<PathBuf>,
    /// Where the records are written back after a mutation.
    pub snapshot_path: Option<PathBuf>,
    pub autosave: bool,
    pub case_sensitive: bool,
}

impl AppConfig {
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let records_path = file
            .records_path
            .map(PathBuf::from)
            .or_else(|| cli.records_path.clone());

        if let Some(path) = records_path.as_ref() {
            if !path.exists() {
                bail!("Records file does not exist: {:?}", path);
            }
            if !path.is_file() {
                bail!("Records path is not a file: {:?}", path);
            }
        }

        let snapshot_path = file
            .snapshot_path
            .map(PathBuf::from)
            .or_else(|| cli.snapshot_path.clone())
            .or_else(|| records_path.clone());

        let autosave = snapshot_path.is_some() && file.autosave.unwrap_or(!cli.no_autosave);

        let case_sensitive = file
            .search
            .and_then(|s| s.case_sensitive)
            .unwrap_or(cli.case_sensitive);

        Ok(Self {
            records_path,
            snapshot_path,
            autosave,
            case_sensitive,
        })
    }
}
