//! Settings file for the `bds` tool.
//!
//! Settings live in `settings.toml` in the platform configuration folder:
//! - Linux: ~/.config/bdstoolkit/
//! - macOS: ~/Library/Application Support/org.bds.BDS-Toolkit/
//! - Windows: %APPDATA%/bds/BDS Toolkit/config/
//!
//! `--config <PATH>` points at a different file. Command-line flags always
//! win over values from the file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "bds";
const APP_NAME: &str = "BDS Toolkit";
const CONFIG_FILENAME: &str = "settings.toml";

/// Fallback data directory when no platform directory can be determined.
pub const FALLBACK_DATA_DIR: &str = "bds-data";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub report: ReportSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory holding the table files.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Allow donor and patient identifiers in log output.
    pub log_data: bool,
}

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl Settings {
    /// Data directory: explicit override, then the settings file, then the
    /// platform data folder.
    pub fn data_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.store.data_dir.clone())
            .unwrap_or_else(default_data_dir)
    }

    pub fn output_format(&self, override_format: Option<OutputFormat>) -> OutputFormat {
        override_format.unwrap_or(self.report.format)
    }
}

/// Where the settings were read from and what went wrong, if anything.
///
/// Loading happens before logging is set up, so problems are kept here and
/// reported once the subscriber exists.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: Option<PathBuf>,
    pub problem: Option<String>,
}

impl LoadedSettings {
    /// Log how the settings were obtained.
    pub fn log_outcome(&self) {
        match (&self.path, &self.problem) {
            (_, Some(problem)) => tracing::warn!("{problem}, using defaults"),
            (Some(path), None) => tracing::debug!(path = %path.display(), "loaded settings"),
            (None, None) => tracing::debug!("no settings file, using defaults"),
        }
    }
}

/// Default location of the settings file.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Default data directory for the row store.
pub fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("store"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

pub fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}

/// Load settings from `explicit` or the default location.
///
/// Falls back to defaults when the file is missing, unreadable or invalid.
pub fn load_settings(explicit: Option<&Path>) -> LoadedSettings {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(settings_path) else {
        return LoadedSettings {
            settings: Settings::default(),
            path: None,
            problem: None,
        };
    };

    let (settings, problem) = match fs::read_to_string(&path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => (settings, None),
            Err(e) => (
                Settings::default(),
                Some(format!("failed to parse {}: {e}", path.display())),
            ),
        },
        Err(e) if e.kind() == ErrorKind::NotFound && explicit.is_none() => {
            return LoadedSettings {
                settings: Settings::default(),
                path: None,
                problem: None,
            };
        }
        Err(e) => (
            Settings::default(),
            Some(format!("failed to read {}: {e}", path.display())),
        ),
    };
    LoadedSettings {
        settings,
        path: Some(path),
        problem,
    }
}
