//! Command line and config file settings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use directories::ProjectDirs;
use ratatui::style::Color;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "lapwatch";
const APP_NAME: &str = "lapwatch";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Parser)]
#[command(
    name = "lapwatch",
    version,
    about = "Terminal stopwatch with lap times",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Display refresh period in milliseconds while running.
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Trace => log::LevelFilter::Trace,
            Self::Debug => log::LevelFilter::Debug,
            Self::Info => log::LevelFilter::Info,
            Self::Warn => log::LevelFilter::Warn,
            Self::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Lap highlight colors. Values are color names or `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_fastest")]
    pub fastest: String,
    #[serde(default = "default_slowest")]
    pub slowest: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

fn default_fastest() -> String {
    "#4BC05F".to_string()
}

fn default_slowest() -> String {
    "#CC3531".to_string()
}

fn default_accent() -> String {
    "#50D167".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            fastest: default_fastest(),
            slowest: default_slowest(),
            accent: default_accent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_tick_ms() -> u64 {
    lap_core::DEFAULT_TICK_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::default(),
            tick_ms: default_tick_ms(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config file named by `args` (or the default one) and
    /// applies command line overrides on top.
    ///
    /// A missing default file is not an error; a missing explicit file is.
    pub fn load(args: CliArgs) -> AppResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_args(&mut self, args: CliArgs) {
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(tick_ms) = args.tick_ms {
            self.tick_ms = tick_ms;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.tick_ms == 0 {
            return Err(AppError::InvalidConfig {
                message: "tick_ms must be greater than zero".to_string(),
            });
        }
        for (name, value) in [
            ("fastest", &self.theme.fastest),
            ("slowest", &self.theme.slowest),
            ("accent", &self.theme.accent),
        ] {
            if Color::from_str(value).is_err() {
                return Err(AppError::InvalidConfig {
                    message: format!("theme.{name}: unknown color {value:?}"),
                });
            }
        }
        Ok(())
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("lapwatch.log"))
    }

    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

/// Creates the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_args() -> CliArgs {
        CliArgs {
            config: None,
            log_path: None,
            log_level: None,
            tick_ms: None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.theme.fastest, "#4BC05F");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let content = r#"
            log_level = "debug"

            [theme]
            slowest = "magenta"
        "#;
        let config = AppConfig::parse(content, Path::new("config.toml")).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.theme.slowest, "magenta");
        assert_eq!(config.theme.fastest, "#4BC05F");
    }

    #[test]
    fn test_args_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_ms = 250\nlog_level = \"warn\"").unwrap();

        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            tick_ms: Some(50),
            ..no_args()
        };
        let config = AppConfig::load(args).unwrap();
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            config: Some(dir.path().join("nope.toml")),
            ..no_args()
        };
        assert!(matches!(AppConfig::load(args), Err(AppError::ConfigRead { .. })));
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let err = AppConfig::parse("tick_ms = \"fast\"", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
    }

    #[test]
    fn test_zero_tick_is_rejected() {
        let config = AppConfig {
            tick_ms: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig { .. })));
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let mut config = AppConfig::default();
        config.theme.accent = "not-a-color".to_string();
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig { .. })));
    }

    #[test]
    fn test_default_paths_are_under_the_project() {
        let Some(config_path) = AppConfig::default_config_path() else {
            return;
        };
        assert!(config_path.ends_with("config.toml"));
        assert!(config_path.to_string_lossy().contains(APP_NAME));

        let log_path = AppConfig::default_log_path().unwrap();
        assert!(log_path.ends_with("lapwatch.log"));
    }

    #[test]
    fn test_log_path_override() {
        let mut config = AppConfig::default();
        config.apply_args(CliArgs {
            log_path: Some(PathBuf::from("/tmp/lapwatch.log")),
            ..no_args()
        });
        assert_eq!(config.effective_log_path(), Some(PathBuf::from("/tmp/lapwatch.log")));
    }
}
