//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/ftwhub/config.toml` by default. Command-line flags take
//! precedence over the file.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use ftwhub_core::{TracingConfig, TracingOutputFormat};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Configuration for the ftwhub client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Directory holding the YAML data files.
    pub data_dir: Option<PathBuf>,

    /// Debug mode.
    pub debug: bool,

    /// Format of log lines on stderr.
    pub log_format: LogFormat,

    /// Output settings.
    pub output: OutputSettings,
}

/// Log line format, selectable with `--log-format` or `log_format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

/// Settings for rendered output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if it does not exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ftwhub")
    }

    /// Tracing setup for this run. Command-line values take precedence.
    ///
    /// Debug mode forces debug level for ftwhub crates, overriding RUST_LOG.
    pub fn tracing_config(&self, debug: bool, log_format: Option<LogFormat>) -> TracingConfig {
        let format = log_format.unwrap_or(self.log_format).into();
        if debug || self.debug {
            let config = TracingConfig::cli_debug().with_format(format);
            let directive = config.default_directive();
            config.with_env_filter(directive)
        } else {
            TracingConfig::default().with_format(format)
        }
    }

    /// Checks the settings for problems that would only surface later.
    pub fn validate(&self) -> ClientResult<()> {
        if let Some(ref dir) = self.data_dir
            && !dir.is_dir()
        {
            return Err(ClientError::Config(format!(
                "data_dir {} is not a directory",
                dir.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(config.data_dir.is_none());
        assert!(!config.output.pretty);
    }

    #[test]
    fn parses_all_settings() {
        let config: ClientConfig = toml::from_str(
            r#"
data_dir = "/srv/ftw/data"
debug = true
log_format = "json"

[output]
pretty = true
"#,
        )
        .unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/ftw/data")));
        assert!(config.debug);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.output.pretty);
    }

    mod tracing_setup {
        use super::*;

        #[test]
        fn defaults_to_compact_warn() {
            let tracing = ClientConfig::default().tracing_config(false, None);
            assert_eq!(tracing.output_format, TracingOutputFormat::Compact);
            assert_eq!(tracing.default_directive(), "ftwhub=WARN");
            assert!(tracing.env_filter.is_none());
        }

        #[test]
        fn log_format_from_file() {
            let config: ClientConfig = toml::from_str("log_format = \"pretty\"").unwrap();
            let tracing = config.tracing_config(false, None);
            assert_eq!(tracing.output_format, TracingOutputFormat::Pretty);
        }

        #[test]
        fn command_line_format_wins() {
            let config = ClientConfig {
                log_format: LogFormat::Pretty,
                ..Default::default()
            };
            let tracing = config.tracing_config(false, Some(LogFormat::Json));
            assert_eq!(tracing.output_format, TracingOutputFormat::Json);
        }

        #[test]
        fn debug_keeps_format_and_forces_level() {
            let tracing = ClientConfig::default().tracing_config(true, Some(LogFormat::Json));
            assert_eq!(tracing.output_format, TracingOutputFormat::Json);
            assert_eq!(tracing.env_filter.as_deref(), Some("ftwhub=DEBUG"));
        }

        #[test]
        fn unknown_format_in_file_is_rejected() {
            assert!(toml::from_str::<ClientConfig>("log_format = \"xml\"").is_err());
        }
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "debug = \"yes\"").unwrap();

        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn validate_checks_data_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = ClientConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.data_dir = Some(dir.path().join("missing"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn roundtrips_through_toml() {
        let config = ClientConfig {
            data_dir: Some(PathBuf::from("data")),
            debug: false,
            log_format: LogFormat::Json,
            output: OutputSettings { pretty: true },
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<ClientConfig>(&text).unwrap(), config);
    }
}
