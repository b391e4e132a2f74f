//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

mod cli;

pub use cli::{CliArgs, Command, OutputFormat, PreviewArgs, PreviewOverrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "nbglance";
pub(crate) const DEFAULT_CONVERTER_EXECUTABLE: &str = "nbtohtml";

/// Fully validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub converter: ConverterSettings,
    pub assets: AssetSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ConverterSettings {
    /// Converter executable, either absolute or resolved via `PATH`.
    pub executable: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AssetSettings {
    /// When set, preview assets are read from this directory instead of the
    /// embedded bundle.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("NBGLANCE").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match &cli.command {
        Command::Preview(args) => raw.apply_preview_overrides(&args.overrides),
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    converter: RawConverterSettings,
    assets: RawAssetSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawConverterSettings {
    executable: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAssetSettings {
    directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl RawSettings {
    fn apply_preview_overrides(&mut self, overrides: &PreviewOverrides) {
        if let Some(path) = overrides.converter_path.as_ref() {
            self.converter.executable = Some(path.clone());
        }
        if let Some(dir) = overrides.assets_dir.as_ref() {
            self.assets.directory = Some(dir.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            converter,
            assets,
            logging,
        } = raw;

        let converter = build_converter_settings(converter)?;
        let assets = build_asset_settings(assets)?;
        let logging = build_logging_settings(logging)?;

        Ok(Self {
            converter,
            assets,
            logging,
        })
    }
}

fn build_converter_settings(
    converter: RawConverterSettings,
) -> Result<ConverterSettings, LoadError> {
    let executable = converter
        .executable
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONVERTER_EXECUTABLE));
    if executable.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "converter.executable",
            "path must not be empty",
        ));
    }

    Ok(ConverterSettings { executable })
}

fn build_asset_settings(assets: RawAssetSettings) -> Result<AssetSettings, LoadError> {
    if let Some(directory) = assets.directory.as_ref()
        && directory.as_os_str().is_empty()
    {
        return Err(LoadError::invalid(
            "assets.directory",
            "path must not be empty",
        ));
    }

    Ok(AssetSettings {
        directory: assets.directory,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}
