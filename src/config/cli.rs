use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the nbglance binary.
#[derive(Debug, Parser)]
#[command(name = "nbglance", version, about = "Jupyter notebook preview generator")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "NBGLANCE_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a preview document for a notebook file.
    Preview(Box<PreviewArgs>),
}

#[derive(Debug, Args, Clone)]
pub struct PreviewArgs {
    /// Notebook file to preview.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Write the rendered output to this path instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output format for the assembled preview.
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub overrides: PreviewOverrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page with embedded styles and scripts.
    Html,
    /// JSON dump of the assembled preview document.
    Json,
}

#[derive(Debug, Args, Default, Clone)]
pub struct PreviewOverrides {
    /// Override the notebook converter executable.
    #[arg(long = "converter-path", value_name = "PATH")]
    pub converter_path: Option<PathBuf>,

    /// Read preview assets from this directory instead of the embedded bundle.
    #[arg(long = "assets-dir", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub assets_dir: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}
