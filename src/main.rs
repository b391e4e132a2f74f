use std::{
    fs,
    io::Write,
    path::Path,
    process,
};

use nbglance::{
    application::{error::AppError, preview::NotebookPreviewer},
    config::{self, Command, OutputFormat, PreviewArgs, Settings},
    infra::telemetry,
    presentation::page,
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    match cli_args.command {
        Command::Preview(args) => run_preview(&args, &settings),
    }
}

fn run_preview(args: &PreviewArgs, settings: &Settings) -> Result<(), AppError> {
    // The converter contract wants an absolute notebook path.
    let notebook = fs::canonicalize(&args.file)?;

    let previewer = NotebookPreviewer::from_settings(settings);
    let document = previewer.preview(&notebook)?;

    let rendered = match args.format {
        OutputFormat::Html => page::render_page(&page_title(&args.file), &document)?,
        OutputFormat::Json => serde_json::to_string_pretty(&document)?,
    };

    match args.output.as_ref() {
        Some(path) => fs::write(path, rendered.as_bytes())?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    info!(
        target = "main",
        op = "preview",
        result = "ok",
        notebook = %notebook.display(),
        stylesheets = document.stylesheets.len(),
        scripts = document.scripts.len(),
        "Preview generated"
    );
    Ok(())
}

fn page_title(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}
