use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::Instant,
};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("converter executable unavailable: {0}")]
    NotFound(io::Error),
    #[error("failed to run converter: {0}")]
    Io(io::Error),
    #[error("converter invocation failed (exit {exit_code:?}): {stderr}")]
    Exit {
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// Wrapper around the external `nbtohtml` executable. Conversion blocks the
/// calling thread until the subprocess exits; time-boxing is the caller's
/// responsibility.
#[derive(Debug, Clone)]
pub struct NotebookConverter {
    executable: PathBuf,
}

impl NotebookConverter {
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }

    /// Convert a notebook to HTML by invoking `<executable> convert <path>`.
    ///
    /// Stdout is the HTML payload. Launch failures, non-zero exits, and I/O
    /// errors all abort the conversion; there is no retry and no fallback.
    pub fn convert(&self, notebook: &Path) -> Result<String, ConvertError> {
        let started_at = Instant::now();
        let output = Command::new(&self.executable)
            .arg("convert")
            .arg(notebook)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|err| {
                warn!(
                    target = "application::preview::convert",
                    op = "convert::run",
                    result = "error",
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    error_code = "spawn_converter",
                    notebook = %notebook.display(),
                    error = %err,
                    "Failed to spawn notebook converter"
                );
                if err.kind() == ErrorKind::NotFound {
                    ConvertError::NotFound(err)
                } else {
                    ConvertError::Io(err)
                }
            })?;

        if !output.status.success() {
            let exit_code = output.status.code();
            let exit_code_value = exit_code.map(i64::from).unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            warn!(
                target = "application::preview::convert",
                op = "convert::run",
                result = "error",
                elapsed_ms = started_at.elapsed().as_millis() as u64,
                exit_code = exit_code_value,
                error_code = "converter_exit",
                notebook = %notebook.display(),
                stderr = %stderr,
                "Notebook converter invocation failed"
            );
            return Err(ConvertError::Exit { exit_code, stderr });
        }

        let html = String::from_utf8_lossy(&output.stdout).into_owned();
        if html.is_empty() {
            // A zero exit without output usually means an empty notebook, but
            // it can also hide a converter bug, so it is surfaced loudly.
            warn!(
                target = "application::preview::convert",
                op = "convert::run",
                result = "empty_output",
                elapsed_ms = started_at.elapsed().as_millis() as u64,
                notebook = %notebook.display(),
                "Notebook converter exited cleanly but produced no HTML"
            );
        } else {
            info!(
                target = "application::preview::convert",
                op = "convert::run",
                result = "ok",
                elapsed_ms = started_at.elapsed().as_millis() as u64,
                notebook = %notebook.display(),
                html_bytes = html.len(),
                "Notebook converted"
            );
        }

        Ok(html)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::{fs, os::unix::fs::PermissionsExt};

    use tempfile::TempDir;

    use super::*;

    fn write_script(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("fake-nbtohtml");
        fs::write(&path, body).expect("write script");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("set perms");
        path
    }

    #[test]
    fn captures_stdout_as_html() {
        let dir = TempDir::new().expect("temp dir");
        let script = write_script(&dir, "#!/bin/sh\nprintf '<p>hello</p>'\n");

        let converter = NotebookConverter::new(script);
        let html = converter
            .convert(Path::new("/tmp/demo.ipynb"))
            .expect("conversion succeeds");
        assert_eq!(html, "<p>hello</p>");
    }

    #[test]
    fn passes_convert_subcommand_and_notebook_path() {
        let dir = TempDir::new().expect("temp dir");
        let args_path = dir.path().join("args.log");
        let script = write_script(
            &dir,
            &format!("#!/bin/sh\nprintf '%s ' \"$@\" > {}\n", args_path.display()),
        );

        let converter = NotebookConverter::new(script);
        converter
            .convert(Path::new("/tmp/demo.ipynb"))
            .expect("conversion succeeds");

        let recorded = fs::read_to_string(&args_path).expect("args recorded");
        assert_eq!(recorded.trim(), "convert /tmp/demo.ipynb");
    }

    #[test]
    fn nonzero_exit_surfaces_exit_code_and_stderr() {
        let dir = TempDir::new().expect("temp dir");
        let script = write_script(&dir, "#!/bin/sh\necho 'malformed notebook' >&2\nexit 3\n");

        let converter = NotebookConverter::new(script);
        let error = converter
            .convert(Path::new("/tmp/demo.ipynb"))
            .expect_err("conversion fails");

        match error {
            ConvertError::Exit { exit_code, stderr } => {
                assert_eq!(exit_code, Some(3));
                assert!(stderr.contains("malformed notebook"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_executable_maps_to_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let converter = NotebookConverter::new(dir.path().join("absent-converter"));

        let error = converter
            .convert(Path::new("/tmp/demo.ipynb"))
            .expect_err("spawn fails");
        assert!(matches!(error, ConvertError::NotFound(_)));
    }

    #[test]
    fn clean_exit_without_output_yields_empty_html() {
        let dir = TempDir::new().expect("temp dir");
        let script = write_script(&dir, "#!/bin/sh\nexit 0\n");

        let converter = NotebookConverter::new(script);
        let html = converter
            .convert(Path::new("/tmp/demo.ipynb"))
            .expect("conversion succeeds");
        assert!(html.is_empty());
    }
}
