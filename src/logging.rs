//! Logging bootstrap for the core.
//!
//! Library code logs through the `log` facade with metadata-only
//! `event=... module=... status=...` lines; list names and task titles are
//! never logged. Front ends that want persistent logs call [`init_logging`]
//! once at startup.

use anyhow::{anyhow, bail, Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "simple-todo";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts size-rotated file logging in `log_dir`.
///
/// Calling again with the same level and directory is a no-op; any other
/// combination is rejected because the process logger can only be set once.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<()> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.as_ref().to_path_buf();
    if log_dir.as_os_str().is_empty() {
        bail!("log directory cannot be empty");
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("failed to create log directory `{}`", log_dir.display()))?;

        let logger = Logger::try_with_str(level)
            .with_context(|| format!("invalid log level `{level}`"))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .context("failed to start logger")?;

        info!(
            "event=core_init module=logging status=ok level={} version={}",
            level,
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.clone(),
            _logger: logger,
        })
    })?;

    if state.log_dir != log_dir {
        return Err(anyhow!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        ));
    }
    if state.level != level {
        return Err(anyhow!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level,
            level
        ));
    }

    Ok(())
}

/// Returns `(level, log_dir)` once logging is active
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// `debug` for debug builds, `info` otherwise
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => bail!("unsupported log level `{other}`; expected trace|debug|info|warn|error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn test_empty_log_dir_is_rejected() {
        assert!(init_logging("info", "").is_err());
    }

    #[test]
    fn test_init_logging_is_idempotent_and_rejects_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let other_dir = temp_dir.path().join("other");

        init_logging("info", &log_dir).unwrap();
        init_logging("info", &log_dir).unwrap();

        let err = init_logging("debug", &log_dir).unwrap_err();
        assert!(err.to_string().contains("refusing to switch"));

        let err = init_logging("info", &other_dir).unwrap_err();
        assert!(err.to_string().contains("refusing to switch"));

        let (level, dir) = logging_status().unwrap();
        assert_eq!(level, "info");
        assert_eq!(dir, log_dir);
        assert!(log_dir.is_dir());
    }
}
