//! Logging System
//!
//! Structured logging implementation using the `tracing` crate. Provides an
//! env-filtered fmt layer with optional file output.

use crate::error::MirrorError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Resolve the log file path with precedence: explicit path,
/// `INVMIRROR_LOG_FILE` env, platform state directory default.
pub fn resolve_log_file_path(explicit: Option<PathBuf>) -> Result<PathBuf, MirrorError> {
    if let Some(p) = explicit {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    if let Ok(env_path) = std::env::var("INVMIRROR_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    default_log_file_path()
}

fn default_log_file_path() -> Result<PathBuf, MirrorError> {
    let project_dirs = directories::ProjectDirs::from("", "invmirror", "invmirror").ok_or_else(
        || {
            MirrorError::Config(
                "Could not determine platform state directory for log file".to_string(),
            )
        },
    )?;
    let dir = project_dirs
        .state_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_dirs.data_dir().to_path_buf());
    Ok(dir.join("invmirror.log"))
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` overrides `default_level`. When `log_file` is set, output goes
/// there without ANSI escapes; otherwise to stderr.
pub fn init(default_level: &str, log_file: Option<&Path>) -> Result<(), MirrorError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    MirrorError::Config(format!("Failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| MirrorError::Config(format!("Failed to open log file: {}", e)))?;
            Registry::default()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
                .try_init()
                .map_err(|e| MirrorError::Config(format!("Failed to init logging: {}", e)))
        }
        None => Registry::default()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| MirrorError::Config(format!("Failed to init logging: {}", e))),
    }
}
