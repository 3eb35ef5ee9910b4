use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use log::debug;

use crate::{
    cli::{DebugconMode, LogMode, SerialMode},
    error::RunnerError,
    run::config::RunConfig,
};

/// Directory (relative to the working directory) that holds all log files
pub(crate) const LOG_ROOT: &str = "qemu-runner";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Formats `time` as used in log file names (`YYYY-MM-DD_HH-MM-SS`).
pub(crate) fn timestamp(time: DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Log file paths of a single run. All paths share the same timestamp.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct LogFiles {
    pub debugcon: Option<PathBuf>,
    pub log: Option<PathBuf>,
    pub serial: Option<PathBuf>,
}

impl LogFiles {
    /// Resolves the log files requested by `config` under `root` and creates their
    /// parent directories.
    pub(crate) fn prepare(
        config: &RunConfig,
        root: &Path,
        timestamp: &str,
    ) -> Result<Self, RunnerError> {
        let mut files = LogFiles::default();
        if !config.needs_log_files() {
            return Ok(files);
        }

        let file_name = format!("{timestamp}.log");

        if config.debugcon == Some(DebugconMode::File) {
            files.debugcon = Some(log_file_path(root, "debugcon", &file_name)?);
        }
        if config.log == Some(LogMode::File) {
            files.log = Some(log_file_path(root, "log", &file_name)?);
        }
        if config.serial == Some(SerialMode::File) {
            files.serial = Some(log_file_path(root, "serial", &file_name)?);
        }

        Ok(files)
    }
}

/// Returns `root/category/file_name`, creating `root/category` if it does not exist yet.
fn log_file_path(root: &Path, category: &str, file_name: &str) -> Result<PathBuf, RunnerError> {
    let dir = root.join(category);
    debug!("Using log directory {}", dir.display());

    fs::create_dir_all(&dir).map_err(|source| RunnerError::LogDirectory {
        path: dir.to_string_lossy().into_owned(),
        source,
    })?;

    Ok(dir.join(file_name))
}
