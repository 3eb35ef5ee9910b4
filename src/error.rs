use std::io;

use crate::run::config::ImageType;

/// Exit code reported when the runner is interrupted from the terminal.
pub(crate) const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, thiserror::Error)]
pub(crate) enum RunnerError {
    #[error("BIOS boot is only supported for x86_64")]
    UnsupportedBiosArch,
    #[error("Invalid image type '{0}'")]
    InvalidImageType(String),
    #[error("Could not find file '{0}'")]
    ExecutableNotFound(String),
    #[error("Interrupted")]
    Interrupted,
    #[error("Failed to create log directory '{path}': {source}")]
    LogDirectory {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

impl RunnerError {
    /// Process exit code for this error
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            RunnerError::Interrupted => EXIT_INTERRUPTED,
            _ => 1,
        }
    }

    /// Additional diagnostic line printed after the error itself
    pub(crate) fn hint(&self) -> Option<String> {
        match self {
            RunnerError::InvalidImageType(_) => {
                Some(format!("Supported types are {}", ImageType::SUPPORTED))
            }
            _ => None,
        }
    }
}
