use crate::{models::notice::Notice, services::metadata_gateway::GatewayError};
use std::{fmt, process::ExitCode};

/// Failure of a console command: the line printed on stderr and the process
/// exit status.
#[derive(Debug)]
pub struct AppError {
    pub exit_code: u8,
    pub message: String,
}

impl AppError {
    /// Build a failure that ends the process with `exit_code`.
    pub fn new(exit_code: u8, msg: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: msg.into(),
        }
    }

    /// Shortcut for a generic failure (exit code 1)
    pub fn failure(msg: impl Into<String>) -> Self {
        Self::new(1, msg)
    }

    /// Shortcut for bad user input (exit code 2)
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(2, msg)
    }

    /// Shortcut for a record that is not in the loaded set (exit code 3)
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(3, msg)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_code)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::failure(format!("{:#}", err))
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::failure(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::failure(format!("terminal I/O failed: {}", err))
    }
}

impl From<Notice> for AppError {
    fn from(notice: Notice) -> Self {
        AppError::failure(notice.text)
    }
}
