use thiserror::Error;

/// Failures raised while carrying out a parsed action on the desktop.
///
/// The `Display` text is what a failed [`crate::CommandEntry`] reports as
/// its output, so messages are kept short and user-facing.
#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("unrecognized command")]
    UnrecognizedCommand,

    #[error("unsupported target: {0}")]
    UnsupportedTarget(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("platform error: {0}")]
    PlatformError(String),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

/// Errors surfaced to callers of the command intake.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("unauthorized request")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Execution(#[from] AutomationError),
}
