//! Subprocess helpers shared by the platform engines

#![cfg_attr(
    not(any(target_os = "linux", target_os = "macos", target_os = "windows")),
    allow(dead_code)
)]

use crate::AutomationError;
use std::process::{Command, Stdio};
use tracing::{debug, error};

/// Start a program without waiting for it (application launchers).
pub(crate) fn spawn_detached(program: &str, args: &[&str]) -> Result<(), AutomationError> {
    debug!("spawning {} {:?}", program, args);
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| {
            AutomationError::PlatformError(format!("failed to launch '{}': {}", program, e))
        })
}

/// Run a program to completion and fail on a non-zero exit status.
pub(crate) fn run_checked(program: &str, args: &[&str]) -> Result<(), AutomationError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| AutomationError::PlatformError(format!("failed to run '{}': {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("'{}' exited with {}: {}", program, output.status, stderr.trim());
        return Err(AutomationError::PlatformError(format!(
            "'{}' failed: {}",
            program,
            stderr.trim()
        )));
    }
    Ok(())
}
