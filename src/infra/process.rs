//! Child process execution under a cancellation token
//!
//! Every toolchain invocation goes through [`run_inherited`] or
//! [`run_captured`]. Both refuse to start once the token is cancelled and
//! kill the running child as soon as it fires.

use std::process::Stdio;

use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::error::ToolchainError;

/// Render a command line for logs and error messages
pub fn describe(command: &Command) -> String {
    let inner = command.as_std();
    let program = std::path::Path::new(inner.get_program())
        .file_name()
        .unwrap_or(inner.get_program())
        .to_string_lossy()
        .into_owned();

    inner.get_args().fold(program, |mut line, arg| {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
        line
    })
}

/// Fail with [`ToolchainError::Cancelled`] if the token already fired
pub fn ensure_active(ctx: &CancellationToken, command: &str) -> Result<(), ToolchainError> {
    if ctx.is_cancelled() {
        return Err(ToolchainError::Cancelled {
            command: command.to_string(),
        });
    }
    Ok(())
}

/// Run a command with stdin, stdout and stderr connected to the caller's terminal
pub async fn run_inherited(
    mut command: Command,
    ctx: &CancellationToken,
) -> Result<(), ToolchainError> {
    let description = describe(&command);
    ensure_active(ctx, &description)?;

    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    tracing::debug!(command = %description, "spawning toolchain process");
    let mut child = command.spawn().map_err(|source| ToolchainError::Spawn {
        command: description.clone(),
        source,
    })?;

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|source| ToolchainError::Wait {
                command: description.clone(),
                source,
            })?;
            if status.success() {
                Ok(())
            } else {
                Err(ToolchainError::Exited {
                    command: description,
                    status,
                })
            }
        }
        () = ctx.cancelled() => {
            tracing::debug!(command = %description, "cancelled, killing toolchain process");
            if let Err(e) = child.kill().await {
                tracing::warn!("Failed to kill '{}': {}", description, e);
            }
            Err(ToolchainError::Cancelled { command: description })
        }
    }
}

/// Run a command and capture its standard output
///
/// Standard error still goes to the terminal so toolchain diagnostics stay
/// visible.
pub async fn run_captured(
    mut command: Command,
    ctx: &CancellationToken,
) -> Result<String, ToolchainError> {
    let description = describe(&command);
    ensure_active(ctx, &description)?;

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    tracing::debug!(command = %description, "spawning toolchain process");
    let child = command.spawn().map_err(|source| ToolchainError::Spawn {
        command: description.clone(),
        source,
    })?;

    // Dropping the pending output future drops the child, which kills it.
    let output = tokio::select! {
        output = child.wait_with_output() => output.map_err(|source| ToolchainError::Wait {
            command: description.clone(),
            source,
        })?,
        () = ctx.cancelled() => {
            return Err(ToolchainError::Cancelled { command: description });
        }
    };

    if !output.status.success() {
        return Err(ToolchainError::Exited {
            command: description,
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
