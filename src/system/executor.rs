// src/system/executor.rs

use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{command}' exited with code {code}.")]
    NonZeroExitStatus { command: String, code: i32 },
}

/// Runs one command line through the OS shell, inheriting stdin/stdout/
/// stderr, and blocks until it finishes. An empty command is a success,
/// not an error.
pub fn execute_command(command_line: &str) -> Result<(), ExecutionError> {
    let trimmed = command_line.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let mut command = if cfg!(target_os = "windows") {
        let mut c = StdCommand::new("cmd");
        c.arg("/C").arg(trimmed);
        c
    } else {
        let mut c = StdCommand::new("bash");
        c.arg("-c").arg(trimmed);
        c
    };

    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ExecutionError::CommandFailed(trimmed.to_string(), e))?;

    if status.success() {
        Ok(())
    } else {
        Err(ExecutionError::NonZeroExitStatus {
            command: trimmed.to_string(),
            code: status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_a_success() {
        execute_command("   ").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_propagated() {
        execute_command("true").unwrap();

        let err = execute_command("exit 3").unwrap_err();
        assert!(matches!(
            err,
            ExecutionError::NonZeroExitStatus { code: 3, .. }
        ));
    }
}
