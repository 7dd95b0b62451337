use crate::error::{AuditError, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Captured result of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run `program` with `args` in `cwd` and wait for it to exit.
///
/// Stdin is closed. The child is killed if `limit` elapses first.
pub async fn run_command<S>(
    program: &Path,
    args: &[S],
    cwd: &Path,
    limit: Duration,
) -> Result<CommandOutput>
where
    S: AsRef<OsStr> + std::fmt::Debug,
{
    let name = program.display().to_string();
    tracing::debug!(program = %name, ?args, cwd = %cwd.display(), "running command");

    let child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| AuditError::Process {
            program: name.clone(),
            message: e.to_string(),
        })?;

    let output = timeout(limit, child.wait_with_output())
        .await
        .map_err(|_| AuditError::Process {
            program: name.clone(),
            message: format!("timed out after {}s", limit.as_secs()),
        })?
        .map_err(|e| AuditError::Process {
            program: name.clone(),
            message: e.to_string(),
        })?;

    let result = CommandOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    tracing::debug!(program = %name, code = ?result.code, "command finished");

    Ok(result)
}
