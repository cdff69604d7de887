use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, Vid2CaptionsError};
use super::MediaCommand;

/// Captured result of one external invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok<S: Into<String>>(stdout: S) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed<S: Into<String>>(code: i32, stderr: S) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Turn a nonzero exit into an error naming the command
    pub fn into_success(self, command: &MediaCommand) -> Result<Self> {
        if self.success {
            return Ok(self);
        }

        let stderr = self.stderr.trim();
        let message = if stderr.is_empty() {
            match self.code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            }
        } else {
            stderr.to_string()
        };

        Err(Vid2CaptionsError::external(command.description.clone(), message))
    }
}

/// Executes media commands. The seam between the editor and the OS.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn execute(&self, command: &MediaCommand) -> Result<CommandOutput>;
}

/// Runs commands as child processes, waiting for each to finish
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn execute(&self, command: &MediaCommand) -> Result<CommandOutput> {
        debug!("Executing {}: {}", command.description, command);

        let output = Command::new(&command.binary_path)
            .args(&command.args)
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|e| {
                Vid2CaptionsError::external(
                    command.description.clone(),
                    format!("failed to execute {}: {}", command.binary_path.display(), e),
                )
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_success_passes_through() {
        let cmd = MediaCommand::new("ffprobe", "Duration probe");
        let output = CommandOutput::ok("5.0\n").into_success(&cmd).unwrap();
        assert_eq!(output.stdout, "5.0\n");
    }

    #[test]
    fn test_into_success_reports_stderr() {
        let cmd = MediaCommand::new("ffprobe", "Duration probe");
        let err = CommandOutput::failed(1, "clip.mp4: No such file or directory\n")
            .into_success(&cmd)
            .unwrap_err();
        assert_eq!(err.to_string(), "Duration probe failed: clip.mp4: No such file or directory");
    }

    #[test]
    fn test_into_success_without_stderr() {
        let cmd = MediaCommand::new("ffmpeg", "Blank video");
        let err = CommandOutput::failed(187, "").into_success(&cmd).unwrap_err();
        assert_eq!(err.to_string(), "Blank video failed: exited with status 187");
    }

    #[tokio::test]
    async fn test_missing_binary_is_external_tool_error() {
        let cmd = MediaCommand::new("/nonexistent/vid2captions-test/ffprobe", "Duration probe").arg("-version");
        let err = ProcessRunner::new().execute(&cmd).await.unwrap_err();
        assert!(matches!(err, Vid2CaptionsError::ExternalTool { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout_and_status() {
        let cmd = MediaCommand::new("sh", "Shell").args(["-c", "echo 30/1; exit 3"]);
        let output = ProcessRunner::new().execute(&cmd).await.unwrap();
        assert_eq!(output.stdout, "30/1\n");
        assert_eq!(output.code, Some(3));
        assert!(!output.success);
    }
}
