//! External command execution.
//!
//! Every probe in this tool is "run a system utility, capture stdout". All
//! invocations share the same rules: one attempt, a fixed timeout, and any
//! failure (spawn error, non-zero exit, timeout) collapses to "no output" so
//! callers can treat the command as contributing no evidence.

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

/// Upper bound for any single external command.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Check if a system command is available in PATH.
pub fn is_command_available(command: &str) -> bool {
    which::which(command).is_ok()
}

/// Run a command and return its trimmed stdout, or `None` on any failure.
pub async fn run_command(command: &[&str]) -> Option<String> {
    run_command_with_timeout(command, COMMAND_TIMEOUT).await
}

async fn run_command_with_timeout(command: &[&str], limit: Duration) -> Option<String> {
    let (program, args) = command.split_first()?;

    let mut cmd = Command::new(program);
    // If the timeout fires we abandon the future; kill_on_drop makes sure the
    // spawned process does not outlive us.
    cmd.args(args).kill_on_drop(true);

    let output = match tokio::time::timeout(limit, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            debug!("failed to execute '{}': {err}", command.join(" "));
            return None;
        }
        Err(_) => {
            warn!("command timed out: {}", command.join(" "));
            return None;
        }
    };

    if !output.status.success() {
        debug!(
            "command '{}' failed with {}: {}",
            command.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_of_successful_command() {
        let output = run_command(&["echo", "hello"]).await;
        assert_eq!(output.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn nonzero_exit_yields_no_output() {
        assert_eq!(run_command(&["false"]).await, None);
    }

    #[tokio::test]
    async fn unknown_binary_yields_no_output() {
        assert_eq!(run_command(&["gpu-doctor-no-such-binary"]).await, None);
    }

    #[tokio::test]
    async fn timed_out_command_yields_no_output() {
        let started = std::time::Instant::now();
        let output =
            run_command_with_timeout(&["sleep", "5"], Duration::from_millis(100)).await;
        assert_eq!(output, None);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn common_shell_utilities_resolve_on_path() {
        assert!(is_command_available("ls"));
        assert!(!is_command_available("gpu-doctor-no-such-binary"));
    }
}
