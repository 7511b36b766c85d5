// file: src/system/command.rs
// version: 1.0.0
// guid: 0b1c2d3e-4f50-4617-8293-a4b5c6d7e8f9

//! Local command execution for collaborators that shell out

use crate::error::AdminError;
use crate::Result;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error};

/// Run a command and return its stdout, failing on a non-zero exit status
pub async fn run(program: &str, args: &[String], stdin: Option<&str>) -> Result<String> {
    let cmdline = format!("{} {}", program, args.join(" "));
    debug!("Executing local command: {}", cmdline);

    let mut child = Command::new(program)
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            AdminError::process(&cmdline, None, format!("Failed to execute command: {}", e))
        })?;

    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        pipe.write_all(input.as_bytes()).await?;
        // Closing stdin lets the child see EOF
        drop(pipe);
    }

    let output = child.wait_with_output().await?;
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    if !output.status.success() {
        let exit_code = output.status.code();
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("Command failed with exit code {:?}", exit_code);
        if !stderr.trim().is_empty() {
            error!("STDERR: {}", stderr);
        }

        return Err(AdminError::process(
            cmdline,
            exit_code,
            if stderr.is_empty() {
                stdout
            } else {
                stderr.to_string()
            },
        ));
    }

    debug!("Command executed successfully");
    Ok(stdout)
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}
