//! External process execution
//!
//! Every hard step of project creation shells out to a third-party tool (the
//! Expo generator, a package manager, git). The `CommandRunner` trait is the
//! seam the orchestrator drives those tools through; `TokioRunner` is the real
//! implementation, tests substitute a recording fake.

mod stream;

pub use stream::{StreamKind, StreamLine, StreamSession};

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Buffered output of a command run in captured mode
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Execution seam for external tools
///
/// Four modes, matching how each orchestration step talks to its tool:
/// inherited I/O (generator-style visible runs), piped input (answering a
/// downstream prompt non-interactively), captured (output parsed or logged by
/// the caller), and streamed (line-buffered with the interactive echo toggle).
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run with the child inheriting the parent's standard streams.
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<()>;

    /// Run with `input` written to the child's stdin, then closed.
    /// Output streams are inherited.
    async fn run_with_input(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        input: &str,
    ) -> Result<()>;

    /// Run with both output streams buffered and returned as text.
    async fn run_captured(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<CapturedOutput>;

    /// Run with output streamed line by line through a `StreamSession`,
    /// echo toggleable with a keypress.
    async fn run_streamed(&self, program: &str, args: &[String], cwd: &Path) -> Result<()>;
}

/// System implementation on top of `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRunner;

impl CommandRunner for TokioRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .await
            .map_err(|_| ScaffoldError::command_failed(program, args))?;

        if !status.success() {
            anyhow::bail!(ScaffoldError::command_failed(program, args));
        }
        Ok(())
    }

    async fn run_with_input(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        input: &str,
    ) -> Result<()> {
        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|_| ScaffoldError::command_failed(program, args))?;

        // Write the canned answer and close stdin so the child sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .await
                .context("Failed to write to child stdin")?;
        }

        let status = child
            .wait()
            .await
            .map_err(|_| ScaffoldError::command_failed(program, args))?;

        if !status.success() {
            anyhow::bail!(ScaffoldError::command_failed(program, args));
        }
        Ok(())
    }

    async fn run_captured(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<CapturedOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .map_err(|_| ScaffoldError::command_failed(program, args))?;

        if !output.status.success() {
            anyhow::bail!(ScaffoldError::command_failed(program, args));
        }

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn run_streamed(&self, program: &str, args: &[String], cwd: &Path) -> Result<()> {
        stream::run_streaming(program, args, cwd, true).await?;
        Ok(())
    }
}
