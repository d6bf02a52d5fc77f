//! Line-buffered subprocess streaming with a keypress echo toggle
//!
//! While a subprocess runs, its output is collected into a `StreamSession`.
//! Pressing `v` toggles whether collected lines are echoed to the terminal;
//! toggling echo back on flushes the backlog first. The key listener and the
//! terminal cursor are torn down on every exit path through `ListenerGuard`.

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use colored::Colorize;
use console::{Key, Term};
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Which stream a collected line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// A single collected output line
#[derive(Debug, Clone)]
pub struct StreamLine {
    pub kind: StreamKind,
    pub text: String,
}

/// Per-invocation buffering state for one streamed subprocess
///
/// Owned by the streaming step and dropped with it; the echo flag is shared
/// with the key listener, nothing else escapes the step's scope.
pub struct StreamSession {
    lines: Vec<StreamLine>,
    printed: usize,
    echo: Arc<AtomicBool>,
}

impl StreamSession {
    pub fn new(echo_initially: bool) -> Self {
        Self {
            lines: Vec::new(),
            printed: 0,
            echo: Arc::new(AtomicBool::new(echo_initially)),
        }
    }

    /// Shared handle the key listener flips
    pub fn echo_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.echo)
    }

    pub fn echo_enabled(&self) -> bool {
        self.echo.load(Ordering::Relaxed)
    }

    /// Collect one line
    pub fn push(&mut self, kind: StreamKind, text: String) {
        self.lines.push(StreamLine { kind, text });
    }

    /// Lines collected but not yet echoed, if echo is currently on.
    /// Advances the printed watermark, so the backlog flushes exactly once.
    pub fn pending(&mut self) -> Vec<StreamLine> {
        if !self.echo_enabled() {
            return Vec::new();
        }
        let pending = self.lines[self.printed..].to_vec();
        self.printed = self.lines.len();
        pending
    }

    pub fn lines(&self) -> &[StreamLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<StreamLine> {
        self.lines
    }
}

/// Disarms the key listener and restores the cursor, on drop
struct ListenerGuard {
    armed: Arc<AtomicBool>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.armed.store(false, Ordering::Relaxed);
        let _ = Term::stderr().show_cursor();
    }
}

fn spawn_key_listener(armed: Arc<AtomicBool>, echo: Arc<AtomicBool>) {
    let term = Term::stderr();
    if !term.is_term() {
        return;
    }

    // A disarmed listener parks on the next keypress and exits then;
    // raw mode is scoped to each read_key call by console itself.
    tokio::task::spawn_blocking(move || {
        while armed.load(Ordering::Relaxed) {
            match term.read_key() {
                Ok(Key::Char('v')) => {
                    echo.fetch_xor(true, Ordering::Relaxed);
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

fn echo_line(line: &StreamLine) {
    match line.kind {
        StreamKind::Stdout => println!("  {}", line.text),
        StreamKind::Stderr => eprintln!("  {}", line.text.yellow()),
    }
}

/// Run a subprocess, streaming its output through a `StreamSession`.
/// Returns the collected lines on success.
pub async fn run_streaming(
    program: &str,
    args: &[String],
    cwd: &Path,
    echo_initially: bool,
) -> Result<Vec<StreamLine>> {
    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|_| ScaffoldError::command_failed(program, args))?;

    let stdout = child.stdout.take().context("Failed to capture stdout")?;
    let stderr = child.stderr.take().context("Failed to capture stderr")?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let mut session = StreamSession::new(echo_initially);
    let armed = Arc::new(AtomicBool::new(true));
    let _guard = ListenerGuard {
        armed: Arc::clone(&armed),
    };
    spawn_key_listener(armed, session.echo_handle());

    let mut stdout_done = false;
    let mut stderr_done = false;
    while !(stdout_done && stderr_done) {
        tokio::select! {
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(text)) => session.push(StreamKind::Stdout, text),
                    Ok(None) => stdout_done = true,
                    Err(_) => stdout_done = true,
                }
            }
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(text)) => session.push(StreamKind::Stderr, text),
                    Ok(None) => stderr_done = true,
                    Err(_) => stderr_done = true,
                }
            }
        }
        for line in session.pending() {
            echo_line(&line);
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|_| ScaffoldError::command_failed(program, args))?;

    if !status.success() {
        anyhow::bail!(ScaffoldError::command_failed(program, args));
    }

    Ok(session.into_lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_flushes_backlog_once() {
        let mut session = StreamSession::new(false);
        session.push(StreamKind::Stdout, "one".to_string());
        session.push(StreamKind::Stdout, "two".to_string());

        // Echo off: nothing to print
        assert!(session.pending().is_empty());

        // Toggle on: the whole backlog flushes, then drains
        session.echo_handle().store(true, Ordering::Relaxed);
        let pending = session.pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].text, "one");
        assert!(session.pending().is_empty());

        session.push(StreamKind::Stderr, "three".to_string());
        let pending = session.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].kind, StreamKind::Stderr);
    }

    #[test]
    fn test_toggle_flips_echo() {
        let session = StreamSession::new(true);
        let echo = session.echo_handle();
        echo.fetch_xor(true, Ordering::Relaxed);
        assert!(!session.echo_enabled());
        echo.fetch_xor(true, Ordering::Relaxed);
        assert!(session.echo_enabled());
    }

    #[test]
    fn test_all_lines_retained_regardless_of_echo() {
        let mut session = StreamSession::new(false);
        session.push(StreamKind::Stdout, "kept".to_string());
        session.push(StreamKind::Stderr, "also kept".to_string());
        assert_eq!(session.lines().len(), 2);
    }
}
