//! Failure conditions the orchestrator needs to tell apart
//!
//! Most errors flow through `anyhow` with context attached; the variants here
//! are the ones that change control flow (exit codes, warning-vs-fatal
//! classification) and are recovered by downcasting.

use crate::pm::PackageManager;

#[derive(thiserror::Error, Debug)]
pub enum ScaffoldError {
    /// External command exited non-zero or could not be spawned.
    /// Carries the command line only, never captured output.
    #[error("command failed: {command} {args}")]
    CommandFailed { command: String, args: String },

    /// Dependency installation failed, with the offending package list.
    #[error("failed to install {packages} with {manager}")]
    InstallFailed {
        manager: PackageManager,
        packages: String,
    },

    /// Target directory already exists (named-directory case).
    #[error("directory \"{name}\" already exists")]
    DirectoryExists { name: String },

    /// User declined to continue. Not an error; maps to exit 0.
    #[error("operation cancelled by user")]
    Cancelled,
}

impl ScaffoldError {
    pub fn command_failed(command: &str, args: &[String]) -> Self {
        Self::CommandFailed {
            command: command.to_string(),
            args: args.join(" "),
        }
    }

    pub fn install_failed(manager: PackageManager, packages: &[&str]) -> Self {
        Self::InstallFailed {
            manager,
            packages: packages.join(", "),
        }
    }
}
