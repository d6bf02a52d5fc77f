//! Expo Create Core - Shared library for the create-expo-nativewind CLI
//!
//! This library provides the core functionality for scaffolding Expo apps and
//! wiring NativeWind (TailwindCSS for React Native) into the generated
//! project. The heavy lifting (template generation, dependency resolution) is
//! delegated to external tools; this crate owns the decision logic around them.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Process execution, package manager
//!   detection and dependency installation, config validation, NativeWind
//!   file generation
//! - **Layer 2: Workflow Orchestration** - The sequential project-creation
//!   state machine (`workflow::execute`) over a pluggable `CommandRunner`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use expo_create_core::{command::TokioRunner, project::ProjectConfig, workflow};
//!
//! let config = ProjectConfig { /* ... */ };
//! let summary = workflow::execute(&config, &TokioRunner, &cwd).await?;
//! ```

pub mod command;
pub mod error;
pub mod generator;
pub mod nativewind;
pub mod pm;
pub mod project;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use command::{CommandRunner, TokioRunner};
pub use error::ScaffoldError;
pub use pm::PackageManager;
pub use project::{ProjectConfig, VersionSelector};
pub use workflow::{StepOutcome, StepReport, Summary};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};
