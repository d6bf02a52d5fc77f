//! Project creation workflow
//!
//! Strictly sequential, no parallelism: check the target directory, run the
//! generator, run the cleanup script, wire NativeWind, initialize git, build
//! the summary. Each step's success/warning/fatal classification is a fixed
//! contract - the generator and NativeWind steps are fatal, the cleanup
//! script and git init are downgraded to warnings. Completed side effects
//! are never rolled back.

use crate::command::CommandRunner;
use crate::error::ScaffoldError;
use crate::generator::{self, CleanupStatus};
use crate::nativewind;
use crate::project::ProjectConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// How one orchestration step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    /// The step failed but the run continued; carries a remediation hint
    Warning(String),
    /// Skipped by configuration or because its precondition was absent
    Skipped,
}

/// One completed step, by name
#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: &'static str,
    pub outcome: StepOutcome,
}

/// Outcome of a completed run, consumed by the interface layer
#[derive(Debug, Clone)]
pub struct Summary {
    pub project_name: String,
    pub display_name: String,
    pub package_manager: crate::pm::PackageManager,
    pub nativewind: bool,
    pub steps: Vec<StepReport>,
}

impl Summary {
    /// Warnings accumulated across steps, in execution order
    pub fn warnings(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|s| match &s.outcome {
                StepOutcome::Warning(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn step(text: &str) {
    println!();
    println!("{}", text.bold());
}

fn success(text: &str) {
    println!("{} {}", "✓".green(), text.green());
}

fn warn(text: &str) {
    println!("{} {}", "⚠".yellow(), text.yellow());
}

fn info(text: &str) {
    println!("{}", text.dimmed());
}

/// Drive the whole creation flow for an already-collected configuration.
///
/// The current-directory confirmation belongs to the interface layer and has
/// happened before this point; the named-directory precondition is re-checked
/// here because it must hold before any side effect.
pub async fn execute<R: CommandRunner>(
    config: &ProjectConfig,
    runner: &R,
    cwd: &Path,
) -> Result<Summary> {
    let project_path = config.project_path(cwd);
    let mut steps: Vec<StepReport> = Vec::new();

    // CheckTargetDirectory: fatal before anything touches the filesystem
    if !config.is_current_dir() && project_path.exists() {
        anyhow::bail!(ScaffoldError::DirectoryExists {
            name: config.name.clone(),
        });
    }

    // InvokeGenerator: fatal - without it there is nothing to configure
    step("Creating Expo project...");
    generator::invoke(runner, config, cwd).await?;
    success("Expo project created successfully");
    steps.push(StepReport {
        name: "generator",
        outcome: StepOutcome::Success,
    });

    // RunPostGenerationCleanup: best-effort
    step("Cleaning up project template...");
    let cleanup_outcome =
        match generator::run_cleanup_script(runner, &project_path, config.package_manager).await {
            Ok(CleanupStatus::Completed) => {
                success("Project template cleaned up");
                StepOutcome::Success
            }
            Ok(CleanupStatus::NoScript) => {
                info("No cleanup script found, continuing...");
                StepOutcome::Skipped
            }
            Ok(CleanupStatus::NoManifest) => {
                info("No package.json found, skipping cleanup");
                StepOutcome::Skipped
            }
            Err(_) => {
                warn("Could not run cleanup script");
                let hint = format!(
                    "Run it manually: {} {}",
                    config.package_manager.command(),
                    config
                        .package_manager
                        .run_script_args(generator::CLEANUP_SCRIPT)
                        .join(" ")
                );
                info(&hint);
                StepOutcome::Warning(format!("cleanup script failed - {}", hint))
            }
        };
    steps.push(StepReport {
        name: "cleanup",
        outcome: cleanup_outcome,
    });

    // ConfigureNativeWind: fatal on any install or write failure
    if config.nativewind {
        step("Setting up global styles...");
        nativewind::write_global_css(&project_path)
            .await
            .context("Failed to create global styles")?;
        success("Global styles configured");

        nativewind::setup(runner, &project_path, config.package_manager, config.install).await?;
        success("NativeWind configured");
        steps.push(StepReport {
            name: "nativewind",
            outcome: StepOutcome::Success,
        });
    }

    // InitVersionControl: failure never sinks the run
    if config.git {
        step("Initializing git repository...");
        let git_outcome = match runner
            .run_captured("git", &["init".to_string()], &project_path)
            .await
        {
            Ok(_) => {
                success("Git repository initialized");
                StepOutcome::Success
            }
            Err(_) => {
                warn("Could not initialize git repository");
                StepOutcome::Warning(
                    "git init failed - initialize the repository manually with `git init`"
                        .to_string(),
                )
            }
        };
        steps.push(StepReport {
            name: "git",
            outcome: git_outcome,
        });
    }

    Ok(Summary {
        project_name: config.name.clone(),
        display_name: config.display_name(cwd),
        package_manager: config.package_manager,
        nativewind: config.nativewind,
        steps,
    })
}
