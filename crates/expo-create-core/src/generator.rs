//! Invoking the external Expo project generator

use crate::command::CommandRunner;
use crate::pm::PackageManager;
use crate::project::{ProjectConfig, VersionSelector};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Default generator package, resolved through npx
pub const DEFAULT_GENERATOR: &str = "create-expo-app";

/// Environment variable overriding the generator package
pub const GENERATOR_ENV: &str = "EXPO_CREATE_GENERATOR";

/// Manifest script that strips generator boilerplate
pub const CLEANUP_SCRIPT: &str = "reset-project";

/// Generator package name, honoring the environment override
pub fn generator_package() -> String {
    std::env::var(GENERATOR_ENV).unwrap_or_else(|_| DEFAULT_GENERATOR.to_string())
}

/// Full package spec for npx, e.g. `create-expo-app@latest`
pub fn generator_spec(version: &VersionSelector) -> String {
    format!("{}@{}", generator_package(), version)
}

/// Build the npx argument vector for one configuration.
///
/// The NativeWind path runs the generator without a template argument; the
/// default template is reshaped by the integration afterwards. Install
/// timing is owned by the generator - `--no-install` is forwarded only when
/// the user asked to skip installs.
pub fn generator_args(config: &ProjectConfig) -> Vec<String> {
    let mut args = vec![generator_spec(&config.expo_version), config.name.clone()];
    if !config.nativewind {
        args.push("--template".to_string());
        args.push(config.template.clone());
    }
    if !config.install {
        args.push("--no-install".to_string());
    }
    args
}

/// Run the generator. Fatal on failure - there is no project to configure.
pub async fn invoke<R: CommandRunner>(runner: &R, config: &ProjectConfig, cwd: &Path) -> Result<()> {
    runner
        .run_streamed("npx", &generator_args(config), cwd)
        .await
        .context("Failed to create Expo project")
}

/// What happened to the post-generation cleanup step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupStatus {
    Completed,
    NoManifest,
    NoScript,
}

/// Run the generator's cleanup script if the manifest declares one.
///
/// The script asks whether old files should be moved aside; `n` makes it
/// delete them instead. Errors are returned for the caller to downgrade.
pub async fn run_cleanup_script<R: CommandRunner>(
    runner: &R,
    project_path: &Path,
    manager: PackageManager,
) -> Result<CleanupStatus> {
    let manifest_path = project_path.join("package.json");
    if !manifest_path.exists() {
        return Ok(CleanupStatus::NoManifest);
    }

    let content = tokio::fs::read_to_string(&manifest_path)
        .await
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let manifest: Value = serde_json::from_str(&content).context("Failed to parse package.json")?;

    let has_script = manifest
        .get("scripts")
        .and_then(|s| s.get(CLEANUP_SCRIPT))
        .is_some();
    if !has_script {
        return Ok(CleanupStatus::NoScript);
    }

    runner
        .run_with_input(
            manager.command(),
            &manager.run_script_args(CLEANUP_SCRIPT),
            project_path,
            "n\n",
        )
        .await?;

    Ok(CleanupStatus::Completed)
}
