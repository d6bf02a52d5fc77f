//! Project configuration and precondition checks

use crate::pm::PackageManager;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Project name meaning "scaffold into the current directory"
pub const CURRENT_DIR_SENTINEL: &str = ".";

/// Maximum npm package name length
const MAX_NAME_LEN: usize = 214;

/// Generator version selector: `latest` or an explicit version/dist-tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    Latest,
    Exact(String),
}

impl VersionSelector {
    /// Parse user input. Empty input is rejected; anything else passes
    /// through, `latest` specially.
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err("Please enter a valid version".to_string());
        }
        if trimmed == "latest" {
            Ok(Self::Latest)
        } else {
            Ok(Self::Exact(trimmed.to_string()))
        }
    }

    /// Whether the selector looks like a plain semver version.
    /// Dist-tags (`next`, `canary`) are passed through to the registry as-is.
    pub fn is_semver(&self) -> bool {
        match self {
            Self::Latest => true,
            Self::Exact(v) => {
                let cleaned = v.strip_prefix('v').unwrap_or(v);
                semver::Version::parse(cleaned).is_ok()
            }
        }
    }
}

impl std::fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Exact(v) => write!(f, "{}", v),
        }
    }
}

/// Immutable record describing one scaffolding run.
/// Built once by the interface layer; the orchestrator never mutates it.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Validated package name, or `.` for the current directory
    pub name: String,
    pub expo_version: VersionSelector,
    pub package_manager: PackageManager,
    /// Ignored when `nativewind` is set - the generator is invoked without
    /// a template argument on that path
    pub template: String,
    pub nativewind: bool,
    pub install: bool,
    pub git: bool,
}

impl ProjectConfig {
    pub fn is_current_dir(&self) -> bool {
        self.name == CURRENT_DIR_SENTINEL
    }

    /// Resolve the project directory against `base`
    pub fn project_path(&self, base: &Path) -> PathBuf {
        if self.is_current_dir() {
            base.to_path_buf()
        } else {
            base.join(&self.name)
        }
    }

    /// Name shown in messages - the directory basename when scaffolding
    /// into the current directory
    pub fn display_name(&self, base: &Path) -> String {
        if self.is_current_dir() {
            base.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| CURRENT_DIR_SENTINEL.to_string())
        } else {
            self.name.clone()
        }
    }
}

/// Validate a project name against npm package-name rules.
/// `.` is the current-directory sentinel and is always accepted.
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name == CURRENT_DIR_SENTINEL {
        return Ok(());
    }
    if name.is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!(
            "Project name cannot be longer than {} characters",
            MAX_NAME_LEN
        ));
    }
    if name.starts_with('.') || name.starts_with('_') {
        return Err("Project name cannot start with a period or underscore".to_string());
    }
    if name.contains(char::is_whitespace) {
        return Err("Project name cannot contain spaces".to_string());
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Project name cannot contain capital letters".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.' | '~'))
    {
        return Err("Project name can only contain URL-friendly characters".to_string());
    }
    Ok(())
}

/// Target directory precondition result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDirStatus {
    /// Safe to proceed
    Ready,
    /// Current directory holds user files - ask before writing into it
    NeedsConfirmation,
    /// Named target already exists - fatal before any side effect
    AlreadyExists,
}

/// Whether a current-directory target needs explicit confirmation:
/// it holds a manifest already, or any entry that is not dot-prefixed.
pub fn needs_confirmation<S: AsRef<str>>(entries: &[S]) -> bool {
    let has_manifest = entries.iter().any(|e| e.as_ref() == "package.json");
    let has_visible_entries =
        !entries.is_empty() && !entries.iter().all(|e| e.as_ref().starts_with('.'));
    has_manifest || has_visible_entries
}

/// Check the resolved target directory before any side effects
pub fn check_target_dir(path: &Path, is_current_dir: bool) -> Result<TargetDirStatus> {
    if !is_current_dir {
        if path.exists() {
            return Ok(TargetDirStatus::AlreadyExists);
        }
        return Ok(TargetDirStatus::Ready);
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(path)? {
        entries.push(entry?.file_name().to_string_lossy().into_owned());
    }

    if needs_confirmation(&entries) {
        Ok(TargetDirStatus::NeedsConfirmation)
    } else {
        Ok(TargetDirStatus::Ready)
    }
}
