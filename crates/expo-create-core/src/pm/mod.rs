//! Package manager selection and command dispatch

pub mod detect;
pub mod install;

pub use detect::{detect, DetectEnv, ManagerFlags};

use std::fmt;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// The binary to invoke
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments for installing everything in the manifest
    pub fn install_args(&self) -> Vec<String> {
        vec!["install".to_string()]
    }

    /// Arguments for adding specific packages
    ///
    /// npm spells the add verb `install --save`; the others use `add`. The
    /// dev flag token is only pushed when it applies - no empty-string
    /// arguments ever reach the subprocess.
    pub fn add_args(&self, packages: &[&str], dev: bool) -> Vec<String> {
        let mut args: Vec<String> = Vec::with_capacity(packages.len() + 2);
        match self {
            PackageManager::Npm => {
                args.push("install".to_string());
                args.push(if dev { "--save-dev" } else { "--save" }.to_string());
            }
            PackageManager::Yarn | PackageManager::Bun => {
                args.push("add".to_string());
                if dev {
                    args.push("--dev".to_string());
                }
            }
            PackageManager::Pnpm => {
                args.push("add".to_string());
                if dev {
                    args.push("--save-dev".to_string());
                }
            }
        }
        args.extend(packages.iter().map(|p| p.to_string()));
        args
    }

    /// Arguments for running a manifest script.
    /// npm and bun need the `run` verb; yarn and pnpm take the script directly.
    pub fn run_script_args(&self, script: &str) -> Vec<String> {
        match self {
            PackageManager::Npm | PackageManager::Bun => {
                vec!["run".to_string(), script.to_string()]
            }
            PackageManager::Yarn | PackageManager::Pnpm => vec![script.to_string()],
        }
    }

    /// The start command shown in the success message
    pub fn start_command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm start",
            PackageManager::Yarn => "yarn start",
            PackageManager::Pnpm => "pnpm start",
            PackageManager::Bun => "bun start",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}
