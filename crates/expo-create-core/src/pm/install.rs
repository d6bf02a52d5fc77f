//! Dependency installation through the resolved package manager

use super::PackageManager;
use crate::command::CommandRunner;
use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::path::Path;

/// Install everything declared in the project manifest
pub async fn install_all<R: CommandRunner>(
    runner: &R,
    dir: &Path,
    manager: PackageManager,
) -> Result<()> {
    runner
        .run(manager.command(), &manager.install_args(), dir)
        .await
        .with_context(|| ScaffoldError::InstallFailed {
            manager,
            packages: "(all manifest dependencies)".to_string(),
        })?;
    Ok(())
}

/// Add specific packages, as dev or production dependencies.
/// No retry on failure; the caller decides whether the run survives.
pub async fn add_packages<R: CommandRunner>(
    runner: &R,
    dir: &Path,
    manager: PackageManager,
    packages: &[&str],
    dev: bool,
) -> Result<()> {
    debug_assert!(!packages.is_empty());

    runner
        .run(manager.command(), &manager.add_args(packages, dev), dir)
        .await
        .with_context(|| ScaffoldError::install_failed(manager, packages))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CapturedOutput;
    use std::sync::Mutex;

    /// Minimal fake: records `run` invocations, optionally failing them all
    struct FakeRunner {
        calls: Mutex<Vec<(String, Vec<String>)>>,
        fail: bool,
    }

    impl FakeRunner {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl CommandRunner for FakeRunner {
        async fn run(&self, program: &str, args: &[String], _cwd: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            if self.fail {
                anyhow::bail!(ScaffoldError::command_failed(program, args));
            }
            Ok(())
        }

        async fn run_with_input(
            &self,
            _program: &str,
            _args: &[String],
            _cwd: &Path,
            _input: &str,
        ) -> Result<()> {
            unimplemented!("not used by the installer")
        }

        async fn run_captured(
            &self,
            _program: &str,
            _args: &[String],
            _cwd: &Path,
        ) -> Result<CapturedOutput> {
            unimplemented!("not used by the installer")
        }

        async fn run_streamed(&self, _program: &str, _args: &[String], _cwd: &Path) -> Result<()> {
            unimplemented!("not used by the installer")
        }
    }

    #[tokio::test]
    async fn test_install_all_uses_manager_verb() {
        let runner = FakeRunner::new(false);
        install_all(&runner, Path::new("/p"), PackageManager::Pnpm)
            .await
            .unwrap();

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "pnpm");
        assert_eq!(calls[0].1, vec!["install"]);
    }

    #[tokio::test]
    async fn test_add_packages_dispatches_built_args() {
        let runner = FakeRunner::new(false);
        add_packages(
            &runner,
            Path::new("/p"),
            PackageManager::Yarn,
            &["nativewind@^4.0.1"],
            false,
        )
        .await
        .unwrap();

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].0, "yarn");
        assert_eq!(calls[0].1, vec!["add", "nativewind@^4.0.1"]);
    }

    #[tokio::test]
    async fn test_failure_carries_manager_and_packages() {
        let runner = FakeRunner::new(true);
        let err = add_packages(
            &runner,
            Path::new("/p"),
            PackageManager::Bun,
            &["tailwindcss@^3.4.17", "prettier-plugin-tailwindcss@^0.5.11"],
            true,
        )
        .await
        .unwrap_err();

        match err.downcast_ref::<ScaffoldError>() {
            Some(ScaffoldError::InstallFailed { manager, packages }) => {
                assert_eq!(*manager, PackageManager::Bun);
                assert!(packages.contains("tailwindcss@^3.4.17"));
                assert!(packages.contains("prettier-plugin-tailwindcss@^0.5.11"));
            }
            other => panic!("expected InstallFailed, got {other:?}"),
        }
    }
}
