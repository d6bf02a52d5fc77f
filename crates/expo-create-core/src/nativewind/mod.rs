//! NativeWind integration: dependency installs plus deterministic file writes
//!
//! Runs after the generator and its cleanup script, so the folder structure
//! it inspects is final. Every failure in this step is fatal - a half-wired
//! NativeWind setup is worse than none.

pub mod files;

pub use files::{detect_placement, welcome_path, WelcomePlacement};

use crate::command::CommandRunner;
use crate::pm::{install, PackageManager};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{json, Value};
use std::path::Path;
use tokio::fs;

/// Production dependencies added to the generated project
pub const DEPENDENCIES: &[&str] = &["nativewind@^4.0.1"];

/// Dev dependencies added to the generated project
pub const DEV_DEPENDENCIES: &[&str] = &["tailwindcss@^3.4.17", "prettier-plugin-tailwindcss@^0.5.11"];

/// Create `app/global.css` with the Tailwind directives.
/// Runs before the rest of the setup; the cleanup script may have just
/// recreated the `app` folder.
pub async fn write_global_css(project_path: &Path) -> Result<()> {
    let app_dir = project_path.join("app");
    fs::create_dir_all(&app_dir)
        .await
        .context("Failed to create app directory")?;
    fs::write(app_dir.join("global.css"), files::global_css())
        .await
        .context("Failed to create global.css")?;
    Ok(())
}

/// Wire NativeWind into the generated project.
///
/// With `install` false the dependency step is skipped and the packages are
/// listed for manual installation; the config files are still written so the
/// project is ready once the user installs.
pub async fn setup<R: CommandRunner>(
    runner: &R,
    project_path: &Path,
    manager: PackageManager,
    install_deps: bool,
) -> Result<()> {
    println!();
    println!("{}", "Setting up NativeWind".cyan().bold());
    println!("{}", "Configuring TailwindCSS for React Native...".dimmed());
    println!();

    if install_deps {
        install::add_packages(runner, project_path, manager, DEPENDENCIES, false).await?;
        install::add_packages(runner, project_path, manager, DEV_DEPENDENCIES, true).await?;
        println!("  {}", "✓ Dependencies installed successfully".green());
    } else {
        println!(
            "  {} {}",
            "⚠".yellow(),
            "Skipping dependency installation (--no-install)".yellow()
        );
        println!(
            "  {}",
            format!(
                "Install manually: {} and {} (dev)",
                DEPENDENCIES.join(", "),
                DEV_DEPENDENCIES.join(", ")
            )
            .dimmed()
        );
    }

    write_config_files(project_path).await?;
    patch_app_manifest(project_path).await?;

    Ok(())
}

/// Write the fixed configuration files and the welcome screen
pub async fn write_config_files(project_path: &Path) -> Result<()> {
    fs::write(project_path.join("tailwind.config.js"), files::tailwind_config())
        .await
        .context("Failed to create Tailwind configuration")?;

    fs::write(project_path.join("babel.config.js"), files::babel_config())
        .await
        .context("Failed to configure Babel")?;

    fs::write(project_path.join("metro.config.js"), files::metro_config())
        .await
        .context("Failed to configure Metro")?;

    fs::write(project_path.join("nativewind-env.d.ts"), files::nativewind_types())
        .await
        .context("Failed to create TypeScript declarations")?;

    let placement = files::detect_placement(project_path);
    let target = files::welcome_path(project_path, placement);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&target, files::welcome_screen(placement))
        .await
        .with_context(|| format!("Failed to write welcome screen: {}", target.display()))?;

    Ok(())
}

/// Ensure `expo.web.bundler` is `metro` in app.json, creating a minimal
/// manifest if it is absent or unparsable.
pub async fn patch_app_manifest(project_path: &Path) -> Result<()> {
    let manifest_path = project_path.join("app.json");

    let existing: Value = match fs::read_to_string(&manifest_path).await {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|_| json!({})),
        Err(_) => json!({}),
    };

    // Rebuild the expo.web path, preserving whatever else is there
    let mut root = match existing {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    let mut expo = match root.remove("expo") {
        Some(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    let mut web = match expo.remove("web") {
        Some(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    web.insert("bundler".to_string(), json!("metro"));
    expo.insert("web".to_string(), Value::Object(web));
    root.insert("expo".to_string(), Value::Object(expo));
    let manifest = Value::Object(root);

    let mut serialized = serde_json::to_string_pretty(&manifest).context("Failed to serialize app.json")?;
    serialized.push('\n');
    fs::write(&manifest_path, serialized)
        .await
        .context("Failed to update app configuration")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_global_css_lands_in_app_folder() {
        let tmp = tempfile::tempdir().unwrap();
        write_global_css(tmp.path()).await.unwrap();

        let css = std::fs::read_to_string(tmp.path().join("app").join("global.css")).unwrap();
        assert!(css.contains("@tailwind base;"));
    }

    #[tokio::test]
    async fn test_config_files_written() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("app")).unwrap();

        write_config_files(tmp.path()).await.unwrap();

        assert!(tmp.path().join("tailwind.config.js").exists());
        assert!(tmp.path().join("babel.config.js").exists());
        assert!(tmp.path().join("metro.config.js").exists());
        assert!(tmp.path().join("nativewind-env.d.ts").exists());
        assert!(tmp.path().join("app").join("index.tsx").exists());
    }

    #[tokio::test]
    async fn test_welcome_screen_prefers_nested_tabs() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("app").join("(tabs)")).unwrap();

        write_config_files(tmp.path()).await.unwrap();

        assert!(tmp.path().join("app").join("(tabs)").join("index.tsx").exists());
        assert!(!tmp.path().join("app").join("index.tsx").exists());
        assert!(!tmp.path().join("App.tsx").exists());
    }

    #[tokio::test]
    async fn test_patch_app_manifest_preserves_existing_fields() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("app.json"),
            r#"{"expo": {"name": "my-app", "slug": "my-app"}}"#,
        )
        .unwrap();

        patch_app_manifest(tmp.path()).await.unwrap();

        let manifest: Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join("app.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["expo"]["name"], "my-app");
        assert_eq!(manifest["expo"]["web"]["bundler"], "metro");
    }

    #[tokio::test]
    async fn test_patch_app_manifest_creates_fallback() {
        let tmp = tempfile::tempdir().unwrap();

        patch_app_manifest(tmp.path()).await.unwrap();

        let manifest: Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join("app.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["expo"]["web"]["bundler"], "metro");
    }

    #[tokio::test]
    async fn test_patch_app_manifest_replaces_unparsable() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("app.json"), "{not json").unwrap();

        patch_app_manifest(tmp.path()).await.unwrap();

        let manifest: Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join("app.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["expo"]["web"]["bundler"], "metro");
    }
}
