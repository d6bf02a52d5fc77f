//! Charm-style CLI prompts using cliclack

use crate::command::TokioRunner;
use crate::error::ScaffoldError;
use crate::pm::{self, PackageManager};
use crate::project::{self, ProjectConfig, TargetDirStatus, VersionSelector};
use crate::workflow::{self, Summary};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Default template on the non-interactive path
const DEFAULT_TEMPLATE: &str = "blank";

/// CLI arguments for the create command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Project name; prompted for when absent
    pub name: Option<String>,

    /// Template to use; prompted for when absent (non-NativeWind path only)
    pub template: Option<String>,

    /// Set up NativeWind without asking
    pub nativewind: bool,

    /// Explicit package manager overrides
    pub manager_flags: pm::ManagerFlags,

    /// Install dependencies (default true)
    pub install: bool,

    /// Initialize a git repository (default true)
    pub git: bool,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            name: None,
            template: None,
            nativewind: false,
            manager_flags: pm::ManagerFlags::default(),
            install: true,
            git: true,
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("create-expo-nativewind")?;
    cliclack::log::remark("Build beautiful mobile apps with Expo and TailwindCSS")?;

    let cwd = std::env::current_dir()?;

    // Step 1: Project name
    let name = match &args.name {
        Some(name) => {
            project::validate_project_name(name).map_err(|msg| anyhow::anyhow!(msg))?;
            name.clone()
        }
        None => prompt_project_name()?,
    };

    // Step 2: Target directory preconditions
    let is_current = name == project::CURRENT_DIR_SENTINEL;
    let target = if is_current { cwd.clone() } else { cwd.join(&name) };
    match project::check_target_dir(&target, is_current)? {
        TargetDirStatus::Ready => {}
        TargetDirStatus::AlreadyExists => {
            anyhow::bail!(ScaffoldError::DirectoryExists { name });
        }
        TargetDirStatus::NeedsConfirmation => {
            let proceed: bool = cliclack::confirm("Current directory is not empty. Continue anyway?")
                .initial_value(false)
                .interact()?;
            if !proceed {
                anyhow::bail!(ScaffoldError::Cancelled);
            }
        }
    }

    // Step 3: Expo version
    let expo_version = prompt_expo_version()?;

    // Step 4: NativeWind
    let nativewind = if args.nativewind {
        true
    } else {
        cliclack::confirm("Would you like to set up NativeWind (TailwindCSS for React Native)?")
            .initial_value(true)
            .interact()?
    };

    // Step 5: Package manager
    let package_manager = pm::detect(&args.manager_flags, &pm::DetectEnv::from_process());

    // Step 6: Template (the NativeWind path invokes the generator without one)
    let template = match (&args.template, nativewind) {
        (Some(template), _) => template.clone(),
        (None, true) => DEFAULT_TEMPLATE.to_string(),
        (None, false) => prompt_template()?,
    };

    show_configuration(
        &name,
        is_current,
        &target,
        package_manager,
        &template,
        nativewind,
    )?;

    let config = ProjectConfig {
        name,
        expo_version,
        package_manager,
        template,
        nativewind,
        install: args.install,
        git: args.git,
    };

    let summary = workflow::execute(&config, &TokioRunner, &cwd).await?;

    print_success(&summary);
    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn prompt_project_name() -> Result<String> {
    let name: String = cliclack::input("What is your project name?")
        .placeholder("my-expo-app")
        .default_input("my-expo-app")
        .validate(|input: &String| project::validate_project_name(input))
        .interact()?;
    Ok(name)
}

fn prompt_expo_version() -> Result<VersionSelector> {
    let input: String = cliclack::input("Which version of Expo would you like to use?")
        .default_input("latest")
        .validate(|input: &String| VersionSelector::parse(input).map(|_| ()))
        .interact()?;

    let version = VersionSelector::parse(&input).map_err(|msg| anyhow::anyhow!(msg))?;
    if !version.is_semver() {
        cliclack::log::warning(format!(
            "\"{}\" is not a semver version - passing it to the registry as a dist-tag",
            version
        ))?;
    }
    Ok(version)
}

fn prompt_template() -> Result<String> {
    let template: &str = cliclack::select("Choose an Expo template:")
        .item("blank", "Blank", "A minimal app")
        .item(
            "blank-typescript",
            "Blank (TypeScript)",
            "Blank app with TypeScript enabled",
        )
        .item("tabs", "Tabs", "Several example screens and tabs")
        .item("navigation", "Navigation", "Includes basic navigation setup")
        .initial_value("blank-typescript")
        .interact()?;
    Ok(template.to_string())
}

fn show_configuration(
    name: &str,
    is_current: bool,
    target: &Path,
    package_manager: PackageManager,
    template: &str,
    nativewind: bool,
) -> Result<()> {
    let display_name = if is_current {
        target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string())
    } else {
        name.to_string()
    };
    let location = if is_current {
        "Current directory".to_string()
    } else {
        target.display().to_string()
    };
    let template_line = if nativewind {
        "Default Expo (with NativeWind)".to_string()
    } else {
        template.to_string()
    };

    cliclack::note(
        "Configuration",
        format!(
            "Project:         {}\nLocation:        {}\nPackage Manager: {}\nTemplate:        {}\nNativeWind:      {}",
            display_name,
            location,
            package_manager,
            template_line,
            if nativewind { "Yes" } else { "No" },
        ),
    )?;

    Ok(())
}

fn print_success(summary: &Summary) {
    println!();
    println!("{}", "Success! Your Expo app is ready".green().bold());
    println!();

    println!("{}", "Get Started".bold());
    println!("{}", "────────────────────────────────────────".dimmed());
    if summary.project_name != project::CURRENT_DIR_SENTINEL {
        println!("  cd {}", summary.project_name);
    }
    println!("  {}", summary.package_manager.start_command());
    println!();

    if summary.nativewind {
        println!("{}", "NativeWind Ready".cyan().bold());
        println!("{}", "────────────────────────────────────────".dimmed());
        println!("{}", "  Use Tailwind classes in your components:".dimmed());
        println!();
        println!("{}", "  <View className=\"flex-1 bg-blue-500\">".dimmed());
        println!(
            "{}",
            "    <Text className=\"text-white text-xl\">Hello!</Text>".dimmed()
        );
        println!("{}", "  </View>".dimmed());
        println!();
    }

    println!("{}", "Documentation".bold());
    println!("{}", "────────────────────────────────────────".dimmed());
    println!("  {}", "Expo:       https://docs.expo.dev".dimmed());
    if summary.nativewind {
        println!("  {}", "NativeWind: https://www.nativewind.dev".dimmed());
        println!("  {}", "Tailwind:   https://tailwindcss.com".dimmed());
    }

    let warnings = summary.warnings();
    if !warnings.is_empty() {
        println!();
        println!("{}", "Warnings".yellow().bold());
        println!("{}", "────────────────────────────────────────".dimmed());
        for warning in warnings {
            println!("  {} {}", "⚠".yellow(), warning.yellow());
        }
    }

    println!();
}
