//! create-expo-nativewind - scaffold Expo apps with optional NativeWind setup

use clap::{ArgAction, Parser};
use colored::Colorize;
use expo_create_core::pm::ManagerFlags;
use expo_create_core::tui::CreateArgs;
use expo_create_core::ScaffoldError;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set once by the first interrupt; later interrupts and in-flight error
/// reporting are suppressed from then on
static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);

#[derive(Parser, Debug)]
#[command(name = "create-expo-nativewind")]
#[command(about = "Create a new Expo app with optional NativeWind setup")]
#[command(version, disable_version_flag = true)]
pub struct Args {
    /// Name of the project (`.` scaffolds into the current directory)
    pub project_name: Option<String>,

    /// Setup project with NativeWind (TailwindCSS)
    #[arg(long)]
    pub nativewind: bool,

    /// Expo template to use [default: blank]
    #[arg(long)]
    pub template: Option<String>,

    /// Use npm as package manager
    #[arg(long, group = "manager")]
    pub npm: bool,

    /// Use yarn as package manager
    #[arg(long, group = "manager")]
    pub yarn: bool,

    /// Use pnpm as package manager
    #[arg(long, group = "manager")]
    pub pnpm: bool,

    /// Use bun as package manager
    #[arg(long, group = "manager")]
    pub bun: bool,

    /// Skip installing dependencies
    #[arg(long = "no-install", action = ArgAction::SetFalse)]
    pub install: bool,

    /// Skip git initialization
    #[arg(long = "no-git", action = ArgAction::SetFalse)]
    pub git: bool,

    /// Output the current version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            name: args.project_name,
            template: args.template,
            nativewind: args.nativewind,
            manager_flags: ManagerFlags {
                npm: args.npm,
                yarn: args.yarn,
                pnpm: args.pnpm,
                bun: args.bun,
            },
            install: args.install,
            git: args.git,
        }
    }
}

/// Claim the shutdown path. True for the first caller only; repeated
/// interrupts fall through without re-entering the handler body.
fn begin_shutdown() -> bool {
    !SHUTTING_DOWN.swap(true, Ordering::SeqCst)
}

fn install_signal_handlers() {
    // Primary interrupt: caught once, further interrupts ignored
    ctrlc::set_handler(move || {
        if !begin_shutdown() {
            return;
        }
        let _ = console::Term::stderr().show_cursor();
        eprintln!();
        eprintln!("  {}", "Interrupted.".yellow());
        std::process::exit(130);
    })
    .ok();

    // Termination signal gets its own exit code
    #[cfg(unix)]
    tokio::spawn(async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut term) = signal(SignalKind::terminate()) {
            term.recv().await;
            if begin_shutdown() {
                let _ = console::Term::stderr().show_cursor();
                std::process::exit(143);
            }
        }
    });
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    install_signal_handlers();

    let args = Args::parse();
    let result = expo_create_core::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(err) = result {
        // A caught interrupt owns the exit path; don't report step errors
        if SHUTTING_DOWN.load(Ordering::SeqCst) {
            std::process::exit(130);
        }

        match err.downcast_ref::<ScaffoldError>() {
            Some(ScaffoldError::Cancelled) => {
                println!();
                println!("  {}", "Operation cancelled by user.".yellow());
                std::process::exit(0);
            }
            Some(ScaffoldError::DirectoryExists { .. }) => {
                eprintln!();
                eprintln!("  {} {}", "Error:".red().bold(), err.to_string().red());
                eprintln!(
                    "  {}",
                    "Please choose a different name or remove the existing directory.".dimmed()
                );
                std::process::exit(1);
            }
            _ => {
                eprintln!();
                eprintln!("{} {:#}", "✖ Error:".red(), err);
                std::process::exit(1);
            }
        }
    }
}
