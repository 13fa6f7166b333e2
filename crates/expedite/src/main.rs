//! Expedite CLI - Full-stack project scaffolding

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use expedite_core::tui::{CreateArgs, SessionOutcome};
use expedite_core::ProductConfig;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Expedite product configuration
#[derive(Clone)]
pub struct ExpediteConfig;

impl ProductConfig for ExpediteConfig {
    fn name(&self) -> &'static str {
        "expedite"
    }

    fn display_name(&self) -> &'static str {
        "Expedite"
    }

    fn tagline(&self) -> &'static str {
        "Welcome to Expedite - Full-stack project scaffolding tool!"
    }

    fn default_template_repo(&self) -> &'static str {
        "https://github.com/Nithin6524/expedite-templates"
    }

    fn template_repo_env(&self) -> &'static str {
        "EXPEDITE_TEMPLATE_REPO"
    }

    fn template_branch_env(&self) -> &'static str {
        "EXPEDITE_TEMPLATE_BRANCH"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding full-stack projects"
    }

    fn next_steps(&self, project_dir: &Path) -> Vec<String> {
        let pm = self.package_manager();
        vec![
            format!("cd {}", project_dir.display()),
            format!("Start the frontend: cd Frontend && {} start", pm),
            format!("Start the backend: cd Backend && {} start", pm),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "expedite")]
#[command(about = "CLI for scaffolding full-stack projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new full-stack project
    Create(CliCreateArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct CliCreateArgs {
    /// Project name (also the directory created)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Frontend framework (e.g. React, Vue)
    #[arg(long)]
    pub frontend: Option<String>,

    /// CSS framework (must be compatible with the frontend)
    #[arg(long)]
    pub css: Option<String>,

    /// Backend framework (e.g. Express.js, Django)
    #[arg(long)]
    pub backend: Option<String>,

    /// Database (must be compatible with the backend)
    #[arg(long)]
    pub database: Option<String>,

    /// Compatibility matrix JSON file to use instead of the bundled one
    #[arg(long)]
    pub matrix: Option<PathBuf>,

    /// Local directory to use for templates instead of cloning the remote repository (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Directory to create the project in
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package manager used to install dependencies
    #[arg(long = "package-manager")]
    pub package_manager: Option<String>,

    /// Skip dependency installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            frontend: args.frontend,
            css: args.css,
            backend: args.backend,
            database: args.database,
            matrix: args.matrix,
            template_dir: args.template_dir,
            output_dir: args.output,
            package_manager: args.package_manager,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("expedite={level},expedite_core={level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);
    let config = ExpediteConfig;

    // No subcommand provided, default to create behavior (interactive mode)
    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args,
        None => CliCreateArgs::default(),
    };

    let result = expedite_core::run(&config, create_args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result? {
        SessionOutcome::Generated(report) => {
            tracing::info!(project_dir = %report.project_dir.display(), "Done");
        }
        SessionOutcome::Cancelled => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args_parse() {
        let args = Args::parse_from([
            "expedite",
            "create",
            "--name",
            "demo",
            "--frontend",
            "Vue",
            "--css",
            "Bootstrap",
            "--backend",
            "Express.js",
            "--database",
            "PostgreSQL",
            "--skip-install",
            "-y",
        ]);
        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        let create: CreateArgs = create.into();
        assert_eq!(create.name.as_deref(), Some("demo"));
        assert_eq!(create.css.as_deref(), Some("Bootstrap"));
        assert!(create.skip_install);
        assert!(create.yes);
    }

    #[test]
    fn test_verbose_is_global() {
        let args = Args::parse_from(["expedite", "create", "-vv"]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_next_steps() {
        let steps = ExpediteConfig.next_steps(Path::new("demo"));
        assert_eq!(steps[0], "cd demo");
        assert!(steps[1].contains("cd Frontend && npm start"));
        assert!(steps[2].contains("cd Backend && npm start"));
    }
}
