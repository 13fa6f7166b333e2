//! Charm-style CLI prompts using cliclack

use super::spinner::SpinnerProgress;
use crate::compat::{CompatibilityMatrix, Layer};
use crate::product::ProductConfig;
use crate::progress::{LogProgress, Progress};
use crate::project::assembler::{AssembleError, Assembler, AssemblyReport, Placement};
use crate::runtime::installer::{DependencyInstaller, InstallOutcome};
use crate::runtime::tool::git_tool;
use crate::session::{collect_selection, Prompter, SelectionPreset};
use crate::templates::fetcher::TemplateFetcher;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name (also the directory created)
    pub name: Option<String>,

    /// Frontend framework
    pub frontend: Option<String>,

    /// CSS framework
    pub css: Option<String>,

    /// Backend framework
    pub backend: Option<String>,

    /// Database
    pub database: Option<String>,

    /// Compatibility matrix file instead of the bundled one
    pub matrix: Option<PathBuf>,

    /// Local directory to use for templates instead of cloning the remote repository
    pub template_dir: Option<PathBuf>,

    /// Directory the project is created in (defaults to the current directory)
    pub output_dir: Option<PathBuf>,

    /// Package manager override
    pub package_manager: Option<String>,

    /// Skip dependency installation
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl CreateArgs {
    fn preset(&self) -> SelectionPreset {
        SelectionPreset {
            project_name: self.name.clone(),
            frontend: self.frontend.clone(),
            css_framework: self.css.clone(),
            backend: self.backend.clone(),
            database: self.database.clone(),
            yes: self.yes,
        }
    }
}

/// How an interactive run ended without error
#[derive(Debug)]
pub enum SessionOutcome {
    Generated(AssemblyReport),
    Cancelled,
}

/// [`Prompter`] backed by cliclack widgets
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn input(&mut self, prompt: &str, default: &str) -> Result<String> {
        let value: String = cliclack::input(prompt)
            .placeholder(default)
            .default_input(default)
            .interact()?;
        Ok(value)
    }

    fn select(&mut self, prompt: &str, options: &[&str]) -> Result<String> {
        let mut select = cliclack::select(prompt);
        for option in options {
            select = select.item(option.to_string(), option, "");
        }
        Ok(select.interact()?)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(cliclack::confirm(prompt).initial_value(true).interact()?)
    }

    fn note(&mut self, title: &str, body: &str) -> Result<()> {
        cliclack::note(title, body)?;
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        cliclack::log::warning(message)?;
        Ok(())
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<SessionOutcome> {
    cliclack::intro(config.display_name())?;
    cliclack::log::info(config.tagline())?;

    // Step 1: Load the compatibility matrix (fatal on failure)
    let matrix = load_matrix(&args.matrix)?;

    // Step 2: Ask for the stack
    let selection = match collect_selection(&mut ClackPrompter, &matrix, &args.preset()) {
        Ok(Some(selection)) => selection,
        Ok(None) => return cancelled(),
        Err(e) if is_interrupted(&e) => return cancelled(),
        Err(e) => return Err(e),
    };

    // Step 3: Check the target directory
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let fetcher = setup_fetcher(config, &args.template_dir)?;
    let assembler = Assembler::new(fetcher)
        .with_output_dir(&output_dir)
        .with_scratch_prefix(config.name());
    let project_dir = assembler.project_dir(&selection);
    if !confirm_directory(&project_dir, args.yes)? {
        return cancelled();
    }

    // Step 4: Assemble the project
    let mut progress = progress_sink();
    let report = match assembler.assemble(&selection, progress.as_mut()).await {
        Ok(report) => report,
        Err(AssembleError::MissingPrerequisite { tool, docs_url }) => {
            drop(progress);
            offer_docs(args.yes)?;
            anyhow::bail!(
                "{} is required to fetch templates. Install it from {} and try again.",
                tool,
                docs_url
            );
        }
        Err(e) => {
            drop(progress);
            return Err(e).context("Project generation failed");
        }
    };
    log_placements(&report);

    // Step 5: Install dependencies
    if args.skip_install {
        drop(progress);
        cliclack::log::info("Skipping dependency installation")?;
    } else {
        let package_manager = args
            .package_manager
            .clone()
            .unwrap_or_else(|| config.package_manager().to_string());
        let installer = DependencyInstaller::new(package_manager);
        let install = installer
            .install(&report.project_dir, progress.as_mut())
            .await
            .context("Dependency installation failed")?;
        drop(progress);

        if !install.all_installed() {
            let pending: Vec<&str> = Layer::ALL
                .iter()
                .filter(|layer| *install.outcome(**layer) != InstallOutcome::Installed)
                .map(|layer| layer.folder_name())
                .collect();
            cliclack::log::warning(format!(
                "Dependencies not installed in {}. Run `{}` there manually.",
                pending.join(", "),
                installer.command_line()
            ))?;
        }
    }

    cliclack::log::success("Project successfully generated!")?;

    // Step 6: Show next steps
    print_next_steps(config, &selection.project_name, &output_dir)?;

    Ok(SessionOutcome::Generated(report))
}

fn log_placements(report: &AssemblyReport) {
    for layer in Layer::ALL {
        match report.placement(layer) {
            Placement::Template(path) => info!(%layer, template = %path, "Layer placed"),
            Placement::Fallback(path) => {
                info!(%layer, template = %path, "Layer placed from stack default")
            }
            Placement::Empty => info!(%layer, "Layer left empty"),
        }
    }
}

/// Spinner on a terminal, plain log events when piped
fn progress_sink() -> Box<dyn Progress> {
    if std::io::stdout().is_terminal() {
        Box::new(SpinnerProgress::new())
    } else {
        Box::new(LogProgress)
    }
}

fn load_matrix(path: &Option<PathBuf>) -> Result<CompatibilityMatrix> {
    match path {
        Some(path) => CompatibilityMatrix::load(path)
            .with_context(|| format!("Error loading compatibility matrix {}", path.display())),
        None => CompatibilityMatrix::builtin().context("Error loading compatibility matrix"),
    }
}

fn setup_fetcher<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateFetcher> {
    let fetcher = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            TemplateFetcher::from_local(path.clone())
        }
        None => {
            let fetcher = TemplateFetcher::from_config(config)?;
            cliclack::log::info(format!(
                "Using templates from {}",
                fetcher.source().describe()
            ))?;
            fetcher
        }
    };

    Ok(fetcher)
}

fn confirm_directory(project_dir: &Path, yes: bool) -> Result<bool> {
    // Warn if directory exists and has files
    if project_dir.is_dir() {
        if let Ok(entries) = std::fs::read_dir(project_dir) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!(
                    "{} already has {} existing items",
                    project_dir.display(),
                    count
                ))?;

                // Auto-confirm with --yes flag
                if !yes {
                    return Ok(cliclack::confirm("Continue anyway?")
                        .initial_value(false)
                        .interact()?);
                }
            }
        }
    }

    Ok(true)
}

fn offer_docs(yes: bool) -> Result<()> {
    let git = git_tool();
    if yes {
        return Ok(());
    }

    let open_docs: bool = cliclack::confirm(format!(
        "Open the {} installation docs ({})?",
        git.config().display_name,
        git.config().docs_url
    ))
    .initial_value(false)
    .interact()?;

    if open_docs {
        git.open_docs()?;
    }
    Ok(())
}

fn cancelled() -> Result<SessionOutcome> {
    cliclack::outro_cancel(
        "Project generation cancelled. Please run the command again to start over.",
    )?;
    Ok(SessionOutcome::Cancelled)
}

/// Esc or Ctrl+C inside a cliclack prompt
fn is_interrupted(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::Interrupted)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_name: &str,
    output_dir: &Path,
) -> Result<()> {
    let project_dir = match std::env::current_dir() {
        Ok(current) if current == output_dir => PathBuf::from(project_name),
        _ => output_dir.join(project_name),
    };
    let steps = config.next_steps(&project_dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Your new project is ready!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_nested_project_dir_is_accepted() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("apps").join("demo");

        assert!(confirm_directory(&project_dir, false).unwrap());
        assert!(!project_dir.exists());
    }

    #[test]
    fn test_empty_existing_dir_needs_no_confirmation() {
        let temp = TempDir::new().unwrap();
        assert!(confirm_directory(temp.path(), false).unwrap());
    }

    #[test]
    fn test_interrupted_prompt_is_detected() {
        let interrupted =
            anyhow::Error::from(std::io::Error::from(std::io::ErrorKind::Interrupted));
        let other = anyhow::anyhow!("boom");
        assert!(is_interrupted(&interrupted));
        assert!(!is_interrupted(&other));
    }
}
