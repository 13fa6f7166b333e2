//! The question flow that turns user answers into a [`ProjectSelection`]
//!
//! Written against the [`Prompter`] trait so the same flow runs behind the
//! cliclack TUI and behind scripted answers.

use crate::compat::{Category, CompatibilityMatrix, Layer};
use crate::project::selection::{ProjectSelection, SelectionError, DEFAULT_PROJECT_NAME};
use anyhow::Result;

/// Source of user answers
pub trait Prompter {
    /// Free-text input, returning `default` for an empty answer
    fn input(&mut self, prompt: &str, default: &str) -> Result<String>;

    /// Single choice among `options`, returning the chosen option
    fn select(&mut self, prompt: &str, options: &[&str]) -> Result<String>;

    /// Yes/no question
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Show a titled block of text
    fn note(&mut self, title: &str, body: &str) -> Result<()>;

    /// Show a warning without stopping the flow
    fn warning(&mut self, message: &str) -> Result<()>;
}

/// Answers given up front on the command line
#[derive(Debug, Clone, Default)]
pub struct SelectionPreset {
    pub project_name: Option<String>,
    pub frontend: Option<String>,
    pub css_framework: Option<String>,
    pub backend: Option<String>,
    pub database: Option<String>,
    /// Skip the final confirmation
    pub yes: bool,
}

/// Ask for every choice not already in `preset`, then confirm.
///
/// Returns `Ok(None)` when the user declines the confirmation.
pub fn collect_selection<P: Prompter + ?Sized>(
    prompter: &mut P,
    matrix: &CompatibilityMatrix,
    preset: &SelectionPreset,
) -> Result<Option<ProjectSelection>> {
    let project_name = match &preset.project_name {
        Some(name) => ProjectSelection::validate_name(name)?,
        None => loop {
            let input = prompter.input("What is your project name?", DEFAULT_PROJECT_NAME)?;
            match ProjectSelection::validate_name(&input) {
                Ok(name) => break name,
                Err(e) => prompter.warning(&e.to_string())?,
            }
        },
    };

    let frontend_stack = choose_stack(
        prompter,
        &matrix.frontend,
        Layer::Frontend,
        preset.frontend.as_deref(),
        "Select your frontend framework:",
    )?;
    let css_framework = choose_option(
        prompter,
        &matrix.frontend,
        Layer::Frontend,
        &frontend_stack,
        preset.css_framework.as_deref(),
        "Select your CSS framework:",
    )?;
    let backend_stack = choose_stack(
        prompter,
        &matrix.backend,
        Layer::Backend,
        preset.backend.as_deref(),
        "Select your backend framework:",
    )?;
    let database = choose_option(
        prompter,
        &matrix.backend,
        Layer::Backend,
        &backend_stack,
        preset.database.as_deref(),
        "Select your database:",
    )?;

    let selection = ProjectSelection {
        project_name,
        frontend_stack,
        css_framework,
        backend_stack,
        database,
    };
    matrix.validate(&selection)?;

    prompter.note("Your project configuration", &selection.summary())?;

    let confirmed = preset.yes
        || prompter.confirm("Do you want to generate a project with these settings?")?;

    Ok(confirmed.then_some(selection))
}

fn choose_stack<P: Prompter + ?Sized>(
    prompter: &mut P,
    category: &Category,
    layer: Layer,
    preset: Option<&str>,
    prompt: &str,
) -> Result<String> {
    let answer = match preset {
        Some(name) => name.to_string(),
        None => {
            let options: Vec<&str> = category.stacks.iter().map(String::as_str).collect();
            prompter.select(prompt, &options)?
        }
    };

    category
        .find_stack(&answer)
        .map(str::to_string)
        .ok_or_else(|| {
            SelectionError::UnknownStack {
                layer,
                stack: answer,
                available: category.stacks.join(", "),
            }
            .into()
        })
}

fn choose_option<P: Prompter + ?Sized>(
    prompter: &mut P,
    category: &Category,
    layer: Layer,
    stack: &str,
    preset: Option<&str>,
    prompt: &str,
) -> Result<String> {
    let options = category.compatible_options(stack);
    if options.is_empty() {
        return Err(SelectionError::NoCompatibleOptions {
            layer,
            stack: stack.to_string(),
        }
        .into());
    }

    let answer = match preset {
        Some(name) => name.to_string(),
        None => prompter.select(prompt, &options)?,
    };

    category
        .find_option(stack, &answer)
        .map(str::to_string)
        .ok_or_else(|| {
            SelectionError::IncompatibleOption {
                layer,
                stack: stack.to_string(),
                option: answer,
                available: options.join(", "),
            }
            .into()
        })
}
