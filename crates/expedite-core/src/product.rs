//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to define the identity of the tool and
//! where its templates come from.

use std::path::Path;

/// Configuration trait for the scaffolding product
///
/// Implementors define:
/// - Product identity (name, display name)
/// - Template repository and branch, plus the env vars overriding them
/// - The package manager used to install generated dependencies
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command and scratch directory names)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// One-line welcome message shown under the intro
    fn tagline(&self) -> &'static str;

    /// Default git repository holding the templates
    fn default_template_repo(&self) -> &'static str;

    /// Branch cloned from the template repository
    fn default_template_branch(&self) -> &'static str {
        "main"
    }

    /// Environment variable name for overriding the template repository
    fn template_repo_env(&self) -> &'static str;

    /// Environment variable name for overriding the template branch
    fn template_branch_env(&self) -> &'static str;

    /// Package manager invoked inside each generated folder
    fn package_manager(&self) -> &'static str {
        "npm"
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_dir: &Path) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;
}
