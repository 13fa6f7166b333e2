//! Expedite Core - Shared library for full-stack project scaffolding
//!
//! This library asks which frontend, CSS framework, backend and database a user
//! wants, pulls the matching templates out of a git-hosted template repository
//! and assembles them into a new project directory.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Compatibility table, template path resolution,
//!   scratch clones, directory copying, dependency installation
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, `Assembler` and
//!   the `Prompter`-driven question flow in [`session`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use expedite_core::{Assembler, ProjectSelection, TemplateFetcher};
//!
//! let fetcher = TemplateFetcher::from_config(&MyConfig)?;
//! let assembler = Assembler::new(fetcher);
//! let report = assembler.assemble(&selection, &mut progress).await?;
//! ```

pub mod compat;
pub mod product;
pub mod progress;
pub mod project;
pub mod runtime;
pub mod session;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use compat::{Category, CompatError, CompatibilityMatrix, Layer};
pub use product::ProductConfig;
pub use progress::{LogProgress, Progress};
pub use project::{
    AssembleError, Assembler, AssemblyReport, Placement, ProjectMetadata, ProjectSelection,
    SelectionError,
};
pub use runtime::{DependencyInstaller, InstallOutcome, InstallReport, ToolManager};
pub use session::{collect_selection, Prompter, SelectionPreset};
pub use templates::{copy_dir, resolve, ScratchDir, TemplateFetcher, TemplatePaths, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
