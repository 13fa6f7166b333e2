//! External processes the scaffolder runs
//!
//! This module provides:
//! - Tool detection for prerequisites like git
//! - Dependency installation inside the generated project

pub mod installer;
pub mod tool;

pub use installer::{DependencyInstaller, InstallError, InstallOutcome, InstallReport};
pub use tool::{git_tool, ToolConfig, ToolManager};
