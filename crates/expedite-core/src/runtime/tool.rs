//! External tool detection
//!
//! Provides a small abstraction for checking that CLI tools the scaffolder
//! shells out to (git) are available, and for pointing users at their docs.

use anyhow::Result;
use colored::Colorize;
use std::process::{Command, Stdio};

/// Configuration for a CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "git")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// URL to the installation documentation
    pub docs_url: &'static str,
}

/// Manager for checking CLI tools
#[derive(Debug, Clone)]
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    /// Create a new tool manager with the given configuration
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Get the tool configuration
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Check if the tool is installed by asking it for its version
    pub fn is_installed(&self) -> bool {
        Command::new(self.config.name)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Open the tool's installation docs in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} installation docs in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}

/// Pre-configured tool manager for git
pub fn git_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "git",
        display_name: "Git",
        docs_url: "https://git-scm.com/downloads",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_tool() -> ToolManager {
        ToolManager::new(ToolConfig {
            name: "expedite-no-such-tool",
            display_name: "Nothing",
            docs_url: "https://example.invalid",
        })
    }

    #[test]
    fn test_missing_tool_not_installed() {
        let tool = missing_tool();
        assert!(!tool.is_installed());
    }

    #[test]
    fn test_git_tool_config() {
        let git = git_tool();
        assert_eq!(git.config().name, "git");
        assert!(git.config().docs_url.starts_with("https://"));
    }
}
