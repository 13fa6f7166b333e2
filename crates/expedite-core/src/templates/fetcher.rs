//! Template fetching from a remote git repository or a local checkout
//!
//! Remote sources are shallow, single-branch clones into a [`ScratchDir`].
//! Local sources (for template development) are copied into the scratch
//! directory instead, so the assembler sees the same layout either way.

use super::copier::copy_dir;
use super::scratch::ScratchDir;
use crate::product::ProductConfig;
use crate::project::assembler::AssembleError;
use crate::runtime::tool::{git_tool, ToolManager};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;
use url::Url;

/// Template source - either a remote git repository or a local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote { url: Url, branch: String },
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a remote template source from a product config, honouring env overrides
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.template_repo_env())
            .unwrap_or_else(|_| config.default_template_repo().to_string());
        let branch = std::env::var(config.template_branch_env())
            .unwrap_or_else(|_| config.default_template_branch().to_string());
        Self::remote(&url_str, &branch)
    }

    pub fn remote(url: &str, branch: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid template URL: {}", url))?;
        if branch.trim().is_empty() {
            anyhow::bail!("Template branch cannot be empty");
        }
        Ok(Self::Remote {
            url,
            branch: branch.trim().to_string(),
        })
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    /// Whether fetching needs the git client
    pub fn requires_git(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Human-readable location for log messages
    pub fn describe(&self) -> String {
        match self {
            Self::Remote { url, branch } => format!("{} ({})", url, branch),
            Self::Local(path) => path.display().to_string(),
        }
    }
}

/// Template fetcher - retrieves the template source into a scratch directory
#[derive(Debug, Clone)]
pub struct TemplateFetcher {
    source: TemplateSource,
    git: ToolManager,
}

impl TemplateFetcher {
    pub fn new(source: TemplateSource) -> Self {
        Self::with_git(source, git_tool())
    }

    /// Use a specific git tool entry (e.g. a non-default binary)
    pub fn with_git(source: TemplateSource, git: ToolManager) -> Self {
        Self { source, git }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        Ok(Self::new(TemplateSource::from_config(config)?))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf) -> Self {
        Self::new(TemplateSource::local(path))
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Fail early when the source needs a tool that is not installed
    pub fn check_prerequisites(&self) -> Result<(), AssembleError> {
        if self.source.requires_git() && !self.git.is_installed() {
            return Err(AssembleError::MissingPrerequisite {
                tool: self.git.config().display_name,
                docs_url: self.git.config().docs_url,
            });
        }
        Ok(())
    }

    /// Populate `scratch` with the template source. Not retried on failure.
    pub async fn fetch(&self, scratch: &ScratchDir) -> Result<(), AssembleError> {
        match &self.source {
            TemplateSource::Remote { url, branch } => {
                debug!(%url, %branch, dest = %scratch.path().display(), "Cloning templates");
                let output = Command::new(self.git.config().name)
                    .arg("clone")
                    .arg("--depth")
                    .arg("1")
                    .arg("--single-branch")
                    .arg("--branch")
                    .arg(branch)
                    .arg(url.as_str())
                    .arg(scratch.path())
                    .env("GIT_TERMINAL_PROMPT", "0")
                    .stdin(Stdio::null())
                    .output()
                    .await
                    .map_err(|e| AssembleError::Clone {
                        location: self.source.describe(),
                        reason: e.to_string(),
                    })?;

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    let reason = stderr
                        .lines()
                        .rev()
                        .find(|line| !line.trim().is_empty())
                        .map(|line| line.trim().to_string())
                        .unwrap_or_else(|| format!("git exited with {}", output.status));
                    return Err(AssembleError::Clone {
                        location: self.source.describe(),
                        reason,
                    });
                }
                Ok(())
            }
            TemplateSource::Local(path) => {
                debug!(path = %path.display(), dest = %scratch.path().display(), "Copying local templates");
                copy_dir(path, scratch.path()).map_err(|e| AssembleError::Clone {
                    location: self.source.describe(),
                    reason: e.to_string(),
                })?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::tool::ToolConfig;
    use std::path::Path;

    #[derive(Clone)]
    struct EnvConfig;

    impl ProductConfig for EnvConfig {
        fn name(&self) -> &'static str {
            "expedite"
        }
        fn display_name(&self) -> &'static str {
            "Expedite"
        }
        fn tagline(&self) -> &'static str {
            ""
        }
        fn default_template_repo(&self) -> &'static str {
            "https://github.com/example/templates"
        }
        fn template_repo_env(&self) -> &'static str {
            "EXPEDITE_FETCHER_TEST_REPO"
        }
        fn template_branch_env(&self) -> &'static str {
            "EXPEDITE_FETCHER_TEST_BRANCH"
        }
        fn next_steps(&self, _project_dir: &Path) -> Vec<String> {
            Vec::new()
        }
        fn cli_description(&self) -> &'static str {
            ""
        }
    }

    #[test]
    fn test_source_from_config_and_env() {
        match TemplateSource::from_config(&EnvConfig).unwrap() {
            TemplateSource::Remote { url, branch } => {
                assert_eq!(url.as_str(), "https://github.com/example/templates");
                assert_eq!(branch, "main");
            }
            other => panic!("unexpected source {:?}", other),
        }

        std::env::set_var("EXPEDITE_FETCHER_TEST_REPO", "not a url");
        assert!(TemplateSource::from_config(&EnvConfig).is_err());
        std::env::remove_var("EXPEDITE_FETCHER_TEST_REPO");
    }

    #[test]
    fn test_only_remote_requires_git() {
        assert!(TemplateSource::remote("https://example.com/t.git", "main")
            .unwrap()
            .requires_git());
        assert!(!TemplateSource::local(PathBuf::from("templates")).requires_git());
        assert!(TemplateSource::remote("https://example.com/t.git", " ").is_err());
    }

    #[test]
    fn test_missing_git_is_prerequisite_error() {
        let source = TemplateSource::remote("https://example.com/t.git", "main").unwrap();
        let fetcher = TemplateFetcher::with_git(
            source,
            ToolManager::new(ToolConfig {
                name: "expedite-no-such-git",
                display_name: "Git",
                docs_url: "https://git-scm.com/downloads",
            }),
        );
        assert!(matches!(
            fetcher.check_prerequisites(),
            Err(AssembleError::MissingPrerequisite { tool: "Git", .. })
        ));
    }

    #[tokio::test]
    async fn test_local_fetch_copies_tree() {
        let templates = tempfile::TempDir::new().unwrap();
        let nested = templates.path().join("templates/backend/express/mongodb");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("index.js"), "// server").unwrap();

        let root = tempfile::TempDir::new().unwrap();
        let scratch = ScratchDir::acquire(root.path(), "expedite").unwrap();
        let fetcher = TemplateFetcher::from_local(templates.path().to_path_buf());
        fetcher.check_prerequisites().unwrap();
        fetcher.fetch(&scratch).await.unwrap();

        assert!(scratch
            .path()
            .join("templates/backend/express/mongodb/index.js")
            .is_file());
    }
}
