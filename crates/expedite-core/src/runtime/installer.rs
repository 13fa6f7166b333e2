//! Best-effort dependency installation inside generated folders

use crate::compat::Layer;
use crate::progress::Progress;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Project directory not found: {}", .0.display())]
    ProjectNotFound(PathBuf),
}

/// What happened in one layer folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// The command could not run or exited unsuccessfully
    Failed(String),
    /// The layer folder did not exist
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub frontend: InstallOutcome,
    pub backend: InstallOutcome,
}

impl InstallReport {
    pub fn outcome(&self, layer: Layer) -> &InstallOutcome {
        match layer {
            Layer::Frontend => &self.frontend,
            Layer::Backend => &self.backend,
        }
    }

    pub fn all_installed(&self) -> bool {
        Layer::ALL
            .iter()
            .all(|layer| *self.outcome(*layer) == InstallOutcome::Installed)
    }
}

/// Runs `<package manager> install` in each layer folder
#[derive(Debug, Clone)]
pub struct DependencyInstaller {
    package_manager: String,
}

impl DependencyInstaller {
    pub fn new(package_manager: impl Into<String>) -> Self {
        Self {
            package_manager: package_manager.into(),
        }
    }

    pub fn command_line(&self) -> String {
        format!("{} install", self.package_manager)
    }

    /// Install dependencies in `Frontend/` then `Backend/`.
    ///
    /// A failure in one folder is a warning and does not stop the other. Only
    /// a missing project directory is an error.
    pub async fn install<P: Progress + ?Sized>(
        &self,
        project_dir: &Path,
        progress: &mut P,
    ) -> Result<InstallReport, InstallError> {
        if !project_dir.is_dir() {
            let err = InstallError::ProjectNotFound(project_dir.to_path_buf());
            progress.fail(&format!("Dependency installation failed: {}", err));
            return Err(err);
        }

        let frontend = self.install_layer(Layer::Frontend, project_dir, progress).await;
        let backend = self.install_layer(Layer::Backend, project_dir, progress).await;

        Ok(InstallReport { frontend, backend })
    }

    async fn install_layer<P: Progress + ?Sized>(
        &self,
        layer: Layer,
        project_dir: &Path,
        progress: &mut P,
    ) -> InstallOutcome {
        let dir = project_dir.join(layer.folder_name());
        if !dir.is_dir() {
            let reason = format!("{} directory not found", layer);
            progress.warn(&format!(
                "Skipping {} dependencies: {}",
                layer.display_name(),
                reason
            ));
            return InstallOutcome::Skipped(reason);
        }

        progress.start(&format!("Installing {} dependencies...", layer.display_name()));
        debug!(command = %self.command_line(), dir = %dir.display(), "Running installer");

        // The working directory is passed to the child; the process cwd is never changed.
        let status = Command::new(&self.package_manager)
            .arg("install")
            .current_dir(&dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        let reason = match status {
            Ok(status) if status.success() => {
                progress.succeed(&format!(
                    "{} dependencies installed.",
                    layer.folder_name()
                ));
                return InstallOutcome::Installed;
            }
            Ok(status) => match status.code() {
                Some(code) => format!("`{}` exited with code {}", self.command_line(), code),
                None => format!("`{}` was terminated by a signal", self.command_line()),
            },
            Err(e) => format!("failed to run `{}`: {}", self.command_line(), e),
        };

        progress.warn(&format!(
            "Failed to install {} dependencies: {}",
            layer.display_name(),
            reason
        ));
        InstallOutcome::Failed(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        warnings: Vec<String>,
        failures: Vec<String>,
    }

    impl Progress for Recorder {
        fn start(&mut self, _message: &str) {}
        fn succeed(&mut self, _message: &str) {}
        fn warn(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
        fn fail(&mut self, message: &str) {
            self.failures.push(message.to_string());
        }
    }

    #[tokio::test]
    async fn test_missing_project_dir_is_error() {
        let temp = TempDir::new().unwrap();
        let mut progress = Recorder::default();
        let result = DependencyInstaller::new("npm")
            .install(&temp.path().join("missing"), &mut progress)
            .await;

        assert!(matches!(result, Err(InstallError::ProjectNotFound(_))));
        assert_eq!(progress.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_failing_command_warns_for_both_layers() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("Frontend")).unwrap();
        std::fs::create_dir(temp.path().join("Backend")).unwrap();
        let mut progress = Recorder::default();

        let report = DependencyInstaller::new("expedite-no-such-package-manager")
            .install(temp.path(), &mut progress)
            .await
            .unwrap();

        assert!(matches!(report.frontend, InstallOutcome::Failed(_)));
        assert!(matches!(report.backend, InstallOutcome::Failed(_)));
        assert!(!report.all_installed());
        assert_eq!(progress.warnings.len(), 2);
        assert!(progress.warnings[0].contains("frontend"));
        assert!(progress.warnings[1].contains("backend"));
    }

    #[tokio::test]
    async fn test_missing_layer_folder_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("Backend")).unwrap();
        let mut progress = Recorder::default();

        let report = DependencyInstaller::new("expedite-no-such-package-manager")
            .install(temp.path(), &mut progress)
            .await
            .unwrap();

        assert!(matches!(report.frontend, InstallOutcome::Skipped(_)));
        assert!(matches!(report.backend, InstallOutcome::Failed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_command_is_installed() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("Frontend")).unwrap();
        std::fs::create_dir(temp.path().join("Backend")).unwrap();
        let mut progress = Recorder::default();

        // `true install` ignores its argument and exits 0
        let report = DependencyInstaller::new("true")
            .install(temp.path(), &mut progress)
            .await
            .unwrap();

        assert!(report.all_installed());
        assert!(progress.warnings.is_empty());
    }
}
