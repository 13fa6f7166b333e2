//! The user's resolved stack choices

use crate::compat::Layer;
use std::path::{Component, Path};
use thiserror::Error;

/// Project name offered when the user just presses enter
pub const DEFAULT_PROJECT_NAME: &str = "my-fullstack-app";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Project name cannot be empty")]
    EmptyName,

    #[error("Invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Unknown {} stack '{stack}'. Available: {available}", layer.display_name())]
    UnknownStack {
        layer: Layer,
        stack: String,
        available: String,
    },

    #[error("{stack} does not support {} '{option}'. Available: {available}", layer.option_noun())]
    IncompatibleOption {
        layer: Layer,
        stack: String,
        option: String,
        available: String,
    },

    #[error("No {} is marked compatible with {stack}", layer.option_noun())]
    NoCompatibleOptions { layer: Layer, stack: String },
}

/// Confirmed choices for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSelection {
    /// Also the directory created for the project
    pub project_name: String,
    pub frontend_stack: String,
    pub css_framework: String,
    pub backend_stack: String,
    pub database: String,
}

impl ProjectSelection {
    pub fn stack(&self, layer: Layer) -> &str {
        match layer {
            Layer::Frontend => &self.frontend_stack,
            Layer::Backend => &self.backend_stack,
        }
    }

    /// CSS framework for the frontend, database for the backend
    pub fn option(&self, layer: Layer) -> &str {
        match layer {
            Layer::Frontend => &self.css_framework,
            Layer::Backend => &self.database,
        }
    }

    /// Trim a project name and reject ones that cannot be used as a directory
    pub fn validate_name(name: &str) -> Result<String, SelectionError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::EmptyName);
        }

        let path = Path::new(trimmed);
        if path.is_absolute() {
            return Err(SelectionError::InvalidName {
                name: trimmed.to_string(),
                reason: "must be a relative path",
            });
        }
        if path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(SelectionError::InvalidName {
                name: trimmed.to_string(),
                reason: "must not leave the current directory",
            });
        }
        if path.components().all(|c| matches!(c, Component::CurDir)) {
            return Err(SelectionError::InvalidName {
                name: trimmed.to_string(),
                reason: "must name a new directory",
            });
        }

        Ok(trimmed.to_string())
    }

    /// Multi-line summary shown before confirmation
    pub fn summary(&self) -> String {
        format!(
            "Project name   {}\nFrontend       {} + {}\nBackend        {} + {}",
            self.project_name,
            self.frontend_stack,
            self.css_framework,
            self.backend_stack,
            self.database
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(
            ProjectSelection::validate_name("  demo  ").unwrap(),
            "demo"
        );
        assert_eq!(
            ProjectSelection::validate_name("apps/demo").unwrap(),
            "apps/demo"
        );
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        assert_eq!(
            ProjectSelection::validate_name("   "),
            Err(SelectionError::EmptyName)
        );
    }

    #[test]
    fn test_validate_name_rejects_escaping_paths() {
        assert!(ProjectSelection::validate_name("../demo").is_err());
        assert!(ProjectSelection::validate_name("a/../../b").is_err());
        assert!(ProjectSelection::validate_name(".").is_err());
        assert!(ProjectSelection::validate_name("/tmp/demo").is_err());
    }

    #[test]
    fn test_stack_and_option_by_layer() {
        let selection = ProjectSelection {
            project_name: "demo".to_string(),
            frontend_stack: "Vue".to_string(),
            css_framework: "Bootstrap".to_string(),
            backend_stack: "Django".to_string(),
            database: "MySQL".to_string(),
        };
        assert_eq!(selection.stack(Layer::Frontend), "Vue");
        assert_eq!(selection.option(Layer::Frontend), "Bootstrap");
        assert_eq!(selection.stack(Layer::Backend), "Django");
        assert_eq!(selection.option(Layer::Backend), "MySQL");
        assert!(selection.summary().contains("Vue + Bootstrap"));
    }
}
