//! Compatibility matrix types and loading

use super::{Layer, OrderedMap};
use crate::project::selection::{ProjectSelection, SelectionError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Matrix bundled into the binary, used when no `--matrix` file is given
const BUILTIN_MATRIX: &str = include_str!("../../data/compatibility_matrix.json");

#[derive(Debug, Error)]
pub enum CompatError {
    #[error("Failed to read compatibility matrix {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse compatibility matrix: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{layer} stack '{stack}' is listed but has no compatibility entry")]
    MissingCompatibility { layer: Layer, stack: String },

    #[error("{layer} section lists no stacks")]
    NoStacks { layer: Layer },
}

/// Stacks of one layer and which secondary options each supports
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    /// Stack names in display order
    pub stacks: Vec<String>,

    /// stack -> option -> compatible
    #[serde(alias = "frontend_compatibility", alias = "backend_compatibility")]
    pub compatibility: OrderedMap<OrderedMap<bool>>,
}

impl Category {
    /// Options flagged compatible with `stack`, in document order
    pub fn compatible_options(&self, stack: &str) -> Vec<&str> {
        self.compatibility
            .get(stack)
            .map(|options| {
                options
                    .iter()
                    .filter(|(_, compatible)| **compatible)
                    .map(|(name, _)| name)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_compatible(&self, stack: &str, option: &str) -> bool {
        self.compatibility
            .get(stack)
            .and_then(|options| options.get(option))
            .copied()
            .unwrap_or(false)
    }

    /// Find a listed stack ignoring ASCII case, returning its canonical name
    pub fn find_stack(&self, name: &str) -> Option<&str> {
        self.stacks
            .iter()
            .find(|s| s.eq_ignore_ascii_case(name.trim()))
            .map(String::as_str)
    }

    /// Find a compatible option of `stack` ignoring ASCII case
    pub fn find_option(&self, stack: &str, name: &str) -> Option<&str> {
        self.compatibility
            .get(stack)?
            .get_key_value_ignore_case(name.trim())
            .filter(|(_, compatible)| **compatible)
            .map(|(key, _)| key)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompatibilityMatrix {
    pub frontend: Category,
    pub backend: Category,
}

#[derive(Deserialize)]
struct MatrixDocument {
    compatibility_matrix: CompatibilityMatrix,
}

impl CompatibilityMatrix {
    /// Parse a document with a top-level `compatibility_matrix` object
    pub fn from_json(content: &str) -> Result<Self, CompatError> {
        let document: MatrixDocument = serde_json::from_str(content)?;
        let matrix = document.compatibility_matrix;
        matrix.check()?;
        Ok(matrix)
    }

    pub fn load(path: &Path) -> Result<Self, CompatError> {
        let content = std::fs::read_to_string(path).map_err(|source| CompatError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn builtin() -> Result<Self, CompatError> {
        Self::from_json(BUILTIN_MATRIX)
    }

    pub fn category(&self, layer: Layer) -> &Category {
        match layer {
            Layer::Frontend => &self.frontend,
            Layer::Backend => &self.backend,
        }
    }

    /// Confirm a selection names listed stacks with compatible options
    pub fn validate(&self, selection: &ProjectSelection) -> Result<(), SelectionError> {
        for layer in Layer::ALL {
            let category = self.category(layer);
            let stack = selection.stack(layer);
            let option = selection.option(layer);

            if !category.stacks.iter().any(|s| s == stack) {
                return Err(SelectionError::UnknownStack {
                    layer,
                    stack: stack.to_string(),
                    available: category.stacks.join(", "),
                });
            }
            if !category.is_compatible(stack, option) {
                return Err(SelectionError::IncompatibleOption {
                    layer,
                    stack: stack.to_string(),
                    option: option.to_string(),
                    available: category.compatible_options(stack).join(", "),
                });
            }
        }
        Ok(())
    }

    fn check(&self) -> Result<(), CompatError> {
        for layer in Layer::ALL {
            let category = self.category(layer);
            if category.stacks.is_empty() {
                return Err(CompatError::NoStacks { layer });
            }
            for stack in &category.stacks {
                if category.compatibility.get(stack).is_none() {
                    return Err(CompatError::MissingCompatibility {
                        layer,
                        stack: stack.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
