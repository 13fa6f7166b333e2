//! Stack compatibility data
//!
//! This module provides:
//! - The frontend/backend [`Layer`] split shared by every other module
//! - An insertion-ordered map used to keep choices in document order
//! - The [`CompatibilityMatrix`] loaded from JSON

pub mod matrix;
pub mod ordered;

use std::fmt;

pub use matrix::{Category, CompatError, CompatibilityMatrix};
pub use ordered::OrderedMap;

/// The two halves of a generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Frontend,
    Backend,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Frontend, Layer::Backend];

    /// Folder created inside the project root
    pub fn folder_name(&self) -> &'static str {
        match self {
            Layer::Frontend => "Frontend",
            Layer::Backend => "Backend",
        }
    }

    /// Lowercase name used in prose ("Setting up React frontend...")
    pub fn display_name(&self) -> &'static str {
        match self {
            Layer::Frontend => "frontend",
            Layer::Backend => "backend",
        }
    }

    /// What the secondary choice of this layer is called
    pub fn option_noun(&self) -> &'static str {
        match self {
            Layer::Frontend => "CSS framework",
            Layer::Backend => "database",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder_name())
    }
}
