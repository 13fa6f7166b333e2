//! Template fetching, path resolution, and copying
//!
//! This module provides:
//! - The template path table and its fallback chain (pure, no I/O)
//! - Template sources: remote git repositories or local checkouts
//! - Run-scoped scratch directories holding the fetched templates
//! - Recursive copying of a template into the generated project

pub mod copier;
pub mod fetcher;
pub mod paths;
pub mod scratch;

pub use copier::copy_dir;
pub use fetcher::{TemplateFetcher, TemplateSource};
pub use paths::{candidates, fallback, resolve, LayerPaths, StackPaths, TemplatePaths};
pub use scratch::ScratchDir;
