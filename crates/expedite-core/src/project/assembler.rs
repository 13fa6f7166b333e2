//! Project assembly: fetch templates, copy each layer, record metadata

use super::metadata::{write_metadata, MetadataError, ProjectMetadata};
use super::selection::ProjectSelection;
use crate::compat::Layer;
use crate::progress::Progress;
use crate::templates::{copy_dir, paths, ScratchDir, TemplateFetcher, TemplatePaths};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Prefix of scratch directory names unless the product sets its own
const DEFAULT_SCRATCH_PREFIX: &str = "expedite";

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("{tool} is not installed. Please install it and try again.")]
    MissingPrerequisite {
        tool: &'static str,
        docs_url: &'static str,
    },

    #[error("Failed to create scratch directory in {}", root.display())]
    Scratch {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch templates from {location}: {reason}")]
    Clone { location: String, reason: String },

    #[error("Failed to create {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Where a layer's files came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The path resolved for the chosen stack and option
    Template(String),
    /// The stack default, after the resolved path was missing
    Fallback(String),
    /// No template was found; an empty folder was created
    Empty,
}

/// Result of a successful assembly
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub project_dir: PathBuf,
    pub frontend: Placement,
    pub backend: Placement,
    /// Degradations reported along the way, in order
    pub warnings: Vec<String>,
    pub metadata: ProjectMetadata,
}

impl AssemblyReport {
    pub fn placement(&self, layer: Layer) -> &Placement {
        match layer {
            Layer::Frontend => &self.frontend,
            Layer::Backend => &self.backend,
        }
    }
}

/// Builds a project directory from a template source
#[derive(Debug, Clone)]
pub struct Assembler {
    fetcher: TemplateFetcher,
    paths: TemplatePaths,
    output_dir: PathBuf,
    scratch_root: PathBuf,
    scratch_prefix: String,
}

impl Assembler {
    pub fn new(fetcher: TemplateFetcher) -> Self {
        Self {
            fetcher,
            paths: TemplatePaths::builtin(),
            output_dir: PathBuf::from("."),
            scratch_root: std::env::temp_dir(),
            scratch_prefix: DEFAULT_SCRATCH_PREFIX.to_string(),
        }
    }

    pub fn with_paths(mut self, paths: TemplatePaths) -> Self {
        self.paths = paths;
        self
    }

    /// Directory the project folder is created in
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Directory scratch clones are created under
    pub fn with_scratch_root(mut self, scratch_root: impl Into<PathBuf>) -> Self {
        self.scratch_root = scratch_root.into();
        self
    }

    /// Name prefix for scratch clones, usually the product name
    pub fn with_scratch_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.scratch_prefix = prefix.into();
        self
    }

    pub fn project_dir(&self, selection: &ProjectSelection) -> PathBuf {
        self.output_dir.join(&selection.project_name)
    }

    /// Generate the project for `selection`.
    ///
    /// Only a missing prerequisite, a failed fetch, or an I/O failure while
    /// creating the project folders or metadata is an error. Templates that are
    /// missing or fail to copy degrade to the stack default and then to an
    /// empty folder. The scratch clone is removed
    /// before this returns, whatever the outcome.
    #[instrument(skip_all, fields(project = %selection.project_name))]
    pub async fn assemble<P: Progress + ?Sized>(
        &self,
        selection: &ProjectSelection,
        progress: &mut P,
    ) -> Result<AssemblyReport, AssembleError> {
        if let Err(e) = self.fetcher.check_prerequisites() {
            progress.fail(&e.to_string());
            return Err(e);
        }

        let scratch = ScratchDir::acquire(&self.scratch_root, &self.scratch_prefix).map_err(
            |source| AssembleError::Scratch {
                root: self.scratch_root.clone(),
                source,
            },
        )?;

        progress.start("Cloning templates...");
        if let Err(e) = self.fetcher.fetch(&scratch).await {
            progress.fail(&e.to_string());
            return Err(e);
        }
        progress.succeed("Templates fetched successfully.");

        let project_dir = self.project_dir(selection);
        std::fs::create_dir_all(&project_dir).map_err(|source| AssembleError::CreateDir {
            path: project_dir.clone(),
            source,
        })?;

        let mut warnings = Vec::new();
        let frontend = self.place_layer(
            Layer::Frontend,
            selection,
            scratch.path(),
            &project_dir,
            progress,
            &mut warnings,
        )?;
        let backend = self.place_layer(
            Layer::Backend,
            selection,
            scratch.path(),
            &project_dir,
            progress,
            &mut warnings,
        )?;

        progress.start("Writing project configuration...");
        let metadata = write_metadata(selection, &project_dir).await?;
        progress.succeed("Project configuration saved.");

        info!(
            project_dir = %project_dir.display(),
            warnings = warnings.len(),
            "Project assembled"
        );

        Ok(AssemblyReport {
            project_dir,
            frontend,
            backend,
            warnings,
            metadata,
        })
    }

    /// Copy the first existing template of the fallback chain into the layer folder
    fn place_layer<P: Progress + ?Sized>(
        &self,
        layer: Layer,
        selection: &ProjectSelection,
        scratch: &Path,
        project_dir: &Path,
        progress: &mut P,
        warnings: &mut Vec<String>,
    ) -> Result<Placement, AssembleError> {
        let stack = selection.stack(layer);
        let option = selection.option(layer);
        let dest = project_dir.join(layer.folder_name());

        progress.start(&format!("Setting up {} {}...", stack, layer.display_name()));

        let chain = paths::candidates(self.paths.layer(layer), stack, option);
        if chain.is_empty() {
            report(
                progress,
                warnings,
                format!("No template path provided for {}. Creating empty directory.", layer),
            );
            create_empty(layer, &dest)?;
            return Ok(Placement::Empty);
        }

        for (position, candidate) in chain.iter().enumerate() {
            let next = if position + 1 < chain.len() {
                "Trying fallback template..."
            } else {
                "No suitable template found. Creating empty directory."
            };
            let src = scratch.join(candidate);
            if !src.is_dir() {
                report(
                    progress,
                    warnings,
                    format!("{} template not found at {}. {}", layer, candidate, next),
                );
                continue;
            }

            match copy_dir(&src, &dest) {
                Ok(files) => {
                    debug!(%layer, template = %candidate, files, "Copied template");
                    progress.succeed(&format!("{} setup complete.", layer));

                    return Ok(if position == 0 {
                        Placement::Template(candidate.to_string())
                    } else {
                        Placement::Fallback(candidate.to_string())
                    });
                }
                Err(e) => {
                    clear_partial(&dest);
                    report(
                        progress,
                        warnings,
                        format!(
                            "Error setting up {} template from {}: {}. {}",
                            layer, candidate, e, next
                        ),
                    );
                }
            }
        }

        create_empty(layer, &dest)?;
        Ok(Placement::Empty)
    }
}

fn report<P: Progress + ?Sized>(progress: &mut P, warnings: &mut Vec<String>, message: String) {
    progress.warn(&message);
    warnings.push(message);
}

/// Drop whatever a failed copy left behind so the next candidate starts clean
fn clear_partial(dest: &Path) {
    if dest.exists() {
        if let Err(e) = std::fs::remove_dir_all(dest) {
            warn!(dest = %dest.display(), error = %e, "Failed to clear partial template copy");
        }
    }
}

fn create_empty(layer: Layer, dest: &Path) -> Result<(), AssembleError> {
    debug!(%layer, dest = %dest.display(), "Creating empty layer directory");
    std::fs::create_dir_all(dest).map_err(|source| AssembleError::CreateDir {
        path: dest.to_path_buf(),
        source,
    })
}
