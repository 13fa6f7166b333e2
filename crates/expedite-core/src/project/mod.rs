//! Generated project: selection, assembly, and metadata

pub mod assembler;
pub mod metadata;
pub mod selection;

pub use assembler::{AssembleError, Assembler, AssemblyReport, Placement};
pub use metadata::{read_metadata, write_metadata, ProjectMetadata, METADATA_FILE};
pub use selection::{ProjectSelection, SelectionError, DEFAULT_PROJECT_NAME};
