//! `expedite.json` written into every generated project

use super::selection::ProjectSelection;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

pub const METADATA_FILE: &str = "expedite.json";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Failed to serialize project metadata")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendMetadata {
    pub framework: String,
    pub css_framework: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendMetadata {
    pub framework: String,
    pub database: String,
}

/// The chosen stack as recorded in the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub project_name: String,
    pub frontend: FrontendMetadata,
    pub backend: BackendMetadata,
    /// RFC 3339 UTC, millisecond precision
    pub generated_at: DateTime<Utc>,
}

impl ProjectMetadata {
    pub fn new(selection: &ProjectSelection, generated_at: DateTime<Utc>) -> Self {
        Self {
            project_name: selection.project_name.clone(),
            frontend: FrontendMetadata {
                framework: selection.frontend_stack.clone(),
                css_framework: selection.css_framework.clone(),
            },
            backend: BackendMetadata {
                framework: selection.backend_stack.clone(),
                database: selection.database.clone(),
            },
            generated_at: generated_at.trunc_subsecs(3),
        }
    }
}

/// Write `expedite.json` into `project_dir`, stamped with the current time
pub async fn write_metadata(
    selection: &ProjectSelection,
    project_dir: &Path,
) -> Result<ProjectMetadata, MetadataError> {
    let metadata = ProjectMetadata::new(selection, Utc::now());
    let content = serde_json::to_string_pretty(&metadata)?;

    let path = project_dir.join(METADATA_FILE);
    fs::write(&path, content)
        .await
        .map_err(|source| MetadataError::Write { path, source })?;

    Ok(metadata)
}

pub async fn read_metadata(project_dir: &Path) -> Result<ProjectMetadata, MetadataError> {
    let path = project_dir.join(METADATA_FILE);
    let content = fs::read_to_string(&path)
        .await
        .map_err(|source| MetadataError::Read { path, source })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn selection() -> ProjectSelection {
        ProjectSelection {
            project_name: "demo".to_string(),
            frontend_stack: "React".to_string(),
            css_framework: "Tailwind CSS".to_string(),
            backend_stack: "Express.js".to_string(),
            database: "MongoDB".to_string(),
        }
    }

    #[test]
    fn test_serialized_shape() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let value = serde_json::to_value(ProjectMetadata::new(&selection(), at)).unwrap();

        assert_eq!(value["projectName"], "demo");
        assert_eq!(value["frontend"]["framework"], "React");
        assert_eq!(value["frontend"]["cssFramework"], "Tailwind CSS");
        assert_eq!(value["backend"]["framework"], "Express.js");
        assert_eq!(value["backend"]["database"], "MongoDB");
        assert_eq!(value["generatedAt"], "2026-10-19T08:30:00Z");
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp = tempfile::TempDir::new().unwrap();
        let written = write_metadata(&selection(), temp.path()).await.unwrap();

        let raw = std::fs::read_to_string(temp.path().join(METADATA_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let stamp = value["generatedAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());

        let read = read_metadata(temp.path()).await.unwrap();
        assert_eq!(read, written);
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(matches!(
            write_metadata(&selection(), &missing).await,
            Err(MetadataError::Write { .. })
        ));
    }
}
