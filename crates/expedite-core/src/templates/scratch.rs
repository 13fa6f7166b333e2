//! Run-scoped scratch directory for the template clone

use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Temporary directory removed when dropped, on every exit path
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create `<root>/<prefix>-<unix millis>-<pid>`, adding a counter on collision
    pub fn acquire(root: &Path, prefix: &str) -> io::Result<Self> {
        std::fs::create_dir_all(root)?;

        let stem = format!(
            "{}-{}-{}",
            prefix,
            Utc::now().timestamp_millis(),
            std::process::id()
        );
        let mut path = root.join(&stem);
        let mut attempt = 0u32;
        loop {
            match std::fs::create_dir(&path) {
                Ok(()) => break,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists && attempt < 100 => {
                    attempt += 1;
                    path = root.join(format!("{}-{}", stem, attempt));
                }
                Err(e) => return Err(e),
            }
        }

        debug!(path = %path.display(), "Acquired scratch directory");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed scratch directory"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to clean up temporary directory"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_on_drop() {
        let root = tempfile::TempDir::new().unwrap();
        let path = {
            let scratch = ScratchDir::acquire(root.path(), "expedite").unwrap();
            std::fs::write(scratch.path().join("file.txt"), "x").unwrap();
            assert!(scratch.path().is_dir());
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_concurrent_acquires_do_not_collide() {
        let root = tempfile::TempDir::new().unwrap();
        let a = ScratchDir::acquire(root.path(), "expedite").unwrap();
        let b = ScratchDir::acquire(root.path(), "expedite").unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("expedite-"));
    }

    #[test]
    fn test_already_removed_is_fine() {
        let root = tempfile::TempDir::new().unwrap();
        let scratch = ScratchDir::acquire(root.path(), "expedite").unwrap();
        std::fs::remove_dir_all(scratch.path()).unwrap();
        drop(scratch);
    }
}
