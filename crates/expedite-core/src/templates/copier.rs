//! Recursive template directory copying

use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Copy the whole tree under `src` into `dest`, creating `dest` if needed.
///
/// Nested (including empty) directories are recreated. Returns the number of
/// files copied.
pub fn copy_dir(src: &Path, dest: &Path) -> io::Result<usize> {
    if !src.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("template directory not found: {}", src.display()),
        ));
    }
    std::fs::create_dir_all(dest)?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(true) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_copies_nested_tree() {
        let src = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("src/components")).unwrap();
        fs::create_dir_all(src.path().join("public/empty")).unwrap();
        fs::write(src.path().join("package.json"), "{}").unwrap();
        fs::write(src.path().join("src/components/App.vue"), "<template/>").unwrap();

        let dest = tempfile::TempDir::new().unwrap();
        let target = dest.path().join("Frontend");
        let copied = copy_dir(src.path(), &target).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(target.join("package.json")).unwrap(), "{}");
        assert!(target.join("src/components/App.vue").is_file());
        assert!(target.join("public/empty").is_dir());
    }

    #[test]
    fn test_missing_source_is_error() {
        let dest = tempfile::TempDir::new().unwrap();
        assert!(copy_dir(Path::new("/no/such/template"), dest.path()).is_err());
    }
}
