//! Target tree preparation.
//!
//! A target tree is always rebuilt from scratch: the previous output is
//! removed and the source set copied over, symlinks included.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, RetintError};

/// Remove `dest` if present and copy `source` into it.
///
/// Returns the number of regular files copied.
pub fn recreate_tree(source: &Path, dest: &Path) -> Result<usize> {
    let source = source
        .canonicalize()
        .map_err(|e| RetintError::io(source, format!("Missing source directory: {}", e)))?;

    if resolved(dest)?.starts_with(&source) {
        return Err(RetintError::Config {
            message: format!("Output {} lies inside its source", dest.display()),
            help: Some("Install into a directory outside the source tree".to_string()),
        });
    }

    remove_existing(dest)?;
    copy_tree(&source, dest)
}

/// Absolute form of a path that may not exist yet, resolving its parent.
fn resolved(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => Ok(parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or(absolute.clone())),
        _ => Ok(absolute),
    }
}

fn remove_existing(path: &Path) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return Ok(());
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| RetintError::io(path, format!("Failed to remove previous output: {}", e)))
}

fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    let mut files = 0;

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|e| RetintError::Io {
            path: e.path().unwrap_or(source).to_path_buf(),
            message: e.to_string(),
        })?;

        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target: PathBuf = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| {
                RetintError::io(&target, format!("Failed to create directory: {}", e))
            })?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| RetintError::io(&target, format!("Failed to copy file: {}", e)))?;
            files += 1;
        }
    }

    Ok(files)
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to = fs::read_link(link).map_err(|e| RetintError::io(link, e))?;
    std::os::unix::fs::symlink(&points_to, target)
        .map_err(|e| RetintError::io(target, format!("Failed to create symlink: {}", e)))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    if link.is_dir() {
        return copy_tree(link, target).map(|_| ());
    }
    fs::copy(link, target)
        .map(|_| ())
        .map_err(|e| RetintError::io(target, format!("Failed to copy file: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seed(root: &Path) {
        fs::create_dir_all(root.join("gtk-3.0/assets")).unwrap();
        fs::write(root.join("index.theme"), "Name=Yaru\n").unwrap();
        fs::write(root.join("gtk-3.0/gtk.css"), "a {}").unwrap();
        fs::write(root.join("gtk-3.0/assets/check.svg"), "<svg/>").unwrap();
    }

    #[test]
    fn test_copies_tree() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        seed(src.path());

        let dest = out.path().join("Yaru-Blue");
        let files = recreate_tree(src.path(), &dest).unwrap();

        assert_eq!(files, 3);
        assert_eq!(fs::read_to_string(dest.join("index.theme")).unwrap(), "Name=Yaru\n");
        assert!(dest.join("gtk-3.0/assets/check.svg").exists());
    }

    #[test]
    fn test_previous_output_removed() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        seed(src.path());

        let dest = out.path().join("Yaru-Blue");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("stale.css"), "old").unwrap();

        recreate_tree(src.path(), &dest).unwrap();

        assert!(!dest.join("stale.css").exists());
        assert!(dest.join("index.theme").exists());
    }

    #[test]
    fn test_missing_source_is_error() {
        let out = tempdir().unwrap();
        let missing = Path::new("/nonexistent/themes/Yaru");
        assert!(recreate_tree(missing, &out.path().join("x")).is_err());
    }

    #[test]
    fn test_dest_inside_source_rejected() {
        let src = tempdir().unwrap();
        seed(src.path());
        let err = recreate_tree(src.path(), &src.path().join("out")).unwrap_err();
        assert!(matches!(err, RetintError::Config { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_recreated() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        seed(src.path());
        std::os::unix::fs::symlink("gtk-3.0", src.path().join("gtk-4.0")).unwrap();

        let dest = out.path().join("Yaru-Blue");
        recreate_tree(src.path(), &dest).unwrap();

        let link = dest.join("gtk-4.0");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("gtk-3.0"));
    }
}
