//! File-system resource helpers.
use std::path::{Path, PathBuf};

use crate::error::LinkError;

/// Suffix appended to a destination when it is moved aside.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Returns `true` if anything occupies `path`, including a dangling symlink.
#[must_use]
pub fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Returns `true` if `path` is a real directory rather than a link to one.
#[must_use]
pub fn is_real_dir(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|m| m.is_dir() && !m.is_symlink())
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns [`LinkError::ParentDir`] if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), LinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LinkError::ParentDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Remove whatever occupies `path` so a link can take its place.
///
/// A real directory is removed with its entire contents; a file, a symlink
/// (to a file or a directory) or a dangling symlink is removed on its own,
/// so the target of a link is never touched.
///
/// # Errors
///
/// Returns [`LinkError::Remove`] if the removal fails.
pub fn remove_existing(path: &Path) -> Result<(), LinkError> {
    let result = if is_real_dir(path) {
        std::fs::remove_dir_all(path)
    } else {
        match std::fs::symlink_metadata(path) {
            Ok(meta) if is_dir_like(&meta) => std::fs::remove_dir(path),
            Ok(_) => std::fs::remove_file(path),
            Err(e) => Err(e),
        }
    };
    result.map_err(|source| LinkError::Remove {
        path: path.to_path_buf(),
        source,
    })
}

/// The sibling path `path` is moved to on backup: `<path>.bak`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Rename `path` to `<path>.bak` and return the backup location.
///
/// An existing backup is never replaced: if `<path>.bak` is already
/// occupied nothing is moved.
///
/// # Errors
///
/// Returns [`LinkError::BackupExists`] if the backup path is taken, or
/// [`LinkError::Backup`] if the rename fails.
pub fn backup_existing(path: &Path) -> Result<PathBuf, LinkError> {
    let backup = backup_path(path);
    if entry_exists(&backup) {
        return Err(LinkError::BackupExists(backup));
    }
    std::fs::rename(path, &backup).map_err(|source| LinkError::Backup {
        path: path.to_path_buf(),
        backup: backup.clone(),
        source,
    })?;
    Ok(backup)
}

/// Check if metadata represents a directory-like entry.
///
/// On Windows a directory symlink reports `is_dir() == false` through
/// `symlink_metadata`, yet must be removed with `remove_dir`; the raw
/// `FILE_ATTRIBUTE_DIRECTORY` bit tells them apart.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // ensure_parent_dir
    // -----------------------------------------------------------------------

    #[test]
    fn ensure_parent_dir_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("file.txt");
        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn ensure_parent_dir_fails_under_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        let err = ensure_parent_dir(&file.join("child").join("link")).unwrap_err();
        assert!(matches!(err, LinkError::ParentDir { .. }));
    }

    // -----------------------------------------------------------------------
    // remove_existing
    // -----------------------------------------------------------------------

    #[test]
    fn remove_existing_removes_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("target");
        std::fs::write(&file, "content").unwrap();
        remove_existing(&file).unwrap();
        assert!(!entry_exists(&file));
    }

    #[test]
    fn remove_existing_removes_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("tree");
        std::fs::create_dir_all(tree.join("sub").join("deeper")).unwrap();
        std::fs::write(tree.join("a.txt"), "a").unwrap();
        std::fs::write(tree.join("sub").join("deeper").join("b.txt"), "b").unwrap();

        assert!(is_real_dir(&tree));
        remove_existing(&tree).unwrap();
        assert!(!entry_exists(&tree));
    }

    #[test]
    fn is_real_dir_rejects_files_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        assert!(is_real_dir(dir.path()));
        assert!(!is_real_dir(&file));
        assert!(!is_real_dir(&dir.path().join("nonexistent")));
    }

    #[test]
    fn remove_existing_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = remove_existing(&dir.path().join("nonexistent")).unwrap_err();
        assert!(matches!(err, LinkError::Remove { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn remove_existing_removes_dir_symlink_but_not_its_target() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        std::fs::write(real.join("keep.txt"), "keep").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert!(!is_real_dir(&link));
        remove_existing(&link).unwrap();
        assert!(!entry_exists(&link));
        assert!(real.join("keep.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn remove_existing_removes_broken_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("/nonexistent/target", &link).unwrap();
        assert!(entry_exists(&link));
        assert!(!link.exists());
        remove_existing(&link).unwrap();
        assert!(!entry_exists(&link));
    }

    // -----------------------------------------------------------------------
    // backup_existing
    // -----------------------------------------------------------------------

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/home/u/.bashrc")),
            PathBuf::from("/home/u/.bashrc.bak")
        );
        assert_eq!(
            backup_path(Path::new("/home/u/.config/nvim")),
            PathBuf::from("/home/u/.config/nvim.bak")
        );
    }

    #[test]
    fn backup_existing_moves_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".bashrc");
        std::fs::write(&file, "old content").unwrap();

        let backup = backup_existing(&file).unwrap();
        assert_eq!(backup, dir.path().join(".bashrc.bak"));
        assert!(!entry_exists(&file));
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "old content");
    }

    #[test]
    fn backup_existing_refuses_to_replace_old_backup() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".bashrc");
        std::fs::write(&file, "current").unwrap();
        std::fs::write(dir.path().join(".bashrc.bak"), "previous").unwrap();

        let err = backup_existing(&file).unwrap_err();
        assert!(matches!(err, LinkError::BackupExists(_)));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "current");
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".bashrc.bak")).unwrap(),
            "previous"
        );
    }
}
