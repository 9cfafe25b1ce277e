use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Number of entries written by a tree copy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub dirs: usize,
}

impl std::ops::AddAssign for CopyStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.dirs += other.dirs;
    }
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    fs::create_dir_all(dest_path.as_ref()).map_err(Error::IoError)
}

pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(source_path: P, dest_path: Q) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    fs::copy(source_path.as_ref(), dest_path).map(|_| ()).map_err(Error::IoError)
}

/// Recreates a symbolic link without following it.
#[cfg(unix)]
pub fn copy_symlink<P: AsRef<Path>, Q: AsRef<Path>>(source_path: P, dest_path: Q) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    let link_target = fs::read_link(source_path.as_ref())?;
    std::os::unix::fs::symlink(link_target, dest_path).map_err(Error::IoError)
}

/// Copies the file a symbolic link points to.
#[cfg(not(unix))]
pub fn copy_symlink<P: AsRef<Path>, Q: AsRef<Path>>(source_path: P, dest_path: Q) -> Result<()> {
    copy_file(source_path, dest_path)
}

/// Removes whatever lives at `path`: a directory tree, a file or a link.
pub fn remove_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(Error::IoError)
    } else {
        fs::remove_file(path).map_err(Error::IoError)
    }
}

/// Returns true if anything, including a dangling link, exists at `path`.
pub fn path_exists<P: AsRef<Path>>(path: P) -> bool {
    fs::symlink_metadata(path.as_ref()).is_ok()
}

/// Recursively copies `source` to `dest`, one entry at a time.
///
/// `skip` is called with the absolute path of every visited entry and its path
/// relative to `source` before it is copied; returning true drops the entry and,
/// for a directory, its whole subtree. Entries are visited in file name order so
/// repeated copies write in the same order.
pub fn copy_tree<P, Q, F>(source: P, dest: Q, mut skip: F) -> Result<CopyStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(&Path, &Path) -> bool,
{
    let source = source.as_ref();
    let dest = dest.as_ref();
    let mut stats = CopyStats::default();

    let mut walker = WalkDir::new(source).follow_links(false).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| Error::walk(source, e))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::ValidationError(e.to_string()))?;
        let file_type = entry.file_type();

        if skip(entry.path(), relative) {
            if file_type.is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        let target = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(relative)
        };

        if file_type.is_dir() {
            create_dir_all(&target)?;
            stats.dirs += 1;
        } else if file_type.is_symlink() {
            debug!("Copying link: {}", target.display());
            copy_symlink(entry.path(), &target)?;
            stats.files += 1;
        } else {
            debug!("Copying file: {}", target.display());
            copy_file(entry.path(), &target)?;
            stats.files += 1;
        }
    }

    Ok(stats)
}
