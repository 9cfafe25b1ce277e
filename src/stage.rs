//! Staged output.
//! A destination is built in a temporary sibling directory and only moved into
//! place once it is complete, so a failed run never leaves a half-written
//! template or project where a finished one is expected.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::STAGE_PREFIX;
use crate::error::{Error, Result};
use crate::ioutils::{create_dir_all, path_exists, remove_path};

/// A staging directory bound to its final destination.
///
/// Dropping an uncommitted stage removes the staging directory.
#[derive(Debug)]
pub struct Stage {
    dir: TempDir,
    destination: PathBuf,
}

impl Stage {
    /// Creates an empty staging directory in the destination's parent.
    pub fn new<P: AsRef<Path>>(destination: P) -> Result<Self> {
        let destination = destination.as_ref().to_path_buf();
        let parent = parent_dir(&destination);
        create_dir_all(parent)?;
        let dir = tempfile::Builder::new().prefix(STAGE_PREFIX).tempdir_in(parent)?;
        debug!("Staging {} in {}", destination.display(), dir.path().display());
        Ok(Self { dir, destination })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Replaces the destination with the staged tree.
    pub fn commit(self) -> Result<PathBuf> {
        if path_exists(&self.destination) {
            debug!("Removing {}", self.destination.display());
            remove_path(&self.destination)?;
        }
        let staged = self.dir.keep();
        fs::rename(&staged, &self.destination).map_err(|e| {
            let _ = fs::remove_dir_all(&staged);
            Error::IoError(e)
        })?;
        Ok(self.destination)
    }
}

/// Parent directory of `path`, treating a bare name as relative to the current directory.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Resolves `path` against a canonical parent so it compares equal to walked paths.
pub fn absolute_destination(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        Error::ValidationError(format!("'{}' is not a usable directory name", path.display()))
    })?;
    let parent = parent_dir(path);
    create_dir_all(parent)?;
    Ok(parent.canonicalize()?.join(name))
}
