//! Reversible renaming of the root ignore file.
//! Package registries drop `.gitignore` from published archives, so a template
//! stores it as `gitignore` and a generated project gets the dot back.
//! Only the file at the root is renamed; nested files keep their names.

use log::debug;
use std::fs;
use std::path::Path;

use crate::constants::{GITIGNORE, PACKED_GITIGNORE};
use crate::error::{Error, Result};
use crate::ioutils::path_exists;

/// Renames `root/.gitignore` to `root/gitignore`. Returns whether a rename happened.
pub fn hide_gitignore<P: AsRef<Path>>(root: P) -> Result<bool> {
    rename_at_root(root.as_ref(), GITIGNORE, PACKED_GITIGNORE)
}

/// Renames `root/gitignore` to `root/.gitignore`. Returns whether a rename happened.
pub fn restore_gitignore<P: AsRef<Path>>(root: P) -> Result<bool> {
    rename_at_root(root.as_ref(), PACKED_GITIGNORE, GITIGNORE)
}

fn rename_at_root(root: &Path, from: &str, to: &str) -> Result<bool> {
    let source = root.join(from);
    if !source.is_file() {
        return Ok(false);
    }
    let dest = root.join(to);
    if path_exists(&dest) {
        return Err(Error::DotfileConflict { path: dest.display().to_string() });
    }
    debug!("Renaming {} to {}", source.display(), dest.display());
    fs::rename(&source, &dest)?;
    Ok(true)
}
