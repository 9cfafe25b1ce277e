//! Copies the entries named by a manifest out of a source tree.

use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ignore::ExcludeSet;
use crate::ioutils::{copy_tree, CopyStats};

/// What happened to a single include entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The include does not exist under the source root and was skipped.
    Missing,
    /// The include was copied; counts exclude filtered entries.
    Copied(CopyStats),
}

/// Copies include entries from `source_root` into `dest_root`, filtering every
/// visited path through an [`ExcludeSet`].
///
/// Exclusion is evaluated on the path relative to the source root, so the
/// include's own components are subject to it as well.
#[derive(Debug)]
pub struct Resolver<'a> {
    source_root: &'a Path,
    exclude: &'a ExcludeSet,
    fences: Vec<PathBuf>,
}

impl<'a> Resolver<'a> {
    pub fn new(source_root: &'a Path, exclude: &'a ExcludeSet) -> Self {
        Self { source_root, exclude, fences: Vec::new() }
    }

    /// Never enter `path`, whatever the manifest says.
    ///
    /// Used to keep a template that lives inside its own source tree, and the
    /// staging directory next to it, out of the snapshot.
    pub fn fence<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.fences.push(path.into());
        self
    }

    /// Copies one include entry, preserving its path under `dest_root`.
    pub fn copy_include<P: AsRef<Path>>(&self, include: &Path, dest_root: P) -> Result<Resolution> {
        let source = self.source_root.join(include);
        // A link whose target is gone does not resolve either.
        if !source.exists() {
            warn!("{} not found, skipping.", include.display());
            return Ok(Resolution::Missing);
        }

        info!("Copying {}...", include.display());
        let dest = dest_root.as_ref().join(include);
        let stats = copy_tree(&source, &dest, |path, relative| {
            self.should_skip(path, &include.join(relative))
        })?;
        Ok(Resolution::Copied(stats))
    }

    /// `relative` is the walked entry's path relative to the source root.
    fn should_skip(&self, path: &Path, relative: &Path) -> bool {
        if self.fences.iter().any(|fence| fence == path) {
            debug!("Skipping {}: reserved for the template", path.display());
            return true;
        }
        if self.exclude.is_excluded(relative) {
            debug!("Skipping {}: excluded", relative.display());
            return true;
        }
        false
    }
}
