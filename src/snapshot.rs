//! Author-time snapshot of a source tree into a template directory.

use log::info;
use std::path::{Path, PathBuf};

use crate::dotfile::hide_gitignore;
use crate::error::{Error, Result};
use crate::ioutils::CopyStats;
use crate::manifest::Manifest;
use crate::resolver::{Resolution, Resolver};
use crate::stage::{absolute_destination, Stage};

/// Summary of a completed snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotReport {
    pub template_root: PathBuf,
    /// Includes that were copied, in manifest order.
    pub copied: Vec<PathBuf>,
    /// Includes absent from the source root, in manifest order.
    pub missing: Vec<PathBuf>,
    pub stats: CopyStats,
    /// Whether the root `.gitignore` was stored as `gitignore`.
    pub gitignore_hidden: bool,
}

/// Replaces `template_root` with the entries of `source_root` selected by `manifest`.
///
/// The previous template is discarded as a whole, so running this twice on an
/// unchanged source yields identical trees. Missing includes are skipped with a
/// warning; any other failure aborts the run and leaves the previous template
/// in place.
///
/// # Errors
/// * `Error::ValidationError` if the source root is not a directory, or the
///   template root would contain the source root
/// * `Error::IoError` / `Error::WalkError` on any file system failure
/// * `Error::DotfileConflict` if the template would hold both ignore file names
pub fn snapshot<P, Q>(source_root: P, template_root: Q, manifest: &Manifest) -> Result<SnapshotReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source_root = source_root.as_ref();
    if !source_root.is_dir() {
        return Err(Error::ValidationError(format!(
            "source root '{}' is not a directory",
            source_root.display()
        )));
    }
    let source_root = source_root.canonicalize()?;
    let template_root = absolute_destination(template_root.as_ref())?;

    if source_root.starts_with(&template_root) {
        return Err(Error::ValidationError(format!(
            "template directory '{}' must not contain the source root",
            template_root.display()
        )));
    }

    info!("Creating template snapshot in {}", template_root.display());
    let stage = Stage::new(&template_root)?;
    let resolver = Resolver::new(&source_root, &manifest.exclude)
        .fence(&template_root)
        .fence(stage.path());

    let mut copied = Vec::new();
    let mut missing = Vec::new();
    let mut stats = CopyStats::default();
    for include in &manifest.include {
        match resolver.copy_include(include, stage.path())? {
            Resolution::Missing => missing.push(include.clone()),
            Resolution::Copied(include_stats) => {
                stats += include_stats;
                copied.push(include.clone());
            }
        }
    }

    let gitignore_hidden = hide_gitignore(stage.path())?;
    let template_root = stage.commit()?;
    info!("Snapshot complete!");

    Ok(SnapshotReport { template_root, copied, missing, stats, gitignore_hidden })
}
