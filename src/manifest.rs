//! Snapshot manifest handling.
//! A manifest lists the top-level entries of a source tree that make up the
//! template, plus the path components that are never copied.
//! Supports JSON and YAML formats (kratestack.json, kratestack.yml, kratestack.yaml).

use crate::constants::{DEFAULT_EXCLUDES, DEFAULT_INCLUDES, MANIFEST_FILES};
use crate::error::{Error, Result};
use crate::ignore::ExcludeSet;
use log::debug;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// On-disk shape of a manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    include: Vec<PathBuf>,
    #[serde(default)]
    exclude: Vec<String>,
}

/// Include paths, evaluated in order, and the exclude tokens applied to every copied path.
///
/// Includes that overlap (one nested inside another) are not supported: the
/// result then depends on copy order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub include: Vec<PathBuf>,
    pub exclude: ExcludeSet,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDES.iter().map(PathBuf::from).collect(),
            exclude: ExcludeSet::new(DEFAULT_EXCLUDES.iter().copied()),
        }
    }
}

impl Manifest {
    /// Builds a manifest from explicit parts, validating the include list.
    pub fn new<I, P>(include: I, exclude: ExcludeSet) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let include: Vec<PathBuf> = include.into_iter().map(Into::into).collect();
        validate_includes(&include)?;
        Ok(Self { include, exclude })
    }

    /// Parses manifest content, trying JSON first and YAML second.
    pub fn parse(content: &str) -> Result<Self> {
        let file: ManifestFile = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ManifestError(format!("Invalid manifest format: {}", e)))?,
        };
        Self::new(file.include, ExcludeSet::new(file.exclude))
    }
}

fn validate_includes(include: &[PathBuf]) -> Result<()> {
    if include.is_empty() {
        return Err(Error::ManifestError("include list is empty".to_string()));
    }
    for path in include {
        if path.as_os_str().is_empty() {
            return Err(Error::ManifestError("include entries must not be empty".to_string()));
        }
        if path.is_absolute() || path.has_root() {
            return Err(Error::ManifestError(format!(
                "include '{}' must be relative to the source root",
                path.display()
            )));
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(Error::ManifestError(format!(
                "include '{}' must not leave the source root",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Resolves the manifest for a snapshot of `source_root`.
///
/// # Lookup order
/// 1. `explicit`, which must exist
/// 2. the first of [`MANIFEST_FILES`] found at the source root
/// 3. the built-in default manifest
pub fn load_manifest<P: AsRef<Path>>(source_root: P, explicit: Option<&Path>) -> Result<Manifest> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(Error::ManifestError(format!(
                "manifest '{}' does not exist",
                path.display()
            )));
        }
        return read_manifest(path);
    }

    for file in MANIFEST_FILES {
        let path = source_root.as_ref().join(file);
        if path.is_file() {
            return read_manifest(&path);
        }
    }

    debug!("No manifest file found (tried: {}), using defaults", MANIFEST_FILES.join(", "));
    Ok(Manifest::default())
}

fn read_manifest(path: &Path) -> Result<Manifest> {
    debug!("Loading manifest from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Manifest::parse(&content)
}
