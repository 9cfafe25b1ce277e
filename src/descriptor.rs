//! The project descriptor (`package.json`) at the root of a generated project.
//! Only the `name` field is ever changed. Every other field keeps its value and
//! its position, and the file is written back with 2-space indentation.

use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::Path;

use crate::constants::DESCRIPTOR_FILE;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDescriptor {
    fields: IndexMap<String, serde_json::Value>,
}

impl ProjectDescriptor {
    /// Parses descriptor content. The top level must be a JSON object.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let fields = serde_json::from_str(content)?;
        Ok(Self { fields })
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| Error::DescriptorMalformed {
            path: path.display().to_string(),
            e: e.to_string(),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(|v| v.as_str())
    }

    /// Sets `name`, keeping its position; a descriptor without one gets it appended.
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.fields.insert("name".to_string(), serde_json::Value::String(name.into()));
    }

    /// Serializes with 2-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(&self.fields)
            .map_err(|e| Error::ValidationError(e.to_string()))?;
        content.push('\n');
        Ok(content)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_json_string()?).map_err(Error::IoError)
    }
}

/// Sets the `name` of the descriptor at `root`, if there is one.
///
/// Returns `Ok(false)` without touching anything when the descriptor is absent.
/// A malformed descriptor is reported before anything is written.
pub fn rewrite_descriptor_name<P: AsRef<Path>>(root: P, name: &str) -> Result<bool> {
    let path = root.as_ref().join(DESCRIPTOR_FILE);
    if !path.is_file() {
        debug!("No {} in {}, nothing to rename", DESCRIPTOR_FILE, root.as_ref().display());
        return Ok(false);
    }

    let mut descriptor = ProjectDescriptor::read(&path)?;
    debug!("Renaming project {:?} to {:?}", descriptor.name(), name);
    descriptor.set_name(name);
    descriptor.write(&path)?;
    Ok(true)
}
