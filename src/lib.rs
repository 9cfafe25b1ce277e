//! Kratestack turns a curated part of a workspace into a self-contained project
//! template, and later materializes that template into a fresh project directory.

/// Command-line interface module for the kratestack binary
pub mod cli;

/// Common constants: file names and the built-in manifest
pub mod constants;

/// Reading and renaming the project descriptor (package.json)
pub mod descriptor;

/// Root-level `.gitignore` <-> `gitignore` renaming
pub mod dotfile;

/// Error types and handling for kratestack
pub mod error;

/// Component-wise exclusion of paths
pub mod ignore;

/// Scaffolding a project from a template
pub mod instantiate;

/// A set of helpers for working with the file system.
pub mod ioutils;

pub mod logger;

/// Snapshot manifest loading
/// Supports JSON and YAML formats (kratestack.json, kratestack.yml, kratestack.yaml)
pub mod manifest;

/// User input and interaction handling
pub mod prompt;

/// Copying manifest includes out of a source tree
pub mod resolver;

/// Capturing a source tree into a template
pub mod snapshot;

/// Building output next to its destination and swapping it in
pub mod stage;
