//! Error handling for kratestack.
//! Defines the error type and result alias shared by the snapshot and scaffolding flows.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure that aborts a snapshot or a scaffolding run.
///
/// A missing include and a declined overwrite are not represented here: both are
/// ordinary outcomes and are reported through return values instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// A directory walk failed part way through.
    #[error("Cannot read '{path}'. Original error: {e}")]
    WalkError { path: String, e: walkdir::Error },

    /// The snapshot manifest could not be loaded or is not usable.
    #[error("Manifest error: {0}.")]
    ManifestError(String),

    /// The project descriptor exists but is not a JSON object.
    #[error("Cannot update project descriptor '{path}': {e}.")]
    DescriptorMalformed { path: String, e: String },

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Renaming a dotfile would overwrite a file that already exists.
    #[error("Cannot rename to '{path}': destination already exists.")]
    DotfileConflict { path: String },

    /// The interactive prompt failed or was aborted.
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

impl Error {
    pub(crate) fn walk(path: impl Into<PathBuf>, e: walkdir::Error) -> Self {
        Error::WalkError { path: path.into().display().to_string(), e }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
