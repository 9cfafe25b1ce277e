//! Install-time materialization of a template into a new project directory.

use log::{debug, info};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::descriptor::rewrite_descriptor_name;
use crate::dotfile::restore_gitignore;
use crate::error::{Error, Result};
use crate::ioutils::{copy_tree, path_exists, CopyStats};
use crate::prompt::Prompter;
use crate::stage::{absolute_destination, Stage};

/// Steps of a single scaffolding run, in order.
///
/// The project is assembled in a staging directory, so an existing target is
/// cleared only after the copy, transform and descriptor rewrite have succeeded,
/// right before the staged tree is moved into its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    TargetCheck,
    Confirm,
    Copying,
    Transforming,
    DescriptorRewrite,
    Clearing,
    Finalized,
    Cancelled,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::TargetCheck => "target check",
            Phase::Confirm => "confirm",
            Phase::Copying => "copying",
            Phase::Transforming => "transforming",
            Phase::DescriptorRewrite => "descriptor rewrite",
            Phase::Clearing => "clearing",
            Phase::Finalized => "finalized",
            Phase::Cancelled => "cancelled",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What a finished project looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub name: String,
    pub root: PathBuf,
    pub stats: CopyStats,
    pub gitignore_restored: bool,
    pub descriptor_renamed: bool,
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(ProjectSummary),
    /// The target existed and overwriting it was declined; nothing was written.
    Cancelled,
}

/// Copies a template into `target` and personalizes it for `name`.
#[derive(Debug)]
pub struct Instantiator {
    template_root: PathBuf,
    target: PathBuf,
    name: String,
    overwrite: bool,
    phase: Phase,
}

impl Instantiator {
    pub fn new<P, Q, S>(template_root: P, target: Q, name: S) -> Self
    where
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
        S: Into<String>,
    {
        Self {
            template_root: template_root.into(),
            target: target.into(),
            name: name.into(),
            overwrite: false,
            phase: Phase::Idle,
        }
    }

    /// Replace an existing target without asking.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        debug!("Scaffolding {}: {} -> {}", self.name, self.phase, phase);
        self.phase = phase;
    }

    /// Runs the whole scaffolding sequence.
    ///
    /// Nothing under the target is written until the project name and template
    /// are validated and, for an existing target, the overwrite is confirmed.
    /// The project is assembled in a staging directory and replaces the target
    /// only once complete. The template root is only read.
    ///
    /// # Errors
    /// * `Error::ValidationError` for an unusable name, template or target
    /// * `Error::PromptError` if the overwrite question cannot be asked
    /// * `Error::DescriptorMalformed` if the template's descriptor is not a JSON object
    /// * `Error::IoError` / `Error::WalkError` / `Error::DotfileConflict` on file system failures
    pub fn run(&mut self, prompt: &dyn Prompter) -> Result<Outcome> {
        let outcome = self.run_phases(prompt);
        if outcome.is_err() {
            self.enter(Phase::Failed);
        }
        outcome
    }

    fn run_phases(&mut self, prompt: &dyn Prompter) -> Result<Outcome> {
        validate_project_name(&self.name)?;
        let template_root = self.checked_template_root()?;
        let target = absolute_destination(&self.target)?;
        if target.starts_with(&template_root) || template_root.starts_with(&target) {
            return Err(Error::ValidationError(format!(
                "target '{}' and template '{}' must not contain each other",
                target.display(),
                template_root.display()
            )));
        }

        self.enter(Phase::TargetCheck);
        if path_exists(&target) && !self.overwrite {
            self.enter(Phase::Confirm);
            let message = format!("Directory {} already exists. Overwrite?", self.target.display());
            if !prompt.confirm(&message, false)? {
                self.enter(Phase::Cancelled);
                info!("Operation cancelled");
                return Ok(Outcome::Cancelled);
            }
        }

        self.enter(Phase::Copying);
        let stage = Stage::new(&target)?;
        let stats = copy_tree(&template_root, stage.path(), |_, _| false)?;

        self.enter(Phase::Transforming);
        let gitignore_restored = restore_gitignore(stage.path())?;

        self.enter(Phase::DescriptorRewrite);
        let descriptor_renamed = rewrite_descriptor_name(stage.path(), &self.name)?;

        self.enter(Phase::Clearing);
        let root = stage.commit()?;

        self.enter(Phase::Finalized);
        info!("Project {} created!", self.name);
        Ok(Outcome::Created(ProjectSummary {
            name: self.name.clone(),
            root,
            stats,
            gitignore_restored,
            descriptor_renamed,
        }))
    }

    fn checked_template_root(&self) -> Result<PathBuf> {
        if !self.template_root.is_dir() {
            return Err(Error::ValidationError(format!(
                "template directory '{}' does not exist",
                self.template_root.display()
            )));
        }
        Ok(self.template_root.canonicalize()?)
    }
}

/// A project name is used both as the descriptor name and as a directory name.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::ValidationError("project name must not be empty".to_string()));
    }
    if name == "." || name == ".." {
        return Err(Error::ValidationError(format!("'{}' is not a valid project name", name)));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::ValidationError(format!(
            "project name '{}' must not contain path separators",
            name
        )));
    }
    Ok(())
}

/// Scaffolds `name` into `parent/name`; the directory is named after the project.
pub fn instantiate<P, Q>(
    template_root: P,
    parent: Q,
    name: &str,
    overwrite: bool,
    prompt: &dyn Prompter,
) -> Result<Outcome>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Instantiator::new(template_root.as_ref(), parent.as_ref().join(name), name)
        .overwrite(overwrite)
        .run(prompt)
}
