//! Command-line interface implementation for kratestack.
//! Provides argument parsing and the two entry points: `snapshot`, run by template
//! authors, and `new`, run by users scaffolding a project.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_PROJECT_NAME, DEFAULT_TEMPLATE_DIR};
use crate::error::{Error, Result};
use crate::instantiate::{Instantiator, Outcome};
use crate::manifest::load_manifest;
use crate::prompt::Prompter;
use crate::snapshot::snapshot;

/// Command-line arguments structure for kratestack.
#[derive(Parser, Debug)]
#[command(author, version, about = "Kratestack: snapshot a workspace into a template and scaffold projects from it", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Capture the source tree into a distributable template
    Snapshot(SnapshotArgs),
    /// Create a new project from a template
    New(NewArgs),
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Commands::Snapshot(args) => args.verbose,
            Commands::New(args) => args.verbose,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Root of the source tree the includes are resolved against
    #[arg(value_name = "SOURCE_ROOT", default_value = ".")]
    pub source_root: PathBuf,

    /// Directory the template is written to.
    /// Defaults to packages/create-kratestack/template under the source root.
    #[arg(short, long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Manifest file listing includes and excludes.
    /// Defaults to kratestack.json, kratestack.yml or kratestack.yaml in the source
    /// root, then to the built-in manifest.
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct NewArgs {
    /// Name of the project, also used as the directory name. Asked for when omitted.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Template directory produced by `snapshot`.
    /// Defaults to the template shipped next to the executable.
    #[arg(short, long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Directory the project directory is created in
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Overwrite an existing project directory without asking
    #[arg(short, long)]
    pub force: bool,

    /// Package manager used in the printed next steps. Asked for when omitted.
    #[arg(short, long, value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackageManager {
    Pnpm,
    Npm,
    Yarn,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [PackageManager::Pnpm, PackageManager::Npm, PackageManager::Yarn];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Command that starts the development server.
    pub fn dev_command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm run dev",
            PackageManager::Pnpm => "pnpm dev",
            PackageManager::Yarn => "yarn dev",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses command line arguments and returns the Cli structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Cli {
    match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingSubcommand
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Cli::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// Runs the selected command.
pub fn run(command: Commands, prompt: &dyn Prompter) -> Result<()> {
    match command {
        Commands::Snapshot(args) => run_snapshot(args),
        Commands::New(args) => run_new(args, prompt).map(|_| ()),
    }
}

pub fn run_snapshot(args: SnapshotArgs) -> Result<()> {
    let manifest = load_manifest(&args.source_root, args.manifest.as_deref())?;
    let template_dir =
        args.template_dir.unwrap_or_else(|| args.source_root.join(DEFAULT_TEMPLATE_DIR));

    let report = snapshot(&args.source_root, &template_dir, &manifest)?;
    println!(
        "Snapshot written to {} ({} files, {} skipped includes).",
        report.template_root.display(),
        report.stats.files,
        report.missing.len()
    );
    Ok(())
}

/// Asks for whatever was not given on the command line, then scaffolds the project.
///
/// Backing out of a question ends the run like a declined overwrite: nothing
/// is written and the result is `Outcome::Cancelled`.
pub fn run_new(args: NewArgs, prompt: &dyn Prompter) -> Result<Outcome> {
    let name = match args.name {
        Some(name) => name,
        None => match prompt.input("What is your project name?", DEFAULT_PROJECT_NAME)? {
            Some(name) => name,
            None => return Ok(cancelled()),
        },
    };
    let package_manager = match args.package_manager {
        Some(pm) => pm,
        None => {
            let items = PackageManager::ALL.map(|pm| pm.as_str());
            match prompt.select("Which package manager do you want to use?", &items, 0)? {
                Some(index) => PackageManager::ALL.get(index).copied().ok_or_else(|| {
                    Error::PromptError(format!("no package manager at index {}", index))
                })?,
                None => return Ok(cancelled()),
            }
        }
    };
    let template_dir = match args.template_dir {
        Some(dir) => dir,
        None => default_template_dir()?,
    };

    let target = args.output_dir.join(&name);
    let outcome = Instantiator::new(template_dir, &target, name.as_str())
        .overwrite(args.force)
        .run(prompt)?;

    match &outcome {
        Outcome::Cancelled => println!("Operation cancelled."),
        Outcome::Created(summary) => {
            println!("Project {} created in {}.", summary.name, summary.root.display());
            print!("{}", next_steps(&target, package_manager));
        }
    }
    Ok(outcome)
}

fn cancelled() -> Outcome {
    println!("Operation cancelled.");
    Outcome::Cancelled
}

/// Instructions printed after a project is created.
pub fn next_steps(target: &Path, package_manager: PackageManager) -> String {
    format!(
        "\nNext steps:\n  cd {}\n  {} install\n  {}\n",
        target.display(),
        package_manager,
        package_manager.dev_command()
    )
}

/// Installed layout: `<prefix>/bin/kratestack` next to `<prefix>/template`.
fn default_template_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let bin_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(bin_dir.parent().unwrap_or(bin_dir).join("template"))
}
