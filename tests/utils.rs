#![allow(dead_code)]

use kratestack::error::Result;
use kratestack::prompt::Prompter;
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Every entry under `root`, relative and sorted, directories included.
pub fn list_tree(root: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    entries.sort();
    entries
}

/// A prompter with canned answers that records what it was asked.
pub struct ScriptedPrompter {
    confirm_answer: Option<bool>,
    backs_out: bool,
    pub confirms: Cell<usize>,
    pub questions: Cell<usize>,
}

impl ScriptedPrompter {
    fn new(confirm_answer: Option<bool>, backs_out: bool) -> Self {
        Self { confirm_answer, backs_out, confirms: Cell::new(0), questions: Cell::new(0) }
    }

    pub fn answering(confirm_answer: bool) -> Self {
        Self::new(Some(confirm_answer), false)
    }

    /// Fails the test if any question is asked.
    pub fn silent() -> Self {
        Self::new(None, false)
    }

    /// Backs out of every text and select question, as Esc or Ctrl-C would.
    pub fn backing_out() -> Self {
        Self::new(None, true)
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _message: &str, _default: bool) -> Result<bool> {
        self.confirms.set(self.confirms.get() + 1);
        Ok(self.confirm_answer.expect("unexpected confirmation prompt"))
    }

    fn input(&self, _message: &str, _default: &str) -> Result<Option<String>> {
        assert!(self.backs_out, "unexpected input prompt");
        self.questions.set(self.questions.get() + 1);
        Ok(None)
    }

    fn select(&self, _message: &str, _items: &[&str], _default: usize) -> Result<Option<usize>> {
        assert!(self.backs_out, "unexpected select prompt");
        self.questions.set(self.questions.get() + 1);
        Ok(None)
    }
}

/// The workspace layout used across tests.
pub fn sample_workspace(root: &Path) {
    write(root, "apps/web/src/page.tsx", "export default function Page() {}\n");
    write(root, "apps/web/node_modules/foo.txt", "dependency\n");
    write(root, "apps/web/.gitignore", ".next\n");
    write(root, "apps/api/src/main.rs", "fn main() {}\n");
    write(root, "apps/api/target/debug/api", "binary\n");
    write(root, "apps/distfiles/notes.md", "kept\n");
    write(root, "apps/dist/bundle.js", "dropped\n");
    write(
        root,
        "package.json",
        "{\n  \"name\": \"kratestack\",\n  \"version\": \"0.1.0\",\n  \"private\": true\n}\n",
    );
    write(root, ".gitignore", "node_modules\ntarget\n");
    write(root, "README.md", "# Kratestack\n");
}
