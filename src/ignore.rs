//! Exclusion of paths from a snapshot.
//! A path is excluded when any one of its components equals an exclude token.
//! Matching is component-exact: the token `dist` excludes `dist/` and `a/dist/b`,
//! but never `distribution` or `distfiles`.

use indexmap::IndexSet;
use log::warn;
use std::path::{Component, Path};

/// A set of bare path-component names that must never appear in a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    tokens: IndexSet<String>,
}

impl ExcludeSet {
    /// Builds the set from bare names.
    ///
    /// Tokens containing a path separator can never equal a single component.
    /// They are kept as given but reported, since they are almost always a
    /// manifest mistake.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: IndexSet<String> = tokens.into_iter().map(Into::into).collect();
        for token in tokens.iter().filter(|t| is_dead_token(t)) {
            warn!("Exclude token '{}' contains a path separator and will never match", token);
        }
        Self { tokens }
    }

    /// Returns true if `relative_path` (relative to the source root) must be skipped.
    ///
    /// The empty path, i.e. the root itself, is never excluded.
    pub fn is_excluded<P: AsRef<Path>>(&self, relative_path: P) -> bool {
        if self.tokens.is_empty() {
            return false;
        }
        relative_path.as_ref().components().any(|component| match component {
            Component::Normal(name) => name.to_str().is_some_and(|name| self.tokens.contains(name)),
            _ => false,
        })
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn is_dead_token(token: &str) -> bool {
    token.is_empty() || token.contains('/') || token.contains(std::path::MAIN_SEPARATOR)
}
