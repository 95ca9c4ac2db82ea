//! Configuration-facing source set with a cached canonical list

use crate::compose::normalize;
use crate::group::{CanonicalEntry, SourceEntry};
use crate::merge::merge;
use crate::resolve::resolve;
use crate::source::TemplateContent;
use crate::Result;
use std::sync::Arc;

/// The effective source list of one configuration level.
///
/// Canonicalization runs once at construction and the result is cached
/// immutably; a `SourceSet` is cheap to clone and safe to resolve against
/// from any number of concurrent callers. Merging with a parent produces a
/// new set, never mutates either input.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    canonical: Arc<[CanonicalEntry]>,
}

impl SourceSet {
    /// Canonicalize raw entries into a resolvable set.
    pub fn new(entries: Vec<SourceEntry>) -> Self {
        Self {
            canonical: normalize(entries).into(),
        }
    }

    /// A set with no sources; every resolution fails not-found.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this set (the child) with a parent set.
    ///
    /// Child entries keep execution priority; same-named groups merge across
    /// the boundary with child members racing first. Chains of configurations
    /// merge pairwise, child-most last.
    pub fn merge_with_parent(&self, parent: &SourceSet) -> SourceSet {
        let canonical = merge(
            parent.canonical.iter().cloned().map(SourceEntry::from).collect(),
            self.canonical.iter().cloned().map(SourceEntry::from).collect(),
        );
        Self {
            canonical: canonical.into(),
        }
    }

    /// Resolve `name` against the cached canonical list.
    pub async fn resolve(&self, name: &str) -> Result<TemplateContent> {
        resolve(&self.canonical, name).await
    }

    pub fn entries(&self) -> &[CanonicalEntry] {
        &self.canonical
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

impl FromIterator<SourceEntry> for SourceSet {
    fn from_iter<I: IntoIterator<Item = SourceEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
