//! Race groups, merged groups, and the entry variants the compositor works over

use crate::race::RaceSource;
use crate::source::{SourceHandle, SourceId};
use std::collections::HashSet;

/// An ordered set of sources meant to be queried concurrently.
///
/// A named group merges with every other group of the same name contributed
/// anywhere in an inheritance chain; an anonymous group (`name: None`) never
/// merges with anything.
#[derive(Debug, Clone)]
pub struct RaceGroup {
    members: Vec<SourceHandle>,
    name: Option<String>,
}

impl RaceGroup {
    /// Build an anonymous race group. Identity repeats within the member
    /// list are dropped, keeping the first occurrence.
    pub fn new(members: impl IntoIterator<Item = SourceHandle>) -> Self {
        Self {
            members: dedup_by_identity(members),
            name: None,
        }
    }

    /// Build a named race group that merges with same-named groups.
    pub fn named(
        members: impl IntoIterator<Item = SourceHandle>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            members: dedup_by_identity(members),
            name: Some(name.into()),
        }
    }

    pub fn members(&self) -> &[SourceHandle] {
        &self.members
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn into_parts(self) -> (Vec<SourceHandle>, Option<String>) {
        (self.members, self.name)
    }
}

/// The materialized union of all same-named race groups, exposed as a single
/// composite handle that races its members.
#[derive(Debug, Clone)]
pub struct MergedGroup {
    name: String,
    members: Vec<SourceHandle>,
    composite: SourceHandle,
}

impl MergedGroup {
    /// Wrap a deduplicated member list in a fresh racing composite.
    pub(crate) fn new(name: impl Into<String>, members: Vec<SourceHandle>) -> Self {
        let composite = RaceSource::composite(members.clone());
        Self {
            name: name.into(),
            members,
            composite,
        }
    }

    /// Rebuild around the same members and an existing composite, keeping
    /// composite identity stable when membership has not changed.
    pub(crate) fn with_composite(
        name: String,
        members: Vec<SourceHandle>,
        composite: SourceHandle,
    ) -> Self {
        Self {
            name,
            members,
            composite,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[SourceHandle] {
        &self.members
    }

    /// The composite handle racing this group's members.
    pub fn composite(&self) -> &SourceHandle {
        &self.composite
    }
}

/// A raw entry as authored in configuration: a standalone source, a declared
/// race group, or an already-merged group carried over from a previous
/// canonicalization.
#[derive(Debug, Clone)]
pub enum SourceEntry {
    Handle(SourceHandle),
    Group(RaceGroup),
    Merged(MergedGroup),
}

impl From<SourceHandle> for SourceEntry {
    fn from(handle: SourceHandle) -> Self {
        SourceEntry::Handle(handle)
    }
}

impl From<RaceGroup> for SourceEntry {
    fn from(group: RaceGroup) -> Self {
        SourceEntry::Group(group)
    }
}

impl From<MergedGroup> for SourceEntry {
    fn from(group: MergedGroup) -> Self {
        SourceEntry::Merged(group)
    }
}

/// One entry of a canonical list: either a single source handle (standalone
/// or an anonymous racing composite) or a named merged group.
#[derive(Debug, Clone)]
pub enum CanonicalEntry {
    Handle(SourceHandle),
    Merged(MergedGroup),
}

impl CanonicalEntry {
    /// The handle that resolution invokes for this entry: the source itself,
    /// or the group's racing composite.
    pub fn handle(&self) -> &SourceHandle {
        match self {
            CanonicalEntry::Handle(handle) => handle,
            CanonicalEntry::Merged(group) => group.composite(),
        }
    }

    /// Identities this entry contributes to the global seen-set.
    pub(crate) fn member_ids(&self) -> Vec<SourceId> {
        match self {
            CanonicalEntry::Handle(handle) => vec![handle.id()],
            CanonicalEntry::Merged(group) => group.members().iter().map(SourceHandle::id).collect(),
        }
    }
}

impl From<CanonicalEntry> for SourceEntry {
    fn from(entry: CanonicalEntry) -> Self {
        match entry {
            CanonicalEntry::Handle(handle) => SourceEntry::Handle(handle),
            CanonicalEntry::Merged(group) => SourceEntry::Merged(group),
        }
    }
}

impl PartialEq for CanonicalEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CanonicalEntry::Handle(a), CanonicalEntry::Handle(b)) => a == b,
            (CanonicalEntry::Merged(a), CanonicalEntry::Merged(b)) => {
                a.name() == b.name() && a.members() == b.members()
            }
            _ => false,
        }
    }
}

impl Eq for CanonicalEntry {}

pub(crate) fn dedup_by_identity(
    members: impl IntoIterator<Item = SourceHandle>,
) -> Vec<SourceHandle> {
    let mut seen: HashSet<SourceId> = HashSet::new();
    members
        .into_iter()
        .filter(|member| seen.insert(member.id()))
        .collect()
}
