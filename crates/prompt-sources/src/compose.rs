//! The compositor: canonicalizes a flat entry list
//!
//! Canonicalization runs three passes over the input:
//!
//! 1. **collect** — named groups (declared or already merged) feed per-name
//!    member collectors pinned at the name's first occurrence; standalone
//!    handles and anonymous groups stay in place.
//! 2. **materialize** — each non-empty collector becomes one merged group at
//!    its recorded position.
//! 3. **dedup** — a position-ordered walk removes every later occurrence of a
//!    handle already seen, including occurrences inside groups, and drops
//!    entries emptied by the removal.
//!
//! A single linear pass cannot do this: merging same-named groups needs the
//! whole input before the survivor set at any position is known.

use crate::group::{CanonicalEntry, MergedGroup, SourceEntry};
use crate::race::RaceSource;
use crate::source::{SourceHandle, SourceId};
use std::collections::{HashMap, HashSet};

/// Canonicalize a raw entry list.
///
/// Pure over the input and the handle identities it carries; the result is
/// deduplicated, group-resolved, and stable under re-normalization.
pub fn normalize(entries: Vec<SourceEntry>) -> Vec<CanonicalEntry> {
    let input_len = entries.len();
    let collected = collect(entries);
    let placed = materialize(collected);
    let canonical = dedup(placed);
    tracing::debug!(input_len, output_len = canonical.len(), "canonicalized source list");
    canonical
}

/// A position in the scanned input, pass-1 output.
enum Slot {
    Handle(SourceHandle),
    Anonymous(Vec<SourceHandle>),
    /// First occurrence of a group name; members live in the collector.
    Named(String),
}

struct NamedCollector {
    members: Vec<SourceHandle>,
    seen: HashSet<SourceId>,
    /// Composite to reuse when the sole contribution was an existing merged
    /// group; keeps composite identity stable across re-normalization.
    reusable: Option<SourceHandle>,
    contributions: usize,
}

impl NamedCollector {
    fn feed(&mut self, members: Vec<SourceHandle>, composite: Option<SourceHandle>) {
        for member in members {
            if self.seen.insert(member.id()) {
                self.members.push(member);
            }
        }
        self.contributions += 1;
        self.reusable = if self.contributions == 1 { composite } else { None };
    }
}

struct Collected {
    slots: Vec<Slot>,
    named: HashMap<String, NamedCollector>,
}

fn collect(entries: Vec<SourceEntry>) -> Collected {
    let mut slots = Vec::with_capacity(entries.len());
    let mut named: HashMap<String, NamedCollector> = HashMap::new();

    let mut feed_named =
        |slots: &mut Vec<Slot>,
         name: String,
         members: Vec<SourceHandle>,
         composite: Option<SourceHandle>| {
            let collector = named.entry(name.clone()).or_insert_with(|| {
                slots.push(Slot::Named(name));
                NamedCollector {
                    members: Vec::new(),
                    seen: HashSet::new(),
                    reusable: None,
                    contributions: 0,
                }
            });
            collector.feed(members, composite);
        };

    for entry in entries {
        match entry {
            SourceEntry::Handle(handle) => slots.push(Slot::Handle(handle)),
            SourceEntry::Group(group) => {
                let (members, name) = group.into_parts();
                match name {
                    Some(name) => feed_named(&mut slots, name, members, None),
                    None => slots.push(Slot::Anonymous(members)),
                }
            }
            SourceEntry::Merged(group) => {
                let composite = group.composite().clone();
                let name = group.name().to_string();
                let members = group.members().to_vec();
                feed_named(&mut slots, name, members, Some(composite));
            }
        }
    }

    Collected { slots, named }
}

/// Pass-2 output: groups resolved, duplicates not yet removed.
enum Placed {
    Handle(SourceHandle),
    Anonymous(Vec<SourceHandle>),
    Merged(MergedGroup),
}

fn materialize(collected: Collected) -> Vec<Placed> {
    let Collected { slots, mut named } = collected;
    let mut placed = Vec::with_capacity(slots.len());

    for slot in slots {
        match slot {
            Slot::Handle(handle) => placed.push(Placed::Handle(handle)),
            Slot::Anonymous(members) => {
                if !members.is_empty() {
                    placed.push(Placed::Anonymous(members));
                }
            }
            Slot::Named(name) => {
                let collector = named
                    .remove(&name)
                    .expect("collector registered at first occurrence");
                if collector.members.is_empty() {
                    continue;
                }
                let group = match collector.reusable {
                    Some(composite) => {
                        MergedGroup::with_composite(name, collector.members, composite)
                    }
                    None => MergedGroup::new(name, collector.members),
                };
                placed.push(Placed::Merged(group));
            }
        }
    }

    placed
}

fn dedup(placed: Vec<Placed>) -> Vec<CanonicalEntry> {
    let mut seen: HashSet<SourceId> = HashSet::new();
    let mut canonical = Vec::with_capacity(placed.len());

    for entry in placed {
        match entry {
            Placed::Handle(handle) => {
                if seen.insert(handle.id()) {
                    canonical.push(CanonicalEntry::Handle(handle));
                }
            }
            Placed::Merged(group) => {
                let survivors = filter_unseen(group.members(), &mut seen);
                if survivors.is_empty() {
                    continue;
                }
                let group = if survivors.len() == group.members().len() {
                    // Nothing filtered: keep the existing composite.
                    group
                } else {
                    MergedGroup::new(group.name().to_string(), survivors)
                };
                canonical.push(CanonicalEntry::Merged(group));
            }
            Placed::Anonymous(members) => {
                let survivors = filter_unseen(&members, &mut seen);
                if !survivors.is_empty() {
                    // Always a racing composite, even for a lone survivor:
                    // race members keep fault tolerance that a standalone
                    // entry does not have.
                    canonical.push(CanonicalEntry::Handle(RaceSource::composite(survivors)));
                }
            }
        }
    }

    canonical
}

fn filter_unseen(members: &[SourceHandle], seen: &mut HashSet<SourceId>) -> Vec<SourceHandle> {
    members
        .iter()
        .filter(|member| seen.insert(member.id()))
        .cloned()
        .collect()
}
