//! Inheritance merge of parent and child entry lists

use crate::compose::normalize;
use crate::group::{CanonicalEntry, SourceEntry};

/// Merge a parent configuration's entries with a child's.
///
/// The child's entries are concatenated ahead of the parent's before
/// canonicalization, so child entries keep execution priority and a group
/// name present on both sides lands at the child's first occurrence with the
/// child's members racing ahead of the parent's.
///
/// Pairwise merges associate: merging grandparent+parent first and the child
/// after yields the same member sets as any other association order, which
/// is what lets configuration chains merge one pair at a time.
pub fn merge(parent: Vec<SourceEntry>, child: Vec<SourceEntry>) -> Vec<CanonicalEntry> {
    let mut combined = child;
    combined.extend(parent);
    normalize(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::RaceGroup;
    use crate::source::{SourceHandle, SourceId};
    use crate::sources::MemorySource;
    use pretty_assertions::assert_eq;

    fn handle(tag: &str) -> SourceHandle {
        SourceHandle::new(MemorySource::new().with_template(tag, tag))
    }

    fn ids(entries: &[CanonicalEntry]) -> Vec<Vec<SourceId>> {
        entries.iter().map(CanonicalEntry::member_ids).collect()
    }

    #[test]
    fn test_child_entries_precede_parent_entries() {
        let (parent, child) = (handle("parent"), handle("child"));
        let canonical = merge(vec![parent.clone().into()], vec![child.clone().into()]);
        assert_eq!(
            canonical,
            vec![CanonicalEntry::Handle(child), CanonicalEntry::Handle(parent)]
        );
    }

    #[test]
    fn test_same_named_groups_merge_across_the_boundary() {
        let (p, c) = (handle("p"), handle("c"));
        let canonical = merge(
            vec![RaceGroup::named([p.clone()], "g").into()],
            vec![RaceGroup::named([c.clone()], "g").into()],
        );

        assert_eq!(canonical.len(), 1);
        let CanonicalEntry::Merged(group) = &canonical[0] else {
            panic!("expected one merged group");
        };
        assert_eq!(group.name(), "g");
        // Child members race ahead of parent members.
        assert_eq!(group.members(), &[c, p]);
    }

    #[test]
    fn test_anonymous_child_group_does_not_merge_with_named_parent_group() {
        let (a, b) = (handle("a"), handle("b"));
        let canonical = merge(
            vec![RaceGroup::named([b], "x").into()],
            vec![RaceGroup::new([a]).into()],
        );
        assert_eq!(canonical.len(), 2);
    }

    #[test]
    fn test_duplicate_handle_across_levels_keeps_child_occurrence() {
        let (shared, p) = (handle("shared"), handle("p"));
        let canonical = merge(
            vec![shared.clone().into(), p.clone().into()],
            vec![shared.clone().into()],
        );
        assert_eq!(ids(&canonical), vec![vec![shared.id()], vec![p.id()]]);
    }

    #[test]
    fn test_three_level_merge_is_associative() {
        let (g, p, c) = (handle("g"), handle("p"), handle("c"));
        let grandparent = || vec![SourceEntry::from(RaceGroup::named([g.clone()], "shared"))];
        let parent = || vec![SourceEntry::from(RaceGroup::named([p.clone()], "shared"))];
        let child = || vec![SourceEntry::from(RaceGroup::named([c.clone()], "shared"))];

        // (grandparent ⊕ parent) ⊕ child
        let bottom_up = merge(
            merge(grandparent(), parent())
                .into_iter()
                .map(SourceEntry::from)
                .collect(),
            child(),
        );
        // grandparent ⊕ (parent ⊕ child)
        let top_down = merge(
            grandparent(),
            merge(parent(), child())
                .into_iter()
                .map(SourceEntry::from)
                .collect(),
        );

        assert_eq!(ids(&bottom_up), vec![vec![c.id(), p.id(), g.id()]]);
        assert_eq!(ids(&bottom_up), ids(&top_down));
    }
}
