//! Sequential resolution over a canonical entry list

use crate::group::CanonicalEntry;
use crate::source::TemplateContent;
use crate::{Error, Result};

/// Walk a canonical list and return the first successfully resolved content.
///
/// Entries are tried strictly in order; a later entry is never invoked until
/// every earlier entry has definitively reported not-found. Within a merged
/// entry all members race, first settled success winning. A standalone
/// source's hard failure propagates and aborts the walk; race members are
/// fault-tolerant instead, a failing member only eliminating itself.
///
/// Exhausting the list yields a single [`Error::NotFound`] naming `name`.
pub async fn resolve(entries: &[CanonicalEntry], name: &str) -> Result<TemplateContent> {
    for entry in entries {
        match entry {
            CanonicalEntry::Handle(handle) => {
                tracing::trace!(name, source = handle.label(), "trying source");
            }
            CanonicalEntry::Merged(group) => {
                tracing::trace!(name, group = group.name(), members = group.members().len(), "racing group");
            }
        }
        // Merged and anonymous-composite entries race inside their handle
        // and never report a member's hard failure; only a true standalone
        // source can make this `?` fire.
        if let Some(content) = entry.handle().load(name).await? {
            tracing::debug!(name, path = %content.path, "template resolved");
            return Ok(content);
        }
    }

    Err(Error::NotFound {
        name: name.to_string(),
    })
}
