//! First-success racing over a set of source handles

use crate::source::{SourceHandle, TemplateContent, TemplateSource};
use crate::Result;
use async_trait::async_trait;
use futures::future::select_all;
use futures::FutureExt;

/// Composite source that races its members and reports the first success.
///
/// Member hard failures are demoted to not-found for that member so the
/// remaining members still get a chance; the composite itself reports
/// not-found only once every member has settled without a success.
#[derive(Debug)]
pub(crate) struct RaceSource {
    members: Vec<SourceHandle>,
}

impl RaceSource {
    /// Wrap members in a racing composite handle.
    pub(crate) fn composite(members: Vec<SourceHandle>) -> SourceHandle {
        SourceHandle::new(Self { members })
    }
}

#[async_trait]
impl TemplateSource for RaceSource {
    async fn load(&self, name: &str) -> Result<Option<TemplateContent>> {
        Ok(race_first_success(&self.members, name).await)
    }

    fn label(&self) -> &str {
        "race"
    }
}

/// Race every member's `load` concurrently; the first to settle with a
/// success wins and the remaining attempts are dropped.
///
/// "First" means first to settle in scheduling order, not lowest wall-clock
/// latency: members are polled in list order, so a member that completes
/// without suspending wins over any later member. Asynchronous members win
/// on a best-effort basis.
async fn race_first_success(
    members: &[SourceHandle],
    name: &str,
) -> Option<TemplateContent> {
    // select_all panics on empty input.
    if members.is_empty() {
        return None;
    }

    let mut pending = members
        .iter()
        .map(|member| member.load(name).boxed())
        .collect::<Vec<_>>();
    // Mirrors select_all's swap_remove so settled futures map back to members.
    let mut origin: Vec<usize> = (0..members.len()).collect();

    while !pending.is_empty() {
        let (settled, index, rest) = select_all(pending).await;
        let member = &members[origin.swap_remove(index)];
        match settled {
            Ok(Some(content)) => {
                tracing::trace!(name, winner = member.label(), "race won");
                return Some(content);
            }
            Ok(None) => {}
            Err(err) => {
                // Inside a race a hard failure only eliminates that member.
                tracing::debug!(name, member = member.label(), %err, "race member failed");
            }
        }
        pending = rest;
    }

    None
}
