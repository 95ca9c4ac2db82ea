//! Template source resolution for Prompt Manager.
//!
//! Resolves a named template from one or more backing sources. Sources are
//! tried strictly in order as a fallback chain; sources declared together in
//! a [`RaceGroup`] are queried concurrently, first success winning. Source
//! lists contributed across a configuration-inheritance chain merge with
//! [`merge`] (or [`SourceSet::merge_with_parent`]): child entries keep
//! execution priority, and same-named groups from different levels collapse
//! into one merged group with child members racing ahead of parent members.
//!
//! # Example
//!
//! ```no_run
//! use prompt_sources::{MemorySource, RaceGroup, SourceHandle, SourceSet};
//!
//! # async fn example() -> prompt_sources::Result<()> {
//! let defaults = SourceHandle::new(MemorySource::new().with_template("greet", "hello"));
//! let parent = SourceSet::new(vec![RaceGroup::named([defaults], "builtin").into()]);
//! let child = SourceSet::new(vec![]);
//!
//! let effective = child.merge_with_parent(&parent);
//! let content = effective.resolve("greet").await?;
//! assert_eq!(content.text, "hello");
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod group;
pub mod merge;
mod race;
pub mod resolve;
pub mod source;
pub mod sources;

pub use compose::normalize;
pub use config::SourceSet;
pub use error::{Error, Result};
pub use group::{CanonicalEntry, MergedGroup, RaceGroup, SourceEntry};
pub use merge::merge;
pub use resolve::resolve;
pub use source::{SourceHandle, SourceId, TemplateContent, TemplateSource};
pub use sources::{DirSource, MemorySource};
