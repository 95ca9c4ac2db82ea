//! TemplateSource trait and the identity-carrying source handle

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Resolved template content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateContent {
    /// The template text itself.
    pub text: String,
    /// Where the text came from, for diagnostics (a file path, `memory:<name>`, ...).
    pub path: String,
    /// Whether the producing source considers this content safe to cache.
    pub cacheable: bool,
}

impl TemplateContent {
    pub fn new(text: impl Into<String>, path: impl Into<String>, cacheable: bool) -> Self {
        Self {
            text: text.into(),
            path: path.into(),
            cacheable,
        }
    }
}

/// A backing source that can attempt to produce template content for a name.
///
/// `Ok(Some(content))` is a success, `Ok(None)` is the recoverable "not
/// found" signal that lets resolution fall through to the next source, and
/// `Err` is a hard failure (I/O problem, corrupt store, ...).
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn load(&self, name: &str) -> Result<Option<TemplateContent>>;

    /// Short label for logging and error messages.
    fn label(&self) -> &str {
        "template-source"
    }
}

/// Stable identity of a source handle.
///
/// Derived from the handle's Arc allocation address; every allocation is
/// unique, so two ids are equal iff they refer to the same handle instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(usize);

/// A referentially-unique handle to a [`TemplateSource`].
///
/// Cloning the handle clones the underlying Arc and preserves identity; the
/// same handle referenced from many lists or configurations always compares
/// equal, while two sources with identical content never do.
#[derive(Clone)]
pub struct SourceHandle(Arc<dyn TemplateSource>);

impl SourceHandle {
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self(Arc::new(source))
    }

    pub fn from_arc(source: Arc<dyn TemplateSource>) -> Self {
        Self(source)
    }

    pub fn id(&self) -> SourceId {
        // Thin the fat trait-object pointer down to its data address.
        SourceId(Arc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn label(&self) -> &str {
        self.0.label()
    }

    pub async fn load(&self, name: &str) -> Result<Option<TemplateContent>> {
        self.0.load(name).await
    }
}

impl PartialEq for SourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for SourceHandle {}

impl fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceHandle")
            .field("label", &self.label())
            .field("id", &self.id())
            .finish()
    }
}

impl<S: TemplateSource + 'static> From<S> for SourceHandle {
    fn from(source: S) -> Self {
        SourceHandle::new(source)
    }
}
