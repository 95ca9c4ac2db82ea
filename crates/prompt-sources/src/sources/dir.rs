//! Filesystem directory template source

use crate::source::{TemplateContent, TemplateSource};
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Default extensions probed after the bare name, in priority order.
const DEFAULT_EXTENSIONS: &[&str] = &["md", "txt"];

/// A source resolving templates as files under a root directory.
///
/// For a requested name the source probes `<root>/<name>` first, then
/// `<root>/<name>.<ext>` for each configured extension in priority order,
/// returning the first file that exists. Content read from disk is marked
/// cacheable. A missing file is the ordinary not-found signal; any other
/// I/O problem is a hard failure carrying the offending path.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replace the probed extension list (priority order, bare name still
    /// probed first).
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// The per-user template directory under the platform config dir:
    /// `<config_dir>/prompt-manager/templates`.
    ///
    /// Returns `None` when the platform has no config directory.
    pub fn user_default() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("prompt-manager").join("templates")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let mut candidates = vec![self.root.join(name)];
        for ext in &self.extensions {
            candidates.push(self.root.join(format!("{name}.{ext}")));
        }
        candidates
    }
}

/// A template name must stay inside the root: plain file names and relative
/// subdirectory paths are fine, parent traversal and absolute paths are not.
fn is_safe_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

#[async_trait]
impl TemplateSource for DirSource {
    async fn load(&self, name: &str) -> Result<Option<TemplateContent>> {
        if !is_safe_name(name) {
            tracing::debug!(name, "refusing unsafe template name");
            return Ok(None);
        }

        for candidate in self.candidates(name) {
            match tokio::fs::read_to_string(&candidate).await {
                Ok(text) => {
                    return Ok(Some(TemplateContent::new(
                        text,
                        candidate.display().to_string(),
                        true,
                    )));
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => {
                    return Err(Error::Io {
                        path: candidate,
                        source: err,
                    });
                }
            }
        }

        Ok(None)
    }

    fn label(&self) -> &str {
        "dir"
    }
}
