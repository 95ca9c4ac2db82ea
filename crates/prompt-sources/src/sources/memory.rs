//! In-memory template source

use crate::source::{TemplateContent, TemplateSource};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// A source backed by an in-memory name→text map.
///
/// Useful as the innermost fallback for built-in defaults and as the
/// standard test double. Content is reported as non-cacheable since the map
/// is already as cheap as any cache.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    templates: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.templates.insert(name.into(), text.into());
        self
    }
}

#[async_trait]
impl TemplateSource for MemorySource {
    async fn load(&self, name: &str) -> Result<Option<TemplateContent>> {
        Ok(self
            .templates
            .get(name)
            .map(|text| TemplateContent::new(text.clone(), format!("memory:{name}"), false)))
    }

    fn label(&self) -> &str {
        "memory"
    }
}
