//! In-memory template loader for embedders and tests

use std::collections::HashMap;

use crate::infrastructure::templates::{TemplateError, TemplateLoader};

/// Template loader backed by a name -> source map
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateLoader {
    templates: HashMap<String, String>,
}

impl MemoryTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a template, builder style
    pub fn with_template<N: Into<String>, S: Into<String>>(mut self, name: N, source: S) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert<N: Into<String>, S: Into<String>>(&mut self, name: N, source: S) {
        self.templates.insert(name.into(), source.into());
    }
}

impl TemplateLoader for MemoryTemplateLoader {
    fn load(&self, name: &str) -> Result<String, TemplateError> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| TemplateError::not_found(name))
    }
}
