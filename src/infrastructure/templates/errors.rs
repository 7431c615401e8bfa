//! Error types for the template infrastructure layer

use thiserror::Error;

/// Errors that can occur while fetching template source
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template not found at the specified path
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// IO error while reading a template
    #[error("failed to read template {name}: {source}")]
    IoError {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    /// Create a new template not found error with path
    pub fn not_found<S: Into<String>>(path: S) -> Self {
        Self::TemplateNotFound(path.into())
    }
}
