//! Template source traits for the infrastructure layer

use crate::infrastructure::templates::TemplateError;

/// Fetches the source text of a named template.
///
/// Loading is synchronous: a run renders its Operations one after another and
/// never waits on anything but the local filesystem.
pub trait TemplateLoader: Send + Sync {
    /// Load the template source registered under `name`
    fn load(&self, name: &str) -> Result<String, TemplateError>;
}
