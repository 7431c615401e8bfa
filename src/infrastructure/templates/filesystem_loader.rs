//! Filesystem-based template loader
//!
//! Reads single template files from a root directory, typically the
//! configuration's resolved `TemplateRoot`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::infrastructure::templates::{TemplateError, TemplateLoader};

/// Template loader that reads template files below a root directory
#[derive(Debug, Clone)]
pub struct FileSystemTemplateLoader {
    root: PathBuf,
}

impl FileSystemTemplateLoader {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateLoader for FileSystemTemplateLoader {
    fn load(&self, name: &str) -> Result<String, TemplateError> {
        let path = self.root.join(name);
        debug!(path = %path.display(), "Loading template");

        std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => TemplateError::not_found(path.display().to_string()),
            _ => TemplateError::IoError {
                name: name.to_string(),
                source,
            },
        })
    }
}
