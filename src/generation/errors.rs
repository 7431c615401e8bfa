//! Error types for the generation domain

use std::fmt;

use thiserror::Error;

use crate::core::config::OperationConfig;
use crate::infrastructure::templates::TemplateError;

/// Errors scoped to a single Operation. None of these stop the run.
#[derive(Error, Debug)]
pub enum OperationError {
    #[error("no input proto file for generator target {0:?}")]
    TargetNotFound(String),

    #[error("failed to load template {template}: {reason}")]
    TemplateLoad { template: String, reason: String },

    #[error("failed to render template: {0}")]
    Render(String),
}

impl OperationError {
    pub(crate) fn template_source(template: &str, err: TemplateError) -> Self {
        Self::TemplateLoad {
            template: template.to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn template_parse(template: &str, err: &tera::Error) -> Self {
        Self::TemplateLoad {
            template: template.to_string(),
            reason: error_chain(err),
        }
    }

    pub(crate) fn render(err: &tera::Error) -> Self {
        Self::Render(error_chain(err))
    }
}

/// An [`OperationError`] tagged with the Operation it came from.
#[derive(Debug)]
pub struct OperationFailure {
    pub template: String,
    pub output: String,
    pub error: OperationError,
}

impl OperationFailure {
    pub fn new(operation: &OperationConfig, error: OperationError) -> Self {
        Self {
            template: operation.template.clone(),
            output: operation.output.clone(),
            error,
        }
    }
}

impl fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "operation {} -> {}: {}",
            self.template, self.output, self.error
        )
    }
}

impl std::error::Error for OperationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Flatten an error and its sources into one line. Tera keeps the useful part
/// of its messages (which variable, which filter) in the source chain.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
