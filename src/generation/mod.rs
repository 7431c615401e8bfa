//! Generation domain module - turns a loaded request into rendered files
//!
//! A run plans its Operations (configured or default), then resolves each one
//! independently: bind the target, load the template, render it on a fresh
//! engine carrying that Operation's helper functions. Failures are collected
//! per Operation and folded into a single [`GenerationResponse`].

pub mod context;
pub mod errors;
pub mod filters;
pub mod functions;
pub mod operations;
pub mod orchestrator;
pub mod resolver;
pub mod types;

pub use context::RenderContext;
pub use errors::{OperationError, OperationFailure};
pub use functions::TemplateFunctions;
pub use operations::{
    FILE_TEMPLATE, INDEX_TEMPLATE, OUTPUT_EXTENSION, default_operations, output_file_name,
    plan_operations,
};
pub use orchestrator::{Generator, generate, generate_with_loader};
pub use resolver::OperationResolver;
pub use types::{GeneratedFile, GenerationResponse};
