//! protoc-gen-tmpl
//!
//! A protoc plugin that renders user-supplied Tera templates against the
//! descriptors in a `CodeGeneratorRequest`. Which templates run, for which
//! input file, and where their output lands is decided by a JSON or YAML
//! configuration named in the plugin parameter; without one, an index page plus
//! one page per descriptor file is rendered.
#![deny(unsafe_code)]

pub mod core;
pub mod descriptor;
pub mod generation;
pub mod infrastructure;

pub use crate::core::{Config, Error, OperationConfig, OutputMode, Parameters, Result};
pub use crate::descriptor::DescriptorRegistry;
pub use crate::generation::{GeneratedFile, GenerationResponse, generate, generate_with_loader};
