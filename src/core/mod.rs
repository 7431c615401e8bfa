//! Core building blocks: configuration, parameters, errors and string helpers.

pub mod config;
pub mod error;
pub mod parameters;
pub mod utils;

pub use config::{Config, OperationConfig, OutputMode};
pub use error::{Error, Result};
pub use parameters::Parameters;
