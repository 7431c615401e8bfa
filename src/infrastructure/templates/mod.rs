//! Template source implementations

pub mod errors;
pub mod filesystem_loader;
pub mod memory_loader;
pub mod traits;

pub use errors::*;
pub use filesystem_loader::*;
pub use memory_loader::*;
pub use traits::*;
