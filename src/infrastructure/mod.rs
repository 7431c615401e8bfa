//! Infrastructure layer - concrete implementations of domain ports

pub mod protoc;
pub mod templates;

pub use templates::*;
