//! Descriptor domain: the indexed, serializable form of a protoc request.

pub mod registry;
pub mod views;

pub use registry::{DescriptorRegistry, TypeKind, TypeRef};
pub use views::{EnumValueView, EnumView, FieldView, FileView, MessageView, MethodView, ServiceView};
