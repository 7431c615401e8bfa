//! Render context - the per-Operation view handed to a template

use serde::Serialize;

use crate::core::config::OperationConfig;
use crate::descriptor::{DescriptorRegistry, FileView};
use crate::generation::OperationError;

/// Read-only view combining the whole request with the Operation's target.
///
/// Built per Operation and dropped once the template has rendered.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub file_to_generate: &'a [String],
    pub parameter: Option<&'a str>,
    pub compiler_version: Option<&'a str>,
    pub proto_file: &'a [FileView],
    pub target: Option<&'a FileView>,
    pub output: &'a str,
    pub url_root: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        registry: &'a DescriptorRegistry,
        target: Option<&'a FileView>,
        operation: &'a OperationConfig,
        url_root: &'a str,
    ) -> Self {
        Self {
            file_to_generate: registry.files_to_generate(),
            parameter: registry.parameter(),
            compiler_version: registry.compiler_version(),
            proto_file: registry.files(),
            target,
            output: &operation.output,
            url_root,
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context, OperationError> {
        tera::Context::from_serialize(self).map_err(|e| OperationError::render(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::FileDescriptorProto;
    use prost_types::compiler::CodeGeneratorRequest;

    fn registry() -> DescriptorRegistry {
        DescriptorRegistry::load(&CodeGeneratorRequest {
            file_to_generate: vec!["a.proto".to_string()],
            parameter: Some("url_root=/docs".to_string()),
            proto_file: vec![FileDescriptorProto {
                name: Some("a.proto".to_string()),
                package: Some("pkg".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_context_with_target() {
        let registry = registry();
        let operation = OperationConfig::new("template.html", Some("a.proto"), "a.html");
        let context = RenderContext::new(&registry, registry.file("a.proto"), &operation, "/docs");

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["target"]["name"], "a.proto");
        assert_eq!(json["target"]["package"], "pkg");
        assert_eq!(json["output"], "a.html");
        assert_eq!(json["url_root"], "/docs");
        assert_eq!(json["parameter"], "url_root=/docs");
        assert_eq!(json["file_to_generate"][0], "a.proto");
        assert_eq!(json["proto_file"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_context_without_target_renders_null() {
        let registry = registry();
        let operation = OperationConfig::new("index.html", None, "index.html");
        let context = RenderContext::new(&registry, None, &operation, "");

        let tera_context = context.to_tera_context().unwrap();
        let rendered = tera::Tera::one_off(
            "{% if target %}bound{% else %}unbound{% endif %} {{ proto_file | length }}",
            &tera_context,
            false,
        )
        .unwrap();
        assert_eq!(rendered, "unbound 1");
    }
}
