//! Operation resolution: one configured Operation in, one rendered file out

use std::sync::Arc;

use tera::Tera;
use tracing::debug;

use crate::core::config::OperationConfig;
use crate::descriptor::DescriptorRegistry;
use crate::generation::{GeneratedFile, OperationError, RenderContext, TemplateFunctions, filters};
use crate::infrastructure::templates::TemplateLoader;

/// Resolves and renders single Operations against a loaded registry.
pub struct OperationResolver<'a> {
    registry: &'a Arc<DescriptorRegistry>,
    loader: &'a dyn TemplateLoader,
    url_root: &'a str,
}

impl<'a> OperationResolver<'a> {
    pub fn new(
        registry: &'a Arc<DescriptorRegistry>,
        loader: &'a dyn TemplateLoader,
        url_root: &'a str,
    ) -> Self {
        Self {
            registry,
            loader,
            url_root,
        }
    }

    /// Resolve the target, load and parse the template, then render it.
    pub fn resolve(&self, operation: &OperationConfig) -> Result<GeneratedFile, OperationError> {
        // 1. Bind the target file, if one is declared
        let target = match operation.target() {
            Some(name) => Some(
                self.registry
                    .file(name)
                    .ok_or_else(|| OperationError::TargetNotFound(name.to_string()))?,
            ),
            None => None,
        };

        // 2. Fetch the template source
        let source = self
            .loader
            .load(&operation.template)
            .map_err(|e| OperationError::template_source(&operation.template, e))?;

        // 3. Fresh engine with this Operation's helper surface
        let mut tera = Tera::default();
        filters::register(&mut tera);
        TemplateFunctions::new(
            Arc::clone(self.registry),
            operation.target(),
            &operation.output,
            self.url_root,
        )
        .register(&mut tera);
        tera.add_raw_template(&operation.template, &source)
            .map_err(|e| OperationError::template_parse(&operation.template, &e))?;

        // 4. Render against the request plus the bound target
        let context =
            RenderContext::new(self.registry, target, operation, self.url_root).to_tera_context()?;
        let content = tera
            .render(&operation.template, &context)
            .map_err(|e| OperationError::render(&e))?;

        debug!(
            template = %operation.template,
            output = %operation.output,
            bytes = content.len(),
            "Rendered operation"
        );
        Ok(GeneratedFile {
            name: operation.output.clone(),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::templates::MemoryTemplateLoader;
    use prost_types::compiler::CodeGeneratorRequest;
    use prost_types::{DescriptorProto, FileDescriptorProto};

    fn registry() -> Arc<DescriptorRegistry> {
        Arc::new(
            DescriptorRegistry::load(&CodeGeneratorRequest {
                file_to_generate: vec!["shop/cart.proto".to_string()],
                proto_file: vec![FileDescriptorProto {
                    name: Some("shop/cart.proto".to_string()),
                    package: Some("shop".to_string()),
                    message_type: vec![DescriptorProto {
                        name: Some("Cart".to_string()),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_resolve_renders_target() {
        let registry = registry();
        let loader = MemoryTemplateLoader::new().with_template(
            "file.txt",
            "{{ target.name }}:{% for m in target.messages %}{{ m.name }}{% endfor %}:{{ output_file() }}",
        );
        let resolver = OperationResolver::new(&registry, &loader, "");

        let file = resolver
            .resolve(&OperationConfig::new("file.txt", Some("shop/cart.proto"), "cart.txt"))
            .unwrap();
        assert_eq!(file.name, "cart.txt");
        assert_eq!(file.content, "shop/cart.proto:Cart:shop/cart.html");
    }

    #[test]
    fn test_resolve_missing_target() {
        let registry = registry();
        let loader = MemoryTemplateLoader::new().with_template("file.txt", "x");
        let resolver = OperationResolver::new(&registry, &loader, "");

        let err = resolver
            .resolve(&OperationConfig::new("file.txt", Some("missing.schema"), "m.txt"))
            .unwrap_err();
        assert!(matches!(err, OperationError::TargetNotFound(ref t) if t == "missing.schema"));
    }

    #[test]
    fn test_resolve_missing_template() {
        let registry = registry();
        let loader = MemoryTemplateLoader::new();
        let resolver = OperationResolver::new(&registry, &loader, "");

        let err = resolver
            .resolve(&OperationConfig::new("absent.html", None, "index.html"))
            .unwrap_err();
        assert!(matches!(err, OperationError::TemplateLoad { .. }));
    }

    #[test]
    fn test_resolve_unparsable_template() {
        let registry = registry();
        let loader = MemoryTemplateLoader::new().with_template("broken.html", "{% if %}");
        let resolver = OperationResolver::new(&registry, &loader, "");

        let err = resolver
            .resolve(&OperationConfig::new("broken.html", None, "index.html"))
            .unwrap_err();
        assert!(matches!(err, OperationError::TemplateLoad { .. }));
        assert!(err.to_string().contains("broken.html"));
    }

    #[test]
    fn test_resolve_runtime_error_is_render_error() {
        let registry = registry();
        let loader = MemoryTemplateLoader::new().with_template("index.html", "{{ nope.field }}");
        let resolver = OperationResolver::new(&registry, &loader, "");

        let err = resolver
            .resolve(&OperationConfig::new("index.html", None, "index.html"))
            .unwrap_err();
        assert!(matches!(err, OperationError::Render(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_html_templates_are_autoescaped() {
        let loader = MemoryTemplateLoader::new()
            .with_template("index.html", "{{ parameter }}")
            .with_template("index.txt", "{{ parameter }}");
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["a.proto".to_string()],
            parameter: Some("<b>".to_string()),
            proto_file: vec![FileDescriptorProto {
                name: Some("a.proto".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let registry = Arc::new(DescriptorRegistry::load(&request).unwrap());
        let resolver = OperationResolver::new(&registry, &loader, "");

        let html = resolver
            .resolve(&OperationConfig::new("index.html", None, "index.html"))
            .unwrap();
        assert_eq!(html.content, "&lt;b&gt;");
        let text = resolver
            .resolve(&OperationConfig::new("index.txt", None, "index.txt"))
            .unwrap();
        assert_eq!(text.content, "<b>");
    }
}
