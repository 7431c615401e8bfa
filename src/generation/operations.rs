//! Operation planning: the default Operation set and output naming

use crate::core::config::OperationConfig;
use crate::core::utils::trim_ext;
use crate::descriptor::DescriptorRegistry;

/// Template and output name of the index pass in the default set.
pub const INDEX_TEMPLATE: &str = "index.fragment.html";
/// Template used for every per-file pass in the default set.
pub const FILE_TEMPLATE: &str = "template.html";
/// Extension given to per-file outputs.
pub const OUTPUT_EXTENSION: &str = "html";

/// Output name generated for a descriptor file: extension stripped, `.html`
/// appended. Shared by the default Operation set and the `output_file` helper.
///
/// # Examples
/// ```
/// use protoc_gen_tmpl::generation::output_file_name;
///
/// assert_eq!(output_file_name("foo/bar.schema"), "foo/bar.html");
/// ```
pub fn output_file_name(file_name: &str) -> String {
    format!("{}.{OUTPUT_EXTENSION}", trim_ext(file_name))
}

/// The Operation set used when the configuration supplies none: one index
/// pass, then one pass per descriptor file in request order.
pub fn default_operations(registry: &DescriptorRegistry) -> Vec<OperationConfig> {
    std::iter::once(OperationConfig::new(INDEX_TEMPLATE, None, INDEX_TEMPLATE))
        .chain(registry.files().iter().map(|file| {
            OperationConfig::new(
                FILE_TEMPLATE,
                Some(file.name.as_str()),
                output_file_name(&file.name),
            )
        }))
        .collect()
}

/// Pick the configured Operations, or the default set when none are configured.
/// An explicit list replaces the default entirely.
pub fn plan_operations(
    configured: &[OperationConfig],
    registry: &DescriptorRegistry,
) -> Vec<OperationConfig> {
    if configured.is_empty() {
        default_operations(registry)
    } else {
        configured.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::FileDescriptorProto;
    use prost_types::compiler::CodeGeneratorRequest;

    fn registry(names: &[&str]) -> DescriptorRegistry {
        let request = CodeGeneratorRequest {
            file_to_generate: names.iter().take(1).map(|s| s.to_string()).collect(),
            proto_file: names
                .iter()
                .map(|name| FileDescriptorProto {
                    name: Some(name.to_string()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        DescriptorRegistry::load(&request).unwrap()
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("foo/bar.schema"), "foo/bar.html");
        assert_eq!(output_file_name("a.proto"), "a.html");
        assert_eq!(output_file_name("noext"), "noext.html");
    }

    #[test]
    fn test_default_operations_shape() {
        let registry = registry(&["z.proto", "a.proto", "dir/m.proto"]);
        let ops = default_operations(&registry);

        assert_eq!(ops.len(), 1 + registry.files().len());
        assert_eq!(ops[0], OperationConfig::new(INDEX_TEMPLATE, None, INDEX_TEMPLATE));

        // request order, not sorted
        assert_eq!(
            ops[1],
            OperationConfig::new(FILE_TEMPLATE, Some("z.proto"), "z.html")
        );
        assert_eq!(ops[2].target, "a.proto");
        assert_eq!(ops[3].output, "dir/m.html");
    }

    #[test]
    fn test_default_output_matches_helper_naming() {
        let registry = registry(&["foo/bar.schema"]);
        let ops = default_operations(&registry);
        assert_eq!(ops[1].output, output_file_name("foo/bar.schema"));
        assert_eq!(ops[1].output, "foo/bar.html");
    }

    #[test]
    fn test_explicit_operations_replace_default() {
        let registry = registry(&["a.proto", "b.proto"]);
        let configured = vec![OperationConfig::new("only.html", None, "only.html")];

        let ops = plan_operations(&configured, &registry);
        assert_eq!(ops, configured);

        let ops = plan_operations(&[], &registry);
        assert_eq!(ops.len(), 3);
    }
}
