//! Serializable views of protobuf descriptors
//!
//! `prost-types` descriptors are not `Serialize`, so each file in the request is
//! converted once into these plain structs. Nested messages and enums are
//! flattened in declaration order (depth first) and carry their fully-qualified
//! names, which keeps templates free of recursion.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    ServiceDescriptorProto, SourceCodeInfo,
};
use regex::Regex;
use serde::Serialize;

// Field numbers from descriptor.proto, used to address SourceCodeInfo locations.
const FILE_PACKAGE: i32 = 2;
const FILE_MESSAGE_TYPE: i32 = 4;
const FILE_ENUM_TYPE: i32 = 5;
const FILE_SERVICE: i32 = 6;
const FILE_SYNTAX: i32 = 12;
const MESSAGE_FIELD: i32 = 2;
const MESSAGE_NESTED_TYPE: i32 = 3;
const MESSAGE_ENUM_TYPE: i32 = 4;
const ENUM_VALUE: i32 = 2;
const SERVICE_METHOD: i32 = 2;

static ANCHOR_UNSAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.\-]+").expect("anchor pattern is valid"));

/// One schema file as seen by templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileView {
    pub name: String,
    pub package: String,
    pub syntax: String,
    pub dependencies: Vec<String>,
    pub comments: String,
    pub messages: Vec<MessageView>,
    pub enums: Vec<EnumView>,
    pub services: Vec<ServiceView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageView {
    pub name: String,
    /// Name including enclosing messages, e.g. `Outer.Inner`
    pub long_name: String,
    /// Name including the package, e.g. `pkg.Outer.Inner`
    pub full_name: String,
    pub anchor: String,
    pub comments: String,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub number: i32,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Fully-qualified referenced type (`.pkg.Msg`), empty for scalars
    pub type_name: String,
    /// `type_name` without package qualification for references, else `type`
    pub display_type: String,
    pub json_name: String,
    pub default_value: String,
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumView {
    pub name: String,
    pub long_name: String,
    pub full_name: String,
    pub anchor: String,
    pub comments: String,
    pub values: Vec<EnumValueView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValueView {
    pub name: String,
    pub number: i32,
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceView {
    pub name: String,
    pub full_name: String,
    pub anchor: String,
    pub comments: String,
    pub methods: Vec<MethodView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodView {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub comments: String,
}

/// Turn a (possibly dot-prefixed) qualified name into an HTML-safe fragment id.
///
/// # Examples
/// ```
/// use protoc_gen_tmpl::descriptor::views::anchor_for;
///
/// assert_eq!(anchor_for(".acme.v1.User"), "acme.v1.User");
/// assert_eq!(anchor_for("Map<K, V>"), "Map-K-V-");
/// ```
pub fn anchor_for(name: &str) -> String {
    ANCHOR_UNSAFE
        .replace_all(name.trim_start_matches('.'), "-")
        .into_owned()
}

/// `LABEL_REPEATED` -> `repeated`
pub fn clean_label(raw: &str) -> String {
    raw.trim_start_matches("LABEL_").to_lowercase()
}

/// `TYPE_INT32` -> `int32`
pub fn clean_type(raw: &str) -> String {
    raw.trim_start_matches("TYPE_").to_lowercase()
}

/// `.pkg.Outer.Inner` -> `Inner`
pub fn short_type(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

/// Leading comments (falling back to trailing ones) keyed by descriptor path.
struct Comments(HashMap<Vec<i32>, String>);

impl Comments {
    fn new(info: Option<&SourceCodeInfo>) -> Self {
        let map = info
            .map(|info| {
                info.location
                    .iter()
                    .filter_map(|location| {
                        let text = match location.leading_comments() {
                            "" => location.trailing_comments(),
                            leading => leading,
                        };
                        let text = text.trim();
                        (!text.is_empty()).then(|| (location.path.clone(), text.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self(map)
    }

    fn get(&self, path: &[i32]) -> String {
        self.0.get(path).cloned().unwrap_or_default()
    }
}

fn child_path(parent: &[i32], field: i32, index: usize) -> Vec<i32> {
    let mut path = Vec::with_capacity(parent.len() + 2);
    path.extend_from_slice(parent);
    path.push(field);
    path.push(index as i32);
    path
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

impl FileView {
    pub fn from_descriptor(file: &FileDescriptorProto) -> Self {
        let comments = Comments::new(file.source_code_info.as_ref());
        let package = file.package().to_string();

        let mut messages = Vec::new();
        let mut enums = Vec::new();
        for (i, message) in file.message_type.iter().enumerate() {
            collect_message(
                message,
                &package,
                "",
                &child_path(&[], FILE_MESSAGE_TYPE, i),
                &comments,
                &mut messages,
                &mut enums,
            );
        }
        for (i, enum_type) in file.enum_type.iter().enumerate() {
            enums.push(EnumView::build(
                enum_type,
                &package,
                "",
                &child_path(&[], FILE_ENUM_TYPE, i),
                &comments,
            ));
        }

        let services = file
            .service
            .iter()
            .enumerate()
            .map(|(i, service)| {
                ServiceView::build(
                    service,
                    &package,
                    &child_path(&[], FILE_SERVICE, i),
                    &comments,
                )
            })
            .collect();

        let mut file_comments = comments.get(&[FILE_SYNTAX]);
        if file_comments.is_empty() {
            file_comments = comments.get(&[FILE_PACKAGE]);
        }

        Self {
            name: file.name().to_string(),
            package,
            syntax: match file.syntax() {
                "" => "proto2".to_string(),
                syntax => syntax.to_string(),
            },
            dependencies: file.dependency.clone(),
            comments: file_comments,
            messages,
            enums,
            services,
        }
    }
}

fn collect_message(
    message: &DescriptorProto,
    package: &str,
    parent_long_name: &str,
    path: &[i32],
    comments: &Comments,
    messages: &mut Vec<MessageView>,
    enums: &mut Vec<EnumView>,
) {
    let long_name = qualify(parent_long_name, message.name());
    let full_name = qualify(package, &long_name);

    let fields = message
        .field
        .iter()
        .enumerate()
        .map(|(i, field)| FieldView::build(field, comments.get(&child_path(path, MESSAGE_FIELD, i))))
        .collect();

    messages.push(MessageView {
        name: message.name().to_string(),
        anchor: anchor_for(&full_name),
        comments: comments.get(path),
        long_name: long_name.clone(),
        full_name,
        fields,
    });

    for (i, nested) in message.nested_type.iter().enumerate() {
        collect_message(
            nested,
            package,
            &long_name,
            &child_path(path, MESSAGE_NESTED_TYPE, i),
            comments,
            messages,
            enums,
        );
    }
    for (i, enum_type) in message.enum_type.iter().enumerate() {
        enums.push(EnumView::build(
            enum_type,
            package,
            &long_name,
            &child_path(path, MESSAGE_ENUM_TYPE, i),
            comments,
        ));
    }
}

impl FieldView {
    fn build(field: &FieldDescriptorProto, comments: String) -> Self {
        let field_type = clean_type(field.r#type().as_str_name());
        let type_name = field.type_name().to_string();
        let display_type = if type_name.is_empty() {
            field_type.clone()
        } else {
            short_type(&type_name).to_string()
        };

        Self {
            name: field.name().to_string(),
            number: field.number(),
            label: clean_label(field.label().as_str_name()),
            field_type,
            type_name,
            display_type,
            json_name: field.json_name().to_string(),
            default_value: field.default_value().to_string(),
            comments,
        }
    }
}

impl EnumView {
    fn build(
        enum_type: &EnumDescriptorProto,
        package: &str,
        parent_long_name: &str,
        path: &[i32],
        comments: &Comments,
    ) -> Self {
        let long_name = qualify(parent_long_name, enum_type.name());
        let full_name = qualify(package, &long_name);
        let values = enum_type
            .value
            .iter()
            .enumerate()
            .map(|(i, value)| EnumValueView {
                name: value.name().to_string(),
                number: value.number(),
                comments: comments.get(&child_path(path, ENUM_VALUE, i)),
            })
            .collect();

        Self {
            name: enum_type.name().to_string(),
            anchor: anchor_for(&full_name),
            comments: comments.get(path),
            long_name,
            full_name,
            values,
        }
    }
}

impl ServiceView {
    fn build(
        service: &ServiceDescriptorProto,
        package: &str,
        path: &[i32],
        comments: &Comments,
    ) -> Self {
        let full_name = qualify(package, service.name());
        let methods = service
            .method
            .iter()
            .enumerate()
            .map(|(i, method)| MethodView {
                name: method.name().to_string(),
                input_type: method.input_type().to_string(),
                output_type: method.output_type().to_string(),
                client_streaming: method.client_streaming(),
                server_streaming: method.server_streaming(),
                comments: comments.get(&child_path(path, SERVICE_METHOD, i)),
            })
            .collect();

        Self {
            name: service.name().to_string(),
            anchor: anchor_for(&full_name),
            comments: comments.get(path),
            full_name,
            methods,
        }
    }
}
