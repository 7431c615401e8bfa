//! Read-only index over the descriptor files of one request
//!
//! The registry is built once per run and never mutated afterwards. Operation
//! resolution and the template helpers look files and types up through it
//! instead of scanning the request.

use std::borrow::Cow;
use std::collections::HashMap;

use prost_types::compiler::CodeGeneratorRequest;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::error::{Error, Result};
use crate::descriptor::views::{EnumView, FileView, MessageView};

/// Kind of a named schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Message,
    Enum,
}

#[derive(Debug, Clone, Copy)]
struct TypeEntry {
    file: usize,
    kind: TypeKind,
    index: usize,
}

/// A resolved type reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeRef<'a> {
    Message(&'a MessageView),
    Enum(&'a EnumView),
}

impl TypeRef<'_> {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeRef::Message(_) => TypeKind::Message,
            TypeRef::Enum(_) => TypeKind::Enum,
        }
    }

    pub fn anchor(&self) -> &str {
        match self {
            TypeRef::Message(message) => &message.anchor,
            TypeRef::Enum(enum_view) => &enum_view.anchor,
        }
    }
}

/// Queryable view of every file in a `CodeGeneratorRequest`.
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    files: Vec<FileView>,
    by_name: HashMap<String, usize>,
    types: HashMap<String, TypeEntry>,
    files_to_generate: Vec<String>,
    parameter: Option<String>,
    compiler_version: Option<String>,
}

impl DescriptorRegistry {
    /// Index the request.
    ///
    /// Fails when a file named in `file_to_generate` is missing from
    /// `proto_file`.
    pub fn load(request: &CodeGeneratorRequest) -> Result<Self> {
        let mut registry = Self {
            files: Vec::with_capacity(request.proto_file.len()),
            files_to_generate: request.file_to_generate.clone(),
            parameter: request.parameter.clone(),
            compiler_version: request.compiler_version.as_ref().map(|v| {
                let mut version = format!("{}.{}.{}", v.major(), v.minor(), v.patch());
                if !v.suffix().is_empty() {
                    version.push('-');
                    version.push_str(v.suffix());
                }
                version
            }),
            ..Default::default()
        };

        for file in &request.proto_file {
            registry.insert(FileView::from_descriptor(file));
        }

        for name in &request.file_to_generate {
            if !registry.by_name.contains_key(name) {
                return Err(Error::registry(format!("no such file: {name}")));
            }
        }

        debug!(
            files = registry.files.len(),
            types = registry.types.len(),
            "Descriptor registry loaded"
        );
        Ok(registry)
    }

    fn insert(&mut self, view: FileView) {
        let position = self.files.len();
        if self.by_name.contains_key(&view.name) {
            // first occurrence wins, matching a front-to-back scan
            warn!(file = %view.name, "Duplicate descriptor file in request");
        } else {
            self.by_name.insert(view.name.clone(), position);
        }

        for (index, message) in view.messages.iter().enumerate() {
            self.types.entry(format!(".{}", message.full_name)).or_insert(TypeEntry {
                file: position,
                kind: TypeKind::Message,
                index,
            });
        }
        for (index, enum_view) in view.enums.iter().enumerate() {
            self.types.entry(format!(".{}", enum_view.full_name)).or_insert(TypeEntry {
                file: position,
                kind: TypeKind::Enum,
                index,
            });
        }

        self.files.push(view);
    }

    /// All files, in request order.
    pub fn files(&self) -> &[FileView] {
        &self.files
    }

    /// Look a file up by its exact name.
    pub fn file(&self, name: &str) -> Option<&FileView> {
        self.by_name.get(name).map(|&i| &self.files[i])
    }

    pub fn files_to_generate(&self) -> &[String] {
        &self.files_to_generate
    }

    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    pub fn compiler_version(&self) -> Option<&str> {
        self.compiler_version.as_deref()
    }

    /// Resolve a type name, with or without the leading dot.
    pub fn lookup_type(&self, type_name: &str) -> Option<TypeRef<'_>> {
        let entry = self.entry(type_name)?;
        let file = &self.files[entry.file];
        Some(match entry.kind {
            TypeKind::Message => TypeRef::Message(&file.messages[entry.index]),
            TypeKind::Enum => TypeRef::Enum(&file.enums[entry.index]),
        })
    }

    /// The file that defines `type_name`.
    pub fn type_file(&self, type_name: &str) -> Option<&FileView> {
        self.entry(type_name).map(|entry| &self.files[entry.file])
    }

    fn entry(&self, type_name: &str) -> Option<&TypeEntry> {
        let key: Cow<'_, str> = if type_name.starts_with('.') {
            Cow::Borrowed(type_name)
        } else {
            Cow::Owned(format!(".{type_name}"))
        };
        self.types.get(key.as_ref())
    }
}
