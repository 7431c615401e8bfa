//! Descriptor-aware template functions
//!
//! [`TemplateFunctions`] is a capability built fresh for every Operation. It
//! binds the Operation's target, its output file name and the URL root
//! together with a shared handle to the registry, and registers closures over
//! those bindings on that Operation's own `Tera` instance. Nothing is shared
//! mutably between Operations.
//!
//! Functions exposed to templates:
//!
//! | function | returns |
//! |---|---|
//! | `type_file(name)` | name of the file defining a type |
//! | `lookup_type(name)` | the message or enum object of a type |
//! | `is_local(name)` | whether the type is defined in the target file |
//! | `output_file(file?)` | generated output name of a file (default: target) |
//! | `url_to_file(file)` | link to a file's generated output |
//! | `url_to_type(name)` | link to a type's anchor in its generated output |

use std::collections::HashMap;
use std::sync::Arc;

use tera::{Result, Tera, Value};

use crate::core::utils;
use crate::descriptor::DescriptorRegistry;
use crate::generation::output_file_name;

type Args = HashMap<String, Value>;

#[derive(Debug)]
struct Bindings {
    registry: Arc<DescriptorRegistry>,
    target: Option<String>,
    output_file: String,
    url_root: String,
}

/// Per-Operation helper surface.
#[derive(Debug, Clone)]
pub struct TemplateFunctions {
    bindings: Arc<Bindings>,
}

impl TemplateFunctions {
    pub fn new(
        registry: Arc<DescriptorRegistry>,
        target: Option<&str>,
        output_file: &str,
        url_root: &str,
    ) -> Self {
        Self {
            bindings: Arc::new(Bindings {
                registry,
                target: target.map(str::to_string),
                output_file: output_file.to_string(),
                url_root: url_root.to_string(),
            }),
        }
    }

    /// Register every function on `tera`.
    pub fn register(&self, tera: &mut Tera) {
        let f = self.clone();
        tera.register_function("type_file", move |args: &Args| -> Result<Value> {
            let name = required_str(args, "type_file", "name")?;
            f.type_file(name)
                .map(|file| Value::String(file.to_string()))
                .ok_or_else(|| unknown_type(name))
        });

        let f = self.clone();
        tera.register_function("lookup_type", move |args: &Args| -> Result<Value> {
            let name = required_str(args, "lookup_type", "name")?;
            let found = f
                .bindings
                .registry
                .lookup_type(name)
                .ok_or_else(|| unknown_type(name))?;
            tera::to_value(found).map_err(|e| tera::Error::msg(e.to_string()))
        });

        let f = self.clone();
        tera.register_function("is_local", move |args: &Args| -> Result<Value> {
            let name = required_str(args, "is_local", "name")?;
            Ok(Value::Bool(f.is_local(name)))
        });

        let f = self.clone();
        tera.register_function("output_file", move |args: &Args| -> Result<Value> {
            let file = optional_str(args, "output_file", "file")?;
            f.output_file(file).map(Value::String).ok_or_else(|| {
                tera::Error::msg("output_file needs a `file` argument when no target is bound")
            })
        });

        let f = self.clone();
        tera.register_function("url_to_file", move |args: &Args| -> Result<Value> {
            let file = required_str(args, "url_to_file", "file")?;
            f.url_to_file(file)
                .map(Value::String)
                .ok_or_else(|| tera::Error::msg(format!("unknown file {file:?}")))
        });

        let f = self.clone();
        tera.register_function("url_to_type", move |args: &Args| -> Result<Value> {
            let name = required_str(args, "url_to_type", "name")?;
            f.url_to_type(name)
                .map(Value::String)
                .ok_or_else(|| unknown_type(name))
        });
    }

    pub fn target(&self) -> Option<&str> {
        self.bindings.target.as_deref()
    }

    /// Name of the file defining `type_name`.
    pub fn type_file(&self, type_name: &str) -> Option<&str> {
        self.bindings
            .registry
            .type_file(type_name)
            .map(|file| file.name.as_str())
    }

    /// Whether `type_name` is defined in the bound target file.
    pub fn is_local(&self, type_name: &str) -> bool {
        match (self.type_file(type_name), self.target()) {
            (Some(file), Some(target)) => file == target,
            _ => false,
        }
    }

    /// Output name for `file`, or for the target when `file` is `None`.
    pub fn output_file(&self, file: Option<&str>) -> Option<String> {
        file.or(self.target()).map(output_file_name)
    }

    /// Link from the current output to the generated output of `file`.
    pub fn url_to_file(&self, file: &str) -> Option<String> {
        let file = self.bindings.registry.file(file)?;
        Some(self.link_to(&output_file_name(&file.name)))
    }

    /// Link from the current output to the anchor of `type_name`.
    pub fn url_to_type(&self, type_name: &str) -> Option<String> {
        let registry = &self.bindings.registry;
        let found = registry.lookup_type(type_name)?;
        let file = registry.type_file(type_name)?;

        if self.target() == Some(file.name.as_str()) {
            return Some(format!("#{}", found.anchor()));
        }
        Some(format!(
            "{}#{}",
            self.link_to(&output_file_name(&file.name)),
            found.anchor()
        ))
    }

    fn link_to(&self, output: &str) -> String {
        let url_root = &self.bindings.url_root;
        if url_root.is_empty() {
            utils::relative_path(utils::dir_name(&self.bindings.output_file), output)
        } else {
            format!("{}/{}", url_root.trim_end_matches('/'), output)
        }
    }
}

fn unknown_type(name: &str) -> tera::Error {
    tera::Error::msg(format!("unknown type {name:?}"))
}

fn optional_str<'a>(
    args: &'a Args,
    function: &str,
    key: &str,
) -> Result<Option<&'a str>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(tera::Error::msg(format!(
            "{function}: argument `{key}` must be a string"
        ))),
    }
}

fn required_str<'a>(args: &'a Args, function: &str, key: &str) -> Result<&'a str> {
    optional_str(args, function, key)?
        .ok_or_else(|| tera::Error::msg(format!("{function}: missing argument `{key}`")))
}
