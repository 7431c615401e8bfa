//! Generator configuration
//!
//! A [`Config`] is assembled once per run from the plugin parameter string and
//! an optional configuration file, then treated as frozen. Loading order:
//!
//! 1. `conf=<path>` loads a JSON (or YAML, by extension) document.
//! 2. `root`, `template_root`, `url_root` and `partial` parameters override
//!    whatever the document set.
//! 3. An empty `Root` falls back to the process working directory.
//!
//! Unknown parameter keys and unknown document fields are ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::core::parameters::Parameters;

/// One configured rendering pass: a template, an optional target file and an
/// output file name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationConfig {
    /// Template file name, relative to the template root
    #[serde(rename = "Template", alias = "template")]
    pub template: String,

    /// Descriptor file to bind as the render target; empty for index-style passes
    #[serde(rename = "Target", alias = "target")]
    pub target: String,

    /// Name of the generated file
    #[serde(rename = "Output", alias = "output")]
    pub output: String,
}

impl OperationConfig {
    pub fn new<T, O>(template: T, target: Option<&str>, output: O) -> Self
    where
        T: Into<String>,
        O: Into<String>,
    {
        Self {
            template: template.into(),
            target: target.unwrap_or_default().to_string(),
            output: output.into(),
        }
    }

    /// The bound target file name, if any.
    pub fn target(&self) -> Option<&str> {
        (!self.target.is_empty()).then_some(self.target.as_str())
    }
}

/// How a run reports Operation failures.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Any failed Operation discards every rendered file
    #[default]
    AllOrNothing,
    /// Successful files are kept; failures are only logged
    BestEffort,
}

/// Generator configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory for relative paths
    #[serde(rename = "Root", alias = "root")]
    pub root: PathBuf,

    /// Directory holding template files
    #[serde(
        rename = "TemplateRoot",
        alias = "template_root",
        alias = "templateRoot"
    )]
    pub template_root: PathBuf,

    /// Prefix for links between generated outputs; relative links when empty
    #[serde(
        rename = "URLRoot",
        alias = "url_root",
        alias = "urlRoot",
        alias = "UrlRoot"
    )]
    pub url_root: String,

    /// Ordered rendering passes; the default set is used when empty
    #[serde(rename = "Operations", alias = "operations")]
    pub operations: Vec<OperationConfig>,

    /// Keep successfully rendered files even when other Operations fail
    #[serde(
        rename = "PartialOutput",
        alias = "partial_output",
        alias = "partialOutput"
    )]
    pub partial_output: bool,
}

impl Config {
    /// Build a configuration from a raw plugin parameter string.
    pub fn load(parameter: &str) -> Result<Self> {
        Self::from_parameters(&Parameters::parse(parameter))
    }

    /// Build a configuration from parsed plugin parameters.
    pub fn from_parameters(params: &Parameters) -> Result<Self> {
        let mut config = match params.get("conf") {
            Some(path) => Self::from_file(Path::new(path))?,
            None => Self::default(),
        };

        if let Some(root) = params.get("root") {
            config.root = PathBuf::from(root);
        }
        if let Some(template_root) = params.get("template_root") {
            config.template_root = PathBuf::from(template_root);
        }
        if let Some(url_root) = params.get("url_root") {
            config.url_root = url_root.to_string();
        }
        if let Some(partial) = params.flag("partial") {
            config.partial_output = partial;
        }

        if config.root.as_os_str().is_empty() {
            config.root = std::env::current_dir().map_err(Error::Os)?;
        }

        debug!(
            root = %config.root.display(),
            template_root = %config.template_root.display(),
            operations = config.operations.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Read a configuration document. Files ending in `.yaml`/`.yml` are YAML,
    /// everything else is JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );
        if is_yaml {
            serde_yaml::from_str(&data).map_err(|e| Error::decode(path, e.to_string()))
        } else {
            serde_json::from_str(&data).map_err(|e| Error::decode(path, e.to_string()))
        }
    }

    /// Directory templates are read from, with a relative `TemplateRoot`
    /// resolved against `Root`.
    pub fn template_dir(&self) -> PathBuf {
        if self.template_root.as_os_str().is_empty() {
            self.root.clone()
        } else if self.template_root.is_absolute() {
            self.template_root.clone()
        } else {
            self.root.join(&self.template_root)
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.partial_output {
            OutputMode::BestEffort
        } else {
            OutputMode::AllOrNothing
        }
    }
}
