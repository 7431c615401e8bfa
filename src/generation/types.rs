//! Core types for the generation domain

use prost_types::compiler::{CodeGeneratorResponse, code_generator_response};
use serde::Serialize;

/// One rendered output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

/// Result of a run: either rendered files or one aggregated error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResponse {
    pub files: Vec<GeneratedFile>,
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn success(files: Vec<GeneratedFile>) -> Self {
        Self { files, error: None }
    }

    pub fn failure<S: Into<String>>(error: S) -> Self {
        Self {
            files: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }
}

impl From<GenerationResponse> for CodeGeneratorResponse {
    fn from(response: GenerationResponse) -> Self {
        CodeGeneratorResponse {
            error: response.error,
            supported_features: Some(
                code_generator_response::Feature::Proto3Optional as u64,
            ),
            file: response
                .files
                .into_iter()
                .map(|f| code_generator_response::File {
                    name: Some(f.name),
                    content: Some(f.content),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }
}
