//! Generation orchestration - drives every Operation of a run

use std::sync::Arc;

use prost_types::compiler::CodeGeneratorRequest;
use tracing::{debug, info, warn};

use crate::core::config::{Config, OperationConfig, OutputMode};
use crate::core::error::{Error, Result};
use crate::descriptor::DescriptorRegistry;
use crate::generation::{
    GeneratedFile, GenerationResponse, OperationFailure, OperationResolver, plan_operations,
};
use crate::infrastructure::templates::{FileSystemTemplateLoader, TemplateLoader};

/// Runs the configured (or default) Operations of one request.
pub struct Generator {
    config: Config,
    registry: Arc<DescriptorRegistry>,
    loader: Arc<dyn TemplateLoader>,
}

impl Generator {
    pub fn new(
        config: Config,
        registry: Arc<DescriptorRegistry>,
        loader: Arc<dyn TemplateLoader>,
    ) -> Self {
        Self {
            config,
            registry,
            loader,
        }
    }

    pub fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    /// The Operations this run will execute, in order.
    pub fn operations(&self) -> Vec<OperationConfig> {
        plan_operations(&self.config.operations, &self.registry)
    }

    /// Render one Operation in isolation.
    pub fn render_operation(
        &self,
        operation: &OperationConfig,
    ) -> std::result::Result<GeneratedFile, OperationFailure> {
        OperationResolver::new(&self.registry, self.loader.as_ref(), &self.config.url_root)
            .resolve(operation)
            .map_err(|error| OperationFailure::new(operation, error))
    }

    /// Execute every Operation in order.
    ///
    /// A failing Operation never stops the ones after it, so a single run
    /// reports every problem. What happens to the successful files depends on
    /// the configured [`OutputMode`].
    pub fn run(&self) -> GenerationResponse {
        let operations = self.operations();
        debug!(
            "Generator starting run with {} operations",
            operations.len()
        );

        let mut files = Vec::with_capacity(operations.len());
        let mut errors = String::new();
        for operation in &operations {
            match self.render_operation(operation) {
                Ok(file) => files.push(file),
                Err(failure) => {
                    warn!(
                        template = %failure.template,
                        output = %failure.output,
                        "Operation failed: {}",
                        failure.error
                    );
                    errors.push_str(&failure.to_string());
                    errors.push('\n');
                }
            }
        }

        info!(
            rendered = files.len(),
            failed = operations.len() - files.len(),
            "Generation finished"
        );

        if errors.is_empty() {
            return GenerationResponse::success(files);
        }
        match self.config.output_mode() {
            OutputMode::AllOrNothing => GenerationResponse::failure(errors),
            OutputMode::BestEffort => {
                warn!(
                    "Partial output enabled, keeping {} rendered files",
                    files.len()
                );
                GenerationResponse::success(files)
            }
        }
    }
}

/// Generate outputs for `request`, reading templates from the configured
/// template directory.
///
/// Returns `Err` only for run-level failures (no input files, inconsistent
/// descriptor set). Per-Operation failures are reported inside the response.
pub fn generate(request: &CodeGeneratorRequest, config: Config) -> Result<GenerationResponse> {
    let loader = Arc::new(FileSystemTemplateLoader::new(config.template_dir()));
    generate_with_loader(request, config, loader)
}

/// Like [`generate`], with a caller-supplied template source.
pub fn generate_with_loader(
    request: &CodeGeneratorRequest,
    config: Config,
    loader: Arc<dyn TemplateLoader>,
) -> Result<GenerationResponse> {
    if request.file_to_generate.is_empty() {
        return Err(Error::EmptyInput);
    }

    let registry = Arc::new(DescriptorRegistry::load(request)?);
    Ok(Generator::new(config, registry, loader).run())
}
