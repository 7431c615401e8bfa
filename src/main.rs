//! protoc-gen-tmpl entrypoint
//! Reads a CodeGeneratorRequest, renders the configured templates and writes
//! the CodeGeneratorResponse back for protoc.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use protoc_gen_tmpl::{Config, GenerationResponse, generate, infrastructure::protoc};
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use prost_types::compiler::CodeGeneratorResponse;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// protoc plugin rendering Tera templates against protobuf descriptors.
///
/// protoc runs this binary with no arguments; the flags exist for replaying a
/// captured request by hand.
#[derive(Parser, Debug)]
#[command(name = "protoc-gen-tmpl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read the encoded request from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
    /// Write the encoded response to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// Override the parameter string carried by the request
    #[arg(long)]
    parameter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the response, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let request = match &cli.input {
        Some(path) => protoc::read_request_file(path)
            .await
            .with_context(|| format!("Failed to read request from {}", path.display()))?,
        None => protoc::read_request(tokio::io::stdin())
            .await
            .context("Failed to read request from stdin")?,
    };
    debug!(
        files = request.file_to_generate.len(),
        descriptors = request.proto_file.len(),
        "Decoded request"
    );

    let parameter = cli
        .parameter
        .clone()
        .or_else(|| request.parameter.clone())
        .unwrap_or_default();

    let response = match Config::load(&parameter).and_then(|config| generate(&request, config)) {
        Ok(response) => response,
        Err(e) => {
            error!("Generation failed: {e}");
            GenerationResponse::failure(e.to_string())
        }
    };
    info!(
        files = response.files.len(),
        ok = response.is_success(),
        "Writing response"
    );

    let response = CodeGeneratorResponse::from(response);
    match &cli.output {
        Some(path) => {
            let file = tokio::fs::File::create(path)
                .await
                .with_context(|| format!("Failed to create {}", path.display()))?;
            protoc::write_response(file, &response).await?;
        }
        None => protoc::write_response(tokio::io::stdout(), &response).await?,
    }

    Ok(())
}
