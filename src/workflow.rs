//! One-shot generation of every artifact for a single endpoint.

use crate::api_code::{ApiCode, ApiOptions, EndpointDescriptor, generate_api_code};
use crate::artifact::{ArtifactKind, GeneratedArtifact};
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, Result};
use crate::mock::{MockDocument, MockOptions, MockSynthesizer, generate_mock};
use crate::types::{TypeDefinition, TypeOptions, generate_types};
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub config: GeneratorConfig,
    pub generate_types: bool,
    pub generate_mock: bool,
    pub generate_api: bool,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
            generate_types: true,
            generate_mock: true,
            generate_api: false,
        }
    }
}

/// Result of a workflow run. Steps that failed leave their slot empty and
/// add a message to `errors`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowReport {
    pub types: Option<TypeDefinition>,
    pub mock_data: Option<MockDocument>,
    pub api_code: Option<ApiCode>,
    pub errors: Vec<String>,
}

impl WorkflowReport {
    pub fn artifacts(&self) -> Vec<GeneratedArtifact> {
        let mut artifacts = Vec::new();
        if let Some(types) = &self.types {
            artifacts.push(types.to_artifact());
        }
        if let Some(mock) = &self.mock_data {
            artifacts.push(mock.to_artifact());
        }
        if let Some(api) = &self.api_code {
            artifacts.push(api.to_artifact());
        }
        artifacts
    }
}

pub struct Workflow {
    options: WorkflowOptions,
}

impl Workflow {
    pub fn new(options: WorkflowOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, endpoint: &EndpointDescriptor) -> WorkflowReport {
        self.run_with(endpoint, &mut MockSynthesizer::from_entropy())
    }

    pub fn run_with<R: Rng>(
        &self,
        endpoint: &EndpointDescriptor,
        synthesizer: &mut MockSynthesizer<R>,
    ) -> WorkflowReport {
        let config = &self.options.config;
        let method = endpoint.display_method();
        let mut report = WorkflowReport::default();

        let schema = endpoint.res_body.as_deref().filter(|s| !s.trim().is_empty());

        if let Some(schema) = schema {
            if self.options.generate_types {
                let options = TypeOptions {
                    data_key: config.data_key.clone(),
                    interface_name: config.interface_name.clone(),
                    path: Some(endpoint.path.clone()),
                    method: Some(method.clone()),
                    title: endpoint.title.clone(),
                };
                match generate_types(schema, &options) {
                    Ok(types) => {
                        info!(interface_name = %types.interface_name, "type definition generated");
                        report.types = Some(types);
                    }
                    Err(e) => record(&mut report, "type definition", e),
                }
            }

            if self.options.generate_mock {
                let options = MockOptions {
                    data_key: config.data_key.clone(),
                    mock_type: config.mock_type,
                    title: endpoint.title.clone(),
                    path: Some(endpoint.path.clone()),
                    method: Some(method.clone()),
                };
                match generate_mock(schema, &options, synthesizer) {
                    Ok(mock) => {
                        info!(mock_type = %mock.mock_type, "mock data generated");
                        report.mock_data = Some(mock);
                    }
                    Err(e) => record(&mut report, "mock data", e),
                }
            }
        } else if self.options.generate_types || self.options.generate_mock {
            info!(path = %endpoint.path, "endpoint has no response schema, skipping types and mock");
        }

        if self.options.generate_api {
            let options = ApiOptions {
                request_lib: config.request_lib,
                interface_name: report.types.as_ref().map(|t| t.interface_name.clone()),
            };
            match generate_api_code(endpoint, &options) {
                Ok(api) => {
                    info!(function_name = %api.function_name, "api code generated");
                    report.api_code = Some(api);
                }
                Err(e) => record(&mut report, "api code", e),
            }
        }

        report
    }
}

fn record(report: &mut WorkflowReport, step: &str, error: GenerationError) {
    warn!(step, error = %error, "workflow step failed");
    report.errors.push(format!("{} generation failed: {}", step, error));
}

/// Write artifacts below `root`, each into the directory configured for its
/// kind. Directories are created as needed.
pub fn save_artifacts(
    root: &Path,
    config: &GeneratorConfig,
    filename: Option<&str>,
    artifacts: &[GeneratedArtifact],
) -> Result<Vec<PathBuf>> {
    if artifacts.is_empty() {
        return Err(GenerationError::MissingInput("artifacts to save".to_string()));
    }

    let mut saved = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let dir = root.join(match artifact.kind {
            ArtifactKind::Type => &config.type_path,
            ArtifactKind::Mock => &config.mock_path,
            ArtifactKind::ApiCode => &config.api_path,
        });
        fs::create_dir_all(&dir)?;

        let file_name = match filename.filter(|f| !f.is_empty()) {
            Some(stem) => artifact.kind.file_name(stem),
            None => artifact.kind.default_file_name().to_string(),
        };
        let file_path = dir.join(file_name);
        fs::write(&file_path, &artifact.source_text)?;

        info!(path = %file_path.display(), "artifact written");
        saved.push(file_path);
    }

    Ok(saved)
}
