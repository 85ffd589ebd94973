pub mod api_code;
pub mod artifact;
pub mod config;
pub mod envelope;
pub mod error;
pub mod mock;
pub mod naming;
pub mod schema;
pub mod types;
pub mod walker;
pub mod workflow;

pub use api_code::{
    ApiCode, ApiOptions, ApiTemplate, EndpointDescriptor, PathParam, QueryParam, RequestLib,
    generate_api_code,
};
pub use artifact::{ArtifactKind, GeneratedArtifact};
pub use config::GeneratorConfig;
pub use envelope::ToolResponse;
pub use error::{GenerationError, Result};
pub use mock::{MockDocument, MockOptions, MockSynthesizer, MockType, generate_mock};
pub use naming::{derive_function_name, derive_interface_name};
pub use schema::{Properties, SchemaDocument, SchemaKind, SchemaNode};
pub use types::{TypeDefinition, TypeEmitter, TypeOptions, generate_types};
pub use workflow::{Workflow, WorkflowOptions, WorkflowReport, save_artifacts};

/// Generate the interface for the `data` field of a response schema.
pub fn convert_schema(schema_text: &str) -> Result<String> {
    Ok(generate_types(schema_text, &TypeOptions::default())?.type_definition)
}

/// Generate the interface for the `data` field with a custom interface name.
pub fn convert_schema_with_name(schema_text: &str, interface_name: &str) -> Result<String> {
    let options = TypeOptions {
        interface_name: Some(interface_name.to_string()),
        ..TypeOptions::default()
    };
    Ok(generate_types(schema_text, &options)?.type_definition)
}
