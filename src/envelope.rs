//! Success/failure envelopes for tool-dispatch callers.
//!
//! The generators return `Result`; these wrappers turn that into a value a
//! dispatcher can hand back as-is, so a failure is a `success: false` record
//! and never an error crossing the tool boundary.

use crate::api_code::{ApiCode, ApiOptions, EndpointDescriptor, generate_api_code};
use crate::error::{GenerationError, Result};
use crate::mock::{MockDocument, MockOptions, MockSynthesizer, generate_mock};
use crate::types::{TypeDefinition, TypeOptions, generate_types};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ToolResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(action: &str, error: &GenerationError) -> Self {
        warn!(action, error = %error, "tool call failed");
        Self {
            success: false,
            message: format!("{} failed: {}", action, error),
            data: None,
            error: Some(error.to_string()),
        }
    }

    pub fn from_result(action: &str, result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(format!("{} succeeded", action), data),
            Err(e) => Self::failure(action, &e),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn types_tool(schema_text: Option<&str>, options: &TypeOptions) -> ToolResponse<TypeDefinition> {
    let result = require(schema_text, "resBodySchema").and_then(|s| generate_types(s, options));
    ToolResponse::from_result("type definition generation", result)
}

pub fn mock_tool(schema_text: Option<&str>, options: &MockOptions) -> ToolResponse<MockDocument> {
    let result = require(schema_text, "resBodySchema")
        .and_then(|s| generate_mock(s, options, &mut MockSynthesizer::from_entropy()));
    ToolResponse::from_result("mock data generation", result)
}

pub fn api_code_tool(endpoint: &EndpointDescriptor, options: &ApiOptions) -> ToolResponse<ApiCode> {
    ToolResponse::from_result("api code generation", generate_api_code(endpoint, options))
}

fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| GenerationError::MissingInput(field.to_string()))
}
