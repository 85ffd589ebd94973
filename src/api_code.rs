//! Request function emission for the axios and fetch clients.
//!
//! Each client style is a template over [`ApiTemplate`]; the templates don't
//! look at schemas at all, they only need the endpoint shape and the name of
//! the response type.

use crate::artifact::{ArtifactKind, GeneratedArtifact};
use crate::error::{GenerationError, Result};
use crate::naming::{capitalize, derive_function_name};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Query flag value YApi uses for optional parameters.
pub const OPTIONAL_FLAG: &str = "0";
const REQUIRED_FLAG: &str = "1";
const DEFAULT_METHOD: &str = "GET";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RequestLib {
    #[default]
    Axios,
    Fetch,
}

impl fmt::Display for RequestLib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestLib::Axios => f.write_str("axios"),
            RequestLib::Fetch => f.write_str("fetch"),
        }
    }
}

/// One endpoint as exported by YApi.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    #[serde(default)]
    pub path: String,

    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, rename = "req_params", alias = "reqParams")]
    pub path_params: Vec<PathParam>,

    #[serde(default, rename = "req_query", alias = "reqQuery")]
    pub query_params: Vec<QueryParam>,

    /// Response body schema as JSON text.
    #[serde(
        default,
        rename = "res_body",
        alias = "resBodySchema",
        skip_serializing_if = "Option::is_none"
    )]
    pub res_body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParam {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// `"0"` marks the parameter optional; anything else is required.
    #[serde(default = "default_required", deserialize_with = "deserialize_flag")]
    pub required: String,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_required() -> String {
    REQUIRED_FLAG.to_string()
}

/// YApi writes the flag as a string, but hand-written descriptors often use
/// numbers or booleans.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(false) => OPTIONAL_FLAG.to_string(),
        _ => REQUIRED_FLAG.to_string(),
    })
}

impl EndpointDescriptor {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Parse one interface object from a YApi export.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(GenerationError::MissingInput("endpoint descriptor".to_string()));
        }
        serde_json::from_str(text)
            .map_err(|e| GenerationError::SchemaParse(format!("endpoint descriptor: {}", e)))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_path_param(mut self, name: impl Into<String>, desc: Option<&str>) -> Self {
        self.path_params.push(PathParam {
            name: name.into(),
            desc: desc.map(str::to_string),
        });
        self
    }

    pub fn with_query_param(
        mut self,
        name: impl Into<String>,
        desc: Option<&str>,
        required: bool,
    ) -> Self {
        self.query_params.push(QueryParam {
            name: name.into(),
            desc: desc.map(str::to_string),
            required: if required { REQUIRED_FLAG } else { OPTIONAL_FLAG }.to_string(),
        });
        self
    }

    /// Upper-cased method, `GET` when unset.
    pub fn display_method(&self) -> String {
        match self.method.trim() {
            "" => DEFAULT_METHOD.to_string(),
            m => m.to_uppercase(),
        }
    }

    pub fn function_name(&self) -> String {
        derive_function_name(&self.path, &self.display_method())
    }
}

impl PathParam {
    fn label(&self) -> &str {
        self.desc.as_deref().filter(|d| !d.is_empty()).unwrap_or(&self.name)
    }
}

impl QueryParam {
    pub fn is_optional(&self) -> bool {
        self.required == OPTIONAL_FLAG
    }

    fn label(&self) -> &str {
        self.desc.as_deref().filter(|d| !d.is_empty()).unwrap_or(&self.name)
    }
}

/// Everything a client template needs.
#[derive(Debug, Clone, Copy)]
pub struct ApiTemplate<'a> {
    pub function_name: &'a str,
    pub path: &'a str,
    /// Upper-case HTTP method.
    pub method: &'a str,
    pub title: Option<&'a str>,
    pub path_params: &'a [PathParam],
    pub query_params: &'a [QueryParam],
    pub response_type: Option<&'a str>,
}

impl ApiTemplate<'_> {
    fn has_params(&self) -> bool {
        !self.path_params.is_empty() || !self.query_params.is_empty()
    }

    fn params_type_name(&self) -> String {
        format!("{}Params", capitalize(self.function_name))
    }

    fn params_interface(&self) -> String {
        if !self.has_params() {
            return String::new();
        }

        let mut fields = Vec::new();
        for param in self.path_params {
            fields.push(format!(
                "  /** {} */\n  {}: string | number",
                param.label(),
                param.name
            ));
        }
        for query in self.query_params {
            let optional_marker = if query.is_optional() { "?" } else { "" };
            fields.push(format!(
                "  /** {} */\n  {}{}: string | number",
                query.label(),
                query.name,
                optional_marker
            ));
        }

        format!(
            "interface {} {{\n{}\n}}\n\n",
            self.params_type_name(),
            fields.join("\n")
        )
    }

    fn function_params(&self) -> String {
        if self.has_params() {
            format!("params: {}", self.params_type_name())
        } else {
            String::new()
        }
    }

    /// Quoted path, or a template literal once a placeholder is substituted.
    fn url_expression(&self) -> String {
        let mut url = self.path.to_string();
        let mut substituted = false;
        for param in self.path_params {
            let placeholder = format!("{{{}}}", param.name);
            if url.contains(&placeholder) {
                url = url.replace(&placeholder, &format!("${{params.{}}}", param.name));
                substituted = true;
            }
        }

        if substituted {
            format!("`{}`", url)
        } else {
            format!("'{}'", url)
        }
    }

    fn return_type(&self) -> String {
        match self.response_type.filter(|t| !t.is_empty()) {
            Some(name) => format!("Promise<{}>", name),
            None => "Promise<unknown>".to_string(),
        }
    }

    /// Parameter interface, doc comment and the opening line of the function.
    fn header(&self) -> String {
        let doc_title = match self.title.filter(|t| !t.is_empty()) {
            Some(title) => title.to_string(),
            None => format!("{} {}", self.method, self.path),
        };

        format!(
            "{}/**\n * {}\n */\nexport const {} = async ({}): {} => {{\n",
            self.params_interface(),
            doc_title,
            self.function_name,
            self.function_params(),
            self.return_type()
        )
    }
}

/// axios client: query parameters go through the request config.
pub fn render_axios(template: &ApiTemplate<'_>) -> String {
    let mut output = template.header();

    let mut request_config = String::new();
    if !template.query_params.is_empty() {
        let query_params: Vec<String> = template
            .query_params
            .iter()
            .map(|q| format!("{}: params.{}", q.name, q.name))
            .collect();
        request_config = format!(
            ", {{\n    params: {{ {} }}\n  }}",
            query_params.join(", ")
        );
    }

    output.push_str(&format!(
        "  const response = await axios.{}({}{})\n",
        template.method.to_lowercase(),
        template.url_expression(),
        request_config
    ));
    output.push_str("  return response.data\n}");
    output
}

/// fetch client: builds the query string by hand and rejects non-2xx
/// responses.
pub fn render_fetch(template: &ApiTemplate<'_>) -> String {
    let mut output = template.header();
    output.push_str(&format!("  const baseUrl = {}\n", template.url_expression()));

    if template.query_params.is_empty() {
        output.push_str("  const url = baseUrl\n");
    } else {
        output.push_str("  const searchParams = new URLSearchParams()\n");
        for query in template.query_params {
            if query.is_optional() {
                output.push_str(&format!(
                    "  if (params.{0} !== undefined) searchParams.append('{0}', String(params.{0}))\n",
                    query.name
                ));
            } else {
                output.push_str(&format!(
                    "  searchParams.append('{0}', String(params.{0}))\n",
                    query.name
                ));
            }
        }
        output.push_str("  const queryString = searchParams.toString()\n");
        output.push_str("  const url = queryString ? `${baseUrl}?${queryString}` : baseUrl\n");
    }

    output.push_str(&format!(
        concat!(
            "\n",
            "  const response = await fetch(url, {{\n",
            "    method: '{}',\n",
            "    headers: {{\n",
            "      'Content-Type': 'application/json',\n",
            "    }},\n",
            "  }})\n",
            "\n",
            "  if (!response.ok) {{\n",
            "    throw new Error(`HTTP error! status: ${{response.status}}`)\n",
            "  }}\n",
            "\n",
            "  return response.json()\n",
            "}}"
        ),
        template.method
    ));
    output
}

/// Inputs for [`generate_api_code`] besides the endpoint itself.
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
    pub request_lib: RequestLib,
    /// Response type for the `Promise<...>` return annotation.
    pub interface_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCode {
    pub function_name: String,
    pub api_code: String,
    pub request_lib: RequestLib,
    pub path: String,
    pub method: String,
}

impl ApiCode {
    pub fn to_artifact(&self) -> GeneratedArtifact {
        GeneratedArtifact::new(
            self.function_name.clone(),
            self.api_code.clone(),
            ArtifactKind::ApiCode,
        )
    }
}

pub fn generate_api_code(endpoint: &EndpointDescriptor, options: &ApiOptions) -> Result<ApiCode> {
    if endpoint.path.trim().is_empty() {
        return Err(GenerationError::MissingInput("path".to_string()));
    }

    let method = endpoint.display_method();
    let function_name = endpoint.function_name();

    debug!(
        function_name = %function_name,
        request_lib = %options.request_lib,
        method = %method,
        path = %endpoint.path,
        "generating api code"
    );

    let template = ApiTemplate {
        function_name: &function_name,
        path: &endpoint.path,
        method: &method,
        title: endpoint.title.as_deref(),
        path_params: &endpoint.path_params,
        query_params: &endpoint.query_params,
        response_type: options.interface_name.as_deref(),
    };

    let api_code = match options.request_lib {
        RequestLib::Axios => render_axios(&template),
        RequestLib::Fetch => render_fetch(&template),
    };

    Ok(ApiCode {
        function_name,
        api_code,
        request_lib: options.request_lib,
        path: endpoint.path.clone(),
        method,
    })
}
