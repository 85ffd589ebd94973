use crate::artifact::{ArtifactKind, GeneratedArtifact};
use crate::error::Result;
use crate::naming::{DEFAULT_INTERFACE_NAME, derive_interface_name};
use crate::schema::{Properties, SchemaDocument, SchemaKind, SchemaNode};
use crate::walker::fields;
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_DATA_KEY: &str = "data";

/// Inputs for [`generate_types`].
#[derive(Debug, Clone)]
pub struct TypeOptions {
    pub data_key: String,
    pub interface_name: Option<String>,
    pub path: Option<String>,
    pub method: Option<String>,
    pub title: Option<String>,
}

impl Default for TypeOptions {
    fn default() -> Self {
        Self {
            data_key: DEFAULT_DATA_KEY.to_string(),
            interface_name: None,
            path: None,
            method: None,
            title: None,
        }
    }
}

impl TypeOptions {
    /// Explicit name, else derived from path and method, else `ApiData`.
    pub fn resolve_interface_name(&self) -> String {
        if let Some(name) = self.interface_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match (self.path.as_deref(), self.method.as_deref()) {
            (Some(path), Some(method)) if !path.is_empty() && !method.is_empty() => {
                derive_interface_name(path, method)
            }
            _ => DEFAULT_INTERFACE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    pub interface_name: String,
    pub type_definition: String,
    pub data_key: String,
}

impl TypeDefinition {
    pub fn to_artifact(&self) -> GeneratedArtifact {
        GeneratedArtifact::new(
            self.interface_name.clone(),
            self.type_definition.clone(),
            ArtifactKind::Type,
        )
    }
}

const INDENT: &str = "  ";

/// Emits TypeScript declarations from schema nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeEmitter;

impl TypeEmitter {
    pub fn new() -> Self {
        Self
    }

    /// `export interface <name> <type>`, with an optional title comment.
    pub fn emit_interface(&self, name: &str, node: &SchemaNode, title: Option<&str>) -> String {
        let mut output = String::new();
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            output.push_str(&format!("/** {} */\n", title));
        }
        output.push_str(&format!("export interface {} {}", name, self.emit_type(node, 0)));
        output
    }

    /// Inline type for `node`. `indent` is the nesting level of the line the
    /// type starts on.
    pub fn emit_type(&self, node: &SchemaNode, indent: usize) -> String {
        match &node.kind {
            SchemaKind::String => "string".to_string(),
            SchemaKind::Number | SchemaKind::Integer => "number".to_string(),
            SchemaKind::Boolean => "boolean".to_string(),
            SchemaKind::Array(Some(items)) => format!("{}[]", self.emit_type(items, indent)),
            SchemaKind::Array(None) => "any[]".to_string(),
            SchemaKind::Object(Some(properties)) => self.object_literal(properties, indent),
            SchemaKind::Object(None) => "Record<string, any>".to_string(),
            SchemaKind::Unknown => "any".to_string(),
        }
    }

    fn object_literal(&self, properties: &Properties, indent: usize) -> String {
        if properties.is_empty() {
            return "{}".to_string();
        }

        let indent_str = INDENT.repeat(indent);
        let field_indent = INDENT.repeat(indent + 1);
        let mut output = String::from("{\n");

        for field in fields(properties) {
            if let Some(desc) = field.description() {
                output.push_str(&format!("{}/** {} */\n", field_indent, desc));
            }
            let optional_marker = if field.is_optional() { "?" } else { "" };
            output.push_str(&format!(
                "{}{}{}: {};\n",
                field_indent,
                property_key(field.name),
                optional_marker,
                self.emit_type(field.node, indent + 1)
            ));
        }

        output.push_str(&format!("{}}}", indent_str));
        output
    }
}

/// Quote property names that aren't plain identifiers.
fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if is_identifier {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "\\'"))
    }
}

/// Generate the TypeScript interface for the `data_key` subtree of a
/// response schema.
pub fn generate_types(schema_text: &str, options: &TypeOptions) -> Result<TypeDefinition> {
    let document = SchemaDocument::parse(schema_text)?;
    let node = document.field(&options.data_key)?;
    let interface_name = options.resolve_interface_name();

    debug!(
        interface_name = %interface_name,
        data_key = %options.data_key,
        "generating type definition"
    );

    let type_definition =
        TypeEmitter::new().emit_interface(&interface_name, node, options.title.as_deref());

    Ok(TypeDefinition {
        interface_name,
        type_definition,
        data_key: options.data_key.clone(),
    })
}
