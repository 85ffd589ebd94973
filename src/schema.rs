use crate::error::{GenerationError, Result};
use serde_json::{Map, Value};

/// One node of the response schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub format: Option<String>,
    pub description: Option<String>,
    pub enum_values: Option<Vec<Value>>,
    /// Explicit `required` marker. `None` means required.
    pub required: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Array(Option<Box<SchemaNode>>),
    Object(Option<Properties>),
    /// Missing or unrecognized `type`.
    Unknown,
}

/// Object properties in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, SchemaNode)>,
}

/// A parsed response schema. Only the top-level `properties` map is
/// addressable; everything below it is reached through [`SchemaNode`].
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    properties: Option<Properties>,
}

impl SchemaNode {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            format: None,
            description: None,
            enum_values: None,
            required: None,
        }
    }

    /// Build a node from raw JSON. Shapes that don't fit a known kind fall
    /// back to [`SchemaKind::Unknown`] or to an array/object without children.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(obj) = value else {
            return Self::new(SchemaKind::Unknown);
        };

        let kind = match obj.get("type").and_then(Value::as_str) {
            Some("string") => SchemaKind::String,
            Some("number") => SchemaKind::Number,
            Some("integer") => SchemaKind::Integer,
            Some("boolean") => SchemaKind::Boolean,
            Some("array") => SchemaKind::Array(
                obj.get("items")
                    .filter(|items| items.is_object())
                    .map(|items| Box::new(Self::from_value(items))),
            ),
            Some("object") => SchemaKind::Object(properties_of(obj)),
            _ => SchemaKind::Unknown,
        };

        Self {
            kind,
            format: string_field(obj, "format"),
            description: string_field(obj, "description"),
            enum_values: obj.get("enum").and_then(Value::as_array).cloned(),
            required: obj.get("required").and_then(Value::as_bool),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    pub fn is_optional(&self) -> bool {
        self.required == Some(false)
    }

    /// Description text. YApi exports often carry `""`, which counts as absent.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn properties_of(obj: &Map<String, Value>) -> Option<Properties> {
    obj.get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, prop)| (name.clone(), SchemaNode::from_value(prop)))
                .collect()
        })
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing an existing one of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, node: SchemaNode) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((name, node)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, SchemaNode)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, SchemaNode)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (name, node) in iter {
            properties.insert(name, node);
        }
        properties
    }
}

impl SchemaDocument {
    /// Parse schema text. Fails on empty input or invalid JSON; a missing
    /// `properties` map is only reported when it is accessed.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(GenerationError::MissingInput("schema".to_string()));
        }

        let value: Value =
            serde_json::from_str(text).map_err(|e| GenerationError::SchemaParse(e.to_string()))?;

        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            properties: value.as_object().and_then(properties_of),
        }
    }

    pub fn from_properties(properties: Properties) -> Self {
        Self {
            properties: Some(properties),
        }
    }

    pub fn properties(&self) -> Result<&Properties> {
        self.properties
            .as_ref()
            .ok_or(GenerationError::MalformedSchema)
    }

    /// Look up the payload subtree named by `data_key`.
    pub fn field(&self, data_key: &str) -> Result<&SchemaNode> {
        self.properties()?
            .get(data_key)
            .ok_or_else(|| GenerationError::FieldNotFound(data_key.to_string()))
    }
}
