//! Sample payload synthesis.
//!
//! Values follow the schema shape; strings are picked from the `format` hint
//! first and from the property name second. Randomness comes from the `Rng`
//! handed to [`MockSynthesizer`], so a seeded generator gives repeatable
//! output.

use crate::artifact::{ArtifactKind, GeneratedArtifact};
use crate::error::Result;
use crate::schema::{Properties, SchemaDocument, SchemaKind, SchemaNode};
use crate::types::DEFAULT_DATA_KEY;
use crate::walker::fields;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use tracing::debug;

const PLACEHOLDER_EMAIL: &str = "example@test.com";
const PLACEHOLDER_URL: &str = "https://example.com";
const PLACEHOLDER_NAME: &str = "测试名称";
const PLACEHOLDER_TITLE: &str = "测试标题";
const PLACEHOLDER_DESCRIPTION: &str = "测试描述";
const PLACEHOLDER_CODE: &str = "TEST_CODE";
const PLACEHOLDER_STATUS: &str = "active";
const PLACEHOLDER_STRING: &str = "测试字符串";
const SUCCESS_MESSAGE: &str = "操作成功";
const ID_PREFIX: &str = "test_id_";
const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MockType {
    /// The whole response body, envelope fields included.
    #[default]
    Full,
    /// Only the payload under the data key.
    DataOnly,
}

impl fmt::Display for MockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockType::Full => f.write_str("full"),
            MockType::DataOnly => f.write_str("data-only"),
        }
    }
}

/// Inputs for [`generate_mock`].
#[derive(Debug, Clone)]
pub struct MockOptions {
    pub data_key: String,
    pub mock_type: MockType,
    pub title: Option<String>,
    pub path: Option<String>,
    pub method: Option<String>,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            data_key: DEFAULT_DATA_KEY.to_string(),
            mock_type: MockType::Full,
            title: None,
            path: None,
            method: None,
        }
    }
}

impl MockOptions {
    fn display_title(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        let method = self
            .method
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("GET")
            .to_uppercase();
        format!("{} {}", method, self.path.as_deref().unwrap_or("/"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockDocument {
    pub title: String,
    pub description: String,
    pub mock_type: MockType,
    pub data_key: String,
    pub mock_data: Value,
    pub json_string: String,
}

impl MockDocument {
    pub fn to_artifact(&self) -> GeneratedArtifact {
        GeneratedArtifact::new(self.title.clone(), self.json_string.clone(), ArtifactKind::Mock)
    }
}

pub struct MockSynthesizer<R> {
    rng: R,
    now: DateTime<Utc>,
}

impl MockSynthesizer<StdRng> {
    /// Fresh entropy seed, current time.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MockSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            now: Utc::now(),
        }
    }

    /// Pin the clock used for `date` and `date-time` strings.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Sample value for `node`, found under the property `name`.
    pub fn synthesize(&mut self, node: &SchemaNode, name: &str) -> Value {
        if let Some(values) = node.enum_values.as_deref().filter(|v| !v.is_empty()) {
            if let Some(choice) = values.choose(&mut self.rng) {
                return choice.clone();
            }
        }

        match &node.kind {
            SchemaKind::String => Value::String(self.string_value(node, name)),
            SchemaKind::Number => match node.format.as_deref() {
                Some("int32") | Some("int64") => json!(self.rng.gen_range(1..=1000)),
                _ => {
                    let raw: f64 = self.rng.gen_range(0.0..=100.0);
                    json!((raw * 100.0).round() / 100.0)
                }
            },
            SchemaKind::Integer => json!(self.rng.gen_range(1..=1000)),
            SchemaKind::Boolean => Value::Bool(self.rng.gen_bool(0.5)),
            SchemaKind::Array(items) => {
                let len = self.rng.gen_range(1..=3);
                let elements = (0..len)
                    .map(|i| match items {
                        Some(items) => self.synthesize(items, name),
                        None => Value::String(format!("array_item_{}", i)),
                    })
                    .collect();
                Value::Array(elements)
            }
            SchemaKind::Object(Some(properties)) => Value::Object(self.synthesize_object(properties)),
            SchemaKind::Object(None) => Value::Object(Map::new()),
            SchemaKind::Unknown => Value::Null,
        }
    }

    /// One value per property, in property order.
    pub fn synthesize_object(&mut self, properties: &Properties) -> Map<String, Value> {
        let mut out = Map::new();
        for field in fields(properties) {
            let value = self.synthesize(field.node, field.name);
            out.insert(field.name.to_string(), value);
        }
        out
    }

    /// Mock of the whole response body. `code`, `message` and `status` are
    /// backfilled with success values when the schema declares them and the
    /// synthesized value is empty.
    pub fn full_response(&mut self, document: &SchemaDocument) -> Result<Value> {
        let properties = document.properties()?;
        let mut response = self.synthesize_object(properties);

        let defaults = [
            ("code", json!("200")),
            ("message", json!(SUCCESS_MESSAGE)),
            ("status", json!(1)),
        ];
        for (key, default) in defaults {
            if properties.contains(key) && response.get(key).is_none_or(is_unpopulated) {
                response.insert(key.to_string(), default);
            }
        }

        Ok(Value::Object(response))
    }

    /// Mock of the `data_key` subtree only.
    pub fn data_only(&mut self, document: &SchemaDocument, data_key: &str) -> Result<Value> {
        let node = document.field(data_key)?;
        Ok(self.synthesize(node, data_key))
    }

    fn string_value(&mut self, node: &SchemaNode, name: &str) -> String {
        match node.format.as_deref() {
            Some("date-time") => return self.now.to_rfc3339_opts(SecondsFormat::Millis, true),
            Some("date") => return self.now.format("%Y-%m-%d").to_string(),
            Some("email") => return PLACEHOLDER_EMAIL.to_string(),
            Some("uri") | Some("url") => return PLACEHOLDER_URL.to_string(),
            _ => {}
        }

        let lower = name.to_lowercase();
        if lower.contains("name") {
            PLACEHOLDER_NAME.to_string()
        } else if lower.contains("title") {
            PLACEHOLDER_TITLE.to_string()
        } else if lower.contains("desc") || lower.contains("description") {
            PLACEHOLDER_DESCRIPTION.to_string()
        } else if lower.contains("id") {
            format!("{}{}", ID_PREFIX, self.base36_suffix())
        } else if lower.contains("code") {
            PLACEHOLDER_CODE.to_string()
        } else if lower.contains("status") {
            PLACEHOLDER_STATUS.to_string()
        } else if lower.contains("message") {
            SUCCESS_MESSAGE.to_string()
        } else {
            node.description()
                .unwrap_or(PLACEHOLDER_STRING)
                .to_string()
        }
    }

    fn base36_suffix(&mut self) -> String {
        (0..ID_SUFFIX_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect()
    }
}

/// Empty in the sense of a falsy JSON value.
fn is_unpopulated(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Generate a mock document from response schema text.
pub fn generate_mock<R: Rng>(
    schema_text: &str,
    options: &MockOptions,
    synthesizer: &mut MockSynthesizer<R>,
) -> Result<MockDocument> {
    let document = SchemaDocument::parse(schema_text)?;

    debug!(
        mock_type = %options.mock_type,
        data_key = %options.data_key,
        "generating mock data"
    );

    let (mock_data, description) = match options.mock_type {
        MockType::DataOnly => (
            synthesizer.data_only(&document, &options.data_key)?,
            format!("mock data for the `{}` field", options.data_key),
        ),
        MockType::Full => (
            synthesizer.full_response(&document)?,
            "mock data for the full API response".to_string(),
        ),
    };

    let json_string = serde_json::to_string_pretty(&mock_data)?;

    Ok(MockDocument {
        title: options.display_title(),
        description,
        mock_type: options.mock_type,
        data_key: options.data_key.clone(),
        mock_data,
        json_string,
    })
}
