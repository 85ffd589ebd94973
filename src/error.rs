use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerationError>;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("missing required input: {0}")]
    MissingInput(String),

    #[error("failed to parse schema: {0}")]
    SchemaParse(String),

    #[error("malformed schema: root object has no `properties` field")]
    MalformedSchema,

    #[error("field `{0}` not found in schema properties")]
    FieldNotFound(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
