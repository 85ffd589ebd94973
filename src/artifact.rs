use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactKind {
    Type,
    Mock,
    ApiCode,
}

impl ArtifactKind {
    /// File name used when the caller doesn't pick one.
    pub fn default_file_name(self) -> &'static str {
        match self {
            ArtifactKind::Type => "api-types.d.ts",
            ArtifactKind::Mock => "api-mock.json",
            ArtifactKind::ApiCode => "api-requests.ts",
        }
    }

    /// File name derived from a caller supplied stem.
    pub fn file_name(self, stem: &str) -> String {
        match self {
            ArtifactKind::Type => format!("{stem}.d.ts"),
            ArtifactKind::Mock => format!("{stem}.mock.json"),
            ArtifactKind::ApiCode => format!("{stem}.ts"),
        }
    }
}

/// Rendered output of one emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifact {
    pub name: String,
    pub source_text: String,
    pub kind: ArtifactKind,
}

impl GeneratedArtifact {
    pub fn new(name: impl Into<String>, source_text: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            name: name.into(),
            source_text: source_text.into(),
            kind,
        }
    }
}
