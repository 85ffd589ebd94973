use crate::api_code::RequestLib;
use crate::error::{GenerationError, Result};
use crate::mock::MockType;
use crate::types::DEFAULT_DATA_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "yapi.config.json";

/// Settings read from `yapi.config.json`. Every field has a default, and
/// keys this crate doesn't use (such as `remoteUrl`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub data_key: String,
    pub mock_type: MockType,
    pub request_lib: RequestLib,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,
    pub type_path: PathBuf,
    pub mock_path: PathBuf,
    pub api_path: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            data_key: DEFAULT_DATA_KEY.to_string(),
            mock_type: MockType::Full,
            request_lib: RequestLib::Axios,
            interface_name: None,
            type_path: PathBuf::from("src/types"),
            mock_path: PathBuf::from("src/mocks"),
            api_path: PathBuf::from("src/api"),
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| GenerationError::Config(format!("{}: {}", path.display(), e)))?;

        if config.data_key.is_empty() {
            return Err(GenerationError::Config(format!(
                "{}: dataKey must not be empty",
                path.display()
            )));
        }

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Look for `yapi.config.json` in `start` and each of its ancestors.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest config above `start`, or defaults when there is none.
    pub fn discover_or_default(start: &Path) -> Result<Self> {
        match Self::discover(start) {
            Some(path) => Self::load(&path),
            None => {
                debug!(start = %start.display(), "no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
