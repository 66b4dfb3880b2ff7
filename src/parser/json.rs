//! Generic JSON-file loading shared by every catalog file.

use crate::error::EngineError;
use serde::de::DeserializeOwned;
use std::path::Path;

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|e| EngineError::JsonParse {
        file: path.display().to_string(),
        message: e.to_string(),
    })
}
