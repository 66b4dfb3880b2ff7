//! Loads a catalog directory (`subjects.json`, `faculty.json`, `rooms.json`,
//! `sections.json`, optional `config.toml`) into a `ScheduleRequest`.

mod json;
mod validation;

pub use validation::{validate_catalog, validate_fixed_slot_references};

use crate::error::{EngineError, Result};
use crate::types::{Config, Faculty, Room, ScheduleRequest, Section, Subject};
use std::path::Path;
use tracing::instrument;

#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn load_request_from_dir(dir: &Path, semester: u32, branch: &str) -> Result<ScheduleRequest> {
    let subjects: Vec<Subject> = json::load_json(&dir.join("subjects.json"))?;
    let faculty: Vec<Faculty> = json::load_json(&dir.join("faculty.json"))?;
    let rooms: Vec<Room> = json::load_json(&dir.join("rooms.json"))?;
    let sections: Vec<Section> = json::load_json(&dir.join("sections.json"))?;
    let config = load_config(dir)?;

    validate_catalog(&subjects, &faculty, &rooms, &sections)?;
    validate_fixed_slot_references(&subjects, &config)?;

    let section_labels = sections.iter().map(|s| s.label.0.clone()).collect();
    let section_batches = sections.into_iter().map(|s| (s.label, s.batches)).collect();

    Ok(ScheduleRequest {
        semester,
        branch: branch.to_string(),
        sections: section_labels,
        subjects,
        faculty,
        rooms,
        section_batches,
        config,
    })
}

/// `config.toml` beside the catalog overrides `Config::default()`. Absent
/// file is not an error — every deployment may simply accept the defaults.
fn load_config(dir: &Path) -> Result<Config> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|source| EngineError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| EngineError::TomlParse {
        file: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(config)
}
