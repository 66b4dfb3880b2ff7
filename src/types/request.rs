use super::{BatchLabel, Config, Faculty, Room, SectionLabel, Subject};
use crate::grid::Grid;
use crate::validator::ValidationReport;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The complete input catalog for one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub semester: u32,
    pub branch: String,
    pub sections: Vec<String>,
    pub subjects: Vec<Subject>,
    pub faculty: Vec<Faculty>,
    pub rooms: Vec<Room>,
    pub section_batches: HashMap<SectionLabel, Vec<BatchLabel>>,
    #[serde(default)]
    pub config: Config,
}

/// Timing and search-effort counters surfaced alongside a result, useful for
/// comparing algorithm choices and for regression-testing search cost.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub backtrack_count: u64,
    pub attempts: u64,
    pub generation_time_ms: u64,
}

/// The outcome of one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub grid: Grid,
    pub statistics: Statistics,
    pub validation: ValidationReport,
}
