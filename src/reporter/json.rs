//! JSON report: `metadata` + `timetables[section].days[].slots[].classes[]`
//! (spec §6 persisted output format).

use crate::error::Result;
use crate::types::{day_name, Algorithm, ScheduleRequest, ScheduleResponse, SectionLabel, SlotKey};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct Metadata {
    semester: u32,
    branch: String,
    sections: Vec<String>,
    generated_at: String,
    algorithm: Algorithm,
    generation_time_ms: u64,
    backtrack_count: u64,
    attempts: u64,
    is_valid: bool,
    score: i64,
}

#[derive(Serialize)]
struct ClassEntry {
    subject_code: String,
    subject_short: String,
    subject_type: String,
    batch: Option<String>,
    faculty_id: Option<String>,
    room: Option<String>,
    is_continuation: bool,
}

#[derive(Serialize)]
struct SlotEntry {
    period: u8,
    classes: Vec<ClassEntry>,
}

#[derive(Serialize)]
struct DayEntry {
    day: String,
    slots: Vec<SlotEntry>,
}

#[derive(Serialize)]
struct SectionTimetable {
    days: Vec<DayEntry>,
}

#[derive(Serialize)]
struct JsonReport {
    metadata: Metadata,
    timetables: BTreeMap<String, SectionTimetable>,
}

/// `Config.algorithm == evolutionary` is the only path a run can legitimately
/// finish with remaining hard violations, so `is_valid` there reflects the
/// search outcome, not a crate bug.
pub fn generate_json_report(request: &ScheduleRequest, response: &ScheduleResponse, generated_at: &str) -> Result<String> {
    let metadata = Metadata {
        semester: request.semester,
        branch: request.branch.clone(),
        sections: request.sections.clone(),
        generated_at: generated_at.to_string(),
        algorithm: request.config.algorithm,
        generation_time_ms: response.statistics.generation_time_ms,
        backtrack_count: response.statistics.backtrack_count,
        attempts: response.statistics.attempts,
        is_valid: response.validation.is_valid,
        score: response.validation.score,
    };

    let mut timetables = BTreeMap::new();
    for section_name in &request.sections {
        let section = SectionLabel(section_name.clone());
        let mut days = Vec::new();
        for day in 0..request.config.num_days() {
            let mut slots = Vec::new();
            for period in 1..=request.config.periods_per_day {
                let placements = response.grid.occupied(&section, SlotKey::new(day, period));
                if placements.is_empty() {
                    continue;
                }
                let classes = placements
                    .iter()
                    .map(|p| {
                        let subject = request.subjects.iter().find(|s| s.code == p.subject_code);
                        ClassEntry {
                            subject_code: p.subject_code.0.clone(),
                            subject_short: subject.map(|s| s.short_name.clone()).unwrap_or_default(),
                            subject_type: subject
                                .map(|s| serde_json::to_string(&s.subject_type).unwrap_or_default().trim_matches('"').to_string())
                                .unwrap_or_default(),
                            batch: p.batch.as_ref().map(|b| b.0.clone()),
                            faculty_id: Some(p.faculty_id.0.clone()),
                            room: Some(p.room_number.0.clone()),
                            is_continuation: p.is_lab_continuation,
                        }
                    })
                    .collect();
                slots.push(SlotEntry { period, classes });
            }
            days.push(DayEntry {
                day: day_name(&request.config.days, day),
                slots,
            });
        }
        timetables.insert(section_name.clone(), SectionTimetable { days });
    }

    Ok(serde_json::to_string_pretty(&JsonReport { metadata, timetables })?)
}

/// Compact counts-and-score variant for `--quiet` runs.
#[derive(Serialize)]
pub struct JsonSummary {
    pub semester: u32,
    pub branch: String,
    pub is_valid: bool,
    pub score: i64,
    pub hard_violations: usize,
    pub soft_violations: usize,
    pub generation_time_ms: u64,
}

pub fn generate_json_summary(request: &ScheduleRequest, response: &ScheduleResponse) -> Result<String> {
    let summary = JsonSummary {
        semester: request.semester,
        branch: request.branch.clone(),
        is_valid: response.validation.is_valid,
        score: response.validation.score,
        hard_violations: response.validation.hard_violations.len(),
        soft_violations: response.validation.soft_violations.len(),
        generation_time_ms: response.statistics.generation_time_ms,
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}
