//! Plain-text report: a box-drawing summary with a colorized PASSED/FAILED
//! banner, for terminal and log-file consumption.

use crate::types::{ScheduleRequest, ScheduleResponse};
use colored::Colorize;

pub fn generate_text_report(request: &ScheduleRequest, response: &ScheduleResponse) -> String {
    let banner = if response.validation.is_valid {
        "PASSED".green().bold()
    } else {
        "FAILED".red().bold()
    };

    let mut lines = vec![
        "+----------------------------------------------+".to_string(),
        format!("| Timetable — Semester {} {}", request.semester, request.branch),
        format!("| Status: {}", banner),
        format!("| Score: {}", response.validation.score),
        format!("| Algorithm: {:?}", request.config.algorithm),
        format!("| Sections: {}", request.sections.len()),
        format!("| Generation time: {} ms", response.statistics.generation_time_ms),
        "+----------------------------------------------+".to_string(),
    ];

    if !response.validation.hard_violations.is_empty() {
        lines.push(format!("Hard violations ({}):", response.validation.hard_violations.len()));
        for v in &response.validation.hard_violations {
            lines.push(format!("  - [{}] {}", v.kind, v.message));
        }
    }

    if !response.validation.soft_violations.is_empty() {
        lines.push(format!("Soft violations ({}):", response.validation.soft_violations.len()));
        for v in &response.validation.soft_violations {
            lines.push(format!("  - [{}] -{}: {}", v.kind, v.penalty, v.message));
        }
    }

    lines.join("\n")
}
