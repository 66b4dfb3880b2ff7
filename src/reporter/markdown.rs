//! Markdown report: summary stats, validation status, per-section breakdown.

use crate::types::{day_name, ScheduleRequest, ScheduleResponse, SectionLabel, SlotKey};

pub fn generate_markdown_report(request: &ScheduleRequest, response: &ScheduleResponse) -> String {
    let mut lines = vec![
        format!("# Timetable — Semester {} {}", request.semester, request.branch),
        String::new(),
        "## Summary".to_string(),
        String::new(),
        format!("- Algorithm: `{:?}`", request.config.algorithm),
        format!("- Status: **{}**", if response.validation.is_valid { "PASSED" } else { "FAILED" }),
        format!("- Score: {}", response.validation.score),
        format!("- Generation time: {} ms", response.statistics.generation_time_ms),
        format!("- Backtracks: {}", response.statistics.backtrack_count),
        String::new(),
    ];

    if !response.validation.hard_violations.is_empty() {
        lines.push("## Hard Violations".to_string());
        lines.push(String::new());
        for v in &response.validation.hard_violations {
            lines.push(format!("- **{}**: {}", v.kind, v.message));
        }
        lines.push(String::new());
    }

    if !response.validation.soft_violations.is_empty() {
        lines.push("## Soft Violations".to_string());
        lines.push(String::new());
        for v in &response.validation.soft_violations {
            lines.push(format!("- {} (-{}): {}", v.kind, v.penalty, v.message));
        }
        lines.push(String::new());
    }

    for section_name in &request.sections {
        let section = SectionLabel(section_name.clone());
        lines.push(format!("## Section {}", section_name));
        lines.push(String::new());
        lines.push(format!(
            "| Day | {} |",
            (1..=request.config.periods_per_day).map(|p| format!("P{}", p)).collect::<Vec<_>>().join(" | ")
        ));
        lines.push(format!("|---|{}", "---|".repeat(request.config.periods_per_day as usize)));

        for day in 0..request.config.num_days() {
            let mut row = vec![day_name(&request.config.days, day)];
            for period in 1..=request.config.periods_per_day {
                let placements = response.grid.occupied(&section, SlotKey::new(day, period));
                let cell = placements
                    .iter()
                    .map(|p| {
                        let short = request
                            .subjects
                            .iter()
                            .find(|s| s.code == p.subject_code)
                            .map(|s| s.short_name.as_str())
                            .unwrap_or(p.subject_code.0.as_str());
                        match &p.batch {
                            Some(b) => format!("{}({})", short, b),
                            None => short.to_string(),
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("/");
                row.push(if cell.is_empty() { "-".to_string() } else { cell });
            }
            lines.push(format!("| {} |", row.join(" | ")));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
