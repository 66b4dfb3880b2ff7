//! HTML export: a 6-row × 9-column table per section, with break columns at
//! positions 3 and 6 (1-indexed) and colspan-2 lab cells (spec §6 HTML export).

use crate::types::{day_name, period_time, ScheduleRequest, ScheduleResponse, SectionLabel, SlotKey};

/// The period sequence in column order, matching the VTU timing table:
/// a short break after period 2, lunch after period 4.
const COLUMN_PERIODS: [Option<u8>; 9] = [Some(1), Some(2), None, Some(3), Some(4), None, Some(5), Some(6), Some(7)];

pub fn generate_html_report(request: &ScheduleRequest, response: &ScheduleResponse) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Timetable</title>\n");
    out.push_str("<style>table{border-collapse:collapse;margin-bottom:2em;}td,th{border:1px solid #999;padding:4px 8px;text-align:center;}th.break{background:#eee;}td.break{background:#f5f5f5;}</style>\n");
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>Semester {} &mdash; {}</h1>\n", request.semester, request.branch));

    for section_name in &request.sections {
        let section = SectionLabel(section_name.clone());
        out.push_str(&format!("<h2>Section {}</h2>\n<table>\n<tr><th>Day</th>", section_name));
        for col in COLUMN_PERIODS {
            match col {
                Some(p) => out.push_str(&format!("<th>P{} ({})</th>", p, period_time(p))),
                None => out.push_str("<th class=\"break\">Break</th>"),
            }
        }
        out.push_str("</tr>\n");

        for day in 0..request.config.num_days() {
            out.push_str(&format!("<tr><th>{}</th>", day_name(&request.config.days, day)));
            let mut skip_next = false;
            for col in COLUMN_PERIODS {
                let period = match col {
                    None => {
                        out.push_str("<td class=\"break\"></td>");
                        continue;
                    }
                    Some(p) => p,
                };
                if skip_next {
                    skip_next = false;
                    continue;
                }
                let slot = SlotKey::new(day, period);
                let placements = response.grid.occupied(&section, slot);
                if placements.is_empty() {
                    out.push_str("<td></td>");
                    continue;
                }

                let next_slot = SlotKey::new(day, period + 1);
                let next_placements = response.grid.occupied(&section, next_slot);
                let spans_lab = !next_placements.is_empty()
                    && next_placements.iter().all(|q| q.is_lab_continuation)
                    && next_placements.len() == placements.len()
                    && placements.iter().all(|p| next_placements.iter().any(|q| q.subject_code == p.subject_code && q.batch == p.batch));

                let colspan = if spans_lab { " colspan=\"2\"" } else { "" };
                out.push_str(&format!("<td{}>{}</td>", colspan, cell_text(request, &placements)));
                if spans_lab {
                    skip_next = true;
                }
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</table>\n");
    }

    out.push_str("</body></html>\n");
    out
}

fn cell_text(request: &ScheduleRequest, placements: &[&crate::types::Placement]) -> String {
    placements
        .iter()
        .map(|p| {
            let short = request
                .subjects
                .iter()
                .find(|s| s.code == p.subject_code)
                .map(|s| s.short_name.as_str())
                .unwrap_or(p.subject_code.0.as_str());
            match &p.batch {
                Some(b) => format!("{} ({})<br>{}/{}", short, b, p.faculty_id, p.room_number),
                None => format!("{}<br>{}/{}", short, p.faculty_id, p.room_number),
            }
        })
        .collect::<Vec<_>>()
        .join("<hr>")
}
