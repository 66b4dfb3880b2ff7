//! CSV export: one row per Placement, plus a blank row for every empty slot
//! (spec §6 CSV export).

use crate::error::Result;
use crate::types::{day_name, period_time, ScheduleRequest, ScheduleResponse, SectionLabel, SlotKey};

pub fn generate_csv_report(request: &ScheduleRequest, response: &ScheduleResponse) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(["Section", "Day", "Period", "Time", "Subject", "Faculty", "Room", "Batch", "Type"])?;

    for section_name in &request.sections {
        let section = SectionLabel(section_name.clone());
        for day in 0..request.config.num_days() {
            for period in 1..=request.config.periods_per_day {
                let slot = SlotKey::new(day, period);
                let placements = response.grid.occupied(&section, slot);
                let day_label = day_name(&request.config.days, day);
                let time = period_time(period);

                if placements.is_empty() {
                    writer.write_record([section_name.as_str(), &day_label, &period.to_string(), time, "", "", "", "", ""])?;
                    continue;
                }

                for p in placements {
                    let subject = request.subjects.iter().find(|s| s.code == p.subject_code);
                    writer.write_record([
                        section_name.as_str(),
                        &day_label,
                        &period.to_string(),
                        time,
                        subject.map(|s| s.short_name.as_str()).unwrap_or(""),
                        p.faculty_id.0.as_str(),
                        p.room_number.0.as_str(),
                        p.batch.as_ref().map(|b| b.0.as_str()).unwrap_or(""),
                        if p.is_lab_continuation { "lab_continuation" } else { "class" },
                    ])?;
                }
            }
        }
    }

    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("csv flush failed: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}
