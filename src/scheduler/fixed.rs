//! Phase A of the placer: mandatory fixed-slot activities and the
//! home-classroom assignment they and every theory-like session rely on
//! (spec §4.4).

use crate::error::EngineError;
use crate::grid::Grid;
use crate::oracle::Oracle;
use crate::types::{Placement, Room, RoomNumber, SectionLabel, Subject};
use std::collections::HashMap;

/// Sections paired with classrooms by lexical rank: the i-th section (by
/// label) gets the i-th classroom (by number).
pub fn assign_home_classrooms(
    sections: &[SectionLabel],
    rooms: &[Room],
) -> Result<HashMap<SectionLabel, RoomNumber>, EngineError> {
    let mut sorted_sections = sections.to_vec();
    sorted_sections.sort();

    let mut classrooms: Vec<&Room> = rooms
        .iter()
        .filter(|r| r.room_type == crate::types::RoomType::Classroom)
        .collect();
    classrooms.sort_by(|a, b| a.number.cmp(&b.number));

    if classrooms.len() < sorted_sections.len() {
        return Err(EngineError::InsufficientClassrooms {
            needed: sorted_sections.len(),
            available: classrooms.len(),
        });
    }

    Ok(sorted_sections
        .into_iter()
        .zip(classrooms.into_iter())
        .map(|(sec, room)| (sec, room.number.clone()))
        .collect())
}

/// Places every subject whose short name appears in `config.fixed_slots` at
/// its mandated slots, for every section. A fixed entry that cannot be
/// placed is terminal for the whole run.
pub fn place_fixed_activities(
    grid: &mut Grid,
    oracle: &Oracle,
    sections: &[SectionLabel],
    subjects: &[Subject],
    home_rooms: &HashMap<SectionLabel, RoomNumber>,
    fixed_slots: &HashMap<String, Vec<crate::types::SlotKey>>,
) -> Result<(), EngineError> {
    for section in sections {
        for subject in subjects {
            let Some(slots) = fixed_slots.get(&subject.short_name) else {
                continue;
            };
            for &slot in slots {
                let faculty = oracle
                    .qualified_faculty(grid, &subject.code, slot, false, Some(section))
                    .into_iter()
                    .next()
                    .ok_or_else(|| EngineError::FixedSlotInfeasible {
                        subject: subject.short_name.clone(),
                        slot,
                    })?;

                let room_number = home_rooms
                    .get(section)
                    .cloned()
                    .ok_or_else(|| EngineError::FixedSlotInfeasible {
                        subject: subject.short_name.clone(),
                        slot,
                    })?;

                let placement = Placement {
                    section: section.clone(),
                    slot,
                    subject_code: subject.code.clone(),
                    faculty_id: faculty.id.clone(),
                    room_number,
                    batch: None,
                    is_lab_continuation: false,
                };

                grid.add(placement, subject.subject_type.is_theory_like(), subject.subject_type.is_lab())
                    .map_err(|_| EngineError::FixedSlotInfeasible {
                        subject: subject.short_name.clone(),
                        slot,
                    })?;
            }
        }
    }
    Ok(())
}
