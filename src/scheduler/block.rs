//! Block placement primitives: atomically place a single-period session or
//! a 2-period lab (optionally split into parallel batches), rolling back
//! every already-added Placement of the block on any failure (spec §4.5).

use crate::grid::Grid;
use crate::oracle::{FailureReason, Oracle};
use crate::types::{BatchLabel, Placement, RoomType, SectionLabel, SlotKey, Subject};

/// Places `duration` consecutive periods starting at `start` for a
/// whole-section (non-batch) session.
pub fn place_single_block(
    grid: &mut Grid,
    oracle: &Oracle,
    section: &SectionLabel,
    subject: &Subject,
    start: SlotKey,
    duration: u8,
    room_type: RoomType,
    home_room: Option<&crate::types::RoomNumber>,
) -> Result<Vec<Placement>, FailureReason> {
    let mut placed = Vec::new();

    for offset in 0..duration {
        let slot = SlotKey::new(start.day, start.period + offset);

        let faculty = oracle
            .qualified_faculty(grid, &subject.code, slot, false, Some(section))
            .into_iter()
            .next();
        let Some(faculty) = faculty else {
            rollback(grid, &placed);
            return Err(FailureReason::FacultyNotQualified);
        };

        let room_number = pick_room(grid, oracle, room_type, slot, home_room, subject);
        let Some(room_number) = room_number else {
            rollback(grid, &placed);
            return Err(FailureReason::RoomConflict);
        };

        let placement = Placement {
            section: section.clone(),
            slot,
            subject_code: subject.code.clone(),
            faculty_id: faculty.id.clone(),
            room_number,
            batch: None,
            is_lab_continuation: offset > 0,
        };

        match grid.add(placement.clone(), subject.subject_type.is_theory_like(), subject.subject_type.is_lab()) {
            Ok(_) => placed.push(placement),
            Err(reason) => {
                rollback(grid, &placed);
                return Err(reason);
            }
        }
    }

    Ok(placed)
}

/// Places a 2-period lab block split across parallel batches: batch `i`
/// takes `rooms[i]` and `faculty[i % faculty.len()]` in both periods.
pub fn place_parallel_batch_block(
    grid: &mut Grid,
    oracle: &Oracle,
    section: &SectionLabel,
    subject: &Subject,
    start: SlotKey,
    batches: &[BatchLabel],
    room_type: RoomType,
) -> Result<Vec<Placement>, FailureReason> {
    let mut placed = Vec::new();

    for offset in 0..subject.lab_duration {
        let slot = SlotKey::new(start.day, start.period + offset);

        let faculty = oracle.qualified_faculty(grid, &subject.code, slot, true, Some(section));
        if faculty.is_empty() {
            rollback(grid, &placed);
            return Err(FailureReason::FacultyNotQualified);
        }

        let rooms = oracle.available_rooms(grid, room_type, slot, false);
        if rooms.len() < batches.len() {
            rollback(grid, &placed);
            return Err(FailureReason::RoomConflict);
        }

        for (i, batch) in batches.iter().enumerate() {
            let placement = Placement {
                section: section.clone(),
                slot,
                subject_code: subject.code.clone(),
                faculty_id: faculty[i % faculty.len()].id.clone(),
                room_number: rooms[i].number.clone(),
                batch: Some(batch.clone()),
                is_lab_continuation: offset > 0,
            };

            match grid.add(placement.clone(), false, true) {
                Ok(_) => placed.push(placement),
                Err(reason) => {
                    rollback(grid, &placed);
                    return Err(reason);
                }
            }
        }
    }

    Ok(placed)
}

fn pick_room(
    grid: &Grid,
    oracle: &Oracle,
    room_type: RoomType,
    slot: SlotKey,
    home_room: Option<&crate::types::RoomNumber>,
    subject: &Subject,
) -> Option<crate::types::RoomNumber> {
    if room_type == RoomType::Classroom {
        if let Some(home) = home_room {
            if !grid.room_busy(home, slot) {
                return Some(home.clone());
            }
        }
    }
    let fallback = subject.subject_type.is_activity_like();
    oracle
        .available_rooms(grid, room_type, slot, fallback)
        .into_iter()
        .next()
        .map(|r| r.number.clone())
}

fn rollback(grid: &mut Grid, placed: &[Placement]) {
    for p in placed.iter().rev() {
        grid.remove(p);
    }
}
