//! Feasibility checks and deterministic candidate enumeration (spec §4.2).

use crate::grid::Grid;
use crate::types::{Faculty, FacultyId, Room, RoomNumber, RoomType, SectionLabel, SlotKey, SubjectCode};

/// The closed set of reasons a tentative Placement can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    SectionConflict,
    TeacherConflict,
    RoomConflict,
    SameTheoryTwiceInDay,
    LabBreakCross,
    LabBadStart,
    BatchMismatch,
    FacultyNotQualified,
    FacultyUnavailable,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureReason::SectionConflict => "section_conflict",
            FailureReason::TeacherConflict => "teacher_conflict",
            FailureReason::RoomConflict => "room_conflict",
            FailureReason::SameTheoryTwiceInDay => "same_theory_twice_in_day",
            FailureReason::LabBreakCross => "lab_break_cross",
            FailureReason::LabBadStart => "lab_bad_start",
            FailureReason::BatchMismatch => "batch_mismatch",
            FailureReason::FacultyNotQualified => "faculty_not_qualified",
            FailureReason::FacultyUnavailable => "faculty_unavailable",
        };
        write!(f, "{}", s)
    }
}

/// Read-only view over the catalog used to answer feasibility questions
/// about a Grid. Holds no mutable state of its own — every query is a pure
/// function of the Grid it is given plus the catalog slices it was built
/// from.
pub struct Oracle<'a> {
    pub faculty: &'a [Faculty],
    pub rooms: &'a [Room],
}

impl<'a> Oracle<'a> {
    pub fn new(faculty: &'a [Faculty], rooms: &'a [Room]) -> Self {
        Self { faculty, rooms }
    }

    /// Faculty qualified to teach `code` at `slot`, stable-sorted by id.
    ///
    /// When `for_batch_lab` is true, a faculty member already occupied at
    /// `slot` still qualifies provided every one of their current
    /// placements there belongs to the same (section, subject) as distinct
    /// batches — this is the one exception to exclusive teacher occupancy.
    pub fn qualified_faculty(
        &self,
        grid: &Grid,
        code: &SubjectCode,
        slot: SlotKey,
        for_batch_lab: bool,
        section: Option<&SectionLabel>,
    ) -> Vec<&'a Faculty> {
        let mut out: Vec<&Faculty> = self
            .faculty
            .iter()
            .filter(|f| f.can_teach(code))
            .filter(|f| f.is_available(&slot))
            .filter(|f| {
                let occupied = grid.faculty_occupants(&f.id, slot);
                if occupied.is_empty() {
                    return true;
                }
                if !for_batch_lab {
                    return false;
                }
                match section {
                    Some(sec) => occupied
                        .iter()
                        .all(|p| &p.section == sec && &p.subject_code == code && p.batch.is_some()),
                    None => false,
                }
            })
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Free rooms of `room_type` at `slot`, stable-sorted by number. When
    /// `fallback` is set and the room type has no free instance, activity-like
    /// subjects may use any free classroom instead.
    pub fn available_rooms(
        &self,
        grid: &Grid,
        room_type: RoomType,
        slot: SlotKey,
        fallback: bool,
    ) -> Vec<&'a Room> {
        let mut rooms: Vec<&Room> = self
            .rooms
            .iter()
            .filter(|r| r.room_type == room_type)
            .filter(|r| !grid.room_busy(&r.number, slot))
            .collect();

        if rooms.is_empty() && fallback && room_type != RoomType::Classroom {
            rooms = self
                .rooms
                .iter()
                .filter(|r| r.room_type == RoomType::Classroom)
                .filter(|r| !grid.room_busy(&r.number, slot))
                .collect();
        }

        rooms.sort_by(|a, b| a.number.cmp(&b.number));
        rooms
    }

    pub fn room_by_number(&self, number: &RoomNumber) -> Option<&'a Room> {
        self.rooms.iter().find(|r| &r.number == number)
    }

    pub fn faculty_by_id(&self, id: &FacultyId) -> Option<&'a Faculty> {
        self.faculty.iter().find(|f| &f.id == id)
    }
}
