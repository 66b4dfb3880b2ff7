use super::{BatchLabel, FacultyId, RoomNumber, SectionLabel, SlotKey, SubjectCode};
use serde::{Deserialize, Serialize};

/// One occupied grid cell: a subject taught to a section (or one of its
/// batches) by a faculty member, in a room, at a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub section: SectionLabel,
    pub slot: SlotKey,
    pub subject_code: SubjectCode,
    pub faculty_id: FacultyId,
    pub room_number: RoomNumber,
    /// `None` for whole-section sessions; `Some(batch)` when this placement
    /// is one parallel lab stream among several occupying the same slot.
    pub batch: Option<BatchLabel>,
    /// True for the second period of a 2-period lab block. The oracle and
    /// validator use this to avoid double-counting a block as two hours of
    /// credit towards a different subject's same-day-once rule.
    pub is_lab_continuation: bool,
}

impl Placement {
    /// The (section, subject) pair this placement counts credit hours
    /// towards. Parallel batches of the same lab at the same slot share one
    /// logical hour — the grid's hour counter is keyed on this, not on the
    /// individual placement, so splitting a lab into batches never inflates
    /// `hours_per_week` accounting.
    pub fn credit_key(&self) -> (SectionLabel, SubjectCode) {
        (self.section.clone(), self.subject_code.clone())
    }
}
