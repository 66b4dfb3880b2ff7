use super::{FacultyId, SlotKey, SubjectCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A faculty member: their subject qualifications and unavailability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    /// Subject codes this faculty member is qualified to teach.
    pub subjects: Vec<SubjectCode>,
    /// Slots when this faculty member cannot be scheduled.
    #[serde(default)]
    pub unavailable_slots: HashSet<SlotKey>,
    /// Advisory caps, checked only by the validator (soft constraint), never
    /// enforced as a hard feasibility rule by the placer.
    #[serde(default)]
    pub max_hours_per_day: Option<u32>,
    #[serde(default)]
    pub max_hours_per_week: Option<u32>,
}

impl Faculty {
    pub fn can_teach(&self, code: &SubjectCode) -> bool {
        self.subjects.contains(code)
    }

    pub fn is_available(&self, slot: &SlotKey) -> bool {
        !self.unavailable_slots.contains(slot)
    }
}
