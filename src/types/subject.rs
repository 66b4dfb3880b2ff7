use super::SubjectCode;
use serde::{Deserialize, Serialize};

/// The closed set of subject classifications the engine understands. Every
/// conditional in the planner, placer and oracle branches on this tag rather
/// than comparing subject labels as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    Theory,
    Lab,
    Audit,
    MiniProject,
    Tyl,
    #[serde(rename = "9lpa")]
    NineLpa,
    Yoga,
    Club,
}

impl SubjectType {
    /// "Activity-like" subjects fall back to a plain classroom when their
    /// preferred room type is unavailable (see `RoomType::activity_fallback`).
    pub fn is_activity_like(&self) -> bool {
        matches!(
            self,
            SubjectType::Yoga | SubjectType::Tyl | SubjectType::NineLpa | SubjectType::Audit | SubjectType::Club
        )
    }

    pub fn is_lab(&self) -> bool {
        matches!(self, SubjectType::Lab)
    }

    /// Theory-like sessions (spec.md §4.4 home-classroom policy): theory,
    /// audit, tyl, 9lpa all prefer the section's home classroom.
    pub fn is_theory_like(&self) -> bool {
        matches!(
            self,
            SubjectType::Theory | SubjectType::Audit | SubjectType::Tyl | SubjectType::NineLpa
        )
    }
}

/// One subject offered in a semester's curriculum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub code: SubjectCode,
    pub name: String,
    pub short_name: String,
    pub subject_type: SubjectType,
    /// Total periods this subject must occupy per week, per section.
    pub hours_per_week: u32,
    /// Only meaningful when `subject_type == Lab`; fixed at 2 in this
    /// deployment but kept explicit rather than hardcoded so the planner and
    /// block placement primitives stay general.
    #[serde(default = "default_lab_duration")]
    pub lab_duration: u8,
    /// Lab only: whether this subject splits into parallel batch sessions.
    #[serde(default)]
    pub batches_required: bool,
    #[serde(default)]
    pub is_elective: bool,
    /// Lower priority value is scheduled first by the backtracking solver.
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_lab_duration() -> u8 {
    2
}

fn default_priority() -> u32 {
    1
}

impl Subject {
    pub fn duration(&self) -> u8 {
        if self.subject_type.is_lab() {
            self.lab_duration
        } else {
            1
        }
    }
}
