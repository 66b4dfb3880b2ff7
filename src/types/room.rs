use super::RoomNumber;
use serde::{Deserialize, Serialize};

/// The closed set of room capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Classroom,
    ComputerLab,
    ElectronicsLab,
    SeminarHall,
    ActivityRoom,
}

/// A physical room, typed by capability rather than by feature list — the
/// catalog is small and closed enough that a tagged enum reads cleaner than
/// the teacher's free-form `features: Vec<String>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub number: RoomNumber,
    pub name: String,
    pub room_type: RoomType,
}
