//! Maps a subject to the room type its sessions prefer, grounded in the
//! heuristic the source scheduler used to pick computer vs. electronics labs
//! by subject name.

use crate::types::{RoomType, Subject, SubjectType};

pub fn room_type_for_subject(subject: &Subject) -> RoomType {
    match subject.subject_type {
        SubjectType::Lab => {
            let name = subject.name.to_lowercase();
            if name.contains("electronic") || name.contains("circuit") || name.contains("digital") {
                RoomType::ElectronicsLab
            } else {
                RoomType::ComputerLab
            }
        }
        SubjectType::Yoga => RoomType::ActivityRoom,
        SubjectType::Tyl | SubjectType::NineLpa => RoomType::SeminarHall,
        SubjectType::Theory | SubjectType::Audit | SubjectType::MiniProject | SubjectType::Club => {
            RoomType::Classroom
        }
    }
}
