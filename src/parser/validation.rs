//! Pre-flight checks over a raw catalog, run before any placement search
//! starts (spec §7 InputError: surfaced immediately, no partial Grid).

use crate::error::EngineError;
use crate::types::{Config, Faculty, Room, RoomType, Section};
use crate::types::Subject;
use std::collections::HashSet;

pub fn validate_catalog(subjects: &[Subject], faculty: &[Faculty], rooms: &[Room], sections: &[Section]) -> Result<(), EngineError> {
    let mut codes = HashSet::new();
    for s in subjects {
        if !codes.insert(&s.code) {
            return Err(EngineError::DuplicateId {
                id_type: "subject".to_string(),
                id: s.code.0.clone(),
            });
        }
    }

    let mut faculty_ids = HashSet::new();
    for f in faculty {
        if !faculty_ids.insert(&f.id) {
            return Err(EngineError::DuplicateId {
                id_type: "faculty".to_string(),
                id: f.id.0.clone(),
            });
        }
    }

    let mut room_numbers = HashSet::new();
    for r in rooms {
        if !room_numbers.insert(&r.number) {
            return Err(EngineError::DuplicateId {
                id_type: "room".to_string(),
                id: r.number.0.clone(),
            });
        }
    }

    let mut section_labels = HashSet::new();
    for sec in sections {
        if !section_labels.insert(&sec.label) {
            return Err(EngineError::DuplicateId {
                id_type: "section".to_string(),
                id: sec.label.0.clone(),
            });
        }
    }

    for subject in subjects {
        if !faculty.iter().any(|f| f.can_teach(&subject.code)) {
            return Err(EngineError::NoQualifiedFaculty { code: subject.code.0.clone() });
        }
    }

    let classroom_count = rooms.iter().filter(|r| r.room_type == RoomType::Classroom).count();
    if classroom_count < sections.len() {
        return Err(EngineError::InsufficientClassrooms {
            needed: sections.len(),
            available: classroom_count,
        });
    }

    Ok(())
}

/// `config.fixed_slots` keys a mandated slot list by subject short name;
/// `place_fixed_activities` silently skips a key with no matching subject,
/// which would otherwise let a typo'd fixed-activity entry vanish without a
/// trace. Caught here, before any placement search starts.
pub fn validate_fixed_slot_references(subjects: &[Subject], config: &Config) -> Result<(), EngineError> {
    for short_name in config.fixed_slots.keys() {
        if !subjects.iter().any(|s| &s.short_name == short_name) {
            return Err(EngineError::UnknownSubject {
                section: "<all sections>".to_string(),
                code: short_name.clone(),
            });
        }
    }
    Ok(())
}
