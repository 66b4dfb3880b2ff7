use super::{HardViolation, HardViolationKind};
use crate::grid::Grid;
use crate::types::{Subject, SubjectCode, VALID_LAB_STARTS};

fn subject_by_code<'a>(subjects: &'a [Subject], code: &SubjectCode) -> Option<&'a Subject> {
    subjects.iter().find(|s| &s.code == code)
}

/// §3.1: every (section, slot) must be a singleton non-batch placement, or a
/// set of distinct-batch placements sharing one subject code.
pub fn check_section_conflicts(grid: &Grid) -> Vec<HardViolation> {
    let mut out = Vec::new();
    for (section, slot) in grid.all_section_slots() {
        let placements = grid.occupied(&section, slot);
        if placements.len() <= 1 {
            continue;
        }
        let ok = placements.iter().all(|p| p.batch.is_some() && p.subject_code == placements[0].subject_code);
        let distinct_batches = {
            let mut batches: Vec<_> = placements.iter().filter_map(|p| p.batch.clone()).collect();
            batches.sort();
            batches.dedup();
            batches.len() == placements.len()
        };
        if !ok || !distinct_batches {
            out.push(HardViolation {
                kind: HardViolationKind::SectionConflict,
                message: format!("section {} has conflicting placements at {}", section, slot),
            });
        }
    }
    out
}

/// §3.2: a teacher may appear twice at the same slot only when every
/// placement there belongs to the same (section, subject) as distinct
/// batches.
pub fn check_teacher_conflicts(grid: &Grid) -> Vec<HardViolation> {
    let mut out = Vec::new();
    for (faculty, slot) in grid.all_faculty_slots() {
        let placements = grid.faculty_occupants(&faculty, slot);
        if placements.len() <= 1 {
            continue;
        }
        let first = placements[0];
        let ok = placements
            .iter()
            .all(|p| p.section == first.section && p.subject_code == first.subject_code && p.batch.is_some());
        if !ok {
            out.push(HardViolation {
                kind: HardViolationKind::TeacherConflict,
                message: format!("faculty {} double-booked at {}", faculty, slot),
            });
        }
    }
    out
}

/// §3.3: at most one placement per (room, slot).
pub fn check_room_conflicts(grid: &Grid) -> Vec<HardViolation> {
    let mut out = Vec::new();
    for (room, slot) in grid.all_room_slots() {
        if grid.room_occupants(&room, slot).len() > 1 {
            out.push(HardViolation {
                kind: HardViolationKind::RoomConflict,
                message: format!("room {} double-booked at {}", room, slot),
            });
        }
    }
    out
}

/// §3.4: no theory subject may appear twice in a day for the same section.
pub fn check_theory_once_per_day(grid: &Grid, subjects: &[Subject]) -> Vec<HardViolation> {
    let mut out = Vec::new();
    for section in grid.sections_occupied() {
        for day in 0..grid.num_days() {
            let mut seen: std::collections::HashMap<SubjectCode, u32> = std::collections::HashMap::new();
            for period in grid.occupied_periods_for_day(&section, day) {
                for p in grid.occupied(&section, crate::types::SlotKey::new(day, period)) {
                    if p.is_lab_continuation {
                        continue;
                    }
                    if subject_by_code(subjects, &p.subject_code).map(|s| s.subject_type.is_theory_like()).unwrap_or(false) {
                        *seen.entry(p.subject_code.clone()).or_insert(0) += 1;
                    }
                }
            }
            for (code, count) in seen {
                if count > 1 {
                    out.push(HardViolation {
                        kind: HardViolationKind::SameTheoryTwiceInDay,
                        message: format!("section {} has {} twice on day {}", section, code, day + 1),
                    });
                }
            }
        }
    }
    out
}

/// §3.5/§3.6: every lab placement pairs with exactly one consecutive
/// continuation on the same day, the pair starts at a valid period, and the
/// batch set matches across both periods.
pub fn check_lab_blocks(grid: &Grid) -> Vec<HardViolation> {
    let mut out = Vec::new();
    for p in grid.all_placements() {
        if p.is_lab_continuation {
            continue;
        }
        let is_lab_opener = grid
            .occupied(&p.section, crate::types::SlotKey::new(p.slot.day, p.slot.period + 1))
            .iter()
            .any(|q| q.subject_code == p.subject_code && q.is_lab_continuation);
        if !is_lab_opener {
            // Not a lab session at all (no continuation exists); nothing to check.
            continue;
        }
        if !VALID_LAB_STARTS.contains(&p.slot.period) {
            out.push(HardViolation {
                kind: HardViolationKind::LabBadStart,
                message: format!("section {} lab at {} starts at an invalid period", p.section, p.slot),
            });
        }
        let opening_batches = grid.batches_at(&p.section, p.slot);
        let continuation_batches = grid.batches_at(&p.section, crate::types::SlotKey::new(p.slot.day, p.slot.period + 1));
        if opening_batches != continuation_batches {
            out.push(HardViolation {
                kind: HardViolationKind::LabBatchMismatch,
                message: format!("section {} lab at {} has mismatched batches across its two periods", p.section, p.slot),
            });
        }
    }
    out
}

/// §3.7: a section's occupied periods on any day must form one contiguous
/// range with no internal gaps.
pub fn check_contiguity(grid: &Grid) -> Vec<HardViolation> {
    let mut out = Vec::new();
    for section in grid.sections_occupied() {
        for day in 0..grid.num_days() {
            let periods = grid.occupied_periods_for_day(&section, day);
            if periods.len() < 2 {
                continue;
            }
            let min = periods[0];
            let max = *periods.last().unwrap();
            if (max - min + 1) as usize != periods.len() {
                out.push(HardViolation {
                    kind: HardViolationKind::Gap,
                    message: format!("section {} has a gap on day {} between periods {} and {}", section, day + 1, min, max),
                });
            }
        }
    }
    out
}

/// §3.8: every (section, subject) must accumulate exactly `hours_per_week`
/// distinct occupied slots.
pub fn check_credit_hours(grid: &Grid, subjects: &[Subject]) -> Vec<HardViolation> {
    let mut out = Vec::new();
    for section in grid.sections_occupied() {
        for subject in subjects {
            let hours = grid.hours(&section, &subject.code);
            if hours != subject.hours_per_week as usize {
                out.push(HardViolation {
                    kind: HardViolationKind::CreditMismatch,
                    message: format!(
                        "section {} has {} hours of {} but requires {}",
                        section, hours, subject.code, subject.hours_per_week
                    ),
                });
            }
        }
    }
    out
}
