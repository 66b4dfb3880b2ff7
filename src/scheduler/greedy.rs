//! Greedy placer: the primary scheduling algorithm (spec §4.4).

use super::block::{place_parallel_batch_block, place_single_block};
use super::planner::{base_window, distribute_targets, enlarge_for_fixed, Window};
use super::rooms::room_type_for_subject;
use super::selector::Selector;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::oracle::Oracle;
use crate::types::{BatchLabel, Config, RoomNumber, SectionLabel, SlotKey, Subject, SubjectCode, VALID_LAB_STARTS};

/// Fills every period in every section's day windows, using the SWRR
/// selector to decide which subject occupies each free period.
pub fn fill_section(
    grid: &mut Grid,
    oracle: &Oracle,
    config: &Config,
    section: &SectionLabel,
    subjects: &[Subject],
    batches: &[BatchLabel],
    home_room: &RoomNumber,
) -> Result<(), EngineError> {
    let total: u32 = subjects.iter().map(|s| s.hours_per_week).sum();
    let targets = distribute_targets(total, grid.num_days());
    let mut selector = Selector::new(subjects);
    for subject in subjects {
        let already_placed = grid.hours(section, &subject.code) as u32;
        if already_placed > 0 {
            selector.consume(&subject.code, already_placed);
        }
    }

    for day in 0..grid.num_days() {
        let mut consecutive_theory: u32 = 0;
        let fixed_periods = grid.occupied_periods_for_day(section, day);
        let window = enlarge_for_fixed(
            base_window(targets[day as usize], grid.periods_per_day()),
            &fixed_periods,
            grid.periods_per_day(),
        );

        let mut period = window.start;
        while period <= window.end {
            let slot = SlotKey::new(day, period);

            if !grid.occupied(section, slot).is_empty() {
                let is_theory = grid
                    .occupied(section, slot)
                    .iter()
                    .any(|p| subjects_theory_like(subjects, &p.subject_code));
                consecutive_theory = if is_theory { consecutive_theory + 1 } else { 0 };
                period += 1;
                continue;
            }

            let active = selector.active_codes(subjects);
            let feasible: Vec<SubjectCode> = active
                .iter()
                .filter(|c| {
                    structurally_feasible(
                        grid, oracle, section, subjects, c, slot, window, batches,
                    )
                })
                .cloned()
                .collect();

            let preferred: Vec<SubjectCode> = feasible
                .iter()
                .filter(|c| !would_exceed_cap(subjects, c, consecutive_theory, config.max_consecutive_theory))
                .cloned()
                .collect();

            let candidates = if preferred.is_empty() { &feasible } else { &preferred };

            match selector.pick(candidates).cloned() {
                None => {
                    consecutive_theory = 0;
                    period += 1;
                }
                Some(code) => {
                    let subject = subjects.iter().find(|s| s.code == code).expect("active subject must exist in catalog");
                    let duration = subject.duration();
                    let room_type = room_type_for_subject(subject);

                    let result = if subject.batches_required && !batches.is_empty() {
                        place_parallel_batch_block(grid, oracle, section, subject, slot, batches, room_type)
                    } else {
                        place_single_block(grid, oracle, section, subject, slot, duration, room_type, Some(home_room))
                    };

                    match result {
                        Ok(_) => {
                            selector.tick(&active, &code);
                            selector.consume(&code, duration as u32);
                            consecutive_theory = if subject.subject_type.is_theory_like() {
                                consecutive_theory + duration as u32
                            } else {
                                0
                            };
                            period += duration;
                        }
                        Err(_) => {
                            consecutive_theory = 0;
                            period += 1;
                        }
                    }
                }
            }
        }
    }

    let unmet: Vec<String> = subjects
        .iter()
        .filter(|s| grid.hours(section, &s.code) < s.hours_per_week as usize)
        .map(|s| s.code.0.clone())
        .collect();

    if !unmet.is_empty() {
        return Err(EngineError::HoursUnmet {
            section: section.0.clone(),
            codes: unmet,
        });
    }

    Ok(())
}

fn subjects_theory_like(subjects: &[Subject], code: &SubjectCode) -> bool {
    subjects
        .iter()
        .find(|s| &s.code == code)
        .map(|s| s.subject_type.is_theory_like())
        .unwrap_or(false)
}

fn would_exceed_cap(subjects: &[Subject], code: &SubjectCode, consecutive_theory: u32, cap: u32) -> bool {
    let subject = match subjects.iter().find(|s| &s.code == code) {
        Some(s) => s,
        None => return false,
    };
    subject.subject_type.is_theory_like() && consecutive_theory + subject.duration() as u32 > cap
}

/// Step 2 of the selector (spec §4.4): structural feasibility at
/// `(day, period, window)`, independent of the soft consecutive-theory
/// preference applied afterward.
fn structurally_feasible(
    grid: &Grid,
    oracle: &Oracle,
    section: &SectionLabel,
    subjects: &[Subject],
    code: &SubjectCode,
    slot: SlotKey,
    window: Window,
    batches: &[BatchLabel],
) -> bool {
    let subject = match subjects.iter().find(|s| &s.code == code) {
        Some(s) => s,
        None => return false,
    };

    if subject.subject_type.is_theory_like() {
        let already_today = (window.start..=window.end).any(|p| {
            p != slot.period
                && grid
                    .occupied(section, SlotKey::new(slot.day, p))
                    .iter()
                    .any(|pl| pl.subject_code == *code)
        });
        if already_today {
            return false;
        }
    }

    if subject.subject_type.is_lab() {
        if slot.period + 1 > window.end || !VALID_LAB_STARTS.contains(&slot.period) {
            return false;
        }
        let next = SlotKey::new(slot.day, slot.period + 1);
        if !grid.occupied(section, slot).is_empty() || !grid.occupied(section, next).is_empty() {
            return false;
        }

        let room_type = room_type_for_subject(subject);
        if subject.batches_required && !batches.is_empty() {
            let faculty_ok = oracle.qualified_faculty(grid, code, slot, true, Some(section)).len() >= 1
                && oracle.qualified_faculty(grid, code, next, true, Some(section)).len() >= 1;
            let rooms_ok = oracle.available_rooms(grid, room_type, slot, false).len() >= batches.len()
                && oracle.available_rooms(grid, room_type, next, false).len() >= batches.len();
            faculty_ok && rooms_ok
        } else {
            has_faculty_and_room(grid, oracle, code, slot, room_type, subject)
                && has_faculty_and_room(grid, oracle, code, next, room_type, subject)
        }
    } else {
        if !grid.occupied(section, slot).is_empty() {
            return false;
        }
        has_faculty_and_room(grid, oracle, code, slot, room_type_for_subject(subject), subject)
    }
}

fn has_faculty_and_room(
    grid: &Grid,
    oracle: &Oracle,
    code: &SubjectCode,
    slot: SlotKey,
    room_type: crate::types::RoomType,
    subject: &Subject,
) -> bool {
    !oracle.qualified_faculty(grid, code, slot, false, None).is_empty()
        && !oracle
            .available_rooms(grid, room_type, slot, subject.subject_type.is_activity_like())
            .is_empty()
}
