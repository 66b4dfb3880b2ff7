//! Backtracking CSP solver (spec §4.6). Kept as a research/diagnostic path;
//! the production engine dispatches to the greedy placer first. Batch-
//! parallel labs are not handled here — they are deferred to the greedy
//! placer, a known limitation carried over from the source scheduler.

use super::block::place_single_block;
use super::rooms::room_type_for_subject;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::oracle::Oracle;
use crate::types::{Config, Placement, SectionLabel, SlotKey, Subject, VALID_LAB_STARTS};
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackStats {
    pub backtrack_count: u64,
    pub attempts: u64,
}

#[derive(Debug, Clone)]
struct Item<'a> {
    subject: &'a Subject,
    duration: u8,
}

fn build_queue(subjects: &[Subject]) -> Vec<Item<'_>> {
    let mut items: Vec<Item> = Vec::new();
    for subject in subjects {
        if subject.batches_required {
            continue;
        }
        let duration = subject.duration();
        let blocks = subject.hours_per_week / duration as u32;
        for _ in 0..blocks {
            items.push(Item { subject, duration });
        }
    }
    items.sort_by(|a, b| {
        a.subject
            .priority
            .cmp(&b.subject.priority)
            .then(b.duration.cmp(&a.duration))
            .then(a.subject.subject_type.is_lab().cmp(&b.subject.subject_type.is_lab()).reverse())
    });
    items
}

fn valid_slots(grid: &Grid, section: &SectionLabel, item: &Item, periods_per_day: u8, num_days: u8) -> Vec<SlotKey> {
    let mut out = Vec::new();
    for day in 0..num_days {
        let starts: Vec<u8> = if item.duration > 1 {
            VALID_LAB_STARTS.to_vec()
        } else {
            (1..=periods_per_day).collect()
        };
        for start in starts {
            if start + item.duration - 1 > periods_per_day {
                continue;
            }
            let slots: Vec<SlotKey> = (0..item.duration).map(|o| SlotKey::new(day, start + o)).collect();
            if slots.iter().any(|s| !grid.occupied(section, *s).is_empty()) {
                continue;
            }
            if item.subject.subject_type.is_theory_like() {
                let already = (1..=periods_per_day).any(|p| {
                    grid.occupied(section, SlotKey::new(day, p))
                        .iter()
                        .any(|pl| pl.subject_code == item.subject.code)
                });
                if already {
                    continue;
                }
            }
            out.push(SlotKey::new(day, start));
        }
    }
    out
}

/// Recursive backtracking search over `items`. Returns once every item is
/// placed, or exhausts the search (possibly hitting `deadline`).
pub fn schedule_backtracking(
    grid: &mut Grid,
    oracle: &Oracle,
    config: &Config,
    section: &SectionLabel,
    subjects: &[Subject],
    deadline: Instant,
) -> Result<BacktrackStats, EngineError> {
    let items = build_queue(subjects);
    let mut stats = BacktrackStats::default();

    if backtrack(grid, oracle, section, &items, 0, deadline, &mut stats) {
        Ok(stats)
    } else if Instant::now() >= deadline {
        Err(EngineError::Timeout {
            seconds: config.timeout_seconds,
        })
    } else {
        let unmet: Vec<String> = subjects
            .iter()
            .filter(|s| grid.hours(section, &s.code) < s.hours_per_week as usize)
            .map(|s| s.code.0.clone())
            .collect();
        Err(EngineError::HoursUnmet {
            section: section.0.clone(),
            codes: unmet,
        })
    }
}

fn backtrack(
    grid: &mut Grid,
    oracle: &Oracle,
    section: &SectionLabel,
    items: &[Item],
    index: usize,
    deadline: Instant,
    stats: &mut BacktrackStats,
) -> bool {
    if Instant::now() >= deadline {
        return false;
    }
    if index == items.len() {
        return true;
    }

    let item = &items[index];
    let slots = valid_slots(grid, section, item, grid.periods_per_day(), grid.num_days());

    for start in slots {
        stats.attempts += 1;
        let room_type = room_type_for_subject(item.subject);
        let placed: Result<Vec<Placement>, _> =
            place_single_block(grid, oracle, section, item.subject, start, item.duration, room_type, None);

        if let Ok(placements) = placed {
            if backtrack(grid, oracle, section, items, index + 1, deadline, stats) {
                return true;
            }
            for p in placements.iter().rev() {
                grid.remove(p);
            }
            stats.backtrack_count += 1;
        }
    }

    false
}
