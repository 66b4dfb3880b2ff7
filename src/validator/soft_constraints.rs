use super::{SoftViolation, SoftViolationKind, CONSECUTIVE_EXCESS_PENALTY, EARLY_PERIOD_EXCESS_PENALTY};
use crate::grid::Grid;
use crate::types::{SlotKey, Subject, SubjectCode};

fn is_theory_like(subjects: &[Subject], code: &SubjectCode) -> bool {
    subjects
        .iter()
        .find(|s| &s.code == code)
        .map(|s| s.subject_type.is_theory_like())
        .unwrap_or(false)
}

/// Soft penalties recomputed independently from the placer's own counters:
/// consecutive theory runs beyond the configured cap, and early-period
/// crowding beyond one session per day.
pub fn calculate_soft_violations(
    grid: &Grid,
    subjects: &[Subject],
    max_consecutive_theory: u32,
    limit_first_period: u32,
) -> Vec<SoftViolation> {
    let mut out = Vec::new();

    for section in grid.sections_occupied() {
        for day in 0..grid.num_days() {
            let mut run: u32 = 0;
            let mut excess: u32 = 0;
            for period in 1..=grid.periods_per_day() {
                let slot = SlotKey::new(day, period);
                let occupants = grid.occupied(&section, slot);
                let theory_here = occupants.iter().any(|p| !p.is_lab_continuation && is_theory_like(subjects, &p.subject_code));
                if theory_here {
                    run += 1;
                    if run > max_consecutive_theory {
                        excess += 1;
                    }
                } else {
                    run = 0;
                }
            }
            if excess > 0 {
                out.push(SoftViolation {
                    kind: SoftViolationKind::ConsecutiveTheoryExcess,
                    message: format!("section {} exceeds consecutive-theory cap by {} period(s) on day {}", section, excess, day + 1),
                    penalty: CONSECUTIVE_EXCESS_PENALTY * excess as i64,
                });
            }

            let early_occupied = (1..=limit_first_period.min(grid.periods_per_day() as u32) as u8)
                .filter(|&p| !grid.occupied(&section, SlotKey::new(day, p)).is_empty())
                .count() as u32;
            if early_occupied > 1 {
                let excess_early = early_occupied - 1;
                out.push(SoftViolation {
                    kind: SoftViolationKind::EarlyPeriodExcess,
                    message: format!("section {} crowds {} early period(s) on day {}", section, excess_early, day + 1),
                    penalty: EARLY_PERIOD_EXCESS_PENALTY * excess_early as i64,
                });
            }
        }
    }

    out
}
