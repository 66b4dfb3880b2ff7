mod hard_constraints;
mod soft_constraints;

pub use hard_constraints::*;
pub use soft_constraints::*;

use crate::grid::Grid;
use crate::types::Subject;
use serde::{Deserialize, Serialize};

/// The closed set of hard violations the validator independently recomputes.
/// Distinct from `oracle::FailureReason`: the oracle rejects a placement
/// *before* it enters the Grid, while the validator re-derives the same
/// facts (plus contiguity and credit-hour completion, which are only
/// meaningful once a section's schedule is final) from a frozen Grid alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardViolationKind {
    SectionConflict,
    TeacherConflict,
    RoomConflict,
    SameTheoryTwiceInDay,
    LabBadStart,
    LabBatchMismatch,
    Gap,
    CreditMismatch,
}

impl std::fmt::Display for HardViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HardViolationKind::SectionConflict => "section_clash",
            HardViolationKind::TeacherConflict => "teacher_clash",
            HardViolationKind::RoomConflict => "room_clash",
            HardViolationKind::SameTheoryTwiceInDay => "theory_twice_in_day",
            HardViolationKind::LabBadStart => "lab_bad_start",
            HardViolationKind::LabBatchMismatch => "lab_batch_mismatch",
            HardViolationKind::Gap => "gap",
            HardViolationKind::CreditMismatch => "credit_mismatch",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardViolation {
    pub kind: HardViolationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoftViolationKind {
    ConsecutiveTheoryExcess,
    EarlyPeriodExcess,
}

impl std::fmt::Display for SoftViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SoftViolationKind::ConsecutiveTheoryExcess => "consecutive_theory_excess",
            SoftViolationKind::EarlyPeriodExcess => "early_period_excess",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftViolation {
    pub kind: SoftViolationKind,
    pub message: String,
    pub penalty: i64,
}

/// Independently recomputed verdict on a frozen Grid. Never trusts the
/// placer's own bookkeeping — it receives only the Grid and the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub hard_violations: Vec<HardViolation>,
    pub soft_violations: Vec<SoftViolation>,
    pub score: i64,
}

/// Penalty weights for the soft constraints (spec §4.7): the stricter of
/// the two divergent weight tables found in the source project.
pub const CONSECUTIVE_EXCESS_PENALTY: i64 = 5;
pub const EARLY_PERIOD_EXCESS_PENALTY: i64 = 2;

pub fn validate(grid: &Grid, subjects: &[Subject], max_consecutive_theory: u32, limit_first_period: u32) -> ValidationReport {
    let mut hard_violations = Vec::new();
    hard_violations.extend(check_section_conflicts(grid));
    hard_violations.extend(check_teacher_conflicts(grid));
    hard_violations.extend(check_room_conflicts(grid));
    hard_violations.extend(check_theory_once_per_day(grid, subjects));
    hard_violations.extend(check_lab_blocks(grid));
    hard_violations.extend(check_contiguity(grid));
    hard_violations.extend(check_credit_hours(grid, subjects));

    let soft_violations = calculate_soft_violations(grid, subjects, max_consecutive_theory, limit_first_period);

    let soft_total: i64 = soft_violations.iter().map(|v| v.penalty).sum();
    let score = 1000 - 100 * hard_violations.len() as i64 - soft_total;

    ValidationReport {
        is_valid: hard_violations.is_empty(),
        hard_violations,
        soft_violations,
        score,
    }
}
