//! Smooth Weighted Round-Robin subject selector (spec §4.4). Integer-only so
//! results stay reproducible across platforms.

use crate::types::{Subject, SubjectCode};
use std::collections::HashMap;

pub struct Selector {
    weight: HashMap<SubjectCode, u32>,
    remaining: HashMap<SubjectCode, u32>,
    current: HashMap<SubjectCode, i64>,
}

impl Selector {
    pub fn new(subjects: &[Subject]) -> Self {
        let mut weight = HashMap::new();
        let mut remaining = HashMap::new();
        let mut current = HashMap::new();
        for s in subjects {
            weight.insert(s.code.clone(), s.hours_per_week);
            remaining.insert(s.code.clone(), s.hours_per_week);
            current.insert(s.code.clone(), 0);
        }
        Self { weight, remaining, current }
    }

    pub fn remaining(&self, code: &SubjectCode) -> u32 {
        self.remaining.get(code).copied().unwrap_or(0)
    }

    /// Subjects whose remaining hours can still accommodate their own
    /// duration — the pool this tick's accumulator update runs over.
    pub fn active_codes(&self, subjects: &[Subject]) -> Vec<SubjectCode> {
        subjects
            .iter()
            .filter(|s| self.remaining(&s.code) >= s.duration() as u32)
            .map(|s| s.code.clone())
            .collect()
    }

    fn score(&self, code: &SubjectCode) -> i64 {
        self.current.get(code).copied().unwrap_or(0) + *self.weight.get(code).unwrap_or(&0) as i64
    }

    /// Picks the highest-scoring candidate, breaking ties lexically on
    /// subject code.
    pub fn pick<'a>(&self, candidates: &'a [SubjectCode]) -> Option<&'a SubjectCode> {
        candidates.iter().max_by(|a, b| {
            self.score(a).cmp(&self.score(b)).then_with(|| b.cmp(a))
        })
    }

    /// Advances the accumulator: every active subject accrues its weight,
    /// then the chosen subject pays back the sum of active weights.
    pub fn tick(&mut self, active: &[SubjectCode], chosen: &SubjectCode) {
        let total: i64 = active.iter().map(|c| *self.weight.get(c).unwrap_or(&0) as i64).sum();
        for c in active {
            *self.current.entry(c.clone()).or_insert(0) += *self.weight.get(c).unwrap_or(&0) as i64;
        }
        *self.current.entry(chosen.clone()).or_insert(0) -= total;
    }

    pub fn consume(&mut self, code: &SubjectCode, duration: u32) {
        if let Some(r) = self.remaining.get_mut(code) {
            *r = r.saturating_sub(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubjectType;

    fn subject(code: &str, hours: u32) -> Subject {
        Subject {
            code: SubjectCode(code.to_string()),
            name: code.to_string(),
            short_name: code.to_string(),
            subject_type: SubjectType::Theory,
            hours_per_week: hours,
            lab_duration: 2,
            batches_required: false,
            is_elective: false,
            priority: 1,
        }
    }

    #[test]
    fn higher_weight_subject_is_picked_more_often_over_a_cycle() {
        let subjects = vec![subject("A", 3), subject("B", 1)];
        let mut sel = Selector::new(&subjects);
        let mut counts: HashMap<String, u32> = HashMap::new();

        for _ in 0..4 {
            let active = sel.active_codes(&subjects);
            if active.is_empty() {
                break;
            }
            let chosen = sel.pick(&active).unwrap().clone();
            *counts.entry(chosen.0.clone()).or_insert(0) += 1;
            sel.tick(&active, &chosen);
            sel.consume(&chosen, 1);
        }

        assert_eq!(counts.get("A").copied().unwrap_or(0), 3);
        assert_eq!(counts.get("B").copied().unwrap_or(0), 1);
    }

    #[test]
    fn ties_break_lexically_on_subject_code() {
        let subjects = vec![subject("Z", 1), subject("A", 1)];
        let sel = Selector::new(&subjects);
        let active = sel.active_codes(&subjects);
        assert_eq!(sel.pick(&active).unwrap().0, "A");
    }
}
