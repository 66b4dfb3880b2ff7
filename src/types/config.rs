use super::SlotKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which outer search drives placement. All variants share the same Grid and
/// Feasibility core; they differ only in how they walk the search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Greedy,
    Backtracking,
    Evolutionary,
    /// Try greedy; on failure fall back to backtracking; on failure fall
    /// back to evolutionary.
    Hybrid,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Greedy
    }
}

/// Run-wide scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub days: Vec<String>,
    pub periods_per_day: u8,
    pub algorithm: Algorithm,
    pub max_consecutive_theory: u32,
    pub prefer_morning_labs: bool,
    pub limit_first_period: u32,
    pub timeout_seconds: u64,
    /// Mandatory (subject short label -> slots) placements, e.g. yoga fixed
    /// to Wednesday period 6. Checked first, before any greedy or
    /// backtracking search begins.
    pub fixed_slots: HashMap<String, Vec<SlotKey>>,
    /// Seed for the evolutionary search's RNG. The greedy and backtracking
    /// paths use no randomness and ignore this field; a run is idempotent
    /// given identical inputs and this seed.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            days: default_days(),
            periods_per_day: 7,
            algorithm: Algorithm::Greedy,
            max_consecutive_theory: 3,
            prefer_morning_labs: true,
            limit_first_period: 3,
            timeout_seconds: 30,
            fixed_slots: default_fixed_slots(),
            seed: 42,
        }
    }
}

fn default_days() -> Vec<String> {
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// The stock fixed-activity table: yoga/club land on Wednesday afternoon,
/// mini-project occupies the last two periods of Thursday.
fn default_fixed_slots() -> HashMap<String, Vec<SlotKey>> {
    let mut m = HashMap::new();
    m.insert("YOGA".to_string(), vec![SlotKey::new(2, 6)]);
    m.insert("CLUB".to_string(), vec![SlotKey::new(2, 7)]);
    m.insert("MP".to_string(), vec![SlotKey::new(3, 6), SlotKey::new(3, 7)]);
    m
}

impl Config {
    pub fn num_days(&self) -> u8 {
        self.days.len() as u8
    }
}
