use serde::{Deserialize, Serialize};

/// A single cell in the weekly grid: a day index paired with a period index.
///
/// Day is an index into `Config.days` rather than a fixed Mon-Sat enum, so the
/// engine stays agnostic to how many working days a deployment configures.
/// Period is 1-indexed to match the way faculty and students actually talk
/// about "period 3", matching the convention in the source VTU timetables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: u8,
    pub period: u8,
}

impl SlotKey {
    pub fn new(day: u8, period: u8) -> Self {
        Self { day, period }
    }

    /// The slot immediately following this one on the same day.
    pub fn next_period(&self) -> Self {
        Self {
            day: self.day,
            period: self.period + 1,
        }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{}P{}", self.day + 1, self.period)
    }
}

/// Valid starting periods for a 2-period lab block: must not cross the
/// breaks that fall between periods 2/3 and 4/5.
pub const VALID_LAB_STARTS: [u8; 3] = [1, 3, 5];

/// Resolve a day index to a human-readable name using the configured day list,
/// falling back to a numeric label if the index is out of range.
pub fn day_name(days: &[String], day: u8) -> String {
    days.get(day as usize)
        .cloned()
        .unwrap_or_else(|| format!("Day{}", day + 1))
}

/// The standard VTU-style class timing table this deployment runs on: a
/// short break after period 2, lunch after period 4. Purely presentational —
/// the engine itself only reasons in period indices.
pub fn period_time(period: u8) -> &'static str {
    match period {
        1 => "08:00-09:00",
        2 => "09:00-10:00",
        3 => "10:20-11:20",
        4 => "11:20-12:20",
        5 => "13:00-14:00",
        6 => "14:00-15:00",
        7 => "15:00-16:00",
        _ => "",
    }
}
