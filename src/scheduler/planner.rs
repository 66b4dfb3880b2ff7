//! Block planner: spreads a section's required periods across the working
//! week and sizes each day's fill window (spec §4.3).

/// Inclusive period window a day's fill pass is allowed to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: u8,
    pub end: u8,
}

impl Window {
    pub fn len(&self) -> u8 {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn contains(&self, period: u8) -> bool {
        period >= self.start && period <= self.end
    }
}

/// Split `total` required periods as evenly as possible across `num_days`
/// days: base = total / num_days, with the first `total % num_days` days
/// getting one extra period.
pub fn distribute_targets(total: u32, num_days: u8) -> Vec<u32> {
    if num_days == 0 {
        return Vec::new();
    }
    let base = total / num_days as u32;
    let remainder = total % num_days as u32;
    (0..num_days)
        .map(|day| base + if (day as u32) < remainder { 1 } else { 0 })
        .collect()
}

/// The default window for a day's `target` period count, before fixed-slot
/// enlargement, clipped to `[1, periods_per_day]`.
pub fn base_window(target: u32, periods_per_day: u8) -> Window {
    let p = periods_per_day;
    let w = if target >= 6 {
        Window { start: 1, end: target.min(p as u32) as u8 }
    } else if target == 5 {
        Window { start: 2, end: 6 }
    } else if target == 4 {
        Window { start: 2, end: 5 }
    } else if target == 0 {
        Window { start: 1, end: 1 }
    } else {
        Window { start: 2, end: 2 + target as u8 - 1 }
    };
    clip(w, p)
}

/// Enlarge `window` so it contains every period in `fixed_periods` already
/// pre-placed on that day. If the fixed periods all fall after the window's
/// upper bound, the window is pulled down to period 2 (preserving the
/// morning-first fill while still reaching the fixed coverage) rather than
/// all the way to period 1.
pub fn enlarge_for_fixed(window: Window, fixed_periods: &[u8], periods_per_day: u8) -> Window {
    if fixed_periods.is_empty() {
        return window;
    }
    let max_fixed = *fixed_periods.iter().max().unwrap();
    let min_fixed = *fixed_periods.iter().min().unwrap();

    let mut start = window.start;
    let mut end = window.end;

    if min_fixed > window.end {
        start = start.min(2);
        end = end.max(max_fixed);
    } else {
        start = start.min(min_fixed);
        end = end.max(max_fixed);
    }

    clip(Window { start, end }, periods_per_day)
}

fn clip(w: Window, periods_per_day: u8) -> Window {
    Window {
        start: w.start.max(1),
        end: w.end.min(periods_per_day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distributes_evenly_with_remainder_on_first_days() {
        let targets = distribute_targets(20, 6);
        assert_eq!(targets.iter().sum::<u32>(), 20);
        assert_eq!(targets, vec![4, 4, 3, 3, 3, 3]);
    }

    #[test]
    fn window_sizes_match_the_spec_table() {
        assert_eq!(base_window(7, 7), Window { start: 1, end: 7 });
        assert_eq!(base_window(5, 7), Window { start: 2, end: 6 });
        assert_eq!(base_window(4, 7), Window { start: 2, end: 5 });
        assert_eq!(base_window(3, 7), Window { start: 2, end: 4 });
    }

    #[test]
    fn enlarges_to_cover_fixed_slots_after_lunch() {
        let w = base_window(4, 7);
        let enlarged = enlarge_for_fixed(w, &[6, 7], 7);
        assert_eq!(enlarged, Window { start: 2, end: 7 });
    }
}
