//! Grid state: the three occupancy indexes plus credit-hour counter that
//! together must stay mutually consistent (spec §3, §4.1).

use crate::oracle::FailureReason;
use crate::types::{BatchLabel, FacultyId, Placement, RoomNumber, SectionLabel, SlotKey, SubjectCode, VALID_LAB_STARTS};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A stable index into the Grid's placement arena. Indices are never reused
/// while a Placement they reference is still live, so callers may hold one
/// across unrelated mutations to the Grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlacementId(usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "GridDto", into = "GridDto")]
pub struct Grid {
    num_days: u8,
    periods_per_day: u8,
    arena: Vec<Option<Placement>>,
    free: Vec<usize>,
    by_section: HashMap<(SectionLabel, SlotKey), Vec<usize>>,
    by_faculty: HashMap<(FacultyId, SlotKey), Vec<usize>>,
    by_room: HashMap<(RoomNumber, SlotKey), Vec<usize>>,
    hours: HashMap<(SectionLabel, SubjectCode), HashSet<SlotKey>>,
}

#[derive(Serialize, Deserialize)]
struct GridDto {
    num_days: u8,
    periods_per_day: u8,
    placements: Vec<Placement>,
}

impl From<Grid> for GridDto {
    fn from(g: Grid) -> Self {
        GridDto {
            num_days: g.num_days,
            periods_per_day: g.periods_per_day,
            placements: g.arena.into_iter().flatten().collect(),
        }
    }
}

impl From<GridDto> for Grid {
    fn from(dto: GridDto) -> Self {
        let mut grid = Grid::new(dto.num_days, dto.periods_per_day);
        for p in dto.placements {
            grid.insert_unchecked(p);
        }
        grid
    }
}

impl Grid {
    pub fn new(num_days: u8, periods_per_day: u8) -> Self {
        Self {
            num_days,
            periods_per_day,
            arena: Vec::new(),
            free: Vec::new(),
            by_section: HashMap::new(),
            by_faculty: HashMap::new(),
            by_room: HashMap::new(),
            hours: HashMap::new(),
        }
    }

    pub fn num_days(&self) -> u8 {
        self.num_days
    }

    pub fn periods_per_day(&self) -> u8 {
        self.periods_per_day
    }

    /// Insert a Placement without running any feasibility checks, updating
    /// every index. Used to rebuild a Grid from a trusted, already
    /// validated serialized form, and by the evolutionary search, which
    /// expresses chromosomes that may be structurally invalid on purpose —
    /// conflicts there are scored by the Validator, not rejected at
    /// insertion time.
    pub(crate) fn insert_unchecked(&mut self, p: Placement) -> usize {
        let idx = match self.free.pop() {
            Some(i) => {
                self.arena[i] = Some(p.clone());
                i
            }
            None => {
                self.arena.push(Some(p.clone()));
                self.arena.len() - 1
            }
        };
        self.by_section.entry((p.section.clone(), p.slot)).or_default().push(idx);
        self.by_faculty.entry((p.faculty_id.clone(), p.slot)).or_default().push(idx);
        self.by_room.entry((p.room_number.clone(), p.slot)).or_default().push(idx);
        self.hours.entry(p.credit_key()).or_default().insert(p.slot);
        idx
    }

    /// Insert `p`, checking invariants §3.1–§3.3 always, §3.4 when
    /// `is_theory_like` is set, and the lab-structure checks of §3.5 when
    /// `is_lab` is set. Invariant §3.6 (batch-set symmetry across a lab's two
    /// periods) is enforced by the block placement primitives, which only
    /// commit a batch block once every batch has succeeded in both periods;
    /// the Validator re-checks it independently as the final authority.
    pub fn add(&mut self, p: Placement, is_theory_like: bool, is_lab: bool) -> Result<PlacementId, FailureReason> {
        self.check_section_slot(&p)?;
        self.check_faculty_slot(&p)?;
        self.check_room_slot(&p)?;
        if is_theory_like {
            self.check_theory_once_per_day(&p)?;
        }
        if is_lab && p.is_lab_continuation {
            self.check_lab_structure(&p)?;
        }
        let idx = self.insert_unchecked(p);
        Ok(PlacementId(idx))
    }

    fn check_section_slot(&self, p: &Placement) -> Result<(), FailureReason> {
        let existing = self.occupied(&p.section, p.slot);
        if existing.is_empty() {
            return Ok(());
        }
        if p.batch.is_none() {
            return Err(FailureReason::SectionConflict);
        }
        let all_batch_parallel = existing
            .iter()
            .all(|e| e.batch.is_some() && e.subject_code == p.subject_code);
        if !all_batch_parallel {
            return Err(FailureReason::SectionConflict);
        }
        if existing.iter().any(|e| e.batch == p.batch) {
            return Err(FailureReason::BatchMismatch);
        }
        Ok(())
    }

    fn check_faculty_slot(&self, p: &Placement) -> Result<(), FailureReason> {
        let existing = self.faculty_occupants(&p.faculty_id, p.slot);
        if existing.is_empty() {
            return Ok(());
        }
        let allowed = p.batch.is_some()
            && existing
                .iter()
                .all(|e| e.section == p.section && e.subject_code == p.subject_code && e.batch.is_some());
        if allowed {
            Ok(())
        } else {
            Err(FailureReason::TeacherConflict)
        }
    }

    fn check_room_slot(&self, p: &Placement) -> Result<(), FailureReason> {
        if self.by_room.contains_key(&(p.room_number.clone(), p.slot)) {
            Err(FailureReason::RoomConflict)
        } else {
            Ok(())
        }
    }

    fn check_theory_once_per_day(&self, p: &Placement) -> Result<(), FailureReason> {
        for period in 1..=self.periods_per_day {
            if period == p.slot.period {
                continue;
            }
            let slot = SlotKey::new(p.slot.day, period);
            if self
                .occupied(&p.section, slot)
                .iter()
                .any(|e| e.subject_code == p.subject_code)
            {
                return Err(FailureReason::SameTheoryTwiceInDay);
            }
        }
        Ok(())
    }

    fn check_lab_structure(&self, p: &Placement) -> Result<(), FailureReason> {
        let start = p.slot.period.checked_sub(1).ok_or(FailureReason::LabBadStart)?;
        if !VALID_LAB_STARTS.contains(&start) {
            return Err(FailureReason::LabBadStart);
        }
        let start_slot = SlotKey::new(p.slot.day, start);
        let opener_exists = self
            .occupied(&p.section, start_slot)
            .iter()
            .any(|e| e.subject_code == p.subject_code && e.batch == p.batch && !e.is_lab_continuation);
        if !opener_exists {
            return Err(FailureReason::LabBreakCross);
        }
        Ok(())
    }

    /// Exact inverse of `add`: removes the first arena entry equal to `p`.
    /// Returns `false` (a no-op) if no such Placement is present.
    pub fn remove(&mut self, p: &Placement) -> bool {
        let idx = match self.arena.iter().position(|slot| slot.as_ref() == Some(p)) {
            Some(i) => i,
            None => return false,
        };
        self.arena[idx] = None;
        self.free.push(idx);

        if let Some(v) = self.by_section.get_mut(&(p.section.clone(), p.slot)) {
            v.retain(|&i| i != idx);
            if v.is_empty() {
                self.by_section.remove(&(p.section.clone(), p.slot));
            }
        }
        if let Some(v) = self.by_faculty.get_mut(&(p.faculty_id.clone(), p.slot)) {
            v.retain(|&i| i != idx);
            if v.is_empty() {
                self.by_faculty.remove(&(p.faculty_id.clone(), p.slot));
            }
        }
        if let Some(v) = self.by_room.get_mut(&(p.room_number.clone(), p.slot)) {
            v.retain(|&i| i != idx);
            if v.is_empty() {
                self.by_room.remove(&(p.room_number.clone(), p.slot));
            }
        }

        let key = p.credit_key();
        let still_present = self
            .occupied(&p.section, p.slot)
            .iter()
            .any(|q| q.credit_key() == key);
        if !still_present {
            if let Some(set) = self.hours.get_mut(&key) {
                set.remove(&p.slot);
            }
        }
        true
    }

    pub fn occupied(&self, section: &SectionLabel, slot: SlotKey) -> Vec<&Placement> {
        self.by_section
            .get(&(section.clone(), slot))
            .map(|ids| ids.iter().filter_map(|&i| self.arena[i].as_ref()).collect())
            .unwrap_or_default()
    }

    pub fn faculty_occupants(&self, fid: &FacultyId, slot: SlotKey) -> Vec<&Placement> {
        self.by_faculty
            .get(&(fid.clone(), slot))
            .map(|ids| ids.iter().filter_map(|&i| self.arena[i].as_ref()).collect())
            .unwrap_or_default()
    }

    pub fn faculty_busy(&self, fid: &FacultyId, slot: SlotKey) -> bool {
        !self.faculty_occupants(fid, slot).is_empty()
    }

    pub fn room_busy(&self, room: &RoomNumber, slot: SlotKey) -> bool {
        self.by_room
            .get(&(room.clone(), slot))
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    }

    pub fn hours(&self, section: &SectionLabel, code: &SubjectCode) -> usize {
        self.hours
            .get(&(section.clone(), code.clone()))
            .map(|s| s.len())
            .unwrap_or(0)
    }

    pub fn all_placements(&self) -> impl Iterator<Item = &Placement> {
        self.arena.iter().filter_map(|o| o.as_ref())
    }

    pub fn sections_occupied(&self) -> HashSet<SectionLabel> {
        self.by_section.keys().map(|(s, _)| s.clone()).collect()
    }

    pub fn occupied_periods_for_day(&self, section: &SectionLabel, day: u8) -> Vec<u8> {
        let mut periods: Vec<u8> = (1..=self.periods_per_day)
            .filter(|&p| !self.occupied(section, SlotKey::new(day, p)).is_empty())
            .collect();
        periods.sort_unstable();
        periods
    }

    pub fn batches_at(&self, section: &SectionLabel, slot: SlotKey) -> HashSet<BatchLabel> {
        self.occupied(section, slot).iter().filter_map(|p| p.batch.clone()).collect()
    }

    pub fn all_section_slots(&self) -> Vec<(SectionLabel, SlotKey)> {
        self.by_section.keys().cloned().collect()
    }

    pub fn all_faculty_slots(&self) -> Vec<(FacultyId, SlotKey)> {
        self.by_faculty.keys().cloned().collect()
    }

    pub fn room_occupants(&self, room: &RoomNumber, slot: SlotKey) -> Vec<&Placement> {
        self.by_room
            .get(&(room.clone(), slot))
            .map(|ids| ids.iter().filter_map(|&i| self.arena[i].as_ref()).collect())
            .unwrap_or_default()
    }

    pub fn all_room_slots(&self) -> Vec<(RoomNumber, SlotKey)> {
        self.by_room.keys().cloned().collect()
    }
}
