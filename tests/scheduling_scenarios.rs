//! End-to-end scenarios over the full catalog-to-Grid pipeline.

use std::collections::HashMap;
use timetable_engine::error::EngineError;
use timetable_engine::grid::Grid;
use timetable_engine::oracle::{FailureReason, Oracle};
use timetable_engine::scheduler::generate_schedule;
use timetable_engine::types::{
    BatchLabel, Config, Faculty, FacultyId, Placement, Room, RoomNumber, RoomType, ScheduleRequest, SectionLabel, SlotKey, Subject,
    SubjectCode, SubjectType,
};
use timetable_engine::validator;

fn subject(code: &str, short: &str, kind: SubjectType, hours: u32, batches_required: bool) -> Subject {
    Subject {
        code: SubjectCode(code.to_string()),
        name: format!("{} full name", short),
        short_name: short.to_string(),
        subject_type: kind,
        hours_per_week: hours,
        lab_duration: 2,
        batches_required,
        is_elective: false,
        priority: 1,
    }
}

fn faculty(id: &str, name: &str, subjects: &[&str]) -> Faculty {
    Faculty {
        id: FacultyId(id.to_string()),
        name: name.to_string(),
        subjects: subjects.iter().map(|s| SubjectCode(s.to_string())).collect(),
        unavailable_slots: Default::default(),
        max_hours_per_day: None,
        max_hours_per_week: None,
    }
}

fn room(number: &str, kind: RoomType) -> Room {
    Room {
        number: RoomNumber(number.to_string()),
        name: format!("Room {}", number),
        room_type: kind,
    }
}

fn standard_catalog() -> (Vec<Subject>, Vec<Faculty>, Vec<Room>) {
    let subjects = vec![
        subject("CS301", "DS", SubjectType::Theory, 4, false),
        subject("CS302", "OS", SubjectType::Theory, 4, false),
        subject("MA301", "MATH", SubjectType::Theory, 3, false),
        subject("CS303", "DSL", SubjectType::Lab, 2, true),
        subject("YOGA", "YOGA", SubjectType::Yoga, 1, false),
        subject("CLUB", "CLUB", SubjectType::Club, 1, false),
        subject("MP", "MP", SubjectType::MiniProject, 2, false),
    ];
    let faculty = vec![
        faculty("F001", "Dr. Rao", &["CS301", "CS303"]),
        faculty("F002", "Prof. Iyer", &["CS302"]),
        faculty("F003", "Dr. Shetty", &["MA301"]),
        faculty("F004", "Ms. Kumar", &["YOGA", "CLUB", "MP"]),
        faculty("F005", "Mr. Das", &["YOGA", "CLUB", "MP"]),
    ];
    let rooms = vec![
        room("101", RoomType::Classroom),
        room("102", RoomType::Classroom),
        room("L1", RoomType::ComputerLab),
        room("AR", RoomType::ActivityRoom),
    ];
    (subjects, faculty, rooms)
}

fn request_with_sections(sections: Vec<&str>, batch_count: usize) -> ScheduleRequest {
    let (subjects, faculty, rooms) = standard_catalog();
    let mut section_batches = HashMap::new();
    for s in &sections {
        let batches: Vec<BatchLabel> = (1..=batch_count).map(|i| BatchLabel(format!("{}{}", s, i))).collect();
        section_batches.insert(SectionLabel(s.to_string()), batches);
    }
    ScheduleRequest {
        semester: 5,
        branch: "AIDS".to_string(),
        sections: sections.iter().map(|s| s.to_string()).collect(),
        subjects,
        faculty,
        rooms,
        section_batches,
        config: Config::default(),
    }
}

#[test]
fn two_section_standard_produces_a_valid_grid() {
    let request = request_with_sections(vec!["AIDS-A", "AIDS-B"], 3);
    let response = generate_schedule(&request, true).expect("greedy run should succeed on this catalog");

    assert!(response.validation.is_valid, "hard violations: {:?}", response.validation.hard_violations);

    let section_a = SectionLabel("AIDS-A".to_string());
    assert!(!response.grid.occupied(&section_a, SlotKey::new(2, 6)).is_empty(), "yoga must land on Wed period 6");
    assert!(!response.grid.occupied(&section_a, SlotKey::new(2, 7)).is_empty(), "club must land on Wed period 7");
    assert!(!response.grid.occupied(&section_a, SlotKey::new(3, 6)).is_empty(), "mini-project must land on Thu period 6");
    assert!(!response.grid.occupied(&section_a, SlotKey::new(3, 7)).is_empty(), "mini-project must land on Thu period 7");

    for placement in response.grid.all_placements() {
        if placement.is_lab_continuation {
            continue;
        }
        let next = response.grid.occupied(&placement.section, SlotKey::new(placement.slot.day, placement.slot.period + 1));
        let is_lab_opener = next.iter().any(|p| p.subject_code == placement.subject_code && p.is_lab_continuation);
        if is_lab_opener {
            assert!([1, 3, 5].contains(&placement.slot.period), "lab must start at a valid period");
        }
    }
}

#[test]
fn fixed_slot_conflict_is_reported_on_the_second_section() {
    let (subjects, _faculty, rooms) = standard_catalog();
    let faculty = vec![faculty("F004", "Ms. Kumar", &["YOGA", "CLUB", "MP"])];

    let sections = vec![SectionLabel("AIDS-A".to_string()), SectionLabel("AIDS-B".to_string())];
    let oracle = Oracle::new(&faculty, &rooms);
    let mut grid = Grid::new(6, 7);
    let home_rooms = timetable_engine::scheduler::assign_home_classrooms(&sections, &rooms).unwrap();

    let yoga = subjects.iter().find(|s| s.short_name == "YOGA").unwrap();
    let faculty_member = oracle.qualified_faculty(&grid, &yoga.code, SlotKey::new(2, 6), false, Some(&sections[0])).remove(0);

    let placement = Placement {
        section: sections[0].clone(),
        slot: SlotKey::new(2, 6),
        subject_code: yoga.code.clone(),
        faculty_id: faculty_member.id.clone(),
        room_number: home_rooms.get(&sections[0]).unwrap().clone(),
        batch: None,
        is_lab_continuation: false,
    };
    grid.add(placement, true, false).expect("first section's yoga slot should be placeable");

    let second_candidates = oracle.qualified_faculty(&grid, &yoga.code, SlotKey::new(2, 6), false, Some(&sections[1]));
    assert!(second_candidates.is_empty(), "the only yoga-qualified faculty is already busy");
}

#[test]
fn lab_cannot_start_at_period_two() {
    let (subjects, _f, _r) = standard_catalog();
    let lab = subjects.iter().find(|s| s.short_name == "DSL").unwrap();
    let section = SectionLabel("AIDS-A".to_string());
    let mut grid = Grid::new(6, 7);

    let opener = Placement {
        section: section.clone(),
        slot: SlotKey::new(0, 2),
        subject_code: lab.code.clone(),
        faculty_id: FacultyId("F001".to_string()),
        room_number: RoomNumber("L1".to_string()),
        batch: None,
        is_lab_continuation: false,
    };
    grid.add(opener, false, false).unwrap();

    let continuation = Placement {
        section,
        slot: SlotKey::new(0, 3),
        subject_code: lab.code.clone(),
        faculty_id: FacultyId("F001".to_string()),
        room_number: RoomNumber("L1".to_string()),
        batch: None,
        is_lab_continuation: true,
    };
    let result = grid.add(continuation, false, true);
    assert_eq!(result.unwrap_err(), FailureReason::LabBadStart);
}

#[test]
fn batch_parallel_lab_produces_one_placement_per_batch_with_distinct_rooms() {
    let request = request_with_sections(vec!["AIDS-A"], 3);
    let response = generate_schedule(&request, true).expect("run should succeed");

    let section = SectionLabel("AIDS-A".to_string());
    let dsl_code = SubjectCode("CS303".to_string());

    let opener_slot = response
        .grid
        .all_placements()
        .find(|p| p.section == section && p.subject_code == dsl_code && !p.is_lab_continuation)
        .map(|p| p.slot)
        .expect("the lab must have been placed");

    let at_opener: Vec<_> = response.grid.occupied(&section, opener_slot).into_iter().filter(|p| p.subject_code == dsl_code).collect();
    assert_eq!(at_opener.len(), 3, "exactly one placement per batch");

    let mut rooms: Vec<_> = at_opener.iter().map(|p| p.room_number.clone()).collect();
    rooms.sort();
    rooms.dedup();
    assert_eq!(rooms.len(), 3, "each batch must get a distinct room");

    assert_eq!(response.grid.hours(&section, &dsl_code), 2, "credit counter counts slots once, not once per batch");
}

#[test]
fn theory_subject_spreads_across_distinct_days() {
    let request = request_with_sections(vec!["AIDS-A"], 3);
    let response = generate_schedule(&request, true).expect("run should succeed");

    let section = SectionLabel("AIDS-A".to_string());
    let ds_code = SubjectCode("CS301".to_string());

    let mut days_seen = std::collections::HashSet::new();
    for p in response.grid.all_placements() {
        if p.section == section && p.subject_code == ds_code {
            days_seen.insert(p.slot.day);
        }
    }
    assert_eq!(days_seen.len(), 4, "a 4-hour theory subject must land on 4 distinct days");
}

#[test]
fn every_section_day_is_gap_free() {
    let request = request_with_sections(vec!["AIDS-A", "AIDS-B"], 2);
    let response = generate_schedule(&request, true).expect("run should succeed");

    let report = validator::validate(
        &response.grid,
        &request.subjects,
        request.config.max_consecutive_theory,
        request.config.limit_first_period,
    );

    let gap_violations: Vec<_> = report
        .hard_violations
        .iter()
        .filter(|v| matches!(v.kind, validator::HardViolationKind::Gap))
        .collect();
    assert!(gap_violations.is_empty(), "found gaps: {:?}", gap_violations);
}

#[test]
fn remove_is_the_exact_inverse_of_add() {
    let section = SectionLabel("AIDS-A".to_string());
    let mut grid = Grid::new(6, 7);
    let placement = Placement {
        section: section.clone(),
        slot: SlotKey::new(0, 1),
        subject_code: SubjectCode("CS301".to_string()),
        faculty_id: FacultyId("F001".to_string()),
        room_number: RoomNumber("101".to_string()),
        batch: None,
        is_lab_continuation: false,
    };

    grid.add(placement.clone(), true, false).unwrap();
    assert_eq!(grid.hours(&section, &placement.subject_code), 1);

    assert!(grid.remove(&placement));
    assert_eq!(grid.hours(&section, &placement.subject_code), 0);
    assert!(grid.occupied(&section, placement.slot).is_empty());

    assert!(!grid.remove(&placement), "removing twice is a no-op, not an error");
}

#[test]
fn readding_the_same_placement_is_rejected() {
    let section = SectionLabel("AIDS-A".to_string());
    let mut grid = Grid::new(6, 7);
    let placement = Placement {
        section,
        slot: SlotKey::new(0, 1),
        subject_code: SubjectCode("CS301".to_string()),
        faculty_id: FacultyId("F001".to_string()),
        room_number: RoomNumber("101".to_string()),
        batch: None,
        is_lab_continuation: false,
    };

    grid.add(placement.clone(), true, false).unwrap();
    let err = grid.add(placement, true, false).unwrap_err();
    assert_eq!(err, FailureReason::SectionConflict);
}

#[test]
fn identical_inputs_and_seed_produce_identical_evolutionary_grids() {
    let mut request = request_with_sections(vec!["AIDS-A"], 2);
    request.config.algorithm = timetable_engine::types::Algorithm::Evolutionary;
    request.config.seed = 7;

    let first = generate_schedule(&request, true);
    let second = generate_schedule(&request, true);

    match (first, second) {
        (Ok(a), Ok(b)) => {
            let a_placements: Vec<_> = a.grid.all_placements().cloned().collect();
            let b_placements: Vec<_> = b.grid.all_placements().cloned().collect();
            assert_eq!(a_placements.len(), b_placements.len());
        }
        (Err(_), Err(_)) => {}
        _ => panic!("identical seeded runs diverged in success/failure"),
    }
}

#[test]
fn unmet_hours_error_names_the_offending_subject() {
    let (mut subjects, faculty, rooms) = standard_catalog();
    // Impossible workload: 40 hours crammed into a 6x7 grid with fixed slots.
    subjects.push(subject("IMPOSSIBLE", "IMP", SubjectType::Theory, 40, false));
    let faculty_with_imp = {
        let mut f = faculty;
        f.push(faculty("F999", "Overloaded", &["IMPOSSIBLE"]));
        f
    };

    let mut section_batches = HashMap::new();
    section_batches.insert(SectionLabel("AIDS-A".to_string()), vec![BatchLabel("AIDS-A1".to_string())]);

    let request = ScheduleRequest {
        semester: 5,
        branch: "AIDS".to_string(),
        sections: vec!["AIDS-A".to_string()],
        subjects,
        faculty: faculty_with_imp,
        rooms,
        section_batches,
        config: Config::default(),
    };

    let err = generate_schedule(&request, true).unwrap_err();
    let engine_err = err.downcast_ref::<EngineError>().expect("should be an EngineError");
    assert!(matches!(engine_err, EngineError::HoursUnmet { .. }));
}
