use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use timetable_engine::scheduler::generate_schedule;
use timetable_engine::types::{
    BatchLabel, Config, Faculty, FacultyId, Room, RoomNumber, RoomType, ScheduleRequest, SectionLabel, Subject, SubjectCode, SubjectType,
};

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

fn faculty(id: &str, subjects: &[&str]) -> Faculty {
    Faculty {
        id: FacultyId(id.to_string()),
        name: id.to_string(),
        subjects: subjects.iter().map(|s| SubjectCode(s.to_string())).collect(),
        unavailable_slots: Default::default(),
        max_hours_per_day: None,
        max_hours_per_week: None,
    }
}

fn room(number: &str, kind: RoomType) -> Room {
    Room {
        number: RoomNumber(number.to_string()),
        name: number.to_string(),
        room_type: kind,
    }
}

/// A medium-size catalog: 3 sections, 7 subjects each, matching the demo
/// data's shape but with more classrooms so three home rooms are available.
fn medium_request(algorithm: timetable_engine::types::Algorithm) -> ScheduleRequest {
    let subjects = vec![
        subject("CS301", "DS", SubjectType::Theory, 4, false),
        subject("CS302", "OS", SubjectType::Theory, 4, false),
        subject("CS303", "CN", SubjectType::Theory, 3, false),
        subject("MA301", "MATH", SubjectType::Theory, 3, false),
        subject("CS304", "DSL", SubjectType::Lab, 2, true),
        subject("YOGA", "YOGA", SubjectType::Yoga, 1, false),
        subject("CLUB", "CLUB", SubjectType::Club, 1, false),
        subject("MP", "MP", SubjectType::MiniProject, 2, false),
    ];
    let faculty = vec![
        faculty("F001", &["CS301", "CS304"]),
        faculty("F002", &["CS302"]),
        faculty("F003", &["CS303"]),
        faculty("F004", &["MA301"]),
        faculty("F005", &["YOGA", "CLUB", "MP"]),
    ];
    let rooms = vec![
        room("101", RoomType::Classroom),
        room("102", RoomType::Classroom),
        room("103", RoomType::Classroom),
        room("L1", RoomType::ComputerLab),
        room("L2", RoomType::ComputerLab),
        room("AR", RoomType::ActivityRoom),
    ];

    let sections = ["SEC-A", "SEC-B", "SEC-C"];
    let mut section_batches = HashMap::new();
    for s in sections {
        section_batches.insert(
            SectionLabel(s.to_string()),
            vec![BatchLabel(format!("{}1", s)), BatchLabel(format!("{}2", s)), BatchLabel(format!("{}3", s))],
        );
    }

    let mut config = Config::default();
    config.algorithm = algorithm;

    ScheduleRequest {
        semester: 5,
        branch: "AIDS".to_string(),
        sections: sections.iter().map(|s| s.to_string()).collect(),
        subjects,
        faculty,
        rooms,
        section_batches,
        config,
    }
}

fn bench_greedy(c: &mut Criterion) {
    let request = medium_request(timetable_engine::types::Algorithm::Greedy);
    c.bench_function("greedy_placer_medium_catalog", |b| {
        b.iter(|| {
            let response = generate_schedule(black_box(&request), true);
            black_box(response)
        })
    });
}

fn bench_backtracking(c: &mut Criterion) {
    let request = medium_request(timetable_engine::types::Algorithm::Backtracking);
    c.bench_function("backtracking_solver_medium_catalog", |b| {
        b.iter(|| {
            let response = generate_schedule(black_box(&request), true);
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_greedy, bench_backtracking);
criterion_main!(benches);
