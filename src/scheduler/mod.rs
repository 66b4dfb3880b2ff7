mod backtracking;
mod block;
mod evolutionary;
mod fixed;
mod greedy;
mod planner;
mod rooms;
mod selector;

pub use fixed::assign_home_classrooms;

use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::oracle::Oracle;
use crate::types::{Algorithm, ScheduleRequest, ScheduleResponse, SectionLabel, Statistics};
use crate::validator;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Runs the configured algorithm, validates the result and assembles the
/// public response. This is the engine's one entry point.
pub fn generate_schedule(request: &ScheduleRequest, quiet: bool) -> Result<ScheduleResponse> {
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    progress.set_message("Dispatching algorithm...");
    progress.set_position(10);

    let (grid, stats, fail_loud_on_hard_violation) = match request.config.algorithm {
        Algorithm::Greedy => {
            let (grid, stats) = run_greedy(request)?;
            (grid, stats, true)
        }
        Algorithm::Backtracking => {
            let (grid, stats) = run_backtracking(request)?;
            (grid, stats, true)
        }
        Algorithm::Evolutionary => {
            let (grid, stats) = run_evolutionary(request);
            (grid, stats, false)
        }
        Algorithm::Hybrid => run_hybrid(request, &progress)?,
    };

    progress.set_message("Validating...");
    progress.set_position(90);

    let validation = validator::validate(
        &grid,
        &request.subjects,
        request.config.max_consecutive_theory,
        request.config.limit_first_period,
    );

    if fail_loud_on_hard_violation && !validation.hard_violations.is_empty() {
        return Err(EngineError::InternalInvariantViolation(format!(
            "{} hard violation(s) survived a reportedly successful run",
            validation.hard_violations.len()
        ))
        .into());
    }

    progress.set_message("Complete!");
    progress.set_position(100);
    progress.finish_with_message("Schedule generated");

    Ok(ScheduleResponse {
        success: validation.is_valid,
        grid,
        statistics: stats,
        validation,
    })
}

fn sections_of(request: &ScheduleRequest) -> Vec<SectionLabel> {
    request.sections.iter().map(|s| SectionLabel(s.clone())).collect()
}

fn run_greedy(request: &ScheduleRequest) -> Result<(Grid, Statistics), EngineError> {
    let start = Instant::now();
    let sections = sections_of(request);
    let mut grid = Grid::new(request.config.num_days(), request.config.periods_per_day);
    let oracle = Oracle::new(&request.faculty, &request.rooms);

    let home_rooms = fixed::assign_home_classrooms(&sections, &request.rooms)?;
    fixed::place_fixed_activities(
        &mut grid,
        &oracle,
        &sections,
        &request.subjects,
        &home_rooms,
        &request.config.fixed_slots,
    )?;

    for section in &sections {
        let batches = request.section_batches.get(section).cloned().unwrap_or_default();
        let home_room = home_rooms.get(section).expect("every section was assigned a home room");
        greedy::fill_section(&mut grid, &oracle, &request.config, section, &request.subjects, &batches, home_room)?;
    }

    info!(sections = sections.len(), "greedy placement complete");

    Ok((
        grid,
        Statistics {
            backtrack_count: 0,
            attempts: 0,
            generation_time_ms: start.elapsed().as_millis() as u64,
        },
    ))
}

fn run_backtracking(request: &ScheduleRequest) -> Result<(Grid, Statistics), EngineError> {
    let start = Instant::now();
    let sections = sections_of(request);
    let mut grid = Grid::new(request.config.num_days(), request.config.periods_per_day);
    let oracle = Oracle::new(&request.faculty, &request.rooms);
    let deadline = start + Duration::from_secs(request.config.timeout_seconds);

    let home_rooms = fixed::assign_home_classrooms(&sections, &request.rooms)?;
    fixed::place_fixed_activities(
        &mut grid,
        &oracle,
        &sections,
        &request.subjects,
        &home_rooms,
        &request.config.fixed_slots,
    )?;

    let mut total_backtracks = 0u64;
    let mut total_attempts = 0u64;

    for section in &sections {
        let stats = backtracking::schedule_backtracking(&mut grid, &oracle, &request.config, section, &request.subjects, deadline)?;
        total_backtracks += stats.backtrack_count;
        total_attempts += stats.attempts;
    }

    Ok((
        grid,
        Statistics {
            backtrack_count: total_backtracks,
            attempts: total_attempts,
            generation_time_ms: start.elapsed().as_millis() as u64,
        },
    ))
}

fn run_evolutionary(request: &ScheduleRequest) -> (Grid, Statistics) {
    let start = Instant::now();
    let sections: Vec<_> = sections_of(request)
        .into_iter()
        .map(|s| {
            let batches = request.section_batches.get(&s).cloned().unwrap_or_default();
            (s, batches)
        })
        .collect();

    let (grid, _report, success, generations) =
        evolutionary::schedule_evolutionary(&sections, &request.subjects, &request.faculty, &request.rooms, &request.config);

    if !success {
        warn!(generations, "evolutionary search did not reach the success threshold");
    }

    (
        grid,
        Statistics {
            backtrack_count: 0,
            attempts: generations,
            generation_time_ms: start.elapsed().as_millis() as u64,
        },
    )
}

/// Tries greedy, then backtracking, then evolutionary, keeping the first
/// success. Evolutionary is always accepted — it is the last resort and
/// scores rather than rejects remaining conflicts.
fn run_hybrid(request: &ScheduleRequest, progress: &ProgressBar) -> Result<(Grid, Statistics, bool), EngineError> {
    progress.set_message("Trying greedy placement...");
    match run_greedy(request) {
        Ok((grid, stats)) => return Ok((grid, stats, true)),
        Err(e) => warn!(error = %e, "greedy placement failed, falling back to backtracking"),
    }

    progress.set_message("Trying backtracking search...");
    match run_backtracking(request) {
        Ok((grid, stats)) => return Ok((grid, stats, true)),
        Err(e) => warn!(error = %e, "backtracking search failed, falling back to evolutionary search"),
    }

    progress.set_message("Trying evolutionary search...");
    let (grid, stats) = run_evolutionary(request);
    Ok((grid, stats, false))
}
