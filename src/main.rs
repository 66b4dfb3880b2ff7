use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use timetable_engine::error::EngineError;
use timetable_engine::parser::load_request_from_dir;
use timetable_engine::reporter::{generate_json_summary, generate_reports, OutputFormat};
use timetable_engine::scheduler::generate_schedule;
use timetable_engine::types::{Algorithm, ScheduleResponse};
use timetable_engine::validator;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "timetable-engine")]
#[command(about = "Constraint-based weekly class timetable scheduling engine")]
#[command(version)]
struct Cli {
    /// Turn on verbose structured tracing
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a schedule from a catalog directory
    Schedule {
        #[arg(long)]
        data: PathBuf,

        #[arg(long, default_value = "./output")]
        output: PathBuf,

        #[arg(long, default_value_t = 4)]
        semester: u32,

        #[arg(long, default_value = "AIDS")]
        branch: String,

        /// Comma-separated algorithm override: greedy, backtracking, hybrid, evolutionary
        #[arg(long)]
        algorithm: Option<String>,

        /// json, markdown, text, csv, html, or all
        #[arg(long, default_value = "all")]
        format: String,

        /// Suppress progress output, print a JSON summary only
        #[arg(long)]
        quiet: bool,
    },

    /// Re-validate a previously generated schedule against its catalog
    Validate {
        #[arg(long)]
        schedule: PathBuf,

        #[arg(long)]
        data: PathBuf,

        #[arg(long)]
        verbose: bool,
    },

    /// Render reports from a previously generated schedule
    Report {
        #[arg(long)]
        schedule: PathBuf,

        #[arg(long)]
        data: PathBuf,

        #[arg(long, default_value = "markdown")]
        format: String,

        #[arg(long)]
        section: Option<String>,
    },

    /// Run with bundled sample data, generating it on first run if absent
    Demo {
        #[arg(long, default_value_t = 4)]
        semester: u32,

        #[arg(long, default_value = "AIDS")]
        branch: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Schedule {
            data,
            output,
            semester,
            branch,
            algorithm,
            format,
            quiet,
        } => run_schedule(&data, &output, semester, &branch, algorithm.as_deref(), &format, quiet),
        Commands::Validate { schedule, data, verbose } => run_validate(&schedule, &data, verbose),
        Commands::Report { schedule, data, format, section } => run_report(&schedule, &data, &format, section),
        Commands::Demo { semester, branch } => run_demo(semester, &branch),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<EngineError>() {
        Some(EngineError::InputError(_))
        | Some(EngineError::UnknownSubject { .. })
        | Some(EngineError::NoQualifiedFaculty { .. })
        | Some(EngineError::InsufficientClassrooms { .. })
        | Some(EngineError::DuplicateId { .. })
        | Some(EngineError::FileRead { .. })
        | Some(EngineError::JsonParse { .. })
        | Some(EngineError::TomlParse { .. }) => 2,
        Some(EngineError::FixedSlotInfeasible { .. }) | Some(EngineError::HoursUnmet { .. }) | Some(EngineError::Timeout { .. }) => 1,
        Some(EngineError::InternalInvariantViolation(_)) => 1,
        None => 1,
    }
}

fn parse_algorithm(s: &str) -> Option<Algorithm> {
    match s.to_ascii_lowercase().as_str() {
        "greedy" => Some(Algorithm::Greedy),
        "backtracking" => Some(Algorithm::Backtracking),
        "evolutionary" => Some(Algorithm::Evolutionary),
        "hybrid" => Some(Algorithm::Hybrid),
        _ => None,
    }
}

fn run_schedule(data: &PathBuf, output: &PathBuf, semester: u32, branch: &str, algorithm: Option<&str>, format: &str, quiet: bool) -> Result<()> {
    let mut request = load_request_from_dir(data, semester, branch).context("failed to load catalog")?;

    if let Some(algo) = algorithm {
        request.config.algorithm = parse_algorithm(algo).ok_or_else(|| anyhow::anyhow!("unknown algorithm '{algo}'"))?;
    }

    if !quiet {
        println!(
            "Loaded {} sections, {} subjects, {} faculty, {} rooms",
            request.sections.len(),
            request.subjects.len(),
            request.faculty.len(),
            request.rooms.len()
        );
    }

    let response = generate_schedule(&request, quiet)?;
    let generated_at = chrono::Utc::now().to_rfc3339();

    let formats = OutputFormat::parse_list(format);
    generate_reports(&request, &response, output, &formats, &generated_at)?;

    if quiet {
        println!("{}", generate_json_summary(&request, &response)?);
    } else {
        print_summary(&response);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_validate(schedule_path: &PathBuf, data: &PathBuf, verbose: bool) -> Result<()> {
    let request = load_request_from_dir(data, 0, "")?;
    let response: ScheduleResponse = load_response(schedule_path)?;

    let report = validator::validate(
        &response.grid,
        &request.subjects,
        request.config.max_consecutive_theory,
        request.config.limit_first_period,
    );

    if report.is_valid {
        println!("{}", "Schedule is valid".green().bold());
    } else {
        println!("{}", "Schedule has hard violations".red().bold());
        for v in &report.hard_violations {
            println!("  - [{}] {}", v.kind, v.message);
        }
    }

    if verbose {
        println!("\n{}", "Soft violations:".bold());
        for v in &report.soft_violations {
            println!("  - [{}] -{}: {}", v.kind, v.penalty, v.message);
        }
    }

    println!("\nScore: {}", report.score);
    Ok(())
}

fn run_report(schedule_path: &PathBuf, data: &PathBuf, format: &str, section: Option<String>) -> Result<()> {
    let request = load_request_from_dir(data, 0, "")?;
    let response: ScheduleResponse = load_response(schedule_path)?;

    if let Some(section_name) = section {
        if !request.sections.contains(&section_name) {
            println!("Section '{}' not found", section_name);
            return Ok(());
        }
        let md = timetable_engine::reporter::generate_markdown_report(&request, &response);
        println!("{}", md);
        return Ok(());
    }

    let generated_at = chrono::Utc::now().to_rfc3339();
    let formats = OutputFormat::parse_list(format);
    let tmp = std::env::temp_dir().join("timetable-engine-report");
    generate_reports(&request, &response, &tmp, &formats, &generated_at)?;
    print_summary(&response);
    Ok(())
}

fn run_demo(semester: u32, branch: &str) -> Result<()> {
    println!("{}", "Timetable Engine Demo".bold().cyan());
    println!("{}", "-".repeat(40));

    let demo_path = PathBuf::from("demos/sample");
    let output_path = PathBuf::from("output");

    if !demo_path.join("subjects.json").exists() {
        println!("{}", "Demo data not found, generating sample catalog...".yellow());
        create_demo_data(&demo_path)?;
    }

    run_schedule(&demo_path, &output_path, semester, branch, None, "all", false)
}

fn print_summary(response: &ScheduleResponse) {
    let banner = if response.validation.is_valid {
        "PASSED".green().bold()
    } else {
        "FAILED".red().bold()
    };
    println!("\nStatus: {}", banner);
    println!("Score: {}", response.validation.score);
    println!("Hard violations: {}", response.validation.hard_violations.len());
    println!("Soft violations: {}", response.validation.soft_violations.len());
    println!("Generation time: {} ms", response.statistics.generation_time_ms);
}

fn load_response(path: &PathBuf) -> Result<ScheduleResponse> {
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}

fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let subjects = serde_json::json!([
        {"code": "CS301", "name": "Data Structures", "short_name": "DS", "subject_type": "theory", "hours_per_week": 4},
        {"code": "CS302", "name": "Operating Systems", "short_name": "OS", "subject_type": "theory", "hours_per_week": 4},
        {"code": "CS303", "name": "Data Structures Lab", "short_name": "DSL", "subject_type": "lab", "hours_per_week": 2, "batches_required": true},
        {"code": "MA301", "name": "Engineering Mathematics", "short_name": "MATH", "subject_type": "theory", "hours_per_week": 3},
        {"code": "YOGA", "name": "Yoga", "short_name": "YOGA", "subject_type": "yoga", "hours_per_week": 1},
        {"code": "CLUB", "name": "Club Activity", "short_name": "CLUB", "subject_type": "club", "hours_per_week": 1},
        {"code": "MP", "name": "Mini Project", "short_name": "MP", "subject_type": "mini_project", "hours_per_week": 2}
    ]);
    std::fs::write(path.join("subjects.json"), serde_json::to_string_pretty(&subjects)?)?;

    let faculty = serde_json::json!([
        {"id": "F001", "name": "Dr. Rao", "subjects": ["CS301", "CS303"]},
        {"id": "F002", "name": "Prof. Iyer", "subjects": ["CS302"]},
        {"id": "F003", "name": "Dr. Shetty", "subjects": ["MA301"]},
        {"id": "F004", "name": "Ms. Kumar", "subjects": ["YOGA", "CLUB", "MP"]}
    ]);
    std::fs::write(path.join("faculty.json"), serde_json::to_string_pretty(&faculty)?)?;

    let rooms = serde_json::json!([
        {"number": "101", "name": "Classroom 101", "room_type": "classroom"},
        {"number": "102", "name": "Classroom 102", "room_type": "classroom"},
        {"number": "L1", "name": "Computer Lab 1", "room_type": "computer_lab"},
        {"number": "AR", "name": "Activity Room", "room_type": "activity_room"}
    ]);
    std::fs::write(path.join("rooms.json"), serde_json::to_string_pretty(&rooms)?)?;

    let sections = serde_json::json!([
        {"label": "A", "batches": ["A1", "A2"]},
        {"label": "B", "batches": ["B1", "B2"]}
    ]);
    std::fs::write(path.join("sections.json"), serde_json::to_string_pretty(&sections)?)?;

    println!("{}", "Demo catalog created successfully!".green());
    Ok(())
}
