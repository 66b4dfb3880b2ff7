//! Weekly class-timetable engine for an engineering college department.
//!
//! Given a catalog of sections, subjects, faculty and rooms, this crate
//! produces a conflict-free weekly Grid: every section's theory and lab
//! hours placed into periods, rooms and faculty assignments that respect
//! teacher qualifications, room types, mandatory fixed activities, and the
//! structural rules that make a timetable readable by a human (lab blocks
//! are two contiguous periods, a section's day has no gaps, and so on).
//!
//! # Algorithm overview
//!
//! Four interchangeable placement strategies share the same Grid and
//! Feasibility Oracle core:
//! 1. **Greedy**: fixed activities first, then a smooth weighted
//!    round-robin fill per section/day.
//! 2. **Backtracking**: exhaustive search with a wall-clock deadline.
//! 3. **Evolutionary**: a genetic search that scores rather than rejects
//!    conflicts, useful when no fully clean schedule exists.
//! 4. **Hybrid**: try greedy, then backtracking, then evolutionary.
//!
//! # Example
//!
//! ```no_run
//! use timetable_engine::parser::load_request_from_dir;
//! use timetable_engine::scheduler::generate_schedule;
//! use std::path::Path;
//!
//! let request = load_request_from_dir(Path::new("./data/demo"), 4, "AIDS").unwrap();
//! let response = generate_schedule(&request, false).unwrap();
//! println!("Score: {}", response.validation.score);
//! ```

pub mod error;
pub mod grid;
pub mod oracle;
pub mod parser;
pub mod reporter;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{EngineError, Result};
