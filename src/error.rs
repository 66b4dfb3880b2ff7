use crate::types::SlotKey;
use thiserror::Error;

/// Domain-specific errors for the timetable engine.
#[derive(Error, Debug)]
pub enum EngineError {
    // Input/parse errors
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("failed to parse TOML config '{file}': {message}")]
    TomlParse { file: String, message: String },

    /// Contradictory catalog: unknown subject codes, an empty faculty pool
    /// for a required subject, fewer classrooms than sections for
    /// home-room assignment, etc. Surfaced immediately; no partial Grid is
    /// produced.
    #[error("input error: {0}")]
    InputError(String),

    #[error("section '{section}' references unknown subject '{code}'")]
    UnknownSubject { section: String, code: String },

    #[error("subject '{code}' has no qualified faculty")]
    NoQualifiedFaculty { code: String },

    #[error("fewer classrooms ({available}) than sections ({needed}) for home-room assignment")]
    InsufficientClassrooms { needed: usize, available: usize },

    #[error("duplicate {id_type} id: {id}")]
    DuplicateId { id_type: String, id: String },

    // Placement/search errors
    /// A mandated slot (yoga, club, mini-project, ...) could not be filled.
    #[error("fixed slot for '{subject}' at {slot} could not be filled")]
    FixedSlotInfeasible { subject: String, slot: SlotKey },

    /// A section's window could not accommodate every subject's hours.
    #[error("section '{section}' has unmet hours for: {codes:?}")]
    HoursUnmet { section: String, codes: Vec<String> },

    #[error("scheduling deadline of {seconds}s exceeded")]
    Timeout { seconds: u64 },

    /// The validator found a hard violation on a Grid the placer reported
    /// as successful. This can only mean a bug in the placer or oracle; it
    /// is never raised for a placer-reported failure.
    #[error("internal invariant violation on a run reported successful: {0}")]
    InternalInvariantViolation(String),
}

/// Use anyhow::Result at application boundaries.
pub type Result<T> = anyhow::Result<T>;
