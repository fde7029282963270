use thiserror::Error;

/// The central error type for the overrun application layer.
///
/// Buffer operations themselves never fail once a buffer exists; errors only
/// come from construction, configuration and trace script parsing.
#[derive(Error, Debug)]
pub enum OverrunError {
    #[error("Ring buffer error: {0}")]
    Ring(#[from] RingError),

    #[error("Trace script error: {0}")]
    Trace(#[from] TraceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors raised while constructing a ring buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    #[error("Invalid capacity {capacity}: a ring buffer needs at least one slot")]
    InvalidCapacity { capacity: usize },

    #[error("Invalid capacity {capacity}: at most {max} slots are supported")]
    CapacityTooLarge { capacity: usize, max: usize },

    #[error("Failed to allocate {capacity} slots")]
    AllocationFailed { capacity: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("line {line}: unknown operation '{op}' (expected put, get or drain)")]
    UnknownOperation { line: usize, op: String },

    #[error("line {line}: 'put' needs a value")]
    MissingValue { line: usize },

    #[error("line {line}: '{value}' is not a valid sample value")]
    InvalidValue { line: usize, value: String },

    #[error("line {line}: invalid range '{range}' (expected <start>..=<end> with start <= end)")]
    InvalidRange { line: usize, range: String },

    #[error("line {line}: script expands to more than {limit} operations")]
    TooManyOperations { line: usize, limit: usize },
}

impl TraceError {
    /// 1-based script line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            TraceError::UnknownOperation { line, .. }
            | TraceError::MissingValue { line }
            | TraceError::InvalidValue { line, .. }
            | TraceError::InvalidRange { line, .. }
            | TraceError::TooManyOperations { line, .. } => *line,
        }
    }
}

pub type Result<T> = std::result::Result<T, OverrunError>;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_CAPACITY_ERROR: u8 = 3;
pub const EXIT_TRACE_ERROR: u8 = 4;

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if let Some(overrun_err) = e.downcast_ref::<OverrunError>() {
        return match overrun_err {
            OverrunError::Config(_) => EXIT_CONFIG_ERROR,
            OverrunError::Ring(_) => EXIT_CAPACITY_ERROR,
            OverrunError::Trace(_) => EXIT_TRACE_ERROR,
            OverrunError::Other(inner) => get_exit_code(inner),
        };
    }

    // Direct enum unwraps fallback
    if e.downcast_ref::<RingError>().is_some() {
        return EXIT_CAPACITY_ERROR;
    }
    if e.downcast_ref::<TraceError>().is_some() {
        return EXIT_TRACE_ERROR;
    }

    EXIT_ERROR
}
