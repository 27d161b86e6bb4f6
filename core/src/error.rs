use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Errors that can occur while configuring, building, or loading a DAWG.
#[derive(Debug)]
pub enum DawgError {
    /// An indexing configuration value was invalid.
    InvalidConfig(String),

    /// A line limit exceeded the number of lines actually available.
    InvalidLineLimit(usize /* requested */, usize /* available */),

    /// A structural invariant of the automaton does not hold.
    InvariantViolation(String),

    /// A path expected to name a regular file did not.
    NotAFile(String),
}

impl Display for DawgError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidConfig(message) => write!(f, "Invalid index configuration: {message}"),
            Self::InvalidLineLimit(requested, available) => {
                write!(f, "Invalid line limit: {requested} exceeds the {available} lines available")
            }
            Self::InvariantViolation(message) => write!(f, "DAWG invariant violated: {message}"),
            Self::NotAFile(path) => write!(f, "{path} is not a file"),
        }
    }
}

impl Error for DawgError {}

/// A type alias for any kind of error. The error is boxed and must be `Send`, `Sync`, and `'static`.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A type alias for a `Result` with a [BoxError].
pub type BoxResult<T> = Result<T, BoxError>;
