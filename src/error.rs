use std::error::Error;
use std::fmt;
use std::io;

/// An error that occurs while loading a model or running inference over it.
#[derive(Debug)]
pub enum HmmError {
    /// An I/O error
    Io(io::Error),
    /// A model table line that could not be parsed
    Format(String),
    /// A state with no row in the transition table
    UnknownState(String),
    /// A state with no emission entries, encountered while sampling
    EmptyDistribution(String),
}

pub type Result<T> = ::std::result::Result<T, HmmError>;

impl fmt::Display for HmmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            HmmError::Io(ref err) => write!(f, "IO error: {}", err),
            HmmError::Format(ref s) => write!(f, "Malformed table line: {}", s),
            HmmError::UnknownState(ref s) => write!(f, "Unknown state: {}", s),
            HmmError::EmptyDistribution(ref s) => {
                write!(f, "State has no emission entries: {}", s)
            }
        }
    }
}

impl Error for HmmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            HmmError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for HmmError {
    fn from(err: io::Error) -> HmmError {
        HmmError::Io(err)
    }
}
