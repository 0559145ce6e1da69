use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SimulatorError {
    // Trace input errors
    MalformedTraceRecord { line: usize, content: String },

    // System errors
    IoError(std::io::Error),
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::MalformedTraceRecord { line, content } => {
                write!(f, "Malformed trace record at line {}: '{}'", line, content)
            },
            SimulatorError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for SimulatorError {}

impl From<std::io::Error> for SimulatorError {
    fn from(error: std::io::Error) -> Self {
        SimulatorError::IoError(error)
    }
}
