use std::fmt::Display;

use super::coord::InputCoord;

/// A parsing error.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Error {
    /// The error message
    pub msg: String,

    /// The start of the offending range
    pub from: InputCoord,

    /// The end of the offending range
    pub to: InputCoord,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.from.line, self.from.col, self.msg)
    }
}

impl std::error::Error for Error {}
