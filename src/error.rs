use core::fmt;
use thiserror::Error;

use crate::point::Position;

/// Which end of a query an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// Errors returned by a path query.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("{endpoint} position {position} out of map range ({width},{height})")]
    OutOfRange {
        endpoint: Endpoint,
        position: Position,
        width: usize,
        height: usize,
    },
}

/// Errors raised while building an [OccupancyGrid](crate::grid::OccupancyGrid).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("a {width}x{height} grid needs {expected} cells, buffer holds {actual}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("a {width}x{height} grid cannot be addressed")]
    TooLarge { width: usize, height: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown map symbol {symbol:?} at row {row}, column {column}")]
    UnknownCell {
        row: usize,
        column: usize,
        symbol: char,
    },
}
