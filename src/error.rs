use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected {expected} grid rows, got {actual}")]
    RowCount { expected: usize, actual: usize },

    #[error("grid row {row} has {actual} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse {field} from {value:?}")]
    Parse { field: &'static str, value: String },

    #[error("input ended while reading {expected}")]
    UnexpectedEof { expected: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
