//! Error types for the minimizer.
//!
//! Every failure in this crate is an invalid-input failure: there is no I/O
//! and nothing to retry. Errors are detected eagerly at the point of use and
//! abort the whole call, so a caller never sees a partially-computed
//! expression.

use thiserror::Error;

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Invalid-input errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid pattern symbol {0:?} (expected '0', '1' or '-')")]
    InvalidSymbol(char),

    #[error("don't-care in pattern {0} where only '0' and '1' are allowed")]
    UnexpectedDontCare(String),

    #[error("value {value} does not fit in {width} bits")]
    ValueOutOfRange { value: u32, width: usize },

    #[error("minterm {minterm} is out of range for {num_variables} variables")]
    MintermOutOfRange { minterm: u32, num_variables: usize },

    #[error("invalid bit width {0} (expected 1..=32)")]
    InvalidWidth(usize),

    #[error("invalid variable count {num_variables} (expected 1..={max})")]
    InvalidVariableCount { num_variables: usize, max: usize },

    #[error("pattern has {pattern} positions but {letters} letters were given")]
    LengthMismatch { pattern: usize, letters: usize },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}
